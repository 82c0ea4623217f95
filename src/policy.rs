//! What a push does when the buffer is already full.

use crate::alloc::AllocStrategy;
use crate::circular_buffer::CircularBuffer;
use crate::error::Error;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Behavior of `push_back`/`push_front` on a full buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FullPolicy {
    /// Evict the element at the opposite end. Capacity never changes.
    #[default]
    Overwrite,
    /// Double the capacity (0 grows to 1), then push.
    Grow,
}

impl FullPolicy {
    /// Capacity the grow policy moves to from `current`.
    pub fn next_capacity(current: usize) -> Result<usize, Error> {
        match current {
            0 => Ok(1),
            c => c.checked_mul(2).ok_or(Error::CapacityOverflow),
        }
    }
}

impl FromStr for FullPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("overwrite") {
            Ok(FullPolicy::Overwrite)
        } else if s.eq_ignore_ascii_case("grow") {
            Ok(FullPolicy::Grow)
        } else {
            Err(Error::Config(format!(
                "Unknown full policy '{}'. Use 'overwrite' or 'grow'",
                s
            )))
        }
    }
}

impl fmt::Display for FullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FullPolicy::Overwrite => write!(f, "overwrite"),
            FullPolicy::Grow => write!(f, "grow"),
        }
    }
}

impl<T, A: AllocStrategy<T>> CircularBuffer<T, A> {
    /// Grows the storage by one doubling step.
    pub(crate) fn grow(&mut self) -> Result<(), Error> {
        let new_capacity = FullPolicy::next_capacity(self.capacity())?;
        debug!(
            "Growing buffer from {} to {} slots",
            self.capacity(),
            new_capacity
        );
        self.reserve(new_capacity)
    }

    /// Grows until `additional` more elements fit without overwriting.
    ///
    /// Ends at the same capacity a run of single growth-triggering pushes
    /// would reach, but rebuilds the storage at most once.
    pub(crate) fn grow_for(&mut self, additional: usize) -> Result<(), Error> {
        let needed = self
            .len()
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        let mut capacity = self.capacity();
        while capacity < needed {
            capacity = FullPolicy::next_capacity(capacity)?;
        }
        if capacity != self.capacity() {
            debug!(
                "Growing buffer from {} to {} slots for {} new elements",
                self.capacity(),
                capacity,
                additional
            );
        }
        self.reserve(capacity)
    }
}
