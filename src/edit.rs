//! Positional insertion and erasure.
//!
//! Both operations set the elements after the edit point aside, trim the
//! buffer back to the edit point, and push everything back in order. Cost is
//! linear in the number of elements after the edit point plus the number
//! inserted. Positions are logical indices; a cursor's [`index`] yields one.
//!
//! [`index`]: crate::Cursor::index

use crate::alloc::AllocStrategy;
use crate::circular_buffer::CircularBuffer;
use crate::cursor::CursorMut;
use crate::error::Error;
use crate::policy::FullPolicy;
use std::iter;
use std::ops::{Bound, RangeBounds};

impl<T, A: AllocStrategy<T>> CircularBuffer<T, A> {
    /// Removes the elements in `range`, keeping the order of the rest.
    ///
    /// Returns a cursor at the element that followed the range.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or ends past `len`.
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) -> CursorMut<'_, T, A> {
        let (start, end) = self.logical_range(range);
        let tail = self.take_tail(end);
        while self.len() > start {
            self.destroy_back();
        }
        for item in tail {
            self.construct_back(item);
        }
        self.cursor_at_mut(start)
    }

    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase_at(&mut self, index: usize) -> CursorMut<'_, T, A> {
        assert!(
            index < self.len(),
            "erase index {} out of bounds for length {}",
            index,
            self.len()
        );
        self.erase(index..=index)
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<CursorMut<'_, T, A>, Error> {
        self.insert_iter(index, iter::once(value))
    }

    /// Inserts `n` copies of `value` before logical `index`.
    pub fn insert_n(
        &mut self,
        index: usize,
        n: usize,
        value: T,
    ) -> Result<CursorMut<'_, T, A>, Error>
    where
        T: Clone,
    {
        self.insert_iter(index, iter::repeat(value).take(n))
    }

    /// Inserts `items` before logical `index`.
    ///
    /// Under the overwrite policy the capacity never changes: once the buffer
    /// fills, every further element pushed evicts the oldest one, so inserting
    /// into a full buffer drops elements from the front. Under the grow policy
    /// the storage is enlarged once, up front, and nothing is evicted.
    ///
    /// Returns a cursor at logical `index`, moved one step toward the front
    /// for every element evicted during the insert and saturating at the
    /// front. It lands on the first inserted element while any survives; when
    /// every inserted element is evicted it sits at the front, on a surviving
    /// tail element or at the end position of an empty buffer.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_iter<I: IntoIterator<Item = T>>(
        &mut self,
        index: usize,
        items: I,
    ) -> Result<CursorMut<'_, T, A>, Error> {
        assert!(
            index <= self.len(),
            "insert index {} out of bounds for length {}",
            index,
            self.len()
        );
        let items: Vec<T> = items.into_iter().collect();
        if self.policy() == FullPolicy::Grow {
            self.grow_for(items.len())?;
        }
        let tail = self.take_tail(index);
        let mut at = index;
        for item in items.into_iter().chain(tail) {
            if self.is_full() && self.capacity() > 0 {
                // the oldest element is about to be evicted
                at = at.saturating_sub(1);
            }
            self.push_back_overwriting(item);
        }
        Ok(self.cursor_at_mut(at.min(self.len())))
    }

    /// Pops every element from logical `at` onwards, returned in logical order.
    fn take_tail(&mut self, at: usize) -> Vec<T> {
        let mut tail = Vec::with_capacity(self.len() - at);
        while self.len() > at {
            match self.pop_back() {
                Some(item) => tail.push(item),
                None => break,
            }
        }
        tail.reverse();
        tail
    }

    fn logical_range<R: RangeBounds<usize>>(&self, range: R) -> (usize, usize) {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len(),
        };
        assert!(start <= end, "erase range starts at {} but ends at {}", start, end);
        assert!(
            end <= self.len(),
            "erase range end {} out of bounds for length {}",
            end,
            self.len()
        );
        (start, end)
    }
}
