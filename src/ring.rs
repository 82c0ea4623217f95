//! Wraparound position arithmetic over a storage block of `capacity` slots.
//!
//! Slots are addressed `0..capacity`. Every function here is total: callers
//! keep `n <= capacity` and positions inside the block.

/// Boundaries of a ring of slots `[0, capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ring {
    capacity: usize,
}

impl Ring {
    #[inline]
    pub(crate) const fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Position after `p`, wrapping to the start at the end of the block.
    #[inline]
    pub(crate) fn next(&self, p: usize) -> usize {
        let p = p + 1;
        if p == self.capacity {
            0
        } else {
            p
        }
    }

    /// Position before `p`, wrapping to the last slot from the start.
    #[inline]
    pub(crate) fn prev(&self, p: usize) -> usize {
        if p == 0 {
            self.capacity - 1
        } else {
            p - 1
        }
    }

    /// `p` advanced by `n` with at most one wrap.
    #[inline]
    pub(crate) fn add(&self, p: usize, n: usize) -> usize {
        debug_assert!(n <= self.capacity);
        if n < self.capacity - p {
            p + n
        } else {
            p + n - self.capacity
        }
    }

    /// `p` retreated by `n` with at most one wrap.
    #[inline]
    pub(crate) fn sub(&self, p: usize, n: usize) -> usize {
        debug_assert!(n <= self.capacity);
        if n > p {
            p + self.capacity - n
        } else {
            p - n
        }
    }

    /// Flattened offset of slot `p` from `first`.
    ///
    /// A slot below `first` has wrapped past the end of the block.
    #[inline]
    pub(crate) fn linearize(&self, first: usize, p: usize) -> usize {
        if p < first {
            p + (self.capacity - first)
        } else {
            p - first
        }
    }
}
