//! Iterators over a [`CircularBuffer`] in logical order (oldest to newest).

use crate::alloc::{AllocStrategy, Heap};
use crate::circular_buffer::CircularBuffer;
use std::iter::FusedIterator;
use std::slice;

// ============================================================================
// Iter
// ============================================================================

/// An iterator over references to the elements of a `CircularBuffer`.
pub struct Iter<'a, T, A: AllocStrategy<T> = Heap> {
    buffer: &'a CircularBuffer<T, A>,
    front: usize,
    back: usize,
}

impl<'a, T, A: AllocStrategy<T>> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.buffer.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<'a, T, A: AllocStrategy<T>> DoubleEndedIterator for Iter<'a, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.buffer.get(self.back)
    }
}

impl<'a, T, A: AllocStrategy<T>> ExactSizeIterator for Iter<'a, T, A> {}
impl<'a, T, A: AllocStrategy<T>> FusedIterator for Iter<'a, T, A> {}

impl<'a, T, A: AllocStrategy<T>> Clone for Iter<'a, T, A> {
    fn clone(&self) -> Self {
        Iter {
            buffer: self.buffer,
            front: self.front,
            back: self.back,
        }
    }
}

// ============================================================================
// IterMut
// ============================================================================

/// An iterator over mutable references to the elements of a `CircularBuffer`.
pub struct IterMut<'a, T> {
    front: slice::IterMut<'a, T>,
    back: slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.front.next().or_else(|| self.back.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.front.len() + self.back.len();
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.back.next_back().or_else(|| self.front.next_back())
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}
impl<'a, T> FusedIterator for IterMut<'a, T> {}

// ============================================================================
// IntoIter
// ============================================================================

/// An owning iterator over the elements of a `CircularBuffer`.
pub struct IntoIter<T, A: AllocStrategy<T> = Heap> {
    buffer: CircularBuffer<T, A>,
}

impl<T, A: AllocStrategy<T>> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len();
        (remaining, Some(remaining))
    }
}

impl<T, A: AllocStrategy<T>> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.buffer.pop_back()
    }
}

impl<T, A: AllocStrategy<T>> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: AllocStrategy<T>> FusedIterator for IntoIter<T, A> {}

// ============================================================================
// Buffer entry points
// ============================================================================

impl<T, A: AllocStrategy<T>> CircularBuffer<T, A> {
    /// Returns an iterator over the elements, oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter {
            buffer: self,
            front: 0,
            back: self.len(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back) = self.as_mut_slices();
        IterMut {
            front: front.iter_mut(),
            back: back.iter_mut(),
        }
    }
}

impl<'a, T, A: AllocStrategy<T>> IntoIterator for &'a CircularBuffer<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: AllocStrategy<T>> IntoIterator for &'a mut CircularBuffer<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A: AllocStrategy<T>> IntoIterator for CircularBuffer<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { buffer: self }
    }
}

impl<T, A: AllocStrategy<T>> Extend<T> for CircularBuffer<T, A> {
    /// Pushes every item to the back under the buffer's full policy.
    ///
    /// # Panics
    ///
    /// Panics if the grow policy cannot allocate.
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            if let Err(err) = self.push_back(item) {
                panic!("Failed to extend buffer: {}", err);
            }
        }
    }
}

impl<T> FromIterator<T> for CircularBuffer<T> {
    /// Collects into a full buffer sized to the item count.
    ///
    /// # Panics
    ///
    /// Panics if the storage cannot be allocated.
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        match Self::try_from_iter(items) {
            Ok(buffer) => buffer,
            Err(err) => panic!("Failed to collect buffer: {}", err),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for CircularBuffer<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for CircularBuffer<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}
