use crate::alloc::{empty_block, AllocStrategy, Block, Heap};
use crate::error::Error;
use crate::policy::FullPolicy;
use crate::ring::Ring;
use log::{debug, trace};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem::{self, MaybeUninit};
use std::ops::{Index, IndexMut};

/// Fixed-capacity ring buffer with O(1) push and pop at both ends.
///
/// Storage is one block of `capacity` slots from the allocation strategy `A`.
/// The live elements run from `first` for `len` slots, wrapping at the end of
/// the block; `last` is the slot one past the newest element. An empty and a
/// full buffer both have `first == last` and are told apart by `len` alone.
///
/// When the buffer is full, pushes follow its [`FullPolicy`]: overwrite the
/// element at the opposite end, or grow the storage.
pub struct CircularBuffer<T, A: AllocStrategy<T> = Heap> {
    slots: Block<T>,
    first: usize,
    last: usize,
    len: usize,
    policy: FullPolicy,
    alloc: A,
}

impl<T> CircularBuffer<T> {
    /// Creates a buffer with no storage. Pushes are no-ops until it is
    /// reserved or switched to the grow policy.
    pub fn new() -> Self {
        Self::new_in(Heap)
    }

    /// Creates an empty buffer holding up to `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_in(capacity, Heap)
    }

    pub fn with_policy(capacity: usize, policy: FullPolicy) -> Result<Self, Error> {
        let mut buffer = Self::with_capacity(capacity)?;
        buffer.policy = policy;
        Ok(buffer)
    }

    /// Creates an empty, zero-capacity buffer that grows instead of overwriting.
    pub fn growing() -> Self {
        let mut buffer = Self::new();
        buffer.policy = FullPolicy::Grow;
        buffer
    }

    /// Creates a full buffer of `capacity` copies of `value`.
    pub fn from_elem(capacity: usize, value: T) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_elem_in(capacity, value, Heap)
    }

    /// Creates a full buffer whose capacity is the number of items.
    pub fn try_from_iter<I: IntoIterator<Item = T>>(items: I) -> Result<Self, Error> {
        Self::from_iter_in(items, Heap)
    }
}

impl<T, A: AllocStrategy<T>> CircularBuffer<T, A> {
    pub fn new_in(alloc: A) -> Self {
        Self {
            slots: empty_block(),
            first: 0,
            last: 0,
            len: 0,
            policy: FullPolicy::Overwrite,
            alloc,
        }
    }

    pub fn with_capacity_in(capacity: usize, mut alloc: A) -> Result<Self, Error> {
        let slots = alloc.allocate(capacity)?;
        Ok(Self {
            slots,
            first: 0,
            last: 0,
            len: 0,
            policy: FullPolicy::Overwrite,
            alloc,
        })
    }

    pub fn from_elem_in(capacity: usize, value: T, alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut buffer = Self::with_capacity_in(capacity, alloc)?;
        for _ in 0..capacity {
            buffer.construct_back(value.clone());
        }
        Ok(buffer)
    }

    pub fn from_iter_in<I: IntoIterator<Item = T>>(items: I, alloc: A) -> Result<Self, Error> {
        let items: Vec<T> = items.into_iter().collect();
        let mut buffer = Self::with_capacity_in(items.len(), alloc)?;
        for item in items {
            buffer.construct_back(item);
        }
        Ok(buffer)
    }

    #[inline]
    pub(crate) fn ring(&self) -> Ring {
        Ring::new(self.slots.len())
    }

    #[inline]
    pub(crate) fn first_slot(&self) -> usize {
        self.first
    }

    #[inline]
    pub(crate) fn last_slot(&self) -> usize {
        self.last
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Largest capacity the allocation strategy can provide.
    pub fn max_size(&self) -> usize {
        self.alloc.max_size()
    }

    pub fn policy(&self) -> FullPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: FullPolicy) {
        self.policy = policy;
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Slot holding logical `index`, if it is live.
    #[inline]
    pub(crate) fn slot_of(&self, index: usize) -> Option<usize> {
        (index < self.len).then(|| self.ring().add(self.first, index))
    }

    /// Returns the element at logical `index`; 0 is the oldest.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        let slot = self.slot_of(index)?;
        // SAFETY: `slot_of` only returns slots of live elements
        Some(unsafe { self.slots[slot].assume_init_ref() })
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot_of(index)?;
        // SAFETY: `slot_of` only returns slots of live elements
        Some(unsafe { self.slots[slot].assume_init_mut() })
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.get(self.len.checked_sub(1)?)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.get_mut(self.len.checked_sub(1)?)
    }

    /// Appends `item` as the newest element.
    ///
    /// On a full buffer the overwrite policy replaces the oldest element (a
    /// zero-capacity buffer ignores the push), and the grow policy doubles the
    /// capacity first. Only growth can fail.
    pub fn push_back(&mut self, item: T) -> Result<(), Error> {
        if self.is_full() && self.policy == FullPolicy::Grow {
            self.grow()?;
        }
        self.push_back_overwriting(item);
        Ok(())
    }

    /// Prepends `item` as the oldest element. Mirror image of [`push_back`].
    ///
    /// [`push_back`]: CircularBuffer::push_back
    pub fn push_front(&mut self, item: T) -> Result<(), Error> {
        if self.is_full() && self.policy == FullPolicy::Grow {
            self.grow()?;
        }
        if !self.is_full() {
            self.construct_front(item);
        } else if self.capacity() == 0 {
            trace!("Push into zero-capacity buffer ignored");
        } else {
            let first = self.ring().prev(self.first);
            // SAFETY: the buffer is full, so every slot holds a live element
            unsafe { self.alloc.destroy(&mut self.slots[first]) };
            self.alloc.construct(&mut self.slots[first], item);
            self.first = first;
            self.last = first;
            trace!("Overwrote newest element at slot {}", first);
        }
        Ok(())
    }

    pub(crate) fn push_back_overwriting(&mut self, item: T) {
        if !self.is_full() {
            self.construct_back(item);
        } else if self.capacity() == 0 {
            trace!("Push into zero-capacity buffer ignored");
        } else {
            let last = self.last;
            // SAFETY: the buffer is full, so every slot holds a live element
            unsafe { self.alloc.destroy(&mut self.slots[last]) };
            self.alloc.construct(&mut self.slots[last], item);
            self.last = self.ring().next(last);
            self.first = self.last;
            trace!("Overwrote oldest element at slot {}", last);
        }
    }

    /// Constructs `item` at `last`. The buffer must not be full.
    pub(crate) fn construct_back(&mut self, item: T) {
        debug_assert!(!self.is_full());
        let last = self.last;
        self.alloc.construct(&mut self.slots[last], item);
        self.last = self.ring().next(last);
        self.len += 1;
    }

    /// Constructs `item` before `first`. The buffer must not be full.
    fn construct_front(&mut self, item: T) {
        debug_assert!(!self.is_full());
        let first = self.ring().prev(self.first);
        self.alloc.construct(&mut self.slots[first], item);
        self.first = first;
        self.len += 1;
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.last = self.ring().prev(self.last);
        self.len -= 1;
        // SAFETY: the slot before `last` held the newest live element
        Some(unsafe { self.slots[self.last].assume_init_read() })
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let first = self.first;
        self.first = self.ring().next(first);
        self.len -= 1;
        // SAFETY: `first` held the oldest live element
        Some(unsafe { self.slots[first].assume_init_read() })
    }

    /// Destroys the newest element in place. The buffer must not be empty.
    pub(crate) fn destroy_back(&mut self) {
        debug_assert!(!self.is_empty());
        self.last = self.ring().prev(self.last);
        self.len -= 1;
        // SAFETY: the slot before `last` held the newest live element and is
        // now outside the live range
        unsafe { self.alloc.destroy(&mut self.slots[self.last]) };
    }

    /// Destroys every element. Capacity and storage are kept.
    pub fn clear(&mut self) {
        self.destroy_elements();
    }

    fn destroy_elements(&mut self) {
        let ring = self.ring();
        let (mut slot, len) = (self.first, self.len);
        // A panicking destructor leaks the remaining elements instead of
        // dropping them twice.
        self.len = 0;
        self.first = 0;
        self.last = 0;
        for _ in 0..len {
            // SAFETY: `slot` walks the `len` live elements starting at `first`
            unsafe { self.alloc.destroy(&mut self.slots[slot]) };
            slot = ring.next(slot);
        }
    }

    /// Replaces the storage with a block of `capacity` slots filled from `items`.
    ///
    /// The new block is allocated before anything is destroyed, so on error the
    /// buffer is unchanged.
    fn rebuild<I: Iterator<Item = T>>(&mut self, capacity: usize, items: I) -> Result<(), Error> {
        let fresh = self.alloc.allocate(capacity)?;
        self.destroy_elements();
        let old = mem::replace(&mut self.slots, fresh);
        self.alloc.deallocate(old);
        for item in items.take(capacity) {
            self.construct_back(item);
        }
        Ok(())
    }

    /// Replaces the contents with `n` copies of `value` in storage of exactly `n` slots.
    pub fn assign_n(&mut self, n: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        debug!("Assigning {} copies, capacity {} -> {}", n, self.capacity(), n);
        self.rebuild(n, (0..n).map(|_| value.clone()))
    }

    /// Replaces the contents with `items` in storage sized to the item count.
    pub fn assign<I: IntoIterator<Item = T>>(&mut self, items: I) -> Result<(), Error> {
        let items: Vec<T> = items.into_iter().collect();
        debug!(
            "Assigning {} items, capacity {} -> {}",
            items.len(),
            self.capacity(),
            items.len()
        );
        self.rebuild(items.len(), items.into_iter())
    }

    /// Rebuilds the storage with room for exactly `new_capacity` elements.
    ///
    /// Live elements are moved over in logical order. When `new_capacity` is
    /// smaller than the length, the newest elements beyond it are dropped.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<(), Error> {
        if new_capacity == self.capacity() {
            return Ok(());
        }
        let fresh = self.alloc.allocate(new_capacity)?;
        debug!(
            "Rebuilding storage: {} -> {} slots, {} live",
            self.capacity(),
            new_capacity,
            self.len
        );
        let mut old = mem::replace(&mut self.slots, fresh);
        let old_ring = Ring::new(old.len());
        let (mut slot, len) = (self.first, self.len);
        self.first = 0;
        self.last = 0;
        self.len = 0;
        for _ in 0..len {
            if self.len < new_capacity {
                // SAFETY: `slot` walks the live elements of the old block, and
                // each is read or destroyed exactly once
                let item = unsafe { old[slot].assume_init_read() };
                self.construct_back(item);
            } else {
                // SAFETY: as above
                unsafe { self.alloc.destroy(&mut old[slot]) };
            }
            slot = old_ring.next(slot);
        }
        self.alloc.deallocate(old);
        Ok(())
    }

    /// Exchanges storage, positions, policy and strategy with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Fallible form of [`Clone::clone`].
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        T: Clone,
        A: Clone,
    {
        let mut buffer = Self::with_capacity_in(self.capacity(), self.alloc.clone())?;
        buffer.policy = self.policy;
        for item in self.iter() {
            buffer.construct_back(item.clone());
        }
        Ok(buffer)
    }

    /// Fallible form of [`Clone::clone_from`]: takes `source`'s elements,
    /// capacity and policy.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), Error>
    where
        T: Clone,
    {
        self.rebuild(source.capacity(), source.iter().cloned())?;
        self.policy = source.policy;
        Ok(())
    }

    /// The live elements as two runs in logical order; the second is empty
    /// unless the elements wrap past the end of the block.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.live_ranges();
        // SAFETY: both ranges cover only live elements
        unsafe {
            (
                slice_assume_init_ref(&self.slots[front]),
                slice_assume_init_ref(&self.slots[back]),
            )
        }
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (front, back) = self.live_ranges();
        let (head, tail) = self.slots.split_at_mut(front.start);
        let front_len = front.end - front.start;
        // SAFETY: both ranges cover only live elements, and `back` lies
        // entirely before `front.start`
        unsafe {
            (
                slice_assume_init_mut(&mut tail[..front_len]),
                slice_assume_init_mut(&mut head[back]),
            )
        }
    }

    fn live_ranges(&self) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        if self.first + self.len <= self.capacity() {
            (self.first..self.first + self.len, 0..0)
        } else {
            (self.first..self.capacity(), 0..self.last)
        }
    }

    /// Rotates the storage so the elements start at slot 0 and returns them
    /// as one slice, ready for slice algorithms such as `sort`.
    pub fn make_contiguous(&mut self) -> &mut [T] {
        if self.first != 0 {
            self.slots.rotate_left(self.first);
            self.first = 0;
            self.last = self.ring().add(0, self.len);
        }
        // SAFETY: after the rotation the live elements occupy `0..len`
        unsafe { slice_assume_init_mut(&mut self.slots[..self.len]) }
    }
}

unsafe fn slice_assume_init_ref<T>(slice: &[MaybeUninit<T>]) -> &[T] {
    &*(slice as *const [MaybeUninit<T>] as *const [T])
}

unsafe fn slice_assume_init_mut<T>(slice: &mut [MaybeUninit<T>]) -> &mut [T] {
    &mut *(slice as *mut [MaybeUninit<T>] as *mut [T])
}

impl<T, A: AllocStrategy<T>> Drop for CircularBuffer<T, A> {
    fn drop(&mut self) {
        self.destroy_elements();
        let block = mem::replace(&mut self.slots, empty_block());
        self.alloc.deallocate(block);
    }
}

impl<T> Default for CircularBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, A: AllocStrategy<T> + Clone> Clone for CircularBuffer<T, A> {
    /// # Panics
    ///
    /// Panics if the allocation strategy cannot provide the storage.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(buffer) => buffer,
            Err(err) => panic!("Failed to clone buffer: {}", err),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            panic!("Failed to clone buffer: {}", err);
        }
    }
}

impl<T: PartialEq, A: AllocStrategy<T>> PartialEq for CircularBuffer<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, A: AllocStrategy<T>> Eq for CircularBuffer<T, A> {}

impl<T: Hash, A: AllocStrategy<T>> Hash for CircularBuffer<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|item| item.hash(state));
    }
}

impl<T, A: AllocStrategy<T>> Index<usize> for CircularBuffer<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("Out of bounds access")
    }
}

impl<T, A: AllocStrategy<T>> IndexMut<usize> for CircularBuffer<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("Out of bounds access")
    }
}

impl<T: fmt::Debug, A: AllocStrategy<T>> fmt::Debug for CircularBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("policy", &self.policy)
            .field("elements", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{init_logging, TrackingAlloc};

    fn contents<T: Clone, A: AllocStrategy<T>>(buffer: &CircularBuffer<T, A>) -> Vec<T> {
        buffer.iter().cloned().collect()
    }

    #[test]
    fn test_empty_buffers() {
        let buffer: CircularBuffer<i32> = CircularBuffer::new();
        assert!(buffer.is_empty());
        assert!(buffer.is_full());
        assert_eq!(buffer.capacity(), 0);

        let buffer: CircularBuffer<i32> = CircularBuffer::with_capacity(6).unwrap();
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert_eq!(buffer.capacity(), 6);

        let buffer = CircularBuffer::from_elem(6, 1).unwrap();
        assert!(!buffer.is_empty());
        assert!(buffer.is_full());
    }

    #[test]
    fn test_from_elem_equals_literal() {
        let buffer = CircularBuffer::from_elem(3, 2).unwrap();
        assert_eq!(buffer, CircularBuffer::from([2, 2, 2]));
    }

    #[test]
    fn test_push_front_and_back() {
        let mut buffer = CircularBuffer::with_capacity(6).unwrap();
        buffer.push_front(3).unwrap();
        buffer.push_back(4).unwrap();
        assert_eq!(buffer.front(), Some(&3));
        assert_eq!(buffer.back(), Some(&4));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[0], 3);
        assert_eq!(buffer[1], 4);
    }

    #[test]
    fn test_push_back_overwrites_oldest() {
        init_logging();
        let mut buffer = CircularBuffer::with_capacity(3).unwrap();
        for i in 1..=5 {
            buffer.push_back(i).unwrap();
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(contents(&buffer), vec![3, 4, 5]);
        assert_eq!(buffer.front(), Some(&3));
        assert_eq!(buffer.back(), Some(&5));
    }

    #[test]
    fn test_push_front_overwrites_newest() {
        let mut buffer = CircularBuffer::with_capacity(3).unwrap();
        for i in 1..=5 {
            buffer.push_front(i).unwrap();
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(contents(&buffer), vec![5, 4, 3]);
    }

    #[test]
    fn test_push_into_zero_capacity_is_ignored() {
        init_logging();
        let mut buffer = CircularBuffer::new();
        buffer.push_back(1).unwrap();
        buffer.push_front(2).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.pop_back(), None);
    }

    #[test]
    fn test_pop_both_ends() {
        let mut buffer = CircularBuffer::with_capacity(4).unwrap();
        buffer.extend([1, 2, 3, 4, 5]);
        assert_eq!(buffer.pop_front(), Some(2));
        assert_eq!(buffer.pop_back(), Some(5));
        assert_eq!(contents(&buffer), vec![3, 4]);
        assert_eq!(buffer.pop_back(), Some(4));
        assert_eq!(buffer.pop_front(), Some(3));
        assert_eq!(buffer.pop_front(), None);
        assert_eq!(buffer.front(), None);
        assert_eq!(buffer.back(), None);
    }

    #[test]
    fn test_get_after_wraparound() {
        let mut buffer = CircularBuffer::with_capacity(4).unwrap();
        buffer.extend(0..10);
        assert_eq!(buffer.get(0), Some(&6));
        assert_eq!(buffer.get(3), Some(&9));
        assert_eq!(buffer.get(4), None);
        *buffer.get_mut(1).unwrap() = 70;
        buffer[2] = 80;
        assert_eq!(contents(&buffer), vec![6, 70, 80, 9]);
    }

    #[test]
    #[should_panic(expected = "Out of bounds access")]
    fn test_index_out_of_bounds_panics() {
        let buffer = CircularBuffer::from([1, 2]);
        let _ = buffer[2];
    }

    #[test]
    fn test_clear_is_idempotent() {
        let alloc = TrackingAlloc::new();
        let stats = alloc.stats();
        let mut buffer = CircularBuffer::with_capacity_in(4, alloc).unwrap();
        buffer.extend(["a".to_string(), "b".to_string(), "c".to_string()]);
        buffer.clear();
        assert_eq!(stats.destroyed.get(), 3);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 4);
        assert_eq!(stats.destroyed.get(), 3);
        buffer.push_back("d".to_string()).unwrap();
        assert_eq!(contents(&buffer), vec!["d".to_string()]);
    }

    #[test]
    fn test_assign_n_replaces_storage() {
        init_logging();
        let mut buffer = CircularBuffer::from_elem(2, 1).unwrap();
        buffer.assign_n(3, 2).unwrap();
        assert_eq!(buffer, CircularBuffer::from([2, 2, 2]));
        assert!(buffer.capacity() >= 3);

        buffer.assign_n(1, 2).unwrap();
        assert_eq!(buffer, CircularBuffer::from([2]));
        assert_eq!(buffer.capacity(), 1);
    }

    #[test]
    fn test_assign_from_iter() {
        let mut buffer = CircularBuffer::with_capacity(2).unwrap();
        buffer.extend([9, 9, 9]);
        buffer.assign(vec![4, 5, 6, 7]).unwrap();
        assert_eq!(contents(&buffer), vec![4, 5, 6, 7]);
        assert!(buffer.is_full());
        buffer.push_back(8).unwrap();
        assert_eq!(contents(&buffer), vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_assign_failure_leaves_buffer_intact() {
        let mut buffer = CircularBuffer::with_capacity_in(2, TrackingAlloc::with_limit(2)).unwrap();
        buffer.extend([1, 2]);
        assert!(buffer.assign_n(3, 0).unwrap_err().is_out_of_memory());
        assert_eq!(contents(&buffer), vec![1, 2]);
    }

    #[test]
    fn test_reserve_preserves_logical_order() {
        let mut buffer = CircularBuffer::with_capacity(4).unwrap();
        buffer.extend(1..=6);
        buffer.reserve(8).unwrap();
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(contents(&buffer), vec![3, 4, 5, 6]);
        buffer.push_back(7).unwrap();
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_reserve_truncates_newest() {
        let alloc = TrackingAlloc::new();
        let stats = alloc.stats();
        let mut buffer = CircularBuffer::with_capacity_in(5, alloc).unwrap();
        buffer.extend((1..=5).map(|i| i.to_string()));
        buffer.reserve(2).unwrap();
        assert_eq!(contents(&buffer), vec!["1".to_string(), "2".to_string()]);
        assert!(buffer.is_full());
        assert_eq!(stats.destroyed.get(), 3);
        assert_eq!(stats.allocations.get(), 2);
        assert_eq!(stats.deallocations.get(), 1);
    }

    #[test]
    fn test_reserve_same_capacity_is_noop() {
        let alloc = TrackingAlloc::new();
        let stats = alloc.stats();
        let mut buffer = CircularBuffer::with_capacity_in(3, alloc).unwrap();
        buffer.push_back(1).unwrap();
        buffer.reserve(3).unwrap();
        assert_eq!(stats.allocations.get(), 1);
    }

    #[test]
    fn test_drop_releases_everything() {
        let alloc = TrackingAlloc::new();
        let stats = alloc.stats();
        {
            let mut buffer = CircularBuffer::with_capacity_in(3, alloc).unwrap();
            buffer.extend(vec![vec![1], vec![2], vec![3], vec![4]]);
            assert_eq!(stats.destroyed.get(), 1);
            buffer.push_front(vec![0]).unwrap();
            assert_eq!(stats.destroyed.get(), 2);
        }
        // one eviction per overwrite plus the three live at drop
        assert_eq!(stats.destroyed.get(), 5);
        assert_eq!(stats.allocations.get(), stats.deallocations.get());
    }

    #[test]
    fn test_equality_ignores_wrap_position() {
        let straight = CircularBuffer::from([1, 2, 3]);
        let mut wrapped = CircularBuffer::with_capacity(3).unwrap();
        wrapped.extend([7, 7, 1, 2, 3]);
        let mut roomy = CircularBuffer::with_capacity(10).unwrap();
        roomy.push_front(2).unwrap();
        roomy.push_front(1).unwrap();
        roomy.push_back(3).unwrap();

        assert_eq!(straight, straight);
        assert_eq!(straight, wrapped);
        assert_eq!(wrapped, straight);
        assert_eq!(straight, roomy);
        assert_ne!(CircularBuffer::from([1, 2]), CircularBuffer::from([2, 1]));
        assert_ne!(CircularBuffer::from([1, 2]), CircularBuffer::from([2, 1, 2]));
    }

    #[test]
    fn test_clone_keeps_capacity() {
        let mut buffer = CircularBuffer::with_capacity(5).unwrap();
        buffer.extend([1, 2]);
        let copy = buffer.clone();
        assert_eq!(copy, buffer);
        assert_eq!(copy.capacity(), 5);

        let mut target = CircularBuffer::from([9, 9, 9, 9, 9, 9, 9]);
        target.clone_from(&buffer);
        assert_eq!(target, buffer);
        assert_eq!(target.capacity(), 5);
    }

    #[test]
    fn test_swap_exchanges_contents() {
        let mut a = CircularBuffer::from([1, 2]);
        let mut b = CircularBuffer::with_policy(4, FullPolicy::Grow).unwrap();
        b.extend([10, 11]);
        a.swap(&mut b);
        assert_eq!(contents(&a), vec![10, 11]);
        assert_eq!(a.policy(), FullPolicy::Grow);
        assert_eq!(a.capacity(), 4);
        assert_eq!(b[0], 1);
        assert_eq!(b[1], 2);
        b.swap(&mut a);
        assert_eq!(contents(&a), vec![1, 2]);
    }

    #[test]
    fn test_as_slices_split_at_wrap() {
        let mut buffer = CircularBuffer::with_capacity(4).unwrap();
        buffer.extend(1..=6);
        let (front, back) = buffer.as_slices();
        assert_eq!(front, &[3, 4]);
        assert_eq!(back, &[5, 6]);

        let (front, back) = buffer.as_mut_slices();
        front[0] = 30;
        back[1] = 60;
        assert_eq!(contents(&buffer), vec![30, 4, 5, 60]);
    }

    #[test]
    fn test_make_contiguous_allows_sort() {
        let mut buffer = CircularBuffer::with_capacity(4).unwrap();
        buffer.extend(["x", "2", "3", "1", "0"].map(String::from));
        buffer.make_contiguous().sort();
        assert_eq!(buffer, CircularBuffer::from(["0", "1", "2", "3"].map(String::from)));
        assert_eq!(buffer.as_slices().1.len(), 0);
        buffer.push_back("4".to_string()).unwrap();
        assert_eq!(buffer.front().map(String::as_str), Some("1"));
    }

    #[test]
    fn test_max_size_comes_from_strategy() {
        let ints: CircularBuffer<i32> = CircularBuffer::growing();
        let bytes: CircularBuffer<u8> = CircularBuffer::growing();
        assert_eq!(ints.max_size(), isize::MAX as usize / 4);
        assert_eq!(bytes.max_size(), isize::MAX as usize);
        let bounded = CircularBuffer::<u8, _>::new_in(TrackingAlloc::with_limit(9));
        assert_eq!(bounded.max_size(), 9);
    }

    #[test]
    fn test_debug_format() {
        let buffer = CircularBuffer::from([1, 2]);
        let debug_str = format!("{:?}", buffer);
        assert!(debug_str.contains("CircularBuffer"));
        assert!(debug_str.contains("len: 2"));
        assert!(debug_str.contains("capacity: 2"));
        assert!(debug_str.contains("[1, 2]"));
    }
}
