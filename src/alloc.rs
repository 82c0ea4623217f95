//! Allocation strategies for buffer storage.
//!
//! A buffer never touches the global allocator directly: every block it owns
//! comes from an [`AllocStrategy`], and every element it stores is constructed
//! and destroyed through one.

use crate::error::Error;
use log::debug;
use std::mem::{self, MaybeUninit};

/// A block of uninitialized element slots.
pub type Block<T> = Box<[MaybeUninit<T>]>;

/// Storage lifecycle capability consumed by [`CircularBuffer`](crate::CircularBuffer).
pub trait AllocStrategy<T> {
    /// Allocates a block of exactly `capacity` uninitialized slots.
    fn allocate(&mut self, capacity: usize) -> Result<Block<T>, Error>;

    /// Releases a block. Every slot must already be destroyed.
    fn deallocate(&mut self, block: Block<T>) {
        drop(block);
    }

    fn construct(&mut self, slot: &mut MaybeUninit<T>, value: T) {
        slot.write(value);
    }

    /// Drops the element held in `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live element, and must not be read again until it
    /// is reconstructed.
    unsafe fn destroy(&mut self, slot: &mut MaybeUninit<T>) {
        slot.assume_init_drop();
    }

    /// Largest element count this strategy can ever hand out.
    fn max_size(&self) -> usize {
        max_elements::<T>()
    }
}

/// Element-count limit imposed by the address space.
pub fn max_elements<T>() -> usize {
    match mem::size_of::<T>() {
        0 => usize::MAX,
        size => isize::MAX as usize / size,
    }
}

pub(crate) fn empty_block<T>() -> Block<T> {
    Vec::new().into_boxed_slice()
}

/// The global allocator, with allocation failure reported instead of aborting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heap;

impl<T> AllocStrategy<T> for Heap {
    fn allocate(&mut self, capacity: usize) -> Result<Block<T>, Error> {
        if capacity > max_elements::<T>() {
            return Err(Error::CapacityOverflow);
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::OutOfMemory { requested: capacity })?;
        slots.resize_with(capacity, MaybeUninit::uninit);
        Ok(slots.into_boxed_slice())
    }
}

/// Heap allocation capped at a fixed element count.
///
/// Requests above the cap fail with [`Error::OutOfMemory`], which makes the
/// cap behave like a memory budget for a single buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounded {
    limit: usize,
}

impl Bounded {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for Bounded {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl<T> AllocStrategy<T> for Bounded {
    fn allocate(&mut self, capacity: usize) -> Result<Block<T>, Error> {
        if capacity > self.limit {
            debug!("Refusing block of {} elements (limit {})", capacity, self.limit);
            return Err(Error::OutOfMemory { requested: capacity });
        }
        AllocStrategy::<T>::allocate(&mut Heap, capacity)
    }

    fn max_size(&self) -> usize {
        self.limit.min(max_elements::<T>())
    }
}
