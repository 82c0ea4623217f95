use crate::alloc::{AllocStrategy, Block, Heap};
use crate::error::Error;
use std::cell::Cell;
use std::mem::MaybeUninit;
use std::rc::Rc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Default)]
pub struct AllocStats {
    pub allocations: Cell<usize>,
    pub deallocations: Cell<usize>,
    pub destroyed: Cell<usize>,
}

/// Heap strategy that counts lifecycle calls and fails above `limit` elements.
#[derive(Debug, Clone)]
pub struct TrackingAlloc {
    limit: usize,
    stats: Rc<AllocStats>,
}

impl TrackingAlloc {
    pub fn new() -> Self {
        Self::with_limit(usize::MAX)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            stats: Rc::new(AllocStats::default()),
        }
    }

    pub fn stats(&self) -> Rc<AllocStats> {
        Rc::clone(&self.stats)
    }
}

impl<T> AllocStrategy<T> for TrackingAlloc {
    fn allocate(&mut self, capacity: usize) -> Result<Block<T>, Error> {
        if capacity > self.limit {
            return Err(Error::OutOfMemory { requested: capacity });
        }
        let block = AllocStrategy::<T>::allocate(&mut Heap, capacity)?;
        self.stats.allocations.set(self.stats.allocations.get() + 1);
        Ok(block)
    }

    fn deallocate(&mut self, block: Block<T>) {
        self.stats.deallocations.set(self.stats.deallocations.get() + 1);
        drop(block);
    }

    unsafe fn destroy(&mut self, slot: &mut MaybeUninit<T>) {
        self.stats.destroyed.set(self.stats.destroyed.get() + 1);
        slot.assume_init_drop();
    }

    fn max_size(&self) -> usize {
        self.limit
    }
}
