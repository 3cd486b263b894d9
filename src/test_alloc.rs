//! Instrumented allocator and element types used by the unit tests.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;
use std::rc::Rc;

use allocator_api2::alloc::{AllocError, Allocator, Global};

#[derive(Default)]
struct AllocatorState {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    budget: Cell<Option<usize>>,
}

/// Delegates to `Global`, counting successful allocations and deallocations.
/// Can be told to start failing after a number of further allocations.
#[derive(Clone, Default)]
pub(crate) struct CountingAllocator {
    state: Rc<AllocatorState>,
}

impl CountingAllocator {
    pub(crate) fn allocations(&self) -> usize {
        self.state.allocations.get()
    }

    pub(crate) fn deallocations(&self) -> usize {
        self.state.deallocations.get()
    }

    pub(crate) fn fail_after(&self, allocations: usize) {
        self.state.budget.set(Some(allocations));
    }

    pub(crate) fn never_fail(&self) {
        self.state.budget.set(None);
    }
}

unsafe impl Allocator for CountingAllocator {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        match self.state.budget.get() {
            Some(0) => return Err(AllocError),
            Some(n) => self.state.budget.set(Some(n - 1)),
            None => {}
        }

        let block = Global.allocate(layout)?;
        self.state.allocations.set(self.allocations() + 1);
        Ok(block)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.state.deallocations.set(self.deallocations() + 1);
        unsafe { Global.deallocate(ptr, layout) }
    }
}

#[derive(Default)]
pub(crate) struct Counters {
    constructed: Cell<usize>,
    destroyed: Cell<usize>,
    panic_on_clone: Cell<Option<usize>>,
}

impl Counters {
    pub(crate) fn new() -> Rc<Self> {
        Rc::default()
    }

    pub(crate) fn constructed(&self) -> usize {
        self.constructed.get()
    }

    pub(crate) fn destroyed(&self) -> usize {
        self.destroyed.get()
    }

    pub(crate) fn alive(&self) -> usize {
        self.constructed() - self.destroyed()
    }

    /// Makes the `k`-th next clone (1-based) panic.
    pub(crate) fn panic_on_clone(&self, k: usize) {
        self.panic_on_clone.set(Some(k));
    }
}

/// An element that reports its constructions and destructions.
pub(crate) struct Tracked {
    pub(crate) value: i32,
    counters: Rc<Counters>,
}

impl Tracked {
    pub(crate) fn new(value: i32, counters: &Rc<Counters>) -> Self {
        counters.constructed.set(counters.constructed() + 1);
        Self {
            value,
            counters: Rc::clone(counters),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if let Some(k) = self.counters.panic_on_clone.get() {
            if k <= 1 {
                self.counters.panic_on_clone.set(None);
                panic!("clone of {} failed", self.value);
            }
            self.counters.panic_on_clone.set(Some(k - 1));
        }

        Self::new(self.value, &self.counters)
    }

    /// Overwrites in place: no construction is counted.
    fn clone_from(&mut self, source: &Self) {
        self.value = source.value;
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.destroyed.set(self.counters.destroyed() + 1);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl core::fmt::Debug for Tracked {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.value.fmt(f)
    }
}
