use core::alloc::Layout;
use core::ptr::NonNull;

use allocator_api2::alloc::Allocator;
use allocator_api2::vec::Vec;

use crate::{TryReserveError, chunk};

/// The second level of indirection of a `Deque`: an array of nullable chunk handles.
///
/// Slots `lo..=hi` hold allocated chunks, every other slot is `None`.
/// The index owns its chunks and releases them when dropped, but never touches the elements
/// stored in them.
pub(crate) struct ChunkIndex<T, const N: usize, A: Allocator> {
    slots: Vec<Option<NonNull<T>>, A>,
    lo: usize,
    hi: usize,
}

impl<T, const N: usize, A: Allocator> ChunkIndex<T, N, A> {
    /// Creates an index of `3 * chunks` slots whose middle third is allocated.
    pub(crate) fn try_with_chunks_in(chunks: usize, alloc: A) -> Result<Self, TryReserveError> {
        debug_assert!(chunks > 0);

        let len = chunks
            .checked_mul(3)
            .ok_or(TryReserveError::CapacityOverflow)?;

        let mut slots = Vec::new_in(alloc);
        slots
            .try_reserve_exact(len)
            .map_err(|_| slots_error::<T>(len))?;
        slots.resize(len, None);

        let first = chunk::allocate::<T, N, _>(slots.allocator())?;
        slots[chunks] = Some(first);

        let mut this = Self {
            slots,
            lo: chunks,
            hi: chunks,
        };

        while this.hi + 1 < 2 * chunks {
            let chunk = chunk::allocate::<T, N, _>(this.allocator())?;
            this.hi += 1;
            this.slots[this.hi] = Some(chunk);
        }

        Ok(this)
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        self.slots.allocator()
    }

    #[inline]
    pub(crate) const fn lo(&self) -> usize {
        self.lo
    }

    #[inline]
    pub(crate) const fn hi(&self) -> usize {
        self.hi
    }

    /// The slot in the middle of the allocated window.
    #[inline]
    pub(crate) const fn middle(&self) -> usize {
        self.lo + (self.hi - self.lo) / 2
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Option<NonNull<T>>] {
        &self.slots
    }

    /// Links a fresh chunk right after `hi`, growing the index first if `hi` is the last slot.
    ///
    /// Returns how far the existing chunks moved, so that positions can be re-based.
    /// On failure nothing changes.
    pub(crate) fn reserve_back(&mut self) -> Result<usize, TryReserveError> {
        let chunk = chunk::allocate::<T, N, _>(self.allocator())?;

        let shift = if self.hi + 1 == self.slots.len() {
            self.grow_or_release(chunk)?
        } else {
            0
        };

        self.hi += 1;
        self.slots[self.hi] = Some(chunk);
        Ok(shift)
    }

    /// Links a fresh chunk right before `lo`, growing the index first if `lo` is the first slot.
    ///
    /// Returns how far the existing chunks moved, so that positions can be re-based.
    /// On failure nothing changes.
    pub(crate) fn reserve_front(&mut self) -> Result<usize, TryReserveError> {
        let chunk = chunk::allocate::<T, N, _>(self.allocator())?;

        let shift = if self.lo == 0 {
            self.grow_or_release(chunk)?
        } else {
            0
        };

        self.lo -= 1;
        self.slots[self.lo] = Some(chunk);
        Ok(shift)
    }

    fn grow_or_release(&mut self, chunk: NonNull<T>) -> Result<usize, TryReserveError> {
        self.grow().inspect_err(|_| unsafe {
            chunk::deallocate::<T, N, _>(self.slots.allocator(), chunk);
        })
    }

    /// Triples the slot array and centers the allocated window in it.
    fn grow(&mut self) -> Result<usize, TryReserveError> {
        let len = self.slots.len();
        let new_len = len
            .checked_mul(3)
            .ok_or(TryReserveError::CapacityOverflow)?;

        self.slots
            .try_reserve_exact(new_len - len)
            .map_err(|_| slots_error::<T>(new_len))?;
        self.slots.resize(new_len, None);

        let count = self.hi - self.lo + 1;
        let new_lo = (new_len - count) / 2;
        debug_assert!(new_lo > self.lo);

        self.slots.copy_within(self.lo..=self.hi, new_lo);
        self.slots[..new_lo].fill(None);
        self.slots[new_lo + count..].fill(None);

        let shift = new_lo - self.lo;
        self.lo = new_lo;
        self.hi = new_lo + count - 1;
        Ok(shift)
    }
}

impl<T, const N: usize, A: Allocator> Drop for ChunkIndex<T, N, A> {
    fn drop(&mut self) {
        for slot in self.lo..=self.hi {
            if let Some(chunk) = self.slots[slot].take() {
                unsafe { chunk::deallocate::<T, N, _>(self.slots.allocator(), chunk) };
            }
        }
    }
}

fn slots_error<T>(len: usize) -> TryReserveError {
    Layout::array::<Option<NonNull<T>>>(len)
        .map_or(TryReserveError::CapacityOverflow, |layout| {
            TryReserveError::AllocError { layout }
        })
}

#[cfg(test)]
mod tests {
    use allocator_api2::alloc::Global;

    use crate::TryReserveError;
    use crate::test_alloc::CountingAllocator;

    use super::ChunkIndex;

    fn allocated<const N: usize, A: allocator_api2::alloc::Allocator>(
        sut: &ChunkIndex<u8, N, A>,
    ) -> Vec<bool> {
        sut.slots().iter().map(Option::is_some).collect()
    }

    #[test]
    fn new_index_allocates_only_the_middle_third() {
        let sut = ChunkIndex::<u8, 4, _>::try_with_chunks_in(1, Global).unwrap();
        assert_eq!(allocated(&sut), [false, true, false]);
        assert_eq!((sut.lo(), sut.hi()), (1, 1));

        let sut = ChunkIndex::<u8, 4, _>::try_with_chunks_in(3, Global).unwrap();
        assert_eq!(
            allocated(&sut),
            [false, false, false, true, true, true, false, false, false]
        );
        assert_eq!((sut.lo(), sut.hi()), (3, 5));
        assert_eq!(sut.middle(), 4);
    }

    #[test]
    fn reserve_uses_free_slots_before_growing() {
        let mut sut = ChunkIndex::<u8, 4, _>::try_with_chunks_in(1, Global).unwrap();

        assert_eq!(sut.reserve_back(), Ok(0));
        assert_eq!(sut.reserve_front(), Ok(0));
        assert_eq!(allocated(&sut), [true, true, true]);
        assert_eq!((sut.lo(), sut.hi()), (0, 2));
    }

    #[test]
    fn growth_triples_and_recenters_preserving_order() {
        let mut sut = ChunkIndex::<u8, 4, _>::try_with_chunks_in(1, Global).unwrap();
        sut.reserve_back().unwrap();
        sut.reserve_front().unwrap();
        let before: Vec<_> = sut.slots().to_vec();

        let shift = sut.reserve_back().unwrap();
        assert_eq!(shift, 3);
        assert_eq!(sut.slots().len(), 9);
        assert_eq!((sut.lo(), sut.hi()), (3, 6));
        assert_eq!(&sut.slots()[3..6], before.as_slice());
        assert_eq!(
            allocated(&sut),
            [false, false, false, true, true, true, true, false, false]
        );
    }

    #[test]
    fn lopsided_growth_keeps_headroom_on_both_sides() {
        let mut sut = ChunkIndex::<u8, 1, _>::try_with_chunks_in(1, Global).unwrap();

        for _ in 0..1000 {
            let lo = sut.lo();
            let shift = sut.reserve_back().unwrap();
            assert_eq!(sut.lo(), lo + shift);
            assert!(sut.lo() > 0);
        }

        let free_front = sut.lo();
        let free_back = sut.slots().len() - 1 - sut.hi();
        assert!(free_front > 0 && free_back < sut.slots().len());
        assert_eq!(sut.hi() - sut.lo() + 1, 1001);
    }

    #[test]
    fn failed_growth_releases_the_new_chunk() {
        let alloc = CountingAllocator::default();
        let mut sut = ChunkIndex::<u8, 4, _>::try_with_chunks_in(1, alloc.clone()).unwrap();
        sut.reserve_back().unwrap();
        sut.reserve_front().unwrap();

        // the chunk allocation succeeds, the slot array allocation does not
        alloc.fail_after(1);
        let slots_before: Vec<_> = sut.slots().to_vec();
        assert!(matches!(
            sut.reserve_back(),
            Err(TryReserveError::AllocError { .. })
        ));
        assert_eq!(sut.slots(), slots_before.as_slice());
        assert_eq!((sut.lo(), sut.hi()), (0, 2));

        alloc.never_fail();
        drop(sut);
        assert_eq!(alloc.allocations(), alloc.deallocations());
    }

    #[test]
    fn failed_construction_releases_every_chunk() {
        let alloc = CountingAllocator::default();
        alloc.fail_after(3);

        let result = ChunkIndex::<u8, 4, _>::try_with_chunks_in(4, alloc.clone());
        assert!(result.is_err());
        assert_eq!(alloc.allocations(), 3);
        assert_eq!(alloc.allocations(), alloc.deallocations());
    }
}
