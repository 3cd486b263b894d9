use core::alloc::Layout;
use core::ptr::NonNull;

use allocator_api2::alloc::Allocator;

use crate::TryReserveError;

/// Storage layout of a chunk: `N` contiguous, possibly uninitialized, slots of `T`.
#[inline]
pub(crate) fn layout<T, const N: usize>() -> Result<Layout, TryReserveError> {
    Layout::array::<T>(N).map_err(|_| TryReserveError::CapacityOverflow)
}

/// Obtains the raw storage for one chunk. No slot is initialized.
pub(crate) fn allocate<T, const N: usize, A: Allocator>(
    alloc: &A,
) -> Result<NonNull<T>, TryReserveError> {
    let layout = layout::<T, N>()?;
    alloc
        .allocate(layout)
        .map(NonNull::cast)
        .map_err(|_| TryReserveError::AllocError { layout })
}

/// Returns a chunk to the allocator.
///
/// # Safety
/// `chunk` must come from [`allocate`] with the same `T`, `N` and allocator, and every element
/// stored in it must already be dropped or moved out.
pub(crate) unsafe fn deallocate<T, const N: usize, A: Allocator>(alloc: &A, chunk: NonNull<T>) {
    // the layout was valid when the chunk was allocated
    let layout = unsafe { Layout::array::<T>(N).unwrap_unchecked() };
    unsafe { alloc.deallocate(chunk.cast(), layout) }
}

#[cfg(test)]
mod tests {
    use allocator_api2::alloc::Global;

    use super::{allocate, deallocate, layout};

    #[test]
    fn layout_spans_the_whole_chunk() {
        let sut = layout::<u64, 8>().unwrap();
        assert_eq!(sut.size(), 64);
        assert_eq!(sut.align(), core::mem::align_of::<u64>());
    }

    #[test]
    fn allocated_chunk_is_writable_in_every_slot() {
        let chunk = allocate::<u32, 16, _>(&Global).unwrap();

        unsafe {
            for i in 0..16 {
                chunk.as_ptr().add(i).write(i as u32 * 3);
            }

            for i in 0..16 {
                assert_eq!(chunk.as_ptr().add(i).read(), i as u32 * 3);
            }

            deallocate::<u32, 16, _>(&Global, chunk);
        }
    }

    #[test]
    fn zero_sized_elements_get_a_dangling_chunk() {
        let chunk = allocate::<(), 512, _>(&Global).unwrap();
        unsafe { deallocate::<(), 512, _>(&Global, chunk) };
    }
}
