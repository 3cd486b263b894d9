use core::cmp::Ordering;
use core::ptr::NonNull;

use crate::{ChunkCapacity, Usize};

/// A logical element position: the index slot of a chunk and the offset of an element within it.
///
/// Every cursor and iterator of the crate is built on top of this arithmetic.
/// Positions order by slot first and offset second, which is the logical order
/// of elements in the deque as long as both positions come from the same index layout.
pub(crate) struct Position<const N: usize>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) slot: usize,
    pub(crate) offset: usize,
}

impl<const N: usize> Position<N>
where
    Usize<N>: ChunkCapacity,
{
    #[inline]
    pub(crate) const fn new(slot: usize, offset: usize) -> Self {
        debug_assert!(offset < N);
        Self { slot, offset }
    }

    #[inline]
    pub(crate) fn step_forward(&mut self) {
        self.offset += 1;
        if self.offset == N {
            self.slot += 1;
            self.offset = 0;
        }
    }

    #[inline]
    pub(crate) fn step_back(&mut self) {
        if self.offset == 0 {
            self.slot -= 1;
            self.offset = N;
        }
        self.offset -= 1;
    }

    /// Moves forward by `count` elements, crossing as many chunks as needed.
    #[inline]
    pub(crate) fn add(self, count: usize) -> Self {
        let flat = self.offset + count;
        if flat < N {
            return Self::new(self.slot, flat);
        }

        Self::new(self.slot + flat / N, flat % N)
    }

    /// Moves by a signed `delta`; chunk crossings round toward negative infinity.
    pub(crate) fn offset_by(self, delta: isize) -> Self {
        let flat = self.offset as isize + delta;
        if (0..N as isize).contains(&flat) {
            return Self::new(self.slot, flat as usize);
        }

        let chunks = flat.div_euclid(N as isize);
        let offset = flat.rem_euclid(N as isize) as usize;
        Self::new(self.slot.wrapping_add_signed(chunks), offset)
    }

    /// Number of elements from `self` up to (excluding) `other`, negative if `other` comes first.
    #[inline]
    pub(crate) fn distance(self, other: Self) -> isize {
        let chunks = other.slot as isize - self.slot as isize;
        chunks * N as isize + other.offset as isize - self.offset as isize
    }

    #[inline]
    pub(crate) fn rebase(&mut self, shift: usize) {
        self.slot += shift;
    }

    /// Address of the element slot at this position.
    ///
    /// # Safety
    /// `self.slot` must name an allocated chunk in `slots`.
    #[inline]
    pub(crate) unsafe fn resolve<T>(self, slots: &[Option<NonNull<T>>]) -> NonNull<T> {
        debug_assert!(slots.get(self.slot).is_some_and(Option::is_some));
        unsafe {
            slots
                .get_unchecked(self.slot)
                .unwrap_unchecked()
                .add(self.offset)
        }
    }
}

impl<const N: usize> Clone for Position<N>
where
    Usize<N>: ChunkCapacity,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<const N: usize> Copy for Position<N> where Usize<N>: ChunkCapacity {}

impl<const N: usize> PartialEq for Position<N>
where
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot && self.offset == other.offset
    }
}

impl<const N: usize> Eq for Position<N> where Usize<N>: ChunkCapacity {}

impl<const N: usize> PartialOrd for Position<N>
where
    Usize<N>: ChunkCapacity,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Position<N>
where
    Usize<N>: ChunkCapacity,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.slot
            .cmp(&other.slot)
            .then_with(|| self.offset.cmp(&other.offset))
    }
}

impl<const N: usize> core::fmt::Debug for Position<N>
where
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Position")
            .field(&self.slot)
            .field(&self.offset)
            .finish()
    }
}
