use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::position::Position;
use crate::{ChunkCapacity, Usize};

/// An iterator over the elements of a Deque.
///
/// This struct is created by Deque::iter().
pub struct Iter<'a, T, const N: usize>
where
    T: 'a,
    Usize<N>: ChunkCapacity,
{
    slots: &'a [Option<NonNull<T>>],
    front: Position<N>,
    back: Position<N>,
    marker: PhantomData<&'a T>,
}

const _: [(); core::mem::size_of::<usize>() * 6] = [(); core::mem::size_of::<Iter<usize, 2>>()];

impl<T, const N: usize> Default for Iter<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn default() -> Self {
        Self {
            slots: &[],
            front: Position::new(0, 0),
            back: Position::new(0, 0),
            marker: PhantomData,
        }
    }
}

impl<'a, T, const N: usize> Iter<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    /// Iterates `front..back`; both positions must lie within the allocated chunks of `slots`.
    pub(crate) fn new(slots: &'a [Option<NonNull<T>>], front: Position<N>, back: Position<N>) -> Self {
        debug_assert!(front <= back);
        Self {
            slots,
            front,
            back,
            marker: PhantomData,
        }
    }

    pub(crate) fn next_ptr(&mut self) -> Option<NonNull<T>> {
        if self.front == self.back {
            return None;
        }

        let out = unsafe { self.front.resolve(self.slots) };
        self.front.step_forward();
        Some(out)
    }

    pub(crate) fn next_back_ptr(&mut self) -> Option<NonNull<T>> {
        if self.front == self.back {
            return None;
        }

        self.back.step_back();
        Some(unsafe { self.back.resolve(self.slots) })
    }

    /// Skips `n` elements from the front in constant time and yields the next one.
    pub(crate) fn nth_ptr(&mut self, n: usize) -> Option<NonNull<T>> {
        if n >= self.remaining() {
            self.front = self.back;
            return None;
        }

        self.front = self.front.add(n);
        self.next_ptr()
    }

    /// Skips `n` elements from the back in constant time and yields the next one.
    pub(crate) fn nth_back_ptr(&mut self, n: usize) -> Option<NonNull<T>> {
        if n >= self.remaining() {
            self.back = self.front;
            return None;
        }

        self.back = self.back.offset_by(-(n as isize));
        self.next_back_ptr()
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.front.distance(self.back) as usize
    }
}

impl<T, const N: usize> Clone for Iter<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_ptr().map(|ptr| unsafe { ptr.as_ref() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.remaining()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.nth_ptr(n).map(|ptr| unsafe { ptr.as_ref() })
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T, const N: usize> DoubleEndedIterator for Iter<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.next_back_ptr().map(|ptr| unsafe { ptr.as_ref() })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.nth_back_ptr(n).map(|ptr| unsafe { ptr.as_ref() })
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn len(&self) -> usize {
        self.remaining()
    }
}

impl<T, const N: usize> FusedIterator for Iter<'_, T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> core::fmt::Debug for Iter<'_, T, N>
where
    T: core::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Iter")
            .field(&DebugEntries(self.clone()))
            .field(&self.remaining())
            .finish()
    }
}

/// Lists the elements an iterator has left without consuming it.
pub(crate) struct DebugEntries<I>(pub(crate) I);

impl<I> core::fmt::Debug for DebugEntries<I>
where
    I: Iterator + Clone,
    I::Item: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

unsafe impl<T, const N: usize> Send for Iter<'_, T, N>
where
    T: Sync,
    Usize<N>: ChunkCapacity,
{
}

unsafe impl<T, const N: usize> Sync for Iter<'_, T, N>
where
    T: Sync,
    Usize<N>: ChunkCapacity,
{
}
