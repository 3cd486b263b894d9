use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::iter::{DebugEntries, Iter};
use crate::position::Position;
use crate::{ChunkCapacity, Usize};

/// A mutable iterator over the elements of a Deque.
///
/// This struct is created by Deque::iter_mut().
pub struct IterMut<'a, T, const N: usize>
where
    T: 'a,
    Usize<N>: ChunkCapacity,
{
    delegate: Iter<'a, T, N>,
    marker: PhantomData<&'a mut T>,
}

const _: [(); core::mem::size_of::<usize>() * 6] = [(); core::mem::size_of::<IterMut<usize, 2>>()];

impl<T, const N: usize> Default for IterMut<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn default() -> Self {
        Self {
            delegate: Iter::default(),
            marker: PhantomData,
        }
    }
}

impl<'a, T, const N: usize> IterMut<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn new(slots: &'a [Option<NonNull<T>>], front: Position<N>, back: Position<N>) -> Self {
        Self {
            delegate: Iter::new(slots, front, back),
            marker: PhantomData,
        }
    }
}

impl<'a, T, const N: usize> Iterator for IterMut<'a, T, N>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.delegate.next_ptr().map(|mut ptr| unsafe { ptr.as_mut() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.delegate.size_hint()
    }

    #[inline]
    fn count(self) -> usize {
        self.delegate.remaining()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.delegate.nth_ptr(n).map(|mut ptr| unsafe { ptr.as_mut() })
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T, const N: usize> DoubleEndedIterator for IterMut<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.delegate
            .next_back_ptr()
            .map(|mut ptr| unsafe { ptr.as_mut() })
    }

    #[inline]
    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        self.delegate
            .nth_back_ptr(n)
            .map(|mut ptr| unsafe { ptr.as_mut() })
    }
}

impl<T, const N: usize> ExactSizeIterator for IterMut<'_, T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn len(&self) -> usize {
        self.delegate.remaining()
    }
}

impl<T, const N: usize> FusedIterator for IterMut<'_, T, N> where Usize<N>: ChunkCapacity {}

impl<T, const N: usize> core::fmt::Debug for IterMut<'_, T, N>
where
    T: core::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IterMut")
            .field(&DebugEntries(self.delegate.clone()))
            .field(&self.delegate.remaining())
            .finish()
    }
}

unsafe impl<T, const N: usize> Send for IterMut<'_, T, N>
where
    T: Send,
    Usize<N>: ChunkCapacity,
{
}

unsafe impl<T, const N: usize> Sync for IterMut<'_, T, N>
where
    T: Sync,
    Usize<N>: ChunkCapacity,
{
}
