use core::iter::FusedIterator;

use allocator_api2::alloc::{Allocator, Global};

use crate::{ChunkCapacity, Deque, Usize};

/// An owning iterator over the elements of a Deque.
///
/// This struct is created by Deque::into_iter().
/// Elements not yielded are dropped together with the iterator.
pub struct IntoIter<T, const N: usize, A: Allocator = Global>
where
    Usize<N>: ChunkCapacity,
{
    deque: Deque<T, N, A>,
}

impl<T, const N: usize, A: Allocator + Clone> Clone for IntoIter<T, N, A>
where
    T: Clone,
    Usize<N>: ChunkCapacity,
{
    fn clone(&self) -> Self {
        Self {
            deque: self.deque.clone(),
        }
    }
}

impl<T, const N: usize, A: Allocator + Default> Default for IntoIter<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn default() -> Self {
        Self {
            deque: Deque::default(),
        }
    }
}

impl<T, const N: usize, A: Allocator> IntoIter<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn from_deque(deque: Deque<T, N, A>) -> Self {
        Self { deque }
    }
}

impl<T, const N: usize, A: Allocator> Iterator for IntoIter<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.deque.len();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.deque.len()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        // skipped elements are owned and must be dropped one by one
        for _ in 0..n {
            self.deque.pop_front()?;
        }

        self.deque.pop_front()
    }

    #[inline]
    fn last(mut self) -> Option<Self::Item> {
        self.deque.pop_back()
    }
}

impl<T, const N: usize, A: Allocator> DoubleEndedIterator for IntoIter<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back()
    }
}

impl<T, const N: usize, A: Allocator> ExactSizeIterator for IntoIter<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn len(&self) -> usize {
        self.deque.len()
    }
}

impl<T, const N: usize, A: Allocator> FusedIterator for IntoIter<T, N, A> where
    Usize<N>: ChunkCapacity
{
}

impl<T, const N: usize, A: Allocator> core::fmt::Debug for IntoIter<T, N, A>
where
    T: core::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}
