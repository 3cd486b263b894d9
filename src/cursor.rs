use core::cmp::Ordering;

use allocator_api2::alloc::{Allocator, Global};

use crate::position::Position;
use crate::{ChunkCapacity, Deque, Usize};

/// A cursor over a Deque.
///
/// A Cursor is like an iterator, except that it can freely seek back-and-forth.
/// Cursors always rest between two elements in the deque, and index in a logically circular way.
/// To accommodate this, there is a “ghost” non-element that yields None between the back and front of the deque.
///
/// Unlike a linked list cursor, a deque cursor is random access: [`seek`](Cursor::seek) and
/// [`distance`](Cursor::distance) run in constant time.
pub struct Cursor<'a, T, const N: usize, A: Allocator = Global>
where
    T: 'a,
    Usize<N>: ChunkCapacity,
{
    deque: &'a Deque<T, N, A>,
    pos: Position<N>,
}

const _: [(); core::mem::size_of::<usize>() * 3] = [(); core::mem::size_of::<Cursor<usize, 2>>()];

impl<'a, T, const N: usize, A: Allocator> Cursor<'a, T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn from_front(deque: &'a Deque<T, N, A>) -> Self {
        Self {
            deque,
            pos: deque.begin(),
        }
    }

    pub(crate) fn from_back(deque: &'a Deque<T, N, A>) -> Self {
        if deque.is_empty() {
            return Self::ghost(deque);
        }

        Self {
            deque,
            pos: deque.end().offset_by(-1),
        }
    }

    pub(crate) fn from_index(deque: &'a Deque<T, N, A>, index: usize) -> Self {
        if index >= deque.len() {
            return Self::ghost(deque);
        }

        Self {
            deque,
            pos: deque.begin().add(index),
        }
    }

    fn ghost(deque: &'a Deque<T, N, A>) -> Self {
        Self {
            deque,
            pos: deque.end(),
        }
    }

    pub fn as_deque(&self) -> &'a Deque<T, N, A> {
        self.deque
    }

    pub fn back(&self) -> Option<&'a T> {
        self.deque.back()
    }

    /// Returns a reference to the element the cursor is pointing to, or None at the ghost.
    pub fn current(&self) -> Option<&'a T> {
        if self.is_ghost() {
            return None;
        }

        Some(unsafe { self.pos.resolve(self.deque.slots()).as_ref() })
    }

    pub fn front(&self) -> Option<&'a T> {
        self.deque.front()
    }

    /// Returns the index of the element the cursor is pointing to, or None at the ghost.
    pub fn index(&self) -> Option<usize> {
        if self.is_ghost() {
            return None;
        }

        Some(self.logical_index())
    }

    /// Moves to the next element; from the back it moves to the ghost, from the ghost to the front.
    pub fn move_next(&mut self) {
        if self.is_ghost() {
            self.pos = self.deque.begin();
            return;
        }

        self.pos.step_forward();
    }

    /// Moves to the previous element; from the front it moves to the ghost, from the ghost to the back.
    pub fn move_prev(&mut self) {
        if self.is_ghost() {
            *self = Self::from_back(self.deque);
            return;
        }

        if self.pos == self.deque.begin() {
            self.pos = self.deque.end();
            return;
        }

        self.pos.step_back();
    }

    pub fn peek_next(&self) -> Option<&'a T> {
        if self.is_ghost() {
            return self.deque.front();
        }

        self.deque.get(self.logical_index() + 1)
    }

    pub fn peek_prev(&self) -> Option<&'a T> {
        if self.pos == self.deque.begin() {
            return None;
        }

        if self.is_ghost() {
            return self.deque.back();
        }

        self.deque.get(self.logical_index() - 1)
    }

    /// Moves the cursor by `delta` elements in constant time.
    ///
    /// The ghost counts as the position right after the back element. If the target falls
    /// outside of that range the cursor stays put and `false` is returned.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let deque: Deque<usize, 2> = (0..10).collect();
    /// let mut cursor = deque.cursor_front();
    ///
    /// assert!(cursor.seek(7));
    /// assert_eq!(cursor.current(), Some(&7));
    ///
    /// assert!(cursor.seek(-3));
    /// assert_eq!(cursor.current(), Some(&4));
    ///
    /// assert!(!cursor.seek(7));
    /// assert_eq!(cursor.current(), Some(&4));
    ///
    /// assert!(cursor.seek(6));
    /// assert_eq!(cursor.current(), None);
    /// ```
    pub fn seek(&mut self, delta: isize) -> bool {
        let target = self.logical_index() as isize + delta;
        if target < 0 || target > self.deque.len() as isize {
            return false;
        }

        self.pos = self.pos.offset_by(delta);
        true
    }

    /// Number of elements from `self` to `other`, negative if `other` comes first.
    ///
    /// The ghost counts as the position right after the back element.
    ///
    /// # Panics
    /// Panics if the cursors belong to different deques.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let deque: Deque<usize, 2> = (0..10).collect();
    ///
    /// let front = deque.cursor_front();
    /// let back = deque.cursor_back();
    ///
    /// assert_eq!(front.distance(&back), 9);
    /// assert_eq!(back.distance(&front), -9);
    /// ```
    pub fn distance(&self, other: &Self) -> isize {
        assert!(
            core::ptr::eq(self.deque, other.deque),
            "cursors belong to different deques"
        );

        self.pos.distance(other.pos)
    }

    #[inline]
    fn logical_index(&self) -> usize {
        self.deque.begin().distance(self.pos) as usize
    }

    #[inline]
    fn is_ghost(&self) -> bool {
        self.pos == self.deque.end()
    }
}

impl<T, const N: usize, A: Allocator> Clone for Cursor<'_, T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Cursors are equal when they point into the same deque at the same place.
impl<T, const N: usize, A: Allocator> PartialEq for Cursor<'_, T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.deque, other.deque) && self.pos == other.pos
    }
}

impl<T, const N: usize, A: Allocator> Eq for Cursor<'_, T, N, A> where Usize<N>: ChunkCapacity {}

/// Cursors into different deques are unordered.
impl<T, const N: usize, A: Allocator> PartialOrd for Cursor<'_, T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !core::ptr::eq(self.deque, other.deque) {
            return None;
        }

        Some(self.pos.cmp(&other.pos))
    }
}

impl<T, const N: usize, A: Allocator> core::fmt::Debug for Cursor<'_, T, N, A>
where
    T: core::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Cursor")
            .field(self.deque)
            .field(&self.logical_index())
            .finish()
    }
}
