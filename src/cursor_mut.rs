use allocator_api2::alloc::{Allocator, Global};

use crate::{ChunkCapacity, Cursor, Deque, Usize};

/// A cursor over a Deque with editing operations.
///
/// A Cursor is like an iterator, except that it can freely seek back-and-forth.
/// Cursors always rest between two elements in the deque, and index in a logically circular way.
/// To accommodate this, there is a “ghost” non-element that yields None between the back and front of the deque.
///
/// Editing keeps the cursor on the same element whenever that element survives the edit.
pub struct CursorMut<'a, T, const N: usize, A: Allocator = Global>
where
    T: 'a,
    Usize<N>: ChunkCapacity,
{
    deque: &'a mut Deque<T, N, A>,
    // `deque.len()` stands for the ghost
    index: usize,
}

const _: [(); core::mem::size_of::<usize>() * 2] =
    [(); core::mem::size_of::<CursorMut<usize, 2>>()];

impl<'a, T, const N: usize, A: Allocator> CursorMut<'a, T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    pub(crate) fn from_front(deque: &'a mut Deque<T, N, A>) -> Self {
        Self { deque, index: 0 }
    }

    pub(crate) fn from_back(deque: &'a mut Deque<T, N, A>) -> Self {
        let index = deque.len().saturating_sub(1);
        Self { deque, index }
    }

    pub(crate) fn from_index(deque: &'a mut Deque<T, N, A>, index: usize) -> Self {
        let index = index.min(deque.len());
        Self { deque, index }
    }

    /// Returns a read-only cursor pointing to the same element.
    pub fn as_cursor(&self) -> Cursor<'_, T, N, A> {
        Cursor::from_index(self.deque, self.index)
    }

    pub fn as_deque(&self) -> &Deque<T, N, A> {
        self.deque
    }

    pub fn back(&self) -> Option<&T> {
        self.deque.back()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.deque.back_mut()
    }

    pub fn current(&mut self) -> Option<&mut T> {
        self.deque.get_mut(self.index)
    }

    pub fn front(&self) -> Option<&T> {
        self.deque.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.deque.front_mut()
    }

    pub fn index(&self) -> Option<usize> {
        if self.is_ghost() {
            return None;
        }

        Some(self.index)
    }

    /// Inserts `value` right after the current element, or at the front when on the ghost.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<usize, 2> = Deque::from([1, 3]);
    /// let mut cursor = deque.cursor_front_mut();
    ///
    /// cursor.insert_after(2);
    /// assert_eq!(cursor.current(), Some(&mut 1));
    ///
    /// cursor.move_prev();
    /// cursor.insert_after(0);
    /// assert_eq!(cursor.index(), None);
    ///
    /// assert_eq!(deque, [0, 1, 2, 3]);
    /// ```
    pub fn insert_after(&mut self, value: T) {
        if self.is_ghost() {
            self.push_front(value);
            return;
        }

        self.deque.insert(self.index + 1, value);
    }

    /// Inserts `value` right before the current element, or at the back when on the ghost.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<usize, 2> = Deque::from([1, 3]);
    /// let mut cursor = deque.cursor_back_mut();
    ///
    /// cursor.insert_before(2);
    /// assert_eq!(cursor.current(), Some(&mut 3));
    ///
    /// cursor.move_next();
    /// cursor.insert_before(4);
    /// assert_eq!(cursor.index(), None);
    ///
    /// assert_eq!(deque, [1, 2, 3, 4]);
    /// ```
    pub fn insert_before(&mut self, value: T) {
        self.deque.insert(self.index, value);
        self.index += 1;
    }

    pub fn move_next(&mut self) {
        if self.is_ghost() {
            self.index = 0;
            return;
        }

        self.index += 1;
    }

    pub fn move_prev(&mut self) {
        if self.index == 0 {
            self.index = self.deque.len();
            return;
        }

        self.index -= 1;
    }

    pub fn peek_next(&mut self) -> Option<&mut T> {
        if self.is_ghost() {
            return self.front_mut();
        }

        self.deque.get_mut(self.index + 1)
    }

    pub fn peek_prev(&mut self) -> Option<&mut T> {
        if self.index == 0 {
            return None;
        }

        self.deque.get_mut(self.index - 1)
    }

    /// Moves the cursor by `delta` elements, the ghost counting as the position after the back.
    ///
    /// If the target falls outside of the deque the cursor stays put and `false` is returned.
    pub fn seek(&mut self, delta: isize) -> bool {
        match self.index.checked_add_signed(delta) {
            Some(index) if index <= self.deque.len() => {
                self.index = index;
                true
            }
            _ => false,
        }
    }

    pub fn push_front(&mut self, value: T) {
        self.deque.push_front(value);
        self.index += 1;
    }

    pub fn push_back(&mut self, value: T) {
        let is_ghost = self.is_ghost();

        self.deque.push_back(value);

        if is_ghost {
            self.index += 1;
        }
    }

    /// Removes the front element; a cursor resting on it moves to the next one.
    pub fn pop_front(&mut self) -> Option<T> {
        let out = self.deque.pop_front()?;
        self.index = self.index.saturating_sub(1);
        Some(out)
    }

    /// Removes the back element; a cursor resting on it moves to the ghost.
    pub fn pop_back(&mut self) -> Option<T> {
        let out = self.deque.pop_back()?;
        self.index = self.index.min(self.deque.len());
        Some(out)
    }

    /// Removes the current element and moves the cursor to the next one, or to the ghost
    /// if it was the back. Returns None when on the ghost.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<usize, 2> = Deque::from([0, 1, 2]);
    /// let mut cursor = deque.cursor_at_mut(1);
    ///
    /// assert_eq!(cursor.remove_current(), Some(1));
    /// assert_eq!(cursor.current(), Some(&mut 2));
    ///
    /// assert_eq!(cursor.remove_current(), Some(2));
    /// assert_eq!(cursor.current(), None);
    /// assert_eq!(cursor.remove_current(), None);
    ///
    /// assert_eq!(deque, [0]);
    /// ```
    pub fn remove_current(&mut self) -> Option<T> {
        self.deque.remove(self.index)
    }

    #[inline]
    fn is_ghost(&self) -> bool {
        self.index >= self.deque.len()
    }
}

impl<T, const N: usize, A: Allocator> core::fmt::Debug for CursorMut<'_, T, N, A>
where
    T: core::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorMut")
            .field("deque", self.deque)
            .field("current", &self.as_cursor().current())
            .field("index", &self.index())
            .finish()
    }
}
