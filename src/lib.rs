//! # chunked_deque
//!
//! `chunked_deque` implements a **segmented double-ended queue**: elements live in
//! fixed-size chunks, and an index of chunk handles provides the second level of indirection
//! that lets the sequence grow at both ends without ever moving a stored element.
//!
//! ## Features
//! - Amortized O(1) `push`/`pop` at both ends.
//! - O(1) random access through index arithmetic over the chunk index.
//! - Elements never move when the deque grows: only the index of chunk handles is reallocated.
//! - Random-access cursors and double-ended iterators with O(1) `nth`.
//! - Pluggable memory through the [`Allocator`] trait, with fallible `try_` operations that
//!   leave the deque untouched on allocation failure.
//!
//! ## Use Cases
//! `chunked_deque` is ideal for scenarios where:
//! - You need a queue or a stack that grows at both ends.
//! - You need stable element addresses while the collection grows.
//! - You need indexed access but rarely insert or remove in the middle.
//!
//! ## Example
//! ```rust
//! use chunked_deque::Deque;
//!
//! let mut deque: Deque<i64, 4> = Deque::new();
//! deque.push_back(2);
//! deque.push_front(0);
//! deque.insert(1, 1);
//!
//! assert_eq!(deque.front(), Some(&0));
//! assert_eq!(deque[1], 1);
//! assert_eq!(deque.back(), Some(&2));
//!
//! assert_eq!(deque.remove(1), Some(1));
//! assert_eq!(deque.pop_back(), Some(2));
//! assert_eq!(deque.pop_front(), Some(0));
//! ```

mod chunk;
mod cursor;
mod cursor_mut;
mod error;
mod index;
mod into_iter;
mod iter;
mod iter_mut;
mod position;
mod sailed;
#[cfg(test)]
mod test_alloc;

pub use allocator_api2::alloc::{Allocator, Global};

pub use cursor::Cursor;
pub use cursor_mut::CursorMut;
pub use error::{OutOfBounds, TryReserveError};
pub use into_iter::IntoIter;
pub use iter::Iter;
pub use iter_mut::IterMut;

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};

use crate::index::ChunkIndex;
use crate::position::Position;

pub enum Usize<const N: usize> {}

/// Chunk sizes a [`Deque`] can be instantiated with.
pub trait ChunkCapacity: crate::sailed::Sailed {}

/// A double-ended queue stored in fixed-size chunks.
///
/// # Features
/// - **Chunked Storage**: Each chunk holds up to `N` elements and is never resized or moved,
///   so growing the deque only reallocates the small index of chunk handles.
/// - **Random Access**: Any element is two pointer hops away from its index.
/// - **Allocator Aware**: Chunks and the index come from the allocator `A`.
///
/// # Type Parameters
/// - `T`: The type of elements stored in the deque.
/// - `N`: The number of elements that each chunk can hold.
/// - `A`: The allocator that provides chunk and index memory.
///
/// # Example
/// ```rust
/// use chunked_deque::Deque;
///
/// let mut deque: Deque<i64, 6> = Deque::new();
/// deque.push_back(3);
/// deque.push_front(1);
/// deque.insert(1, 2);
///
/// assert!(!deque.is_empty());
/// assert_eq!(deque.len(), 3);
///
/// assert_eq!(deque.pop_front(), Some(1));
/// assert_eq!(deque.pop_front(), Some(2));
/// assert_eq!(deque.pop_front(), Some(3));
/// ```
pub struct Deque<T, const N: usize = 512, A: Allocator = Global>
where
    Usize<N>: ChunkCapacity,
{
    index: ChunkIndex<T, N, A>,
    begin: Position<N>,
    end: Position<N>,
    marker: PhantomData<T>,
}

impl<T, const N: usize, const M: usize> From<[T; M]> for Deque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn from(values: [T; M]) -> Self {
        let mut this = Self::with_capacity(M);
        this.extend(values);
        this
    }
}

impl<T, const N: usize> FromIterator<T> for Deque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T, const N: usize, A: Allocator> Extend<T> for Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<'a, T, const N: usize, A: Allocator> Extend<&'a T> for Deque<T, N, A>
where
    T: Clone,
    Usize<N>: ChunkCapacity,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned());
    }
}

impl<T, const N: usize, A: Allocator + Default> Default for Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, const N: usize> Deque<T, N>
where
    Usize<N>: ChunkCapacity,
{
    /// Creates a new, empty `Deque` backed by the global allocator.
    ///
    /// A single chunk is allocated upfront, with the insertion point in its middle,
    /// so that both ends have room before the chunk index needs to grow.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let deque: Deque<i64, 6> = Deque::new();
    ///
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty `Deque` that can take `capacity` elements at the back
    /// without allocating.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<usize, 4> = Deque::with_capacity(10);
    /// deque.extend(0..10);
    ///
    /// assert_eq!(deque.len(), 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a `Deque` holding `len` clones of `value`.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let deque: Deque<&str, 2> = Deque::from_elem("abc", 3);
    ///
    /// assert_eq!(deque, ["abc", "abc", "abc"]);
    /// ```
    pub fn from_elem(value: T, len: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(value, len, Global)
    }

    /// Creates a `Deque` holding `len` default values.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let deque: Deque<u8, 2> = Deque::with_default(3);
    ///
    /// assert_eq!(deque, [0, 0, 0]);
    /// ```
    pub fn with_default(len: usize) -> Self
    where
        T: Default,
    {
        Self::with_default_in(len, Global)
    }
}

impl<T, const N: usize, A: Allocator> Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    /// Creates a new, empty `Deque` that takes its memory from `alloc`.
    ///
    /// # Panics
    /// Panics, or aborts through [`std::alloc::handle_alloc_error`], if the first chunk
    /// cannot be allocated.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::{Deque, Global};
    ///
    /// let deque: Deque<i64, 6, _> = Deque::new_in(Global);
    ///
    /// assert!(deque.is_empty());
    /// ```
    pub fn new_in(alloc: A) -> Self {
        Self::try_new_in(alloc).unwrap_or_else(|err| err.panic())
    }

    /// Like [`new_in`](Deque::new_in), but reports allocation failure instead of panicking.
    pub fn try_new_in(alloc: A) -> Result<Self, TryReserveError> {
        let index = ChunkIndex::try_with_chunks_in(1, alloc)?;
        let middle = Position::new(1, N / 2);

        Ok(Self {
            index,
            begin: middle,
            end: middle,
            marker: PhantomData,
        })
    }

    /// Creates an empty `Deque` that can take `capacity` elements at the back without allocating.
    ///
    /// `capacity / N + 1` chunks are allocated in the middle third of a chunk index three
    /// times as large, so both ends can still grow without reallocating the index.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self::try_with_capacity_in(capacity, alloc).unwrap_or_else(|err| err.panic())
    }

    /// Like [`with_capacity_in`](Deque::with_capacity_in), but reports allocation failure
    /// instead of panicking.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, TryReserveError> {
        let chunks = capacity / N + 1;
        let index = ChunkIndex::try_with_chunks_in(chunks, alloc)?;
        let first = Position::new(index.lo(), 0);

        Ok(Self {
            index,
            begin: first,
            end: first,
            marker: PhantomData,
        })
    }

    /// Creates a `Deque` holding `len` clones of `value`, allocated from `alloc`.
    pub fn from_elem_in(value: T, len: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut this = Self::with_capacity_in(len, alloc);
        this.extend(core::iter::repeat_n(value, len));
        this
    }

    /// Creates a `Deque` holding `len` default values, allocated from `alloc`.
    pub fn with_default_in(len: usize, alloc: A) -> Self
    where
        T: Default,
    {
        let mut this = Self::with_capacity_in(len, alloc);
        this.extend(core::iter::repeat_with(T::default).take(len));
        this
    }

    /// Returns a reference to the underlying allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.index.allocator()
    }

    /// Adds an element to the front of the `Deque`.
    ///
    /// If the first chunk is full a new one is linked in before it, growing the chunk index
    /// when it has no free slot left at the front.
    ///
    /// # Panics
    /// Panics, or aborts through [`std::alloc::handle_alloc_error`], if memory cannot be
    /// obtained. See [`try_push_front`](Deque::try_push_front).
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 6> = Deque::new();
    /// deque.push_front(10);
    /// deque.push_front(20);
    ///
    /// assert_eq!(deque.len(), 2);
    ///
    /// assert_eq!(deque.pop_front(), Some(20));
    /// assert_eq!(deque.pop_front(), Some(10));
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.emplace_front_with(|| value);
    }

    /// Adds an element to the back of the `Deque`.
    ///
    /// If the last chunk is full a new one is linked in after it, growing the chunk index
    /// when it has no free slot left at the back.
    ///
    /// # Panics
    /// Panics, or aborts through [`std::alloc::handle_alloc_error`], if memory cannot be
    /// obtained. See [`try_push_back`](Deque::try_push_back).
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 6> = Deque::new();
    /// deque.push_back(10);
    /// deque.push_back(20);
    ///
    /// assert_eq!(deque.len(), 2);
    ///
    /// assert_eq!(deque.pop_back(), Some(20));
    /// assert_eq!(deque.pop_back(), Some(10));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.emplace_back_with(|| value);
    }

    /// Adds an element to the front of the `Deque`, handling allocation failure gracefully.
    ///
    /// On failure `value` is dropped and the deque is left exactly as it was.
    pub fn try_push_front(&mut self, value: T) -> Result<(), TryReserveError> {
        self.try_emplace_front_with(|| value).map(|_| ())
    }

    /// Adds an element to the back of the `Deque`, handling allocation failure gracefully.
    ///
    /// On failure `value` is dropped and the deque is left exactly as it was.
    ///
    /// # Example
    /// ```rust
    /// use std::alloc::Layout;
    /// use std::ptr::NonNull;
    ///
    /// use allocator_api2::alloc::{AllocError, Allocator, Global};
    /// use chunked_deque::Deque;
    ///
    /// // hands out exactly what a new deque needs: the chunk index and one chunk
    /// struct Budget(std::cell::Cell<usize>);
    ///
    /// unsafe impl Allocator for Budget {
    ///     fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
    ///         match self.0.get() {
    ///             0 => Err(AllocError),
    ///             n => {
    ///                 self.0.set(n - 1);
    ///                 Global.allocate(layout)
    ///             }
    ///         }
    ///     }
    ///
    ///     unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
    ///         unsafe { Global.deallocate(ptr, layout) }
    ///     }
    /// }
    ///
    /// let mut deque: Deque<i32, 4, _> = Deque::new_in(Budget(2.into()));
    ///
    /// assert!(deque.try_push_back(1).is_ok());
    /// assert!(deque.try_push_back(2).is_err());
    /// assert_eq!(deque, [1]);
    /// ```
    pub fn try_push_back(&mut self, value: T) -> Result<(), TryReserveError> {
        self.try_emplace_back_with(|| value).map(|_| ())
    }

    /// Constructs an element with `make` and adds it to the front of the `Deque`,
    /// returning a reference to it.
    ///
    /// `make` runs before the deque is touched: if it panics the deque is left unchanged.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<String, 4> = Deque::new();
    /// deque.emplace_front_with(|| "world".to_owned());
    /// deque.emplace_front_with(String::new).push_str("hello");
    ///
    /// assert_eq!(deque, ["hello", "world"].map(String::from));
    /// ```
    pub fn emplace_front_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_front_with(make) {
            Ok(value) => value,
            Err(err) => err.panic(),
        }
    }

    /// Constructs an element with `make` and adds it to the back of the `Deque`,
    /// returning a reference to it.
    ///
    /// `make` runs before the deque is touched: if it panics the deque is left unchanged.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<Vec<u8>, 4> = Deque::new();
    /// deque.emplace_back_with(|| vec![1, 2]);
    /// deque.emplace_back_with(Vec::new).push(3);
    ///
    /// assert_eq!(deque, [vec![1, 2], vec![3]]);
    /// ```
    pub fn emplace_back_with<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        match self.try_emplace_back_with(make) {
            Ok(value) => value,
            Err(err) => err.panic(),
        }
    }

    /// Fallible form of [`emplace_front_with`](Deque::emplace_front_with).
    ///
    /// On allocation failure the constructed element is dropped and the deque is left exactly
    /// as it was.
    pub fn try_emplace_front_with<F>(&mut self, make: F) -> Result<&mut T, TryReserveError>
    where
        F: FnOnce() -> T,
    {
        let value = make();

        if self.begin.offset == 0 && self.begin.slot == self.index.lo() {
            let shift = self.index.reserve_front()?;
            self.rebase(shift);
        }

        self.begin.step_back();
        unsafe {
            let slot = self.begin.resolve(self.index.slots());
            slot.write(value);
            Ok(&mut *slot.as_ptr())
        }
    }

    /// Fallible form of [`emplace_back_with`](Deque::emplace_back_with).
    ///
    /// On allocation failure the constructed element is dropped and the deque is left exactly
    /// as it was.
    pub fn try_emplace_back_with<F>(&mut self, make: F) -> Result<&mut T, TryReserveError>
    where
        F: FnOnce() -> T,
    {
        let value = make();

        // `end` must keep pointing into an allocated chunk once it steps past this slot
        if self.end.offset + 1 == N && self.end.slot == self.index.hi() {
            let shift = self.index.reserve_back()?;
            self.rebase(shift);
        }

        unsafe {
            let slot = self.end.resolve(self.index.slots());
            slot.write(value);
            self.end.step_forward();
            Ok(&mut *slot.as_ptr())
        }
    }

    /// Inserts an element at the specified index, shifting the elements on the shorter side.
    ///
    /// The element is pushed at the nearer end and then walked into place by swapping it with
    /// its neighbours, so the cost is linear in the distance from that end.
    ///
    /// This is also the positional constructor: to build an element in place at `index`,
    /// pass the freshly constructed value here. Only the ends have closure-based
    /// [`emplace_front_with`](Deque::emplace_front_with) and
    /// [`emplace_back_with`](Deque::emplace_back_with).
    ///
    /// # Panics
    /// - Panics if the `index` is out of bounds (greater than the deque's current length).
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 3> = Deque::new();
    /// deque.push_back(10);
    /// deque.push_back(30);
    /// deque.insert(1, 20);
    ///
    /// assert_eq!(deque, [10, 20, 30]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len();
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");

        if index <= len / 2 {
            self.push_front(value);

            let mut hole = self.begin;
            for _ in 0..index {
                let mut next = hole;
                next.step_forward();
                unsafe { self.swap_positions(hole, next) };
                hole = next;
            }
        } else {
            self.push_back(value);

            let mut hole = self.end.offset_by(-1);
            for _ in index..len {
                let mut prev = hole;
                prev.step_back();
                unsafe { self.swap_positions(prev, hole) };
                hole = prev;
            }
        }
    }

    /// Removes and returns the element at the specified index, closing the gap from the
    /// shorter side.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 4> = Deque::from([10, 20, 30, 40, 50]);
    ///
    /// assert_eq!(deque.remove(1), Some(20));
    /// assert_eq!(deque.get(1), Some(&30));
    /// assert_eq!(deque.len(), 4);
    ///
    /// assert_eq!(deque.remove(10), None);
    /// ```
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }

        let mut hole = self.begin.add(index);
        if index < len / 2 {
            for _ in 0..index {
                let mut prev = hole;
                prev.step_back();
                unsafe { self.swap_positions(prev, hole) };
                hole = prev;
            }

            self.pop_front()
        } else {
            for _ in index + 1..len {
                let mut next = hole;
                next.step_forward();
                unsafe { self.swap_positions(hole, next) };
                hole = next;
            }

            self.pop_back()
        }
    }

    /// Removes and returns the first element of the `Deque`, if any.
    ///
    /// The chunk that held it stays allocated for later pushes.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 4> = Deque::new();
    /// deque.push_front(10);
    /// deque.push_front(20);
    ///
    /// assert_eq!(deque.pop_front(), Some(20));
    /// assert_eq!(deque.pop_front(), Some(10));
    /// assert_eq!(deque.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = unsafe { self.begin.resolve(self.index.slots()).read() };
        self.begin.step_forward();
        Some(value)
    }

    /// Removes and returns the last element of the `Deque`, if any.
    ///
    /// The chunk that held it stays allocated for later pushes.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 4> = Deque::new();
    /// deque.push_back(10);
    /// deque.push_back(20);
    ///
    /// assert_eq!(deque.pop_back(), Some(20));
    /// assert_eq!(deque.pop_back(), Some(10));
    /// assert_eq!(deque.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.end.step_back();
        Some(unsafe { self.end.resolve(self.index.slots()).read() })
    }

    /// Swaps the elements at indices `i` and `j`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i32, 2> = Deque::from([1, 2, 3, 4]);
    /// deque.swap(0, 3);
    ///
    /// assert_eq!(deque, [4, 2, 3, 1]);
    /// ```
    pub fn swap(&mut self, i: usize, j: usize) {
        let len = self.len();
        assert!(i < len, "swap index (is {i}) should be < len (is {len})");
        assert!(j < len, "swap index (is {j}) should be < len (is {len})");

        unsafe { self.swap_positions(self.begin.add(i), self.begin.add(j)) };
    }

    /// Shortens the `Deque` to `len` elements, dropping the rest from the back.
    ///
    /// Has no effect if `len` is not smaller than the current length.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i32, 2> = Deque::from([1, 2, 3, 4, 5]);
    /// deque.truncate(2);
    ///
    /// assert_eq!(deque, [1, 2]);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        while self.len() > len {
            self.end.step_back();
            unsafe { ptr::drop_in_place(self.end.resolve(self.index.slots()).as_ptr()) };
        }
    }

    /// Removes all elements from the `Deque`, effectively making it empty.
    ///
    /// Chunks are kept for reuse and the insertion point moves back to the middle of them.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i32, 4> = Deque::from([1, 2, 3]);
    ///
    /// assert_eq!(deque.len(), 3);
    ///
    /// deque.clear();
    ///
    /// assert_eq!(deque.len(), 0);
    /// assert!(deque.is_empty());
    /// assert_eq!(deque.front(), None);
    /// assert_eq!(deque.back(), None);
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);

        let middle = Position::new(self.index.middle(), N / 2);
        self.begin = middle;
        self.end = middle;
    }

    /// Returns a reference to the first element of the `Deque`, if any.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 4> = Deque::from([10, 20]);
    ///
    /// assert_eq!(deque.front(), Some(&10));
    ///
    /// deque.pop_front();
    /// assert_eq!(deque.front(), Some(&20));
    ///
    /// deque.pop_front();
    /// assert_eq!(deque.front(), None);
    /// ```
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a mutable reference to the first element of the `Deque`, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns a reference to the last element of the `Deque`, if any.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 4> = Deque::from([10, 20]);
    ///
    /// assert_eq!(deque.back(), Some(&20));
    ///
    /// deque.pop_back();
    /// assert_eq!(deque.back(), Some(&10));
    ///
    /// deque.pop_back();
    /// assert_eq!(deque.back(), None);
    /// ```
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    /// Returns a mutable reference to the last element of the `Deque`, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.len().checked_sub(1).and_then(|index| self.get_mut(index))
    }

    /// Returns a reference to the element at the specified index, if any.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let deque: Deque<i64, 4> = Deque::from([10, 20]);
    ///
    /// assert_eq!(deque.get(0), Some(&10));
    /// assert_eq!(deque.get(1), Some(&20));
    /// assert_eq!(deque.get(2), None); // Out of bounds
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            return None;
        }

        Some(unsafe { self.get_unchecked(index) })
    }

    /// Returns a mutable reference to the element at the specified index, if any.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 4> = Deque::from([10, 20]);
    ///
    /// assert_eq!(deque.get_mut(0), Some(&mut 10));
    /// assert_eq!(deque.get_mut(1), Some(&mut 20));
    /// assert_eq!(deque.get_mut(2), None); // Out of bounds
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            return None;
        }

        Some(unsafe { self.get_unchecked_mut(index) })
    }

    /// Returns a reference to the element at the specified index, or an [`OutOfBounds`] error
    /// naming the index and the current length.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::{Deque, OutOfBounds};
    ///
    /// let deque: Deque<i64, 4> = Deque::from([10, 20]);
    ///
    /// assert_eq!(deque.try_get(1), Ok(&20));
    /// assert_eq!(deque.try_get(2), Err(OutOfBounds { index: 2, len: 2 }));
    /// ```
    pub fn try_get(&self, index: usize) -> Result<&T, OutOfBounds> {
        self.get(index).ok_or(OutOfBounds {
            index,
            len: self.len(),
        })
    }

    /// Mutable form of [`try_get`](Deque::try_get).
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, OutOfBounds> {
        let len = self.len();
        self.get_mut(index).ok_or(OutOfBounds { index, len })
    }

    /// Returns a reference to the element at the specified index without bounds checking.
    ///
    /// # Safety
    /// `index` must be smaller than [`len`](Deque::len).
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len());
        unsafe { self.begin.add(index).resolve(self.index.slots()).as_ref() }
    }

    /// Returns a mutable reference to the element at the specified index without bounds checking.
    ///
    /// # Safety
    /// `index` must be smaller than [`len`](Deque::len).
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len());
        unsafe { self.begin.add(index).resolve(self.index.slots()).as_mut() }
    }

    /// Returns the number of elements currently stored in the `Deque`.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 6> = Deque::new();
    /// deque.push_back(1);
    /// deque.push_front(2);
    ///
    /// assert_eq!(deque.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.begin.distance(self.end) as usize
    }

    /// Checks if the `Deque` is empty.
    ///
    /// # Example
    /// ```rust
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<i64, 6> = Deque::new();
    /// assert!(deque.is_empty());
    ///
    /// deque.push_back(1);
    /// assert!(!deque.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Provides an iterator over the deque's elements.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let deque: Deque<_, 2> = Deque::from([0, 1, 2]);
    ///
    /// let mut iter = deque.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next_back(), Some(&2));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter::new(self.index.slots(), self.begin, self.end)
    }

    /// Provides a mutable iterator over the deque's elements.
    ///
    /// # Examples
    /// ```
    /// use chunked_deque::Deque;
    ///
    /// let mut deque: Deque<_, 2> = Deque::from([0, 1, 2]);
    /// deque.iter_mut().for_each(|n| *n *= 10);
    ///
    /// assert_eq!(deque, [0, 10, 20]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, N> {
        IterMut::new(self.index.slots(), self.begin, self.end)
    }

    /// Provides a cursor at the front element.
    ///
    /// The cursor is pointing to the “ghost” non-element if the deque is empty.
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T, N, A> {
        Cursor::from_front(self)
    }

    /// Provides a cursor at the back element.
    ///
    /// The cursor is pointing to the “ghost” non-element if the deque is empty.
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, T, N, A> {
        Cursor::from_back(self)
    }

    /// Provides a cursor at the element with the given index.
    ///
    /// The cursor is pointing to the “ghost” non-element if `index` is out of bounds.
    #[inline]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T, N, A> {
        Cursor::from_index(self, index)
    }

    /// Provides a mutable cursor at the front element.
    ///
    /// The cursor is pointing to the “ghost” non-element if the deque is empty.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, N, A> {
        CursorMut::from_front(self)
    }

    /// Provides a mutable cursor at the back element.
    ///
    /// The cursor is pointing to the “ghost” non-element if the deque is empty.
    #[inline]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, N, A> {
        CursorMut::from_back(self)
    }

    /// Provides a mutable cursor at the element with the given index.
    ///
    /// The cursor is pointing to the “ghost” non-element if `index` is out of bounds.
    #[inline]
    pub fn cursor_at_mut(&mut self, index: usize) -> CursorMut<'_, T, N, A> {
        CursorMut::from_index(self, index)
    }

    #[inline]
    fn rebase(&mut self, shift: usize) {
        self.begin.rebase(shift);
        self.end.rebase(shift);
    }

    /// # Safety
    /// Both positions must lie in `begin..end`.
    #[inline]
    unsafe fn swap_positions(&mut self, a: Position<N>, b: Position<N>) {
        let slots = self.index.slots();
        unsafe { ptr::swap(a.resolve(slots).as_ptr(), b.resolve(slots).as_ptr()) };
    }

    #[inline]
    pub(crate) const fn begin(&self) -> Position<N> {
        self.begin
    }

    #[inline]
    pub(crate) const fn end(&self) -> Position<N> {
        self.end
    }

    #[inline]
    pub(crate) fn slots(&self) -> &[Option<NonNull<T>>] {
        self.index.slots()
    }
}

impl<T, const N: usize, A: Allocator> Drop for Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn drop(&mut self) {
        self.truncate(0);
    }
}

impl<T: Clone, const N: usize, A: Allocator + Clone> Clone for Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn clone(&self) -> Self {
        let mut this = Self::with_capacity_in(self.len(), self.allocator().clone());
        this.extend(self.iter());
        this
    }

    /// Reuses the elements of `self` for the common prefix before growing or shrinking.
    ///
    /// The overlapping elements are updated through [`Clone::clone_from`], surplus ones are
    /// dropped and missing ones cloned at the back; chunks already owned by `self` are reused.
    ///
    /// `self` keeps its own allocator: `source`'s allocator is never cloned or propagated.
    fn clone_from(&mut self, source: &Self) {
        let overlap = self.len().min(source.len());

        self.truncate(source.len());
        self.iter_mut()
            .zip(source.iter())
            .for_each(|(dst, src)| dst.clone_from(src));
        self.extend(source.iter().skip(overlap));
    }
}

impl<T, const N: usize, A: Allocator> Index<usize> for Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.try_get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const N: usize, A: Allocator> IndexMut<usize> for Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.try_get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const N: usize, const M: usize, A: Allocator> PartialEq<[T; M]> for Deque<T, N, A>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &[T; M]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize, A: Allocator> PartialEq<&[T]> for Deque<T, N, A>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &&[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, const N: usize, A: Allocator> PartialEq<[T]> for Deque<T, N, A>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
{
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

/// Deques compare by their elements, whatever their chunk size or allocator.
impl<T, const N: usize, const M: usize, A: Allocator, B: Allocator> PartialEq<Deque<T, M, B>>
    for Deque<T, N, A>
where
    T: PartialEq,
    Usize<N>: ChunkCapacity,
    Usize<M>: ChunkCapacity,
{
    fn eq(&self, other: &Deque<T, M, B>) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T, const N: usize, A: Allocator> Eq for Deque<T, N, A>
where
    T: Eq,
    Usize<N>: ChunkCapacity,
{
}

impl<T, const N: usize, A: Allocator> PartialOrd for Deque<T, N, A>
where
    T: PartialOrd,
    Usize<N>: ChunkCapacity,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T, const N: usize, A: Allocator> Ord for Deque<T, N, A>
where
    T: Ord,
    Usize<N>: ChunkCapacity,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T, const N: usize, A: Allocator> Hash for Deque<T, N, A>
where
    T: Hash,
    Usize<N>: ChunkCapacity,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        self.iter().for_each(|v| v.hash(state));
    }
}

impl<T, const N: usize, A: Allocator> core::fmt::Debug for Deque<T, N, A>
where
    T: core::fmt::Debug,
    Usize<N>: ChunkCapacity,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize, A: Allocator> IntoIterator for Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    type Item = T;
    type IntoIter = IntoIter<T, N, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::from_deque(self)
    }
}

impl<'a, T, const N: usize, A: Allocator> IntoIterator for &'a Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const N: usize, A: Allocator> IntoIterator for &'a mut Deque<T, N, A>
where
    Usize<N>: ChunkCapacity,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

unsafe impl<T, const N: usize, A: Allocator> Send for Deque<T, N, A>
where
    T: Send,
    A: Send,
    Usize<N>: ChunkCapacity,
{
}

unsafe impl<T, const N: usize, A: Allocator> Sync for Deque<T, N, A>
where
    T: Sync,
    A: Sync,
    Usize<N>: ChunkCapacity,
{
}
