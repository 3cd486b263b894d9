use core::alloc::Layout;
use core::fmt::{self, Display, Formatter};

use std::alloc::handle_alloc_error;

/// The error returned by checked indexing when the position is not below the length of the deque.
///
/// # Example
/// ```rust
/// use chunked_deque::{Deque, OutOfBounds};
///
/// let deque: Deque<i64, 4> = Deque::from([1, 2, 3]);
///
/// assert_eq!(deque.try_get(2), Ok(&3));
/// assert_eq!(deque.try_get(3), Err(OutOfBounds { index: 3, len: 3 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl Display for OutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index out of bounds: the len is {} but the index is {}",
            self.len, self.index
        )
    }
}

impl std::error::Error for OutOfBounds {}

/// The error returned when the deque could not obtain memory for a chunk or for its index.
///
/// When a fallible operation returns this error the deque is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TryReserveError {
    /// The index would need more slots than fit in memory.
    CapacityOverflow,
    /// The allocator refused the request.
    #[non_exhaustive]
    AllocError { layout: Layout },
}

impl TryReserveError {
    pub(crate) fn panic(self) -> ! {
        match self {
            TryReserveError::CapacityOverflow => panic!("{}", self),
            TryReserveError::AllocError { layout } => handle_alloc_error(layout),
        }
    }
}

impl Display for TryReserveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")?;

        let reason = match self {
            Self::CapacityOverflow => " because the chunk index would exceed the maximum size",
            Self::AllocError { .. } => " because the memory allocator returned an error",
        };

        f.write_str(reason)
    }
}

impl std::error::Error for TryReserveError {}

#[cfg(test)]
mod tests {
    use core::alloc::Layout;

    use super::{OutOfBounds, TryReserveError};

    #[test]
    fn out_of_bounds_display_names_index_and_len() {
        let sut = OutOfBounds { index: 7, len: 3 };
        assert_eq!(
            sut.to_string(),
            "index out of bounds: the len is 3 but the index is 7"
        );
    }

    #[test]
    fn try_reserve_error_display_names_reason() {
        assert_eq!(
            TryReserveError::CapacityOverflow.to_string(),
            "memory allocation failed because the chunk index would exceed the maximum size"
        );

        let layout = Layout::new::<[u64; 4]>();
        assert_eq!(
            TryReserveError::AllocError { layout }.to_string(),
            "memory allocation failed because the memory allocator returned an error"
        );
    }

    #[test]
    fn capacity_overflow_panics() {
        let result = std::panic::catch_unwind(|| TryReserveError::CapacityOverflow.panic());
        assert!(result.is_err());
    }
}
