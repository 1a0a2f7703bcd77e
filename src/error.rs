//! Error type for checked indexed access.

use core::fmt;

/// Error returned by [`ChunkedDeque::at`](crate::ChunkedDeque::at) and
/// [`ChunkedDeque::at_mut`](crate::ChunkedDeque::at_mut) when the requested
/// index is not below the length.
///
/// Carries both the rejected index and the length it was checked against,
/// so callers can report the failure without re-querying the deque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeError {
    /// The index that was requested.
    pub index: usize,
    /// The deque length at the time of the call.
    pub len: usize,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for deque of length {}",
            self.index, self.len
        )
    }
}

impl std::error::Error for RangeError {}
