//! Slot coordinates inside the chunk table.
//!
//! A [`Position`] names one storage slot as a `(chunk, offset)` pair. All
//! motion in the crate, window endpoints and iterator cursors alike, routes
//! through the linear-index mapping defined here, so crossing a chunk
//! boundary is one rule instead of a special case at each call site.

use crate::CHUNK_SIZE;

/// Coordinates of one slot: index of the chunk in the table plus offset of
/// the slot within that chunk.
///
/// `offset < CHUNK_SIZE` always. A position with `chunk` equal to the table
/// length and `offset == 0` is the one-past-the-table boundary state; it is
/// never dereferenced.
///
/// The derived ordering is `(chunk, offset)` lexicographic, which coincides
/// with ordering by [`linear`](Position::linear) index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub(crate) struct Position {
    pub chunk: usize,
    pub offset: usize,
}

impl Position {
    #[inline(always)]
    pub fn new(chunk: usize, offset: usize) -> Self {
        debug_assert!(offset < CHUNK_SIZE);
        Self { chunk, offset }
    }

    /// Position of the slot at linear index `n`, i.e. with all chunks laid
    /// out consecutively.
    #[inline(always)]
    pub fn from_linear(n: usize) -> Self {
        Self {
            chunk: n / CHUNK_SIZE,
            offset: n % CHUNK_SIZE,
        }
    }

    /// Linear index of this slot.
    #[inline(always)]
    pub fn linear(self) -> usize {
        self.chunk * CHUNK_SIZE + self.offset
    }

    /// One slot forward, rolling into the next chunk at the boundary.
    #[inline(always)]
    pub fn next(self) -> Self {
        Self::from_linear(self.linear() + 1)
    }

    /// One slot backward, rolling into the previous chunk at the boundary.
    #[inline(always)]
    pub fn prev(self) -> Self {
        debug_assert!(self.linear() > 0);
        Self::from_linear(self.linear() - 1)
    }
}
