//! # Chunked Deque
//!
//! A random-access double-ended queue backed by an indirect table of
//! fixed-capacity storage chunks.
//!
//! Unlike a ring buffer, [`ChunkedDeque`] never moves elements when it
//! grows: the table of chunk handles is reallocated and recentered, while
//! every element stays exactly where it was constructed. This keeps both
//! push paths amortized O(1), keeps indexed access O(1), and means a grow
//! step touches `O(chunks)` pointers instead of `O(len)` elements.
//!
//! ## Key properties
//!
//! * `push_back` / `push_front` / `pop_back` / `pop_front` in amortized O(1).
//! * `deque[i]`, `get(i)`, and checked `at(i)` in O(1).
//! * Growth copies chunk handles only, never elements.
//! * The table shrinks again once at most a quarter of its chunks are in use.
//! * Bulk construction (`clone`, [`ChunkedDeque::from_elem`]) is panic-safe:
//!   a panicking element constructor unwinds exactly the slots built so far.
//!
//! ## Example
//!
//! ```rust
//! use chunked_deque::ChunkedDeque;
//!
//! let mut deque: ChunkedDeque<i32> = ChunkedDeque::new();
//! deque.push_back(1);
//! deque.push_back(2);
//! deque.push_front(0);
//!
//! assert_eq!(deque.len(), 3);
//! assert_eq!(deque[0], 0);
//! assert_eq!(deque.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//!
//! assert_eq!(deque.pop_front(), Some(0));
//! assert_eq!(deque.pop_back(), Some(2));
//! ```
//!
//! Checked access reports the rejected index and the length it was checked
//! against:
//!
//! ```rust
//! use chunked_deque::{ChunkedDeque, RangeError};
//!
//! let deque = ChunkedDeque::from_elem(3, 7u32);
//! assert_eq!(deque.at(2), Ok(&7));
//! assert_eq!(deque.at(5), Err(RangeError { index: 5, len: 3 }));
//! ```

// --- Module Declarations ---

mod chunk;
mod deque;
mod error;
mod iter;
mod position;

// --- Re-exports ---

pub use deque::ChunkedDeque;
pub use error::RangeError;
pub use iter::{IntoIter, Iter, IterMut};

/// Number of element slots in one storage chunk.
pub(crate) const CHUNK_SIZE: usize = 1024;
