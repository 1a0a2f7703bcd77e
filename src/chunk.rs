//! Raw chunk storage, the chunk table, and panic-safe bulk construction.
//!
//! A [`RawChunk`] owns one fixed-size block of uninitialized element
//! storage. The [`ChunkTable`] owns the ordered handles to those blocks;
//! growing or shrinking the deque reallocates this handle table and
//! recenters the occupied window inside it, moving handles but never
//! elements. [`TableBuilder`] is a scoped, not-yet-committed table used for
//! bulk construction: dropping it before [`TableBuilder::commit`] destroys
//! exactly the slots constructed so far and frees every block.

use core::mem::{self, ManuallyDrop};
use core::ops::Range;
use core::ptr::{self, NonNull};
use std::alloc::{self, Layout};

use crate::position::Position;
use crate::CHUNK_SIZE;

/// One heap block with room for `CHUNK_SIZE` elements, none of them
/// initialized.
///
/// Dropping the handle frees the block without running any element
/// destructor; destroying live slots first is the owner's job.
pub(crate) struct RawChunk<T> {
    ptr: NonNull<T>,
}

impl<T> RawChunk<T> {
    fn layout() -> Layout {
        Layout::array::<T>(CHUNK_SIZE).expect("capacity overflow")
    }

    /// Allocates a fresh, fully uninitialized chunk.
    ///
    /// Zero-sized element types get a dangling, well-aligned pointer and no
    /// allocation at all.
    pub fn new() -> Self {
        let layout = Self::layout();
        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            // SAFETY: the layout has nonzero size.
            let raw = unsafe { alloc::alloc(layout) } as *mut T;
            NonNull::new(raw).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        };
        Self { ptr }
    }

    /// Base address of the block. Valid for `CHUNK_SIZE` slots.
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for RawChunk<T> {
    fn drop(&mut self) {
        let layout = Self::layout();
        if layout.size() != 0 {
            // SAFETY: `ptr` came from `alloc` with this same layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

/// Resolves `pos` to the address of its slot in `chunks`.
#[inline(always)]
pub(crate) fn slot_addr<T>(chunks: &[RawChunk<T>], pos: Position) -> *mut T {
    debug_assert!(pos.offset < CHUNK_SIZE);
    // SAFETY: `offset < CHUNK_SIZE` keeps the address inside the block.
    unsafe { chunks[pos.chunk].as_ptr().add(pos.offset) }
}

/// The ordered table of chunk handles backing a deque.
pub(crate) struct ChunkTable<T> {
    chunks: Vec<RawChunk<T>>,
}

impl<T> ChunkTable<T> {
    /// A table of `n` fresh, uninitialized chunks.
    pub fn with_chunks(n: usize) -> Self {
        debug_assert!(n >= 2);
        Self {
            chunks: (0..n).map(|_| RawChunk::new()).collect(),
        }
    }

    pub fn from_chunks(chunks: Vec<RawChunk<T>>) -> Self {
        Self { chunks }
    }

    /// Number of reserved chunks.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline(always)]
    pub fn chunks(&self) -> &[RawChunk<T>] {
        &self.chunks
    }

    /// Address of the slot at `pos`.
    #[inline(always)]
    pub fn slot_ptr(&self, pos: Position) -> *mut T {
        slot_addr(&self.chunks, pos)
    }

    /// Reallocates the table to `new_len` chunks and recenters the occupied
    /// window `[begin, end)` inside it.
    ///
    /// Handles of chunks inside the window move to the middle of the new
    /// table; every other table slot gets a fresh uninitialized chunk, and
    /// the old chunks outside the window are freed. No element moves, so the
    /// returned positions keep their offsets and shift only by whole chunks.
    pub fn recenter(
        &mut self,
        new_len: usize,
        begin: Position,
        end: Position,
    ) -> (Position, Position) {
        let mut used = end.chunk - begin.chunk;
        if end.offset != 0 {
            used += 1;
        }
        debug_assert!(new_len >= used.max(2));

        let pad = (new_len - used) / 2;
        let mut chunks = Vec::with_capacity(new_len);
        chunks.extend((0..pad).map(|_| RawChunk::new()));
        chunks.extend(self.chunks.drain(begin.chunk..begin.chunk + used));
        chunks.extend((pad + used..new_len).map(|_| RawChunk::new()));
        // Dropping the old vector frees the chunks that did not move.
        self.chunks = chunks;

        (
            Position::new(pad, begin.offset),
            Position::new(pad + (end.chunk - begin.chunk), end.offset),
        )
    }
}

/// Range of constructed slots inside one chunk, tracked for rollback.
struct BuiltRange {
    chunk: usize,
    start: usize,
    end: usize,
}

/// A chunk table under construction.
///
/// All chunks are allocated up front; element slots are then filled through
/// [`fill_with`](TableBuilder::fill_with) or
/// [`fill_live_range`](TableBuilder::fill_live_range). If a constructor
/// panics, dropping the builder destroys the already-constructed slots in
/// reverse construction order and frees every chunk, so the unwind leaks
/// nothing and touches nothing outside the builder.
pub(crate) struct TableBuilder<T> {
    chunks: Vec<RawChunk<T>>,
    built: Vec<BuiltRange>,
}

impl<T> TableBuilder<T> {
    pub fn new(table_len: usize) -> Self {
        debug_assert!(table_len >= 2);
        Self {
            chunks: (0..table_len).map(|_| RawChunk::new()).collect(),
            built: Vec::new(),
        }
    }

    /// Constructs the slots `range` of chunk `chunk`, in ascending offset
    /// order, with values produced by `make`.
    pub fn fill_with<F>(&mut self, chunk: usize, range: Range<usize>, mut make: F)
    where
        F: FnMut(usize) -> T,
    {
        if range.start >= range.end {
            return;
        }
        debug_assert!(range.end <= CHUNK_SIZE);
        let base = self.chunks[chunk].as_ptr();
        self.built.push(BuiltRange {
            chunk,
            start: range.start,
            end: range.start,
        });
        for offset in range {
            let value = make(offset);
            // SAFETY: `offset < CHUNK_SIZE` and the slot is not yet
            // constructed.
            unsafe { ptr::write(base.add(offset), value) };
            // Recorded only after the write, so an unwinding `make` rolls
            // back exactly the slots already in place.
            if let Some(last) = self.built.last_mut() {
                last.end = offset + 1;
            }
        }
    }

    /// Constructs every slot of the window `[begin, end)`.
    ///
    /// Construction order is: interior chunks first, then the back boundary
    /// chunk, then the front boundary chunk. `make` receives the position
    /// being constructed.
    pub fn fill_live_range<F>(&mut self, begin: Position, end: Position, mut make: F)
    where
        F: FnMut(Position) -> T,
    {
        for chunk in begin.chunk + 1..end.chunk {
            self.fill_with(chunk, 0..CHUNK_SIZE, |offset| {
                make(Position::new(chunk, offset))
            });
        }
        if end.chunk != begin.chunk && end.offset != 0 {
            self.fill_with(end.chunk, 0..end.offset, |offset| {
                make(Position::new(end.chunk, offset))
            });
        }
        if begin.chunk == end.chunk {
            self.fill_with(begin.chunk, begin.offset..end.offset, |offset| {
                make(Position::new(begin.chunk, offset))
            });
        } else {
            self.fill_with(begin.chunk, begin.offset..CHUNK_SIZE, |offset| {
                make(Position::new(begin.chunk, offset))
            });
        }
    }

    /// Finishes construction and returns the chunks. No destructor runs.
    pub fn commit(self) -> Vec<RawChunk<T>> {
        let mut this = ManuallyDrop::new(self);
        // The ranges are committed; only the bookkeeping is dropped.
        drop(mem::take(&mut this.built));
        mem::take(&mut this.chunks)
    }
}

impl<T> Drop for TableBuilder<T> {
    fn drop(&mut self) {
        for range in self.built.iter().rev() {
            let base = self.chunks[range.chunk].as_ptr();
            for offset in (range.start..range.end).rev() {
                // SAFETY: exactly the recorded slots hold live values.
                unsafe { ptr::drop_in_place(base.add(offset)) };
            }
        }
    }
}
