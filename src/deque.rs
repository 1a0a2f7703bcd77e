//! A random-access double-ended queue over fixed-size storage chunks.
//!
//! # Why chunks instead of a ring buffer?
//!
//! A ring buffer keeps its elements in one allocation, so growing it moves
//! every element and invalidates their addresses. Here the elements live in
//! fixed 1024-slot chunks and only the small table of chunk handles is
//! reallocated on growth: an element is constructed once and stays at that
//! address until it is removed. The price is one extra pointer hop on
//! indexed access.
//!
//! # Why recenter the window?
//!
//! Pushing at one end only consumes table slots on that side. Recentering
//! the occupied window on every table reallocation gives both ends equal
//! headroom again, so an alternating push workload cannot thrash the table
//! by repeatedly growing toward one side.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Index, IndexMut};
use core::ptr;

use crate::chunk::{ChunkTable, TableBuilder};
use crate::error::RangeError;
use crate::iter::{Iter, IterMut};
use crate::position::Position;
use crate::CHUNK_SIZE;

/// A double-ended queue over fixed-size storage chunks, with O(1) access by
/// index.
///
/// The deque owns a table of 1024-slot chunks and a pair of positions
/// delimiting the occupied window. Pushing at either end writes into
/// reserved but unconstructed slots; when a push runs out of table on its
/// side, the table doubles and the window is recentered by moving chunk
/// handles, never elements. Once at most a quarter of the reserved chunks
/// hold elements, a removal shrinks the table to half its size, with a
/// floor of two chunks.
///
/// # Examples
///
/// ```rust
/// use chunked_deque::ChunkedDeque;
///
/// let mut deque = ChunkedDeque::new();
/// deque.push_back('b');
/// deque.push_front('a');
/// deque.push_back('c');
/// assert_eq!(deque.iter().collect::<String>(), "abc");
/// assert_eq!(deque.pop_front(), Some('a'));
/// ```
pub struct ChunkedDeque<T> {
    table: ChunkTable<T>,
    begin: Position,
    end: Position,
    len: usize,
}

impl<T> ChunkedDeque<T> {
    /// Number of element slots in one storage chunk.
    pub const CHUNK_SIZE: usize = crate::CHUNK_SIZE;

    /// Creates an empty deque with two reserved chunks.
    ///
    /// The window starts at the tail of the first chunk, so pushes in
    /// either direction land without touching the table.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty deque with enough chunks reserved to push at least
    /// `capacity` elements at the back without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        let table_len = (capacity.div_ceil(CHUNK_SIZE) + 1).max(2);
        let home = Position::new(0, CHUNK_SIZE - 1);
        Self {
            table: ChunkTable::with_chunks(table_len),
            begin: home,
            end: home,
            len: 0,
        }
    }

    /// Creates a deque of `n` default-constructed elements.
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        Self::fill_new(n, T::default)
    }

    /// Creates a deque of `n` clones of `value`.
    ///
    /// Construction is panic-safe: if a clone panics, every element built
    /// so far is dropped and all storage is freed.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::fill_new(n, || value.clone())
    }

    fn fill_new(n: usize, mut make: impl FnMut() -> T) -> Self {
        let table_len = (n.div_ceil(CHUNK_SIZE) + 1).max(2);
        let begin = Position::new(0, CHUNK_SIZE - 1);
        let end = Position::from_linear(begin.linear() + n);
        let mut builder = TableBuilder::new(table_len);
        builder.fill_live_range(begin, end, |_| make());
        Self {
            table: ChunkTable::from_chunks(builder.commit()),
            begin,
            end,
            len: n,
        }
    }

    // ─── Inspection ────────────────────────────────────────────────────────

    /// Number of elements currently stored.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the deque holds no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of element slots currently reserved.
    ///
    /// Always a multiple of [`Self::CHUNK_SIZE`] and at least two chunks'
    /// worth.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.table.len() * CHUNK_SIZE
    }

    /// Position of the front-relative `index` inside the table.
    #[inline(always)]
    fn position(&self, index: usize) -> Position {
        Position::from_linear(self.begin.linear() + index)
    }

    // ─── Element access ────────────────────────────────────────────────────

    /// Returns a reference to the element at `index`, or `None` when out
    /// of range.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // SAFETY: indices below `len` map into the live window.
            Some(unsafe { &*self.table.slot_ptr(self.position(index)) })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `index`, or `None`
    /// when out of range.
    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: as in `get`, and `&mut self` gives exclusivity.
            Some(unsafe { &mut *self.table.slot_ptr(self.position(index)) })
        } else {
            None
        }
    }

    /// Checked access that reports the failing index and the length it was
    /// checked against.
    #[inline(always)]
    pub fn at(&self, index: usize) -> Result<&T, RangeError> {
        let len = self.len;
        self.get(index).ok_or(RangeError { index, len })
    }

    /// Mutable variant of [`at`](Self::at).
    #[inline(always)]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, RangeError> {
        let len = self.len;
        self.get_mut(index).ok_or(RangeError { index, len })
    }

    /// First element, or `None` when empty.
    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline(always)]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Last element, or `None` when empty.
    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        let index = self.len.checked_sub(1)?;
        self.get(index)
    }

    #[inline(always)]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let index = self.len.checked_sub(1)?;
        self.get_mut(index)
    }

    // ─── Push and pop ──────────────────────────────────────────────────────

    /// Appends an element at the back.
    ///
    /// Amortized O(1): when the window reaches the last table slot, the
    /// table doubles and the window recenters by moving chunk handles.
    #[inline(always)]
    pub fn push_back(&mut self, item: T) {
        if self.end.chunk == self.table.len() {
            self.grow();
        }
        // SAFETY: the slot at `end` is reserved and unconstructed.
        unsafe { ptr::write(self.table.slot_ptr(self.end), item) };
        self.end = self.end.next();
        self.len += 1;
    }

    /// Prepends an element at the front.
    #[inline(always)]
    pub fn push_front(&mut self, item: T) {
        if self.begin.linear() == 0 {
            self.grow();
        }
        self.begin = self.begin.prev();
        // SAFETY: the slot before the old `begin` is reserved and
        // unconstructed.
        unsafe { ptr::write(self.table.slot_ptr(self.begin), item) };
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` when empty.
    #[inline(always)]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.end = self.end.prev();
        // SAFETY: `end` now names the last live slot; reading it out moves
        // the element and the slot returns to the reserve.
        let item = unsafe { ptr::read(self.table.slot_ptr(self.end)) };
        self.len -= 1;
        self.maybe_shrink();
        Some(item)
    }

    /// Removes and returns the first element, or `None` when empty.
    #[inline(always)]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `begin` names the first live slot.
        let item = unsafe { ptr::read(self.table.slot_ptr(self.begin)) };
        self.begin = self.begin.next();
        self.len -= 1;
        self.maybe_shrink();
        Some(item)
    }

    // ─── Insertion and removal in the middle ───────────────────────────────

    /// Inserts `item` at front-relative `index`, shifting everything from
    /// `index` onward one slot toward the back.
    ///
    /// Cost is O(`len - index`): the shift always runs toward the back,
    /// even when the front is nearer. `index == len` degenerates to
    /// [`push_back`](Self::push_back).
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) {
        assert!(index <= self.len, "index out of bounds");
        if index == self.len {
            self.push_back(item);
            return;
        }
        if self.end.chunk == self.table.len() {
            self.grow();
        }
        let base = self.begin.linear();
        // SAFETY: the slot past the tail is reserved after the grow check,
        // and the shift runs back to front so every destination is vacant
        // when written.
        unsafe {
            for i in (index..self.len).rev() {
                let from = self.table.slot_ptr(Position::from_linear(base + i));
                let to = self.table.slot_ptr(Position::from_linear(base + i + 1));
                ptr::copy_nonoverlapping(from, to, 1);
            }
            ptr::write(
                self.table.slot_ptr(Position::from_linear(base + index)),
                item,
            );
        }
        self.end = self.end.next();
        self.len += 1;
    }

    /// Removes and returns the element at front-relative `index`, shifting
    /// the tail one slot toward the front. Returns `None` when out of
    /// range.
    ///
    /// Cost is O(`len - index`).
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        let base = self.begin.linear();
        // SAFETY: `index < len`, and each move fills the slot just vacated.
        let item = unsafe {
            let item = ptr::read(self.table.slot_ptr(Position::from_linear(base + index)));
            for i in index + 1..self.len {
                let from = self.table.slot_ptr(Position::from_linear(base + i));
                let to = self.table.slot_ptr(Position::from_linear(base + i - 1));
                ptr::copy_nonoverlapping(from, to, 1);
            }
            item
        };
        self.end = self.end.prev();
        self.len -= 1;
        self.maybe_shrink();
        Some(item)
    }

    // ─── Bulk removal ──────────────────────────────────────────────────────

    /// Shortens the deque to at most `new_len` elements, dropping the tail
    /// back to front. Reserved chunks are kept.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        if mem::needs_drop::<T>() {
            let base = self.begin.linear();
            for i in (new_len..self.len).rev() {
                // SAFETY: each index below `len` names a live slot; each is
                // dropped exactly once here.
                unsafe {
                    ptr::drop_in_place(self.table.slot_ptr(Position::from_linear(base + i)))
                };
            }
        }
        self.end = self.position(new_len);
        self.len = new_len;
    }

    /// Drops every element and recenters the empty window, keeping all
    /// reserved chunks.
    pub fn clear(&mut self) {
        self.truncate(0);
        let home = Position::new((self.table.len() - 1) / 2, CHUNK_SIZE - 1);
        self.begin = home;
        self.end = home;
    }

    // ─── Iteration ─────────────────────────────────────────────────────────

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.table.chunks(), self.begin, self.len)
    }

    /// Front-to-back iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.table.chunks(), self.begin, self.len)
    }

    // ─── Table management ──────────────────────────────────────────────────

    /// Chunks the window spans, counting a trailing partial chunk.
    #[inline(always)]
    fn used_chunks(&self) -> usize {
        self.end.chunk - self.begin.chunk + (self.end.offset != 0) as usize
    }

    /// Doubles the table and recenters the window.
    #[inline(never)]
    fn grow(&mut self) {
        let new_len = self.table.len() * 2;
        let (begin, end) = self.table.recenter(new_len, self.begin, self.end);
        self.begin = begin;
        self.end = end;
    }

    /// Halves the table, with a floor of two chunks, and recenters the
    /// window.
    #[inline(never)]
    fn shrink(&mut self) {
        if self.table.len() <= 2 {
            return;
        }
        let new_len = (self.table.len() / 2).max(2);
        let (begin, end) = self.table.recenter(new_len, self.begin, self.end);
        self.begin = begin;
        self.end = end;
    }

    /// Shrinks once the window occupies at most a quarter of the table.
    /// Evaluated after every removal.
    #[inline(always)]
    fn maybe_shrink(&mut self) {
        if 4 * self.used_chunks() <= self.table.len() {
            self.shrink();
        }
    }
}

impl<T: Clone> ChunkedDeque<T> {
    /// Clones the live window into a fresh table of identical geometry.
    fn clone_table(&self) -> ChunkTable<T> {
        let mut builder = TableBuilder::new(self.table.len());
        builder.fill_live_range(self.begin, self.end, |pos| {
            // SAFETY: `pos` walks the live window of `self`.
            unsafe { (*self.table.slot_ptr(pos)).clone() }
        });
        ChunkTable::from_chunks(builder.commit())
    }
}

impl<T> Drop for ChunkedDeque<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            let mut pos = self.begin;
            for _ in 0..self.len {
                // SAFETY: exactly the window slots are live.
                unsafe { ptr::drop_in_place(self.table.slot_ptr(pos)) };
                pos = pos.next();
            }
        }
    }
}

impl<T: Clone> Clone for ChunkedDeque<T> {
    /// Deep copy with identical table geometry.
    ///
    /// Panic-safe: if an element clone panics, the partially built copy is
    /// destroyed and the source is untouched.
    fn clone(&self) -> Self {
        Self {
            table: self.clone_table(),
            begin: self.begin,
            end: self.end,
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // The replacement table is built in full first, so a panicking
        // element clone leaves `self` unchanged.
        let table = source.clone_table();
        self.truncate(0);
        self.table = table;
        self.begin = source.begin;
        self.end = source.end;
        self.len = source.len;
    }
}

impl<T> Default for ChunkedDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ChunkedDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ChunkedDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for ChunkedDeque<T> {}

impl<T: PartialOrd> PartialOrd for ChunkedDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for ChunkedDeque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for ChunkedDeque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T> Index<usize> for ChunkedDeque<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<T> IndexMut<usize> for ChunkedDeque<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<T> Extend<T> for ChunkedDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T> FromIterator<T> for ChunkedDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Self::with_capacity(iter.size_hint().0);
        deque.extend(iter);
        deque
    }
}

// SAFETY: the deque uniquely owns its elements; the chunk pointers are
// never shared outside the borrow discipline of the public API.
unsafe impl<T: Send> Send for ChunkedDeque<T> {}
unsafe impl<T: Sync> Sync for ChunkedDeque<T> {}
