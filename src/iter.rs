//! Iterators over a chunked deque.
//!
//! All of the iterators here keep front-relative indices and resolve the
//! element address through the chunk table only at yield time. No element
//! pointer is cached across calls, so a cursor never dangles no matter
//! where the occupied window sits inside the table.

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::chunk::{slot_addr, RawChunk};
use crate::deque::ChunkedDeque;
use crate::position::Position;

/// Immutable iterator over a [`ChunkedDeque`].
///
/// Created by [`ChunkedDeque::iter`].
pub struct Iter<'a, T> {
    chunks: &'a [RawChunk<T>],
    begin: Position,
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(chunks: &'a [RawChunk<T>], begin: Position, len: usize) -> Self {
        Self {
            chunks,
            begin,
            front: 0,
            back: len,
        }
    }

    #[inline(always)]
    fn slot(&self, index: usize) -> *mut T {
        slot_addr(
            self.chunks,
            Position::from_linear(self.begin.linear() + index),
        )
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline(always)]
    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: indices in `[front, back)` are live slots of the deque
        // this iterator borrows.
        let item = unsafe { &*self.slot(self.front) };
        self.front += 1;
        Some(item)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    #[inline(always)]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }

    #[inline(always)]
    fn count(self) -> usize {
        self.back - self.front
    }

    #[inline(always)]
    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: as in `next`.
        Some(unsafe { &*self.slot(self.back) })
    }

    #[inline(always)]
    fn nth_back(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            chunks: self.chunks,
            begin: self.begin,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// SAFETY: hands out shared references only.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

/// Mutable iterator over a [`ChunkedDeque`].
///
/// Created by [`ChunkedDeque::iter_mut`].
pub struct IterMut<'a, T> {
    chunks: &'a [RawChunk<T>],
    begin: Position,
    front: usize,
    back: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(chunks: &'a [RawChunk<T>], begin: Position, len: usize) -> Self {
        Self {
            chunks,
            begin,
            front: 0,
            back: len,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    fn slot(&self, index: usize) -> *mut T {
        slot_addr(
            self.chunks,
            Position::from_linear(self.begin.linear() + index),
        )
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline(always)]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: the deque is exclusively borrowed for `'a`, and each
        // index in `[front, back)` is yielded at most once, so no two
        // returned references alias.
        let item = unsafe { &mut *self.slot(self.front) };
        self.front += 1;
        Some(item)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }

    #[inline(always)]
    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.front += n;
        self.next()
    }

    #[inline(always)]
    fn last(mut self) -> Option<&'a mut T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: as in `next`.
        Some(unsafe { &mut *self.slot(self.back) })
    }

    #[inline(always)]
    fn nth_back(&mut self, n: usize) -> Option<&'a mut T> {
        if n >= self.back - self.front {
            self.front = self.back;
            return None;
        }
        self.back -= n;
        self.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: same conditions under which `&mut T` itself is Send or Sync.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// Owning iterator over a [`ChunkedDeque`].
///
/// Consumes from the front; elements not yet yielded are dropped together
/// with the iterator.
pub struct IntoIter<T> {
    deque: ChunkedDeque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline(always)]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for ChunkedDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the deque into a front-to-back iterator.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

impl<'a, T> IntoIterator for &'a ChunkedDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ChunkedDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
