// src/cursor/core.rs
//! Core cursor structure and consuming operations
//!
//! [`Cursor`] tracks a single position into an owned, growable sequence.
//! Every consuming operation updates the position and the undo bookkeeping
//! together on success and leaves both untouched on failure.

use super::snapshot::Snapshot;
use crate::error::{BufferError, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use zeroize::Zeroize;

/// Source of storage identities; every cursor (and every clone) draws a new one.
static NEXT_STORAGE_ID: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_storage_id() -> u64 {
    NEXT_STORAGE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A bounds-checked position over an owned, growable sequence.
///
/// # Examples
///
/// ```
/// use cursorbuf::Cursor;
/// # use cursorbuf::BufferError;
///
/// let mut cursor = Cursor::new(b"GET /\r\nHost".to_vec());
/// assert_eq!(cursor.till(&b'\n')?, b"GET /\r\n");
/// assert_eq!(cursor.position(), 7);
///
/// cursor.last_take()?;
/// assert_eq!(cursor.position(), 0);
/// # Ok::<(), BufferError>(())
/// ```
#[derive(Debug)]
pub struct Cursor<T> {
    /// Backing storage, exclusively owned
    pub(crate) buffer: Vec<T>,
    /// Current read position, `offset <= buffer.len()`
    pub(crate) offset: usize,
    /// Length of the most recent successful take, 0 when there is none
    pub(crate) last_take_len: usize,
    /// Identity shared by every snapshot of this storage
    pub(crate) id: u64,
}

impl<T: Clone> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            offset: self.offset,
            last_take_len: self.last_take_len,
            id: next_storage_id(),
        }
    }
}

impl<T> fmt::Display for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({})", self.offset)
    }
}

impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Cursor<T> {
    /// Creates a cursor at position 0 over `buffer`.
    pub fn new(buffer: Vec<T>) -> Self {
        Self {
            buffer,
            offset: 0,
            last_take_len: 0,
            id: next_storage_id(),
        }
    }

    /// Returns `true` when every element has been consumed.
    #[inline(always)]
    pub fn eof(&self) -> bool {
        self.offset == self.buffer.len()
    }

    /// Number of elements left after the current position.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Same as [`eof`](Self::eof).
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.eof()
    }

    /// Current position.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Number of elements before the current position.
    #[inline(always)]
    pub fn consumed(&self) -> usize {
        self.offset
    }

    /// Allocated capacity of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The whole backing sequence, consumed part included.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer
    }

    /// Consumes the cursor and returns its storage.
    pub fn into_inner(self) -> Vec<T> {
        self.buffer
    }

    /// Returns everything from the current position to the end without
    /// advancing. The returned length is recorded as the last take.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::EndOfInput`] at EOF.
    pub fn rest(&mut self) -> Result<&[T]> {
        if self.eof() {
            return Err(BufferError::EndOfInput);
        }
        self.last_take_len = self.len();
        Ok(&self.buffer[self.offset..])
    }

    /// Looks at the next `n` elements without consuming them.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if fewer than `n` elements remain.
    pub fn peek(&self, n: usize) -> Result<&[T]> {
        self.peek_at(self.offset, n)
    }

    /// Looks at the `n` elements starting at the absolute position `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if the window leaves the sequence.
    pub fn peek_at(&self, offset: usize, n: usize) -> Result<&[T]> {
        let count = isize::try_from(n).unwrap_or(isize::MAX);
        let end = window_end(offset, count, self.buffer.len())?;
        Ok(&self.buffer[offset..end])
    }

    /// Moves the position by `n` (which may be negative) and returns the new
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if the target leaves
    /// `0..=len`; the position is not changed in that case.
    pub fn advance(&mut self, n: isize) -> Result<usize> {
        self.offset = window_end(self.offset, n, self.buffer.len())?;
        self.last_take_len = self.last_take_len.min(self.offset);
        Ok(self.offset)
    }

    /// Consumes exactly `n` elements.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::EndOfInput`] at EOF and
    /// [`BufferError::Insufficient`] if fewer than `n` remain. Nothing is
    /// consumed on failure.
    pub fn read_n(&mut self, n: usize) -> Result<&[T]> {
        self.check_remaining(n)?;
        let start = self.offset;
        self.offset += n;
        self.last_take_len = n;
        Ok(&self.buffer[start..self.offset])
    }

    /// Alias of [`read_n`](Self::read_n).
    #[inline]
    pub fn take_n(&mut self, n: usize) -> Result<&[T]> {
        self.read_n(n)
    }

    /// Moves the position forward by `n`.
    ///
    /// Unlike [`advance`](Self::advance) this never fails: a negative `n` or
    /// one that would pass the end leaves the cursor untouched.
    pub fn skip(&mut self, n: isize) {
        if n < 0 {
            return;
        }
        let n = n as usize;
        if n > self.len() {
            return;
        }
        self.offset += n;
        self.last_take_len = n;
    }

    /// Rewinds the position by `n`, stopping at 0.
    pub fn undo(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
        self.last_take_len = self.last_take_len.min(self.offset);
    }

    /// Rewinds the position by `n` after a failed higher-level decode,
    /// stopping at 0.
    pub fn untake_n(&mut self, n: usize) {
        if n > self.buffer.len() {
            self.offset = 0;
        } else {
            self.offset = self.offset.saturating_sub(n);
        }
        self.last_take_len = self.last_take_len.min(self.offset);
    }

    /// Rewinds the most recent take and returns its length.
    ///
    /// Only one level is remembered: a second call without a take in between
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::NoPriorTake`] if there is nothing to undo.
    pub fn last_take(&mut self) -> Result<usize> {
        if self.last_take_len == 0 {
            return Err(BufferError::NoPriorTake);
        }
        let n = self.last_take_len;
        self.offset = self.offset.saturating_sub(n);
        self.last_take_len = 0;
        Ok(n)
    }

    /// Discards all content and rewinds to 0 so the cursor can be reused.
    ///
    /// The allocation is kept.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.offset = 0;
        self.last_take_len = 0;
    }

    /// A read-only view at the current position.
    #[inline]
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot::new(&self.buffer, self.offset, self.id)
    }

    /// A read-only view at the absolute position `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if `offset` is past the end.
    pub fn snapshot_at(&self, offset: usize) -> Result<Snapshot<'_, T>> {
        window_end(offset, 0, self.buffer.len())?;
        Ok(Snapshot::new(&self.buffer, offset, self.id))
    }

    /// A view one element further on, or at the same place at EOF.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Snapshot<'_, T> {
        self.snapshot().next()
    }

    /// A view `n` elements further on.
    ///
    /// # Errors
    ///
    /// Same rules as [`read_n`](Self::read_n).
    pub fn next_n(&self, n: usize) -> Result<Snapshot<'_, T>> {
        self.snapshot().next_n(n)
    }

    /// A view positioned at the end of the sequence.
    #[inline]
    pub fn to_eof(&self) -> Snapshot<'_, T> {
        self.snapshot().to_eof()
    }

    /// The elements between the current position and `other`.
    ///
    /// Empty unless `other` was taken from this cursor's storage, when this
    /// cursor is at EOF, or when `other` lies behind the current position.
    pub fn to<'a>(&'a self, other: &Snapshot<'_, T>) -> &'a [T] {
        if self.eof() || !other.is_from(self.id) || other.position() < self.offset {
            return &[];
        }
        &self.buffer[self.offset..other.position()]
    }

    /// The element at the current position, `None` at EOF.
    #[inline]
    pub fn addr(&self) -> Option<&T> {
        self.buffer.get(self.offset)
    }

    /// Mutable access to the element at the current position, `None` at EOF.
    #[inline]
    pub fn addr_mut(&mut self) -> Option<&mut T> {
        self.buffer.get_mut(self.offset)
    }

    #[inline]
    fn check_remaining(&self, n: usize) -> Result<()> {
        if self.eof() {
            return Err(BufferError::EndOfInput);
        }
        let remaining = self.len();
        if n > remaining {
            return Err(BufferError::Insufficient {
                requested: n,
                remaining,
            });
        }
        Ok(())
    }
}

impl<T: Clone> Cursor<T> {
    /// Consumes and returns one element.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::EndOfInput`] at EOF.
    pub fn read(&mut self) -> Result<T> {
        let value = self
            .buffer
            .get(self.offset)
            .cloned()
            .ok_or(BufferError::EndOfInput)?;
        self.offset += 1;
        self.last_take_len = 1;
        Ok(value)
    }

    /// Appends `ts` to the end of the storage and returns how many were added.
    ///
    /// The position does not move.
    pub fn grow(&mut self, ts: &[T]) -> usize {
        self.buffer.extend_from_slice(ts);
        ts.len()
    }
}

impl<T: PartialEq> Cursor<T> {
    /// Consumes up to and including the first `delim` and returns the
    /// consumed run, delimiter included.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::EndOfInput`] at EOF and
    /// [`BufferError::DelimiterNotFound`] if `delim` does not occur.
    pub fn till(&mut self, delim: &T) -> Result<&[T]> {
        let n = self.scan(delim)?;
        self.read_n(n)
    }

    /// Like [`till`](Self::till) but only moves the position. Returns the
    /// number of elements skipped.
    ///
    /// # Errors
    ///
    /// Same as [`till`](Self::till).
    pub fn skip_to(&mut self, delim: &T) -> Result<usize> {
        let n = self.scan(delim)?;
        self.offset += n;
        self.last_take_len = n;
        Ok(n)
    }

    /// Length of the run up to and including `delim`.
    fn scan(&self, delim: &T) -> Result<usize> {
        if self.eof() {
            return Err(BufferError::EndOfInput);
        }
        self.buffer[self.offset..]
            .iter()
            .position(|v| v == delim)
            .map(|i| i + 1)
            .ok_or(BufferError::DelimiterNotFound)
    }
}

impl<T: Zeroize> Zeroize for Cursor<T> {
    fn zeroize(&mut self) {
        self.buffer.zeroize();
        self.offset = 0;
        self.last_take_len = 0;
    }
}

impl<T> From<Vec<T>> for Cursor<T> {
    fn from(buffer: Vec<T>) -> Self {
        Self::new(buffer)
    }
}

/// End of the window `[offset, offset + count)` when it stays in `0..=len`.
pub(crate) fn window_end(offset: usize, count: isize, len: usize) -> Result<usize> {
    offset
        .checked_add_signed(count)
        .filter(|&end| offset <= len && end <= len)
        .ok_or(BufferError::OutOfRange { offset, count, len })
}
