// src/cursor/snapshot.rs
//! Read-only cursor views

use super::core::window_end;
use crate::error::{BufferError, Result};

/// An immutable position into a cursor's storage.
///
/// Snapshots borrow the storage, so they cannot outlive the [`Cursor`] they
/// came from and the cursor cannot be mutated while one is alive.
///
/// [`Cursor`]: super::Cursor
#[derive(Debug)]
pub struct Snapshot<'a, T> {
    buffer: &'a [T],
    offset: usize,
    /// Storage identity of the originating cursor
    origin: u64,
}

impl<T> Clone for Snapshot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Snapshot<'_, T> {}

impl<T> PartialEq for Snapshot<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_backing(other) && self.offset == other.offset
    }
}

impl<T> Eq for Snapshot<'_, T> {}

impl<'a, T> Snapshot<'a, T> {
    /// Callers guarantee `offset <= buffer.len()`.
    pub(crate) fn new(buffer: &'a [T], offset: usize, origin: u64) -> Self {
        debug_assert!(offset <= buffer.len());
        Self {
            buffer,
            offset,
            origin,
        }
    }

    /// Position in the backing sequence.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns `true` at the end of the sequence.
    #[inline(always)]
    pub fn eof(&self) -> bool {
        self.offset == self.buffer.len()
    }

    /// Number of elements after this position.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Same as [`eof`](Self::eof).
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.eof()
    }

    /// Everything after this position.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::EndOfInput`] at EOF.
    pub fn rest(&self) -> Result<&'a [T]> {
        if self.eof() {
            return Err(BufferError::EndOfInput);
        }
        Ok(&self.buffer[self.offset..])
    }

    /// The next `n` elements.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if fewer than `n` remain.
    pub fn peek(&self, n: usize) -> Result<&'a [T]> {
        let count = isize::try_from(n).unwrap_or(isize::MAX);
        let end = window_end(self.offset, count, self.buffer.len())?;
        Ok(&self.buffer[self.offset..end])
    }

    /// One element further on, or unchanged at EOF.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&self) -> Self {
        if self.eof() {
            return *self;
        }
        Self::new(self.buffer, self.offset + 1, self.origin)
    }

    /// `n` elements further on.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::EndOfInput`] at EOF and
    /// [`BufferError::Insufficient`] if fewer than `n` remain.
    pub fn next_n(&self, n: usize) -> Result<Self> {
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
        Ok(Self::new(self.buffer, self.offset + n, self.origin))
    }

    /// Positioned at the end of the sequence.
    pub fn to_eof(&self) -> Self {
        Self::new(self.buffer, self.buffer.len(), self.origin)
    }

    /// The elements from this position up to `other`.
    ///
    /// Empty when the two snapshots are over different storage (even with
    /// equal contents), when this one is at EOF, or when `other` is behind.
    pub fn to(&self, other: &Snapshot<'_, T>) -> &'a [T] {
        if self.eof() || !other.is_from(self.origin) || other.offset < self.offset {
            return &[];
        }
        &self.buffer[self.offset..other.offset]
    }

    /// The element at this position, `None` at EOF.
    #[inline]
    pub fn addr(&self) -> Option<&'a T> {
        self.buffer.get(self.offset)
    }

    /// Returns `true` if both snapshots view the same storage.
    #[inline]
    pub fn same_backing(&self, other: &Snapshot<'_, T>) -> bool {
        other.is_from(self.origin)
    }

    /// Whether this snapshot was taken from the cursor with identity `id`.
    #[inline]
    pub(crate) fn is_from(&self, id: u64) -> bool {
        self.origin == id
    }
}
