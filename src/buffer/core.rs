// src/buffer/core.rs
//! Core buffer structure, lifecycle and byte/string operations
//!
//! This module provides the [`Buffer`] type: a byte-oriented façade over a
//! single [`Cursor<u8>`]. Reads consume from the cursor position, writes
//! append to the end of the storage.

use crate::config::BufferConfig;
use crate::cursor::Cursor;
use crate::error::{BufferError, Result};
use std::fmt;
use tracing::trace;
use zeroize::Zeroize;

/// A growable byte buffer with a read cursor.
///
/// Every failing read leaves the position unchanged, so a caller that gets
/// an end-of-data error can append more input and retry.
///
/// # Memory Safety
///
/// The stored bytes are wiped with [`zeroize`] when the buffer is dropped
/// or [`burn`](Self::burn)ed.
///
/// # Examples
///
/// ```
/// use cursorbuf::Buffer;
/// # use cursorbuf::BufferError;
///
/// let mut buf = Buffer::new();
/// buf.write_u16_be(0x0102)?;
/// buf.write_line("hello")?;
///
/// assert_eq!(buf.read_u16_be()?, 0x0102);
/// assert_eq!(buf.read_line()?, "hello");
/// assert!(buf.is_empty());
/// # Ok::<(), BufferError>(())
/// ```
#[derive(Clone, Default)]
pub struct Buffer {
    /// Read position and storage (securely erased on drop)
    pub(crate) cursor: Cursor<u8>,
    /// Capacity limit and varint layout
    pub(crate) config: BufferConfig,
}

impl Buffer {
    /// Creates an empty, unbounded buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursorbuf::Buffer;
    ///
    /// let buf = Buffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.position(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with the given configuration.
    ///
    /// Storage for a bounded buffer is reserved up front.
    pub fn with_config(config: BufferConfig) -> Self {
        let data = match config.capacity {
            Some(capacity) => {
                trace!(capacity, "creating bounded buffer");
                Vec::with_capacity(capacity)
            }
            None => Vec::new(),
        };
        Self {
            cursor: Cursor::new(data),
            config,
        }
    }

    /// Creates a buffer positioned at the start of `data`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursorbuf::Buffer;
    ///
    /// let buf = Buffer::from_vec(vec![1, 2, 3]);
    /// assert_eq!(buf.len(), 3);
    /// ```
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(data),
            config: BufferConfig::default(),
        }
    }

    /// Creates a buffer over `data` with the given configuration.
    ///
    /// The capacity limit applies to later writes only.
    pub fn from_parts(data: Vec<u8>, config: BufferConfig) -> Self {
        Self {
            cursor: Cursor::new(data),
            config,
        }
    }

    /// The buffer's configuration.
    #[inline]
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Number of unread bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cursor.len()
    }

    /// Returns `true` if every byte has been read.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cursor.eof()
    }

    /// Current read position.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Number of stored bytes, read or not. This is what the capacity limit
    /// is checked against.
    #[inline]
    pub fn stored(&self) -> usize {
        self.cursor.as_slice().len()
    }

    /// Always `Ok(())`: no operation leaves the buffer in a failed state.
    #[inline]
    pub fn error(&self) -> Result<()> {
        Ok(())
    }

    /// Discards all content and rewinds so the buffer can be reused.
    ///
    /// This does not zero the memory; use [`burn`](Self::burn) for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursorbuf::Buffer;
    /// # use cursorbuf::BufferError;
    ///
    /// let mut buf = Buffer::new();
    /// buf.write(b"abc")?;
    /// buf.reset();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.position(), 0);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn reset(&mut self) {
        trace!(stored = self.stored(), "resetting buffer");
        self.cursor.reset();
    }

    /// Securely zeros the storage and resets the buffer.
    pub fn burn(&mut self) {
        trace!(stored = self.stored(), "burning buffer");
        self.cursor.zeroize();
    }

    /// Rewinds the position by `n` bytes, stopping at 0.
    ///
    /// Used to put back bytes after a failed higher-level parse.
    #[inline]
    pub fn un_take(&mut self, n: usize) {
        self.cursor.untake_n(n);
    }

    /// Consumes exactly `n` bytes and returns them without copying.
    ///
    /// # Errors
    ///
    /// [`BufferError::EndOfInput`] or [`BufferError::Insufficient`].
    #[inline]
    pub fn take(&mut self, n: usize) -> Result<&[u8]> {
        self.cursor.take_n(n)
    }

    /// Fills `out` completely from the buffer and returns its length.
    ///
    /// # Errors
    ///
    /// Fails without consuming anything if fewer than `out.len()` bytes are
    /// unread.
    pub fn read_into(&mut self, out: &mut [u8]) -> Result<usize> {
        let data = self.cursor.take_n(out.len())?;
        out.copy_from_slice(data);
        Ok(out.len())
    }

    /// Consumes `n` bytes into an owned `Vec`.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.cursor.take_n(n)?.to_vec())
    }

    /// Consumes `n` bytes as UTF-8 text.
    ///
    /// # Errors
    ///
    /// End-of-data errors as for [`take`](Self::take);
    /// [`BufferError::InvalidString`] if the bytes are not UTF-8, in which
    /// case they are put back.
    pub fn read_string(&mut self, n: usize) -> Result<String> {
        let prior = self.cursor.last_take_len;
        let data = self.cursor.take_n(n)?.to_vec();
        String::from_utf8(data).map_err(|_| {
            self.rollback(n, prior);
            BufferError::InvalidString
        })
    }

    /// Consumes through the first `delim` and returns the run, delimiter
    /// included.
    ///
    /// # Errors
    ///
    /// [`BufferError::EndOfInput`] when empty, [`BufferError::DelimiterNotFound`]
    /// when `delim` never occurs. Nothing is consumed on failure.
    #[inline]
    pub fn read_bytes_till(&mut self, delim: u8) -> Result<&[u8]> {
        self.cursor.till(&delim)
    }

    /// Consumes one `\n`-terminated line and returns it without the line
    /// ending (`\n` or `\r\n`).
    ///
    /// # Errors
    ///
    /// As for [`read_bytes_till`](Self::read_bytes_till), plus
    /// [`BufferError::InvalidString`] for non-UTF-8 lines, which are put back.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursorbuf::{Buffer, BufferError};
    ///
    /// let mut buf = Buffer::from_vec(b"hello\r\nworld".to_vec());
    /// assert_eq!(buf.read_line(), Ok("hello".to_string()));
    /// assert_eq!(buf.read_line(), Err(BufferError::DelimiterNotFound));
    /// assert_eq!(buf.position(), 7);
    /// ```
    pub fn read_line(&mut self) -> Result<String> {
        let prior = self.cursor.last_take_len;
        let raw = self.cursor.till(&b'\n')?;
        let consumed = raw.len();
        let line = raw
            .strip_suffix(b"\n")
            .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
            .unwrap_or(raw)
            .to_vec();
        String::from_utf8(line).map_err(|_| {
            self.rollback(consumed, prior);
            BufferError::InvalidString
        })
    }

    /// Appends `data` and returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// [`BufferError::BufferFull`] if a capacity is configured and would be
    /// exceeded; nothing is written in that case.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.ensure_capacity(data.len())?;
        Ok(self.cursor.grow(data))
    }

    /// Appends the UTF-8 bytes of `s`.
    #[inline]
    pub fn write_string(&mut self, s: &str) -> Result<usize> {
        self.write(s.as_bytes())
    }

    /// Appends `line` followed by `\n`.
    pub fn write_line(&mut self, line: &str) -> Result<usize> {
        self.ensure_capacity(line.len() + 1)?;
        let n = self.cursor.grow(line.as_bytes());
        Ok(n + self.cursor.grow(b"\n"))
    }

    /// The unread bytes.
    #[inline]
    pub fn unread(&self) -> &[u8] {
        &self.cursor.as_slice()[self.cursor.position()..]
    }

    /// All stored bytes, including those already read.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.cursor.as_slice()
    }

    /// The underlying cursor.
    #[inline]
    pub fn cursor(&self) -> &Cursor<u8> {
        &self.cursor
    }

    /// Mutable access to the underlying cursor.
    ///
    /// Growing through the cursor bypasses the capacity limit.
    #[inline]
    pub fn cursor_mut(&mut self) -> &mut Cursor<u8> {
        &mut self.cursor
    }

    /// Consumes the buffer and returns its storage without zeroing it.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.cursor).into_inner()
    }

    /// Checks that `additional` more bytes fit under the capacity limit.
    pub(crate) fn ensure_capacity(&self, additional: usize) -> Result<()> {
        let Some(capacity) = self.config.capacity else {
            return Ok(());
        };
        let requested = self.stored().saturating_add(additional);
        if requested > capacity {
            return Err(BufferError::BufferFull {
                capacity,
                requested,
            });
        }
        Ok(())
    }

    /// Puts back `n` bytes consumed by a decode that then failed and
    /// restores the undo record `prior` taken before that decode.
    pub(crate) fn rollback(&mut self, n: usize, prior: usize) {
        self.cursor.untake_n(n);
        self.cursor.last_take_len = prior;
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.cursor.zeroize();
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("position", &self.position())
            .field("unread", &self.len())
            .field("stored", &self.stored())
            .field("config", &self.config)
            .finish()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        self.unread()
    }
}
