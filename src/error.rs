// src/error.rs
//! Error types for cursor and buffer operations

use std::fmt;

/// Errors that can occur during cursor and buffer operations.
///
/// Every failing consuming operation leaves the cursor position unchanged, so
/// most of these can be treated as "need more input" by streaming callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// A consuming operation was attempted with no data left
    EndOfInput,
    /// Fewer elements remain than were requested
    Insufficient {
        /// Number of elements requested
        requested: usize,
        /// Number of elements still available
        remaining: usize,
    },
    /// A window `[offset, offset + count)` falls outside `0..=len`
    OutOfRange {
        /// Start of the window
        offset: usize,
        /// Signed extent of the window
        count: isize,
        /// Length of the backing sequence
        len: usize,
    },
    /// A delimiter scan reached the end of data without a match
    DelimiterNotFound,
    /// `last_take` was called with no recorded take to undo
    NoPriorTake,
    /// A write would exceed the configured capacity
    BufferFull {
        /// Configured capacity in bytes
        capacity: usize,
        /// Total bytes the write would have required
        requested: usize,
    },
    /// Invalid UTF-8 in a string read
    InvalidString,
    /// Malformed or oversized variable-length integer
    InvalidVarint,
    /// I/O error (for compatibility)
    Io(String),
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfInput => write!(f, "End of input"),
            Self::Insufficient {
                requested,
                remaining,
            } => write!(
                f,
                "Insufficient data: requested {}, {} remaining",
                requested, remaining
            ),
            Self::OutOfRange { offset, count, len } => write!(
                f,
                "Window {}{:+} out of range 0..={}",
                offset, count, len
            ),
            Self::DelimiterNotFound => write!(f, "Delimiter not found"),
            Self::NoPriorTake => write!(f, "No prior take to undo"),
            Self::BufferFull {
                capacity,
                requested,
            } => write!(
                f,
                "Buffer full: {} bytes requested, capacity {}",
                requested, capacity
            ),
            Self::InvalidString => write!(f, "Invalid string encoding"),
            Self::InvalidVarint => write!(f, "Invalid varint"),
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for BufferError {}

impl BufferError {
    /// Returns `true` for the kinds that mean "not enough data yet".
    ///
    /// A streaming caller can append more input and retry the same read.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            Self::EndOfInput | Self::Insufficient { .. } | Self::DelimiterNotFound
        )
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Convert BufferError to std::io::Error
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        use std::io::ErrorKind;
        match err {
            BufferError::EndOfInput
            | BufferError::Insufficient { .. }
            | BufferError::DelimiterNotFound => std::io::Error::new(ErrorKind::UnexpectedEof, err),
            BufferError::BufferFull { .. } => std::io::Error::new(ErrorKind::WriteZero, err),
            BufferError::InvalidString | BufferError::InvalidVarint => {
                std::io::Error::new(ErrorKind::InvalidData, err)
            }
            BufferError::OutOfRange { .. } | BufferError::NoPriorTake => {
                std::io::Error::new(ErrorKind::InvalidInput, err)
            }
            BufferError::Io(msg) => std::io::Error::other(msg),
        }
    }
}

/// Convert std::io::Error to BufferError
impl From<std::io::Error> for BufferError {
    fn from(err: std::io::Error) -> Self {
        BufferError::Io(err.to_string())
    }
}

// BufferError -> anyhow::Error comes from anyhow's blanket impl over
// `std::error::Error + Send + Sync + 'static`.

/// Allow using ? with anyhow::Error
#[cfg(feature = "anyhow")]
impl From<anyhow::Error> for BufferError {
    fn from(err: anyhow::Error) -> Self {
        BufferError::Io(err.to_string())
    }
}

// ============================================================================
// RESULT TYPE ALIASES
// ============================================================================

/// Result type alias for cursor and buffer operations
pub type Result<T> = std::result::Result<T, BufferError>;

/// Extension trait for converting Results between different error types
pub trait ResultExt<T> {
    /// Convert to anyhow::Result
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T>;

    /// Convert to io::Result
    fn into_io(self) -> std::io::Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[cfg(feature = "anyhow")]
    fn into_anyhow(self) -> anyhow::Result<T> {
        self.map_err(|e| e.into())
    }

    fn into_io(self) -> std::io::Result<T> {
        self.map_err(|e| e.into())
    }
}

/// Converts the error of a buffer operation into another error type.
///
/// The one-argument form targets `std::io::Error`; pass the target type
/// explicitly for anything else.
///
/// # Example
/// ```
/// use cursorbuf::{buffer_op, Buffer};
///
/// fn first_byte(buf: &mut Buffer) -> std::io::Result<u8> {
///     buffer_op!(buf.read_u8())
/// }
///
/// let mut buf = Buffer::from_vec(vec![7]);
/// assert_eq!(first_byte(&mut buf).unwrap(), 7);
/// assert!(first_byte(&mut buf).is_err());
/// ```
#[macro_export]
macro_rules! buffer_op {
    ($expr:expr, $target:ty) => {
        $expr.map_err(|e: $crate::BufferError| -> $target { e.into() })
    };
    ($expr:expr) => {
        $expr.map_err(|e: $crate::BufferError| -> std::io::Error { e.into() })
    };
}
