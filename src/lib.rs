// src/lib.rs
//! # Cursor-Based Buffer Library
//!
//! Bounds-checked sequential access over owned sequences, with a byte
//! buffer façade for wire formats and line-oriented text.
//!
//! Features:
//! - Generic [`Cursor<T>`] with peek/take/undo and borrowed [`Snapshot`]s
//! - [`Span`]s delimiting sub-ranges between two positions on one backing
//! - [`Buffer`] codecs for 8 to 64-bit integers in both byte orders, IEEE-754
//!   floats and LEB128 varints
//! - Atomic failures: a read that errors consumes nothing
//! - Secure memory zeroing using `zeroize` on drop and burn
//! - Thread-safe buffer pooling with lock-free design
//!
//! ```
//! use cursorbuf::prelude::*;
//!
//! let mut buf = Buffer::from_vec(b"GET /\r\nHost: x\r\n".to_vec());
//! assert_eq!(buf.read_line()?, "GET /");
//!
//! let cursor = buf.cursor();
//! let start = cursor.snapshot();
//! let end = start.next_n(4)?;
//! assert_eq!(Span::new(start, end).to_string(), r#"Span(b"Host")"#);
//! # Ok::<(), BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod codec;
pub mod config;
pub mod cursor;
pub mod error;
pub mod pool;

// Re-export main types
pub use buffer::Buffer;
pub use codec::VarintError;
pub use config::{BufferConfig, VarintLayout};
pub use cursor::{Cursor, Snapshot, Span, SpanFormat};
pub use error::{BufferError, Result, ResultExt};
pub use pool::{BufferPool, PoolConfig, PoolStats, PooledBuffer};

/// Commonly used imports.
pub mod prelude {
    pub use crate::buffer::Buffer;
    pub use crate::config::{BufferConfig, VarintLayout};
    pub use crate::cursor::{Cursor, Snapshot, Span, SpanFormat};
    pub use crate::error::{BufferError, Result, ResultExt};
    pub use crate::pool::{BufferPool, PoolConfig, PoolStats, PooledBuffer};
}
