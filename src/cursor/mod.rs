// src/cursor/mod.rs
//! Generic bounds-checked cursor, read-only snapshots and spans

pub mod core;
pub mod snapshot;
pub mod span;

pub use self::core::Cursor;
pub use snapshot::Snapshot;
pub use span::{Span, SpanFormat};
