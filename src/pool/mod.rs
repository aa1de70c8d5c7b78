// src/pool/mod.rs
//! Buffer pooling for reuse across threads.

pub(crate) mod config;
pub(crate) mod lockfree;
pub(crate) mod stats;

pub use config::PoolConfig;
pub use lockfree::{BufferPool, PooledBuffer};
pub use stats::PoolStats;
