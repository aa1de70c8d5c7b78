// src/codec/mod.rs
//! Stateless numeric encoders and decoders used by [`Buffer`](crate::Buffer)

pub mod fixed;
pub mod varint;

pub use varint::{MAX_VARINT_LEN, VarintError};
