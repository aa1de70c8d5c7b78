// src/buffer/mod.rs
//! Byte buffer built on a [`Cursor<u8>`](crate::Cursor).

pub mod core;
pub(crate) mod io;
pub(crate) mod ops;

pub use self::core::Buffer;
