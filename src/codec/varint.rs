// src/codec/varint.rs
//! LEB128 variable-length integers
//!
//! Seven payload bits per byte, least significant group first, high bit set
//! on every byte except the last. Signed values are zigzag-mapped first so
//! small magnitudes stay short. The layout matches Go's `encoding/binary` and
//! protobuf varints.

use std::fmt;

/// Longest encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Why a varint could not be decoded or encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// The input ended before the terminating byte
    Incomplete,
    /// The value does not fit in 64 bits
    Overflow,
    /// The destination is too short for the encoding
    NoSpace,
}

impl fmt::Display for VarintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete => write!(f, "Truncated varint"),
            Self::Overflow => write!(f, "Varint overflows 64 bits"),
            Self::NoSpace => write!(f, "Varint does not fit destination"),
        }
    }
}

impl std::error::Error for VarintError {}

/// Decodes an unsigned varint from the front of `src`.
///
/// Returns the value and the number of bytes it occupied; trailing bytes
/// are ignored.
pub fn get_uvarint(src: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;
    for (i, &byte) in src.iter().take(MAX_VARINT_LEN).enumerate() {
        let group = u64::from(byte & 0x7F);
        // The tenth byte may only carry the single remaining bit.
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(VarintError::Overflow);
        }
        value |= group << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(VarintError::Incomplete)
}

/// Encodes `v` at the front of `dst` and returns the bytes written.
pub fn put_uvarint(dst: &mut [u8], mut v: u64) -> Result<usize, VarintError> {
    let len = uvarint_len(v);
    if dst.len() < len {
        return Err(VarintError::NoSpace);
    }
    for slot in dst.iter_mut().take(len - 1) {
        *slot = (v as u8) | 0x80;
        v >>= 7;
    }
    dst[len - 1] = v as u8;
    Ok(len)
}

/// Decodes a zigzag-encoded signed varint.
pub fn get_varint(src: &[u8]) -> Result<(i64, usize), VarintError> {
    let (zz, n) = get_uvarint(src)?;
    Ok((unzigzag(zz), n))
}

/// Encodes `v` as a zigzag varint and returns the bytes written.
pub fn put_varint(dst: &mut [u8], v: i64) -> Result<usize, VarintError> {
    put_uvarint(dst, zigzag(v))
}

/// Encoded length of `v` in bytes.
pub const fn uvarint_len(v: u64) -> usize {
    let bits = 64 - (v | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encoded length of the signed value `v` in bytes.
pub const fn varint_len(v: i64) -> usize {
    uvarint_len(zigzag(v))
}

#[inline(always)]
const fn zigzag(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

#[inline(always)]
const fn unzigzag(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}
