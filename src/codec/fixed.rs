// src/codec/fixed.rs
//! Fixed-width integer and float encoders/decoders
//!
//! Every function takes a window of exactly the type's width (e.g. 3 bytes
//! for the 24-bit forms). Writers truncate the value to the width; signed
//! readers sign-extend, so any value that fits round-trips unchanged.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Keeps the low `width` bytes of `v`.
#[inline(always)]
const fn truncate(v: u64, width: usize) -> u64 {
    if width >= 8 {
        v
    } else {
        v & ((1u64 << (width * 8)) - 1)
    }
}

macro_rules! uint_codec {
    ($($get:ident, $put:ident, $order:ty, $ty:ty, $width:literal;)*) => {
        $(
            #[doc = concat!("Decodes a ", stringify!($width), "-byte unsigned integer (", stringify!($order), ").")]
            #[inline]
            pub fn $get(src: &[u8]) -> $ty {
                <$order>::read_uint(src, $width) as $ty
            }

            #[doc = concat!("Encodes the low ", stringify!($width), " bytes of `v` (", stringify!($order), ").")]
            #[inline]
            pub fn $put(dst: &mut [u8], v: $ty) {
                <$order>::write_uint(dst, truncate(v as u64, $width), $width)
            }
        )*
    };
}

macro_rules! int_codec {
    ($($get:ident, $put:ident, $order:ty, $ty:ty, $width:literal;)*) => {
        $(
            #[doc = concat!("Decodes a sign-extended ", stringify!($width), "-byte integer (", stringify!($order), ").")]
            #[inline]
            pub fn $get(src: &[u8]) -> $ty {
                <$order>::read_int(src, $width) as $ty
            }

            #[doc = concat!("Encodes the low ", stringify!($width), " bytes of `v` (", stringify!($order), ").")]
            #[inline]
            pub fn $put(dst: &mut [u8], v: $ty) {
                <$order>::write_int(dst, v as i64, $width)
            }
        )*
    };
}

uint_codec! {
    get_u16_be, put_u16_be, BigEndian, u16, 2;
    get_u16_le, put_u16_le, LittleEndian, u16, 2;
    get_u24_be, put_u24_be, BigEndian, u32, 3;
    get_u24_le, put_u24_le, LittleEndian, u32, 3;
    get_u32_be, put_u32_be, BigEndian, u32, 4;
    get_u32_le, put_u32_le, LittleEndian, u32, 4;
    get_u40_be, put_u40_be, BigEndian, u64, 5;
    get_u40_le, put_u40_le, LittleEndian, u64, 5;
    get_u48_be, put_u48_be, BigEndian, u64, 6;
    get_u48_le, put_u48_le, LittleEndian, u64, 6;
    get_u56_be, put_u56_be, BigEndian, u64, 7;
    get_u56_le, put_u56_le, LittleEndian, u64, 7;
    get_u64_be, put_u64_be, BigEndian, u64, 8;
    get_u64_le, put_u64_le, LittleEndian, u64, 8;
}

int_codec! {
    get_i16_be, put_i16_be, BigEndian, i16, 2;
    get_i16_le, put_i16_le, LittleEndian, i16, 2;
    get_i24_be, put_i24_be, BigEndian, i32, 3;
    get_i24_le, put_i24_le, LittleEndian, i32, 3;
    get_i32_be, put_i32_be, BigEndian, i32, 4;
    get_i32_le, put_i32_le, LittleEndian, i32, 4;
    get_i40_be, put_i40_be, BigEndian, i64, 5;
    get_i40_le, put_i40_le, LittleEndian, i64, 5;
    get_i48_be, put_i48_be, BigEndian, i64, 6;
    get_i48_le, put_i48_le, LittleEndian, i64, 6;
    get_i56_be, put_i56_be, BigEndian, i64, 7;
    get_i56_le, put_i56_le, LittleEndian, i64, 7;
    get_i64_be, put_i64_be, BigEndian, i64, 8;
    get_i64_le, put_i64_le, LittleEndian, i64, 8;
}

/// Decodes a big-endian IEEE-754 single, bit pattern preserved.
#[inline]
pub fn get_f32_be(src: &[u8]) -> f32 {
    BigEndian::read_f32(src)
}

/// Decodes a little-endian IEEE-754 single, bit pattern preserved.
#[inline]
pub fn get_f32_le(src: &[u8]) -> f32 {
    LittleEndian::read_f32(src)
}

/// Decodes a big-endian IEEE-754 double, bit pattern preserved.
#[inline]
pub fn get_f64_be(src: &[u8]) -> f64 {
    BigEndian::read_f64(src)
}

/// Decodes a little-endian IEEE-754 double, bit pattern preserved.
#[inline]
pub fn get_f64_le(src: &[u8]) -> f64 {
    LittleEndian::read_f64(src)
}

/// Encodes a big-endian IEEE-754 single.
#[inline]
pub fn put_f32_be(dst: &mut [u8], v: f32) {
    BigEndian::write_f32(dst, v)
}

/// Encodes a little-endian IEEE-754 single.
#[inline]
pub fn put_f32_le(dst: &mut [u8], v: f32) {
    LittleEndian::write_f32(dst, v)
}

/// Encodes a big-endian IEEE-754 double.
#[inline]
pub fn put_f64_be(dst: &mut [u8], v: f64) {
    BigEndian::write_f64(dst, v)
}

/// Encodes a little-endian IEEE-754 double.
#[inline]
pub fn put_f64_le(dst: &mut [u8], v: f64) {
    LittleEndian::write_f64(dst, v)
}
