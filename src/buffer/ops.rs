// src/buffer/ops.rs
//! Buffer numeric read/write operations
//!
//! Reads take exactly the width from the cursor and decode it; writes encode
//! into a stack window and append it. A failed read consumes nothing.

use super::core::Buffer;
use crate::codec::{MAX_VARINT_LEN, VarintError, fixed, varint};
use crate::config::VarintLayout;
use crate::error::{BufferError, Result};

macro_rules! fixed_width_ops {
    ($($read:ident, $write:ident, $get:ident, $put:ident, $ty:ty, $width:literal;)*) => {
        impl Buffer {
            $(
                #[doc = concat!("Reads a `", stringify!($ty), "` from the next ", stringify!($width), " bytes.")]
                #[inline]
                pub fn $read(&mut self) -> Result<$ty> {
                    let data = self.cursor.take_n($width)?;
                    Ok(fixed::$get(data))
                }

                #[doc = concat!("Appends `v` as ", stringify!($width), " bytes, truncating to that width.")]
                #[inline]
                pub fn $write(&mut self, v: $ty) -> Result<usize> {
                    let mut window = [0u8; $width];
                    fixed::$put(&mut window, v);
                    self.write(&window)
                }
            )*
        }
    };
}

fixed_width_ops! {
    read_u16_be, write_u16_be, get_u16_be, put_u16_be, u16, 2;
    read_u16_le, write_u16_le, get_u16_le, put_u16_le, u16, 2;
    read_u24_be, write_u24_be, get_u24_be, put_u24_be, u32, 3;
    read_u24_le, write_u24_le, get_u24_le, put_u24_le, u32, 3;
    read_u32_be, write_u32_be, get_u32_be, put_u32_be, u32, 4;
    read_u32_le, write_u32_le, get_u32_le, put_u32_le, u32, 4;
    read_u40_be, write_u40_be, get_u40_be, put_u40_be, u64, 5;
    read_u40_le, write_u40_le, get_u40_le, put_u40_le, u64, 5;
    read_u48_be, write_u48_be, get_u48_be, put_u48_be, u64, 6;
    read_u48_le, write_u48_le, get_u48_le, put_u48_le, u64, 6;
    read_u56_be, write_u56_be, get_u56_be, put_u56_be, u64, 7;
    read_u56_le, write_u56_le, get_u56_le, put_u56_le, u64, 7;
    read_u64_be, write_u64_be, get_u64_be, put_u64_be, u64, 8;
    read_u64_le, write_u64_le, get_u64_le, put_u64_le, u64, 8;

    read_i16_be, write_i16_be, get_i16_be, put_i16_be, i16, 2;
    read_i16_le, write_i16_le, get_i16_le, put_i16_le, i16, 2;
    read_i24_be, write_i24_be, get_i24_be, put_i24_be, i32, 3;
    read_i24_le, write_i24_le, get_i24_le, put_i24_le, i32, 3;
    read_i32_be, write_i32_be, get_i32_be, put_i32_be, i32, 4;
    read_i32_le, write_i32_le, get_i32_le, put_i32_le, i32, 4;
    read_i40_be, write_i40_be, get_i40_be, put_i40_be, i64, 5;
    read_i40_le, write_i40_le, get_i40_le, put_i40_le, i64, 5;
    read_i48_be, write_i48_be, get_i48_be, put_i48_be, i64, 6;
    read_i48_le, write_i48_le, get_i48_le, put_i48_le, i64, 6;
    read_i56_be, write_i56_be, get_i56_be, put_i56_be, i64, 7;
    read_i56_le, write_i56_le, get_i56_le, put_i56_le, i64, 7;
    read_i64_be, write_i64_be, get_i64_be, put_i64_be, i64, 8;
    read_i64_le, write_i64_le, get_i64_le, put_i64_le, i64, 8;

    read_f32_be, write_f32_be, get_f32_be, put_f32_be, f32, 4;
    read_f32_le, write_f32_le, get_f32_le, put_f32_le, f32, 4;
    read_f64_be, write_f64_be, get_f64_be, put_f64_be, f64, 8;
    read_f64_le, write_f64_le, get_f64_le, put_f64_le, f64, 8;
}

impl Buffer {
    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.cursor.read()
    }

    /// Same as [`read_u8`](Self::read_u8).
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        self.read_u8()
    }

    /// Reads a single byte as a signed value.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a 32-bit big-endian unsigned integer; same as
    /// [`read_u32_be`](Self::read_u32_be).
    #[inline]
    pub fn read_uint_be(&mut self) -> Result<u32> {
        self.read_u32_be()
    }

    /// Reads a 32-bit little-endian unsigned integer; same as
    /// [`read_u32_le`](Self::read_u32_le).
    #[inline]
    pub fn read_uint_le(&mut self) -> Result<u32> {
        self.read_u32_le()
    }

    /// Reads a 32-bit big-endian signed integer; same as
    /// [`read_i32_be`](Self::read_i32_be).
    #[inline]
    pub fn read_int_be(&mut self) -> Result<i32> {
        self.read_i32_be()
    }

    /// Reads a 32-bit little-endian signed integer; same as
    /// [`read_i32_le`](Self::read_i32_le).
    #[inline]
    pub fn read_int_le(&mut self) -> Result<i32> {
        self.read_i32_le()
    }

    /// Appends a single byte.
    #[inline]
    pub fn write_u8(&mut self, v: u8) -> Result<usize> {
        self.write(&[v])
    }

    /// Appends a single signed byte.
    #[inline]
    pub fn write_i8(&mut self, v: i8) -> Result<usize> {
        self.write_u8(v as u8)
    }

    /// Reads an unsigned LEB128 varint laid out per the buffer's
    /// [`VarintLayout`].
    ///
    /// # Errors
    ///
    /// End-of-data errors when the encoding is cut short;
    /// [`BufferError::InvalidVarint`] when it overflows 64 bits (or, for the
    /// fixed window, does not terminate inside it). Nothing is consumed on
    /// failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursorbuf::Buffer;
    /// # use cursorbuf::BufferError;
    ///
    /// let mut buf = Buffer::new();
    /// assert_eq!(buf.write_uvarint(300)?, 2);
    /// assert_eq!(buf.read_uvarint()?, 300);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn read_uvarint(&mut self) -> Result<u64> {
        self.read_varint_with(varint::get_uvarint)
    }

    /// Reads a zigzag-encoded signed varint. See
    /// [`read_uvarint`](Self::read_uvarint).
    pub fn read_varint(&mut self) -> Result<i64> {
        self.read_varint_with(varint::get_varint)
    }

    /// Appends `v` as an unsigned varint and returns the bytes written
    /// (always 8 with [`VarintLayout::FixedWindow`]).
    ///
    /// # Errors
    ///
    /// [`BufferError::BufferFull`] as for [`write`](Self::write);
    /// [`BufferError::InvalidVarint`] if the encoding does not fit the fixed
    /// window.
    pub fn write_uvarint(&mut self, v: u64) -> Result<usize> {
        self.write_varint_with(v, varint::put_uvarint)
    }

    /// Appends `v` as a zigzag-encoded signed varint. See
    /// [`write_uvarint`](Self::write_uvarint).
    pub fn write_varint(&mut self, v: i64) -> Result<usize> {
        self.write_varint_with(v, varint::put_varint)
    }

    fn read_varint_with<V>(
        &mut self,
        decode: fn(&[u8]) -> std::result::Result<(V, usize), VarintError>,
    ) -> Result<V> {
        match self.config.varint {
            VarintLayout::Compact => {
                if self.cursor.eof() {
                    return Err(BufferError::EndOfInput);
                }
                let window = self.cursor.peek(self.cursor.len().min(MAX_VARINT_LEN))?;
                let available = window.len();
                match decode(window) {
                    Ok((v, n)) => {
                        self.cursor.take_n(n)?;
                        Ok(v)
                    }
                    Err(VarintError::Incomplete) => Err(BufferError::Insufficient {
                        requested: available + 1,
                        remaining: available,
                    }),
                    Err(_) => Err(BufferError::InvalidVarint),
                }
            }
            VarintLayout::FixedWindow => {
                let prior = self.cursor.last_take_len;
                let data = self.cursor.take_n(VarintLayout::WINDOW)?;
                match decode(data) {
                    Ok((v, _)) => Ok(v),
                    Err(_) => {
                        self.rollback(VarintLayout::WINDOW, prior);
                        Err(BufferError::InvalidVarint)
                    }
                }
            }
        }
    }

    fn write_varint_with<V>(
        &mut self,
        v: V,
        encode: fn(&mut [u8], V) -> std::result::Result<usize, VarintError>,
    ) -> Result<usize> {
        let mut window = [0u8; MAX_VARINT_LEN];
        let len = match self.config.varint {
            VarintLayout::Compact => encode(&mut window, v),
            VarintLayout::FixedWindow => {
                encode(&mut window[..VarintLayout::WINDOW], v).map(|_| VarintLayout::WINDOW)
            }
        }
        .map_err(|_| BufferError::InvalidVarint)?;
        self.write(&window[..len])
    }
}
