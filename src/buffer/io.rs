// src/buffer/io.rs
//! `std::io` adapters for [`Buffer`]

use super::core::Buffer;
use std::io;

impl io::Read for Buffer {
    /// Copies up to `out.len()` unread bytes; `Ok(0)` once drained.
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = out.len().min(self.len());
        if n == 0 {
            return Ok(0);
        }
        let data = self.cursor.take_n(n)?;
        out[..n].copy_from_slice(data);
        Ok(n)
    }
}

impl io::Write for Buffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        Buffer::write(self, data).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
