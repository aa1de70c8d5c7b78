// tests/integration_tests.rs
//! Integration tests for cursors, spans, buffers and pools

use cursorbuf::prelude::*;

#[test]
fn test_failed_take_is_atomic() {
    let data: Vec<u8> = (0..16).collect();
    for n in 0..=20usize {
        for start in 0..=16usize {
            let mut cursor = Cursor::new(data.clone());
            cursor.advance(start as isize).unwrap();
            let before = cursor.position();
            let expected_rest = cursor.peek(cursor.len()).unwrap().to_vec();

            if cursor.take_n(n).is_err() {
                assert_eq!(cursor.position(), before, "take_n({n}) at {start}");
                assert_eq!(cursor.peek(cursor.len()).unwrap(), &expected_rest[..]);
                assert!(cursor.read_n(n).is_err());
            } else {
                assert_eq!(cursor.position(), before + n);
            }
        }
    }
}

#[test]
fn test_every_width_round_trips() {
    macro_rules! round_trip {
        ($buf:ident, $write:ident, $read:ident, $width:literal, [$($v:expr),*]) => {
            $(
                let stored = $buf.stored();
                let unread = $buf.len();
                $buf.$write($v).unwrap();
                assert_eq!($buf.stored(), stored + $width);
                assert_eq!($buf.len(), unread + $width);
                assert_eq!($buf.$read().unwrap(), $v);
                assert_eq!($buf.len(), unread);
            )*
        };
    }

    let mut buf = Buffer::new();
    round_trip!(buf, write_u16_be, read_u16_be, 2, [0, 0xBEEF, u16::MAX]);
    round_trip!(buf, write_u16_le, read_u16_le, 2, [0, 0xBEEF, u16::MAX]);
    round_trip!(buf, write_i16_be, read_i16_be, 2, [i16::MIN, -1, i16::MAX]);
    round_trip!(buf, write_i16_le, read_i16_le, 2, [i16::MIN, -1, i16::MAX]);
    round_trip!(buf, write_u24_be, read_u24_be, 3, [0, 0x00AB_CDEF, 0x00FF_FFFF]);
    round_trip!(buf, write_u24_le, read_u24_le, 3, [0, 0x00AB_CDEF, 0x00FF_FFFF]);
    round_trip!(buf, write_i24_be, read_i24_be, 3, [-(1 << 23), -1, (1 << 23) - 1]);
    round_trip!(buf, write_i24_le, read_i24_le, 3, [-(1 << 23), -1, (1 << 23) - 1]);
    round_trip!(buf, write_u32_be, read_u32_be, 4, [0, 0xDEAD_BEEF, u32::MAX]);
    round_trip!(buf, write_u32_le, read_u32_le, 4, [0, 0xDEAD_BEEF, u32::MAX]);
    round_trip!(buf, write_i32_be, read_i32_be, 4, [i32::MIN, -7, i32::MAX]);
    round_trip!(buf, write_i32_le, read_i32_le, 4, [i32::MIN, -7, i32::MAX]);
    round_trip!(buf, write_u40_be, read_u40_be, 5, [0, (1 << 40) - 1]);
    round_trip!(buf, write_u40_le, read_u40_le, 5, [0, (1 << 40) - 1]);
    round_trip!(buf, write_i40_be, read_i40_be, 5, [-(1 << 39), (1 << 39) - 1]);
    round_trip!(buf, write_i40_le, read_i40_le, 5, [-(1 << 39), (1 << 39) - 1]);
    round_trip!(buf, write_u48_be, read_u48_be, 6, [0, (1 << 48) - 1]);
    round_trip!(buf, write_u48_le, read_u48_le, 6, [0, (1 << 48) - 1]);
    round_trip!(buf, write_i48_be, read_i48_be, 6, [-(1 << 47), (1 << 47) - 1]);
    round_trip!(buf, write_i48_le, read_i48_le, 6, [-(1 << 47), (1 << 47) - 1]);
    round_trip!(buf, write_u56_be, read_u56_be, 7, [0, (1 << 56) - 1]);
    round_trip!(buf, write_u56_le, read_u56_le, 7, [0, (1 << 56) - 1]);
    round_trip!(buf, write_i56_be, read_i56_be, 7, [-(1 << 55), (1 << 55) - 1]);
    round_trip!(buf, write_i56_le, read_i56_le, 7, [-(1 << 55), (1 << 55) - 1]);
    round_trip!(buf, write_u64_be, read_u64_be, 8, [0, u64::MAX]);
    round_trip!(buf, write_u64_le, read_u64_le, 8, [0, u64::MAX]);
    round_trip!(buf, write_i64_be, read_i64_be, 8, [i64::MIN, i64::MAX]);
    round_trip!(buf, write_i64_le, read_i64_le, 8, [i64::MIN, i64::MAX]);
}

#[test]
fn test_float_bits_preserved() {
    let f32_patterns = [
        0x7FC0_0000u32,
        0x7F80_0001,
        0xFF80_0000,
        0x8000_0000,
        1.5f32.to_bits(),
    ];
    let f64_patterns = [
        0x7FF8_0000_0000_0001u64,
        0x7FF0_0000_0000_0000,
        0x8000_0000_0000_0000,
        (-2.25f64).to_bits(),
    ];

    let mut buf = Buffer::new();
    for bits in f32_patterns {
        buf.write_f32_be(f32::from_bits(bits)).unwrap();
        assert_eq!(buf.read_f32_be().unwrap().to_bits(), bits);
        buf.write_f32_le(f32::from_bits(bits)).unwrap();
        assert_eq!(buf.read_f32_le().unwrap().to_bits(), bits);
    }
    for bits in f64_patterns {
        buf.write_f64_be(f64::from_bits(bits)).unwrap();
        assert_eq!(buf.read_f64_be().unwrap().to_bits(), bits);
        buf.write_f64_le(f64::from_bits(bits)).unwrap();
        assert_eq!(buf.read_f64_le().unwrap().to_bits(), bits);
    }
    assert!(buf.is_empty());
}

#[test]
fn test_delimiter_scan() {
    let mut buf = Buffer::from_vec(b"ab\ncd".to_vec());
    assert_eq!(buf.read_bytes_till(b'\n').unwrap(), b"ab\n");
    assert_eq!(buf.position(), 3);

    assert_eq!(buf.read_bytes_till(b'\n'), Err(BufferError::DelimiterNotFound));
    assert_eq!(buf.position(), 3);
    assert_eq!(buf.unread(), b"cd");
}

#[test]
fn test_undo_symmetry() {
    let mut cursor = Cursor::new(b"key=value;rest".to_vec());

    cursor.read().unwrap();
    assert_eq!(cursor.last_take().unwrap(), 1);
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.last_take(), Err(BufferError::NoPriorTake));

    cursor.read_n(4).unwrap();
    assert_eq!(cursor.last_take().unwrap(), 4);
    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.last_take(), Err(BufferError::NoPriorTake));

    cursor.advance(4).unwrap();
    assert_eq!(cursor.till(&b';').unwrap(), b"value;");
    assert_eq!(cursor.last_take().unwrap(), 6);
    assert_eq!(cursor.position(), 4);
    assert_eq!(cursor.last_take(), Err(BufferError::NoPriorTake));
}

#[test]
fn test_reset_idempotence() {
    let mut cursor: Cursor<u8> = Cursor::default();
    cursor.reset();
    assert_eq!((cursor.len(), cursor.position()), (0, 0));

    let mut cursor = Cursor::new(vec![1u8, 2, 3, 4]);
    cursor.read_n(3).unwrap();
    cursor.reset();
    assert_eq!((cursor.len(), cursor.position()), (0, 0));
    cursor.reset();
    assert_eq!((cursor.len(), cursor.position()), (0, 0));
    assert_eq!(cursor.last_take(), Err(BufferError::NoPriorTake));

    let mut buf = Buffer::from_vec(b"data".to_vec());
    buf.take(2).unwrap();
    buf.reset();
    buf.reset();
    assert_eq!((buf.len(), buf.position()), (0, 0));
}

#[test]
fn test_cross_buffer_span_is_empty() {
    let a = Cursor::new(b"identical".to_vec());
    let b = Cursor::new(b"identical".to_vec());

    let span = Span::new(a.snapshot(), b.to_eof());
    assert!(span.is_empty());
    assert_eq!(span.value(), b"");
    assert_eq!(a.to(&b.to_eof()), b"");

    let same = Span::new(a.snapshot(), a.to_eof());
    assert_eq!(same.value(), b"identical");
}

#[test]
fn test_text_span_over_chars() {
    let mut cursor = Cursor::new("let x = 42;".chars().collect::<Vec<_>>());
    cursor.skip_to(&'=').unwrap();
    cursor.skip(1);
    let start_pos = cursor.position();
    cursor.skip_to(&';').unwrap();
    let start = cursor.snapshot_at(start_pos).unwrap();
    let end = cursor.snapshot_at(cursor.position() - 1).unwrap();

    let span = Span::new(start, end);
    assert_eq!(span.to_string(), r#"Span("42")"#);
}

#[test]
fn test_line_scenario() {
    let mut buf = Buffer::from_vec(b"hello\nworld\n".to_vec());
    assert_eq!(buf.read_line().unwrap(), "hello");
    assert_eq!(buf.read_line().unwrap(), "world");
    assert_eq!(buf.read_line(), Err(BufferError::EndOfInput));
}

#[test]
fn test_mixed_delimited_writes() {
    let mut buf = Buffer::new();
    buf.write_string("hello").unwrap();
    buf.write_line("world").unwrap();
    assert_eq!(buf.read_line().unwrap(), "helloworld");
    assert_eq!(buf.read_line(), Err(BufferError::EndOfInput));

    buf.write_string("partial").unwrap();
    assert_eq!(buf.read_line(), Err(BufferError::DelimiterNotFound));
    buf.write_line("").unwrap();
    assert_eq!(buf.read_line().unwrap(), "partial");
}

#[test]
fn test_length_prefixed_frame() {
    let mut frame = Buffer::with_config(BufferConfig::network());
    let payload = b"SSH-2.0-cursorbuf";
    frame.write_u32_be(payload.len() as u32).unwrap();
    frame.write_uvarint(7).unwrap();
    frame.write(payload).unwrap();

    let len = frame.read_u32_be().unwrap() as usize;
    let kind = frame.read_uvarint().unwrap();
    let body = frame.read_string(len).unwrap();
    assert_eq!(kind, 7);
    assert_eq!(body, "SSH-2.0-cursorbuf");
}

#[test]
fn test_incremental_parse_resumes() {
    let mut buf = Buffer::new();
    buf.write(&[0x00, 0x00]).unwrap();
    assert!(buf.read_u32_be().unwrap_err().is_incomplete());
    buf.write(&[0x01, 0x00]).unwrap();
    assert_eq!(buf.read_u32_be().unwrap(), 256);
}

#[test]
fn test_fixed_window_wire_contract() {
    let mut buf = Buffer::with_config(BufferConfig::fixed_window());
    buf.write_varint(-3).unwrap();
    buf.write_u8(0xEE).unwrap();
    assert_eq!(buf.stored(), 9);
    assert_eq!(buf.read_varint().unwrap(), -3);
    assert_eq!(buf.read_u8().unwrap(), 0xEE);
}

#[test]
fn test_io_error_conversion() {
    use std::io;

    let mut buf = Buffer::new();
    let err: io::Error = buf.read_u16_le().unwrap_err().into();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

    let result: io::Result<u16> = buf.read_u16_le().into_io();
    assert!(result.is_err());
}

#[test]
fn test_buffer_pool_concurrency() {
    use std::sync::Arc;
    use std::thread;

    let pool = Arc::new(BufferPool::new(PoolConfig {
        buffer: BufferConfig::bounded(64),
        max_pool_size: 16,
        min_pool_size: 4,
    }));

    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for j in 0..100u64 {
                    let mut buf = pool.acquire();
                    assert!(buf.is_empty());
                    buf.write_u64_le(i * 1000 + j).unwrap();
                    buf.write_line("done").unwrap();
                    assert_eq!(buf.read_u64_le().unwrap(), i * 1000 + j);
                    assert_eq!(buf.read_line().unwrap(), "done");
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let stats = pool.stats();
    assert_eq!(stats.acquired, 800);
    assert_eq!(stats.in_use(), 0);
    assert!(stats.available <= 16 + 8);
}
