// src/cursor/span.rs
//! Spans between two snapshots of the same storage

use super::snapshot::Snapshot;
use std::fmt;

/// A previously consumed extent, delimited by two snapshots.
///
/// # Examples
///
/// ```
/// use cursorbuf::{Cursor, Span};
/// # use cursorbuf::BufferError;
///
/// let mut cursor = Cursor::new("let x = 1;".chars().collect::<Vec<_>>());
/// cursor.skip(4);
/// let start = cursor.position();
/// cursor.till(&' ')?;
///
/// let span = Span::new(cursor.snapshot_at(start)?, cursor.snapshot());
/// assert_eq!(span.value(), &['x', ' ']);
/// assert_eq!(span.to_string(), "Span(\"x \")");
/// # Ok::<(), BufferError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a, T> {
    /// Where the extent begins
    pub start: Snapshot<'a, T>,
    /// Where the extent ends (exclusive)
    pub end: Snapshot<'a, T>,
}

impl<'a, T> Span<'a, T> {
    /// Creates a span from two snapshots.
    pub fn new(start: Snapshot<'a, T>, end: Snapshot<'a, T>) -> Self {
        Self { start, end }
    }

    /// The elements between `start` and `end`.
    ///
    /// Empty if the snapshots are over different storage.
    #[inline]
    pub fn value(&self) -> &'a [T] {
        self.start.to(&self.end)
    }

    /// Number of elements in the span.
    #[inline]
    pub fn len(&self) -> usize {
        self.value().len()
    }

    /// Returns `true` if the span covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

/// How a run of elements renders inside a [`Span`]'s `Display` output.
///
/// The default shows only the positions, `Span(3...7)`.
pub trait SpanFormat: Sized {
    /// Writes the span body for `items`, which lie between `start` and `end`.
    fn fmt_span(
        items: &[Self],
        start: usize,
        end: usize,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let _ = items;
        write!(f, "Span({}...{})", start, end)
    }
}

impl SpanFormat for char {
    fn fmt_span(items: &[Self], _: usize, _: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = items.iter().collect();
        write!(f, "Span({:?})", text)
    }
}

impl SpanFormat for u8 {
    fn fmt_span(items: &[Self], _: usize, _: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Span(b\"{}\")", items.escape_ascii())
    }
}

macro_rules! positional_span_format {
    ($($ty:ty),*) => {
        $(impl SpanFormat for $ty {})*
    };
}

positional_span_format!(i8, u16, i16, u32, i32, u64, i64, usize, isize);

impl<T: SpanFormat> fmt::Display for Span<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        T::fmt_span(self.value(), self.start.position(), self.end.position(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;

    #[test]
    fn test_span_value() {
        let mut c = Cursor::new(b"GET /index HTTP/1.1".to_vec());
        c.skip_to(&b' ').unwrap();
        let start = c.position();
        c.skip_to(&b' ').unwrap();
        let span = Span::new(c.snapshot_at(start).unwrap(), c.snapshot());
        assert_eq!(span.value(), b"/index ");
        assert_eq!(span.len(), 7);
    }

    #[test]
    fn test_span_across_buffers_is_empty() {
        let a = Cursor::new(b"identical".to_vec());
        let b = Cursor::new(b"identical".to_vec());
        let span = Span::new(a.snapshot(), b.to_eof());
        assert!(span.is_empty());
        assert_eq!(span.value(), b"");
    }

    #[test]
    fn test_span_across_zero_sized_buffers_is_empty() {
        let a = Cursor::new(vec![(); 3]);
        let b = Cursor::new(vec![(); 3]);
        let span = Span::new(a.snapshot(), b.to_eof());
        assert_eq!(span.len(), 0);
        assert!(!a.snapshot().same_backing(&b.snapshot()));

        let same = Span::new(a.snapshot(), a.to_eof());
        assert_eq!(same.len(), 3);
    }

    #[test]
    fn test_span_across_clone_is_empty() {
        let a = Cursor::new(b"abc".to_vec());
        let b = a.clone();
        assert!(Span::new(a.snapshot(), b.to_eof()).is_empty());
        assert_eq!(b.to(&b.to_eof()), b"abc");
    }

    #[test]
    fn test_span_display() {
        let bytes = Cursor::new(b"a\nb".to_vec());
        let span = Span::new(bytes.snapshot(), bytes.to_eof());
        assert_eq!(span.to_string(), "Span(b\"a\\nb\")");

        let chars = Cursor::new(vec!['h', 'i']);
        let span = Span::new(chars.snapshot(), chars.to_eof());
        assert_eq!(span.to_string(), "Span(\"hi\")");

        let words = Cursor::new(vec![10u32, 20, 30]);
        let span = Span::new(words.next(), words.to_eof());
        assert_eq!(span.to_string(), "Span(1...3)");
    }
}
