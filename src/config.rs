// src/config.rs
//! Configuration for buffers

/// How [`Buffer`](crate::Buffer) lays varints out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarintLayout {
    /// Exactly the encoded length (1 to 10 bytes), interoperable with
    /// standard LEB128 readers
    #[default]
    Compact,
    /// Always an 8-byte window, zero padded after the encoding. Values whose
    /// encoding needs more than 8 bytes cannot be written.
    FixedWindow,
}

impl VarintLayout {
    /// Width of the fixed window.
    pub const WINDOW: usize = 8;
}

/// Configuration for buffer behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferConfig {
    /// Maximum number of stored bytes, consumed bytes included. `None`
    /// means writes always succeed.
    pub capacity: Option<usize>,
    /// Varint wire layout
    pub varint: VarintLayout,
}

impl BufferConfig {
    /// Unbounded buffer with compact varints.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Buffer that rejects writes past `capacity` bytes.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Unbounded buffer using the legacy 8-byte varint window.
    pub fn fixed_window() -> Self {
        Self {
            varint: VarintLayout::FixedWindow,
            ..Self::default()
        }
    }

    /// Configuration for datagram-sized buffers (standard MTU).
    pub fn network() -> Self {
        Self::bounded(1500)
    }

    /// Returns a copy with `varint` replaced.
    pub fn with_varint(self, varint: VarintLayout) -> Self {
        Self { varint, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BufferConfig::default();
        assert_eq!(config.capacity, None);
        assert_eq!(config.varint, VarintLayout::Compact);
    }

    #[test]
    fn test_presets() {
        assert_eq!(BufferConfig::bounded(64).capacity, Some(64));
        assert_eq!(BufferConfig::network().capacity, Some(1500));
        assert_eq!(
            BufferConfig::fixed_window().varint,
            VarintLayout::FixedWindow
        );
        assert_eq!(
            BufferConfig::bounded(8)
                .with_varint(VarintLayout::FixedWindow)
                .capacity,
            Some(8)
        );
    }
}
