// src/pool/config.rs
//! Configuration for buffer pools

use crate::config::BufferConfig;

/// Configuration for buffer pool behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Configuration every pooled buffer is created with
    pub buffer: BufferConfig,
    /// Maximum number of idle buffers to keep in the pool
    pub max_pool_size: usize,
    /// Number of buffers to pre-allocate at startup
    pub min_pool_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            buffer: BufferConfig::default(),
            max_pool_size: 100,
            min_pool_size: 10,
        }
    }
}

impl PoolConfig {
    /// Configuration for embedded systems (low memory).
    pub fn small() -> Self {
        Self {
            buffer: BufferConfig::bounded(1024),
            max_pool_size: 20,
            min_pool_size: 5,
        }
    }

    /// Configuration for high-throughput servers.
    pub fn large() -> Self {
        Self {
            buffer: BufferConfig::default(),
            max_pool_size: 1000,
            min_pool_size: 50,
        }
    }

    /// Configuration for network packet processing (MTU-sized).
    pub fn network() -> Self {
        Self {
            buffer: BufferConfig::network(),
            max_pool_size: 500,
            min_pool_size: 20,
        }
    }
}
