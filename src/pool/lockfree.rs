// src/pool/lockfree.rs
//! Lock-free buffer pool.
//!
//! Idle buffers live in a `crossbeam::SegQueue`; an atomic counter tracks the
//! approximate queue length for the size cap. The counter and the queue are
//! not updated in one transaction, so the pool may transiently hold a few
//! more than `max_pool_size` buffers under heavy concurrency.
//!
//! Every buffer is burned (zeroed and reset) before it re-enters the queue,
//! so an acquirer never observes a previous user's bytes.

use super::config::PoolConfig;
use super::stats::{Counters, PoolStats};
use crate::buffer::Buffer;
use crossbeam::queue::SegQueue;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// `SegQueue` with an approximate length.
struct IdleQueue {
    items: SegQueue<Buffer>,
    size: AtomicUsize,
}

impl IdleQueue {
    fn new() -> Self {
        Self {
            items: SegQueue::new(),
            size: AtomicUsize::new(0),
        }
    }

    #[inline]
    fn push(&self, buffer: Buffer) {
        self.items.push(buffer);
        self.size.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn pop(&self) -> Option<Buffer> {
        self.items.pop().inspect(|_| {
            self.size.fetch_sub(1, Ordering::Relaxed);
        })
    }

    #[inline]
    fn len(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }
}

/// State shared by a pool and every buffer it hands out.
struct Shared {
    idle: IdleQueue,
    config: PoolConfig,
    counters: Counters,
}

impl Shared {
    fn allocate(&self) -> Buffer {
        Counters::bump(&self.counters.allocated);
        Buffer::with_config(self.config.buffer)
    }

    fn release(&self, mut buffer: Buffer) {
        buffer.burn();
        Counters::bump(&self.counters.returned);
        if self.idle.len() < self.config.max_pool_size {
            self.idle.push(buffer);
        }
    }
}

/// Thread-safe pool of reusable [`Buffer`]s.
///
/// Share it across threads with an `Arc`; each acquirer owns its
/// [`PooledBuffer`] exclusively until it is dropped.
///
/// # Example
///
/// ```rust
/// use cursorbuf::prelude::*;
/// use std::sync::Arc;
/// use std::thread;
///
/// let pool = Arc::new(BufferPool::new(PoolConfig::default()));
///
/// let handles: Vec<_> = (0..4).map(|_| {
///     let pool = Arc::clone(&pool);
///     thread::spawn(move || {
///         for i in 0..100u32 {
///             let mut buf = pool.acquire();
///             buf.write_u32_be(i).unwrap();
///             assert_eq!(buf.read_u32_be().unwrap(), i);
///         }
///     })
/// }).collect();
/// for h in handles { h.join().unwrap(); }
///
/// assert_eq!(pool.stats().acquired, 400);
/// ```
pub struct BufferPool {
    shared: Arc<Shared>,
}

impl BufferPool {
    /// Creates a new pool and pre-warms it with `config.min_pool_size` buffers.
    pub fn new(config: PoolConfig) -> Self {
        let shared = Arc::new(Shared {
            idle: IdleQueue::new(),
            config,
            counters: Counters::default(),
        });
        for _ in 0..config.min_pool_size.min(config.max_pool_size) {
            let buffer = shared.allocate();
            shared.idle.push(buffer);
        }
        debug!(
            warm = shared.idle.len(),
            max = config.max_pool_size,
            "buffer pool created"
        );
        Self { shared }
    }

    /// The pool's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }

    /// Takes an idle buffer, allocating a new one when none is available.
    ///
    /// The buffer is empty, positioned at 0, and zeroed.
    #[inline]
    pub fn acquire(&self) -> PooledBuffer {
        Counters::bump(&self.shared.counters.acquired);
        let buffer = match self.shared.idle.pop() {
            Some(buffer) => {
                Counters::bump(&self.shared.counters.hits);
                buffer
            }
            None => self.shared.allocate(),
        };
        PooledBuffer {
            buffer,
            shared: Some(Arc::clone(&self.shared)),
        }
    }

    /// Number of idle buffers (approximate under concurrency).
    #[inline]
    pub fn available(&self) -> usize {
        self.shared.idle.len()
    }

    /// Returns a snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        self.shared
            .counters
            .snapshot(self.available(), self.shared.config.max_pool_size)
    }

    /// Pre-allocates buffers until about `target_size` are idle, capped at
    /// `max_pool_size`.
    pub fn warm(&self, target_size: usize) {
        let target = target_size.min(self.shared.config.max_pool_size);
        let current = self.shared.idle.len();
        for _ in current..target {
            let buffer = self.shared.allocate();
            self.shared.idle.push(buffer);
        }
        debug!(target, idle = self.available(), "buffer pool warmed");
    }

    /// Drops every idle buffer.
    ///
    /// Buffers currently handed out are unaffected and return as usual.
    pub fn clear(&self) {
        let mut dropped = 0usize;
        while self.shared.idle.pop().is_some() {
            dropped += 1;
        }
        debug!(dropped, "buffer pool cleared");
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.shared.config)
            .field("available", &self.available())
            .finish()
    }
}

/// A [`Buffer`] on loan from a [`BufferPool`].
///
/// On drop the buffer is burned and returned to the pool if fewer than
/// `max_pool_size` buffers are idle; otherwise it is freed.
pub struct PooledBuffer {
    buffer: Buffer,
    /// `None` once the buffer has left pool management
    shared: Option<Arc<Shared>>,
}

impl PooledBuffer {
    /// Takes the buffer out of the pool for good.
    ///
    /// The returned `Buffer` still zeroes itself when dropped.
    pub fn detach(mut self) -> Buffer {
        if let Some(shared) = self.shared.take() {
            Counters::bump(&shared.counters.detached);
        }
        std::mem::take(&mut self.buffer)
    }

    /// Burns and frees the buffer without returning it to the pool.
    pub fn discard(mut self) {
        if let Some(shared) = self.shared.take() {
            self.buffer.burn();
            Counters::bump(&shared.counters.returned);
            debug!("pooled buffer discarded");
        }
    }
}

impl Deref for PooledBuffer {
    type Target = Buffer;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buffer
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledBuffer").field(&self.buffer).finish()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            shared.release(std::mem::take(&mut self.buffer));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BufferConfig;
    use crate::error::BufferError;

    fn config(max: usize, min: usize) -> PoolConfig {
        PoolConfig {
            buffer: BufferConfig::default(),
            max_pool_size: max,
            min_pool_size: min,
        }
    }

    #[test]
    fn test_prewarm() {
        let pool = BufferPool::new(config(10, 4));
        assert_eq!(pool.available(), 4);
        assert_eq!(pool.stats().allocated, 4);

        let capped = BufferPool::new(config(2, 5));
        assert_eq!(capped.available(), 2);
    }

    #[test]
    fn test_acquire_reuses_idle() {
        let pool = BufferPool::new(config(10, 1));
        {
            let mut buf = pool.acquire();
            buf.write(b"secret").unwrap();
            assert_eq!(pool.available(), 0);
        }
        assert_eq!(pool.available(), 1);

        let buf = pool.acquire();
        let stats = pool.stats();
        assert_eq!(stats.allocated, 1);
        assert_eq!(stats.acquired, 2);
        assert_eq!(stats.returned, 1);
        assert_eq!(stats.in_use(), 1);
        assert!(buf.is_empty());
        assert_eq!(buf.stored(), 0);
    }

    #[test]
    fn test_hit_rate_counts_warm_set() {
        let pool = BufferPool::new(config(8, 4));
        for _ in 0..10 {
            let _buf = pool.acquire();
        }
        let stats = pool.stats();
        assert_eq!(stats.hits, 10);
        assert_eq!(stats.allocated, 4);
        assert!((stats.hit_rate() - 100.0).abs() < f64::EPSILON);

        let cold = BufferPool::new(config(8, 0));
        let held: Vec<_> = (0..2).map(|_| cold.acquire()).collect();
        assert_eq!(cold.stats().hits, 0);
        assert_eq!(cold.stats().hit_rate(), 0.0);
        drop(held);
    }

    #[test]
    fn test_returned_buffer_is_clean() {
        let pool = BufferPool::new(config(4, 0));
        {
            let mut buf = pool.acquire();
            buf.write(&[0xAA; 32]).unwrap();
            buf.take(10).unwrap();
        }
        let mut buf = pool.acquire();
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.read_u8(), Err(BufferError::EndOfInput));
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pool_keeps_config() {
        let pool = BufferPool::new(PoolConfig {
            buffer: BufferConfig::bounded(4),
            max_pool_size: 2,
            min_pool_size: 0,
        });
        let mut buf = pool.acquire();
        assert!(matches!(
            buf.write(b"12345"),
            Err(BufferError::BufferFull { .. })
        ));
    }

    #[test]
    fn test_max_pool_size() {
        let pool = BufferPool::new(config(2, 0));
        let held: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
        drop(held);
        assert_eq!(pool.available(), 2);
        assert_eq!(pool.stats().returned, 5);
    }

    #[test]
    fn test_detach() {
        let pool = BufferPool::new(config(4, 0));
        let mut pooled = pool.acquire();
        pooled.write(b"keep").unwrap();
        let owned = pooled.detach();
        assert_eq!(owned.unread(), b"keep");
        assert_eq!(pool.available(), 0);

        let stats = pool.stats();
        assert_eq!(stats.detached, 1);
        assert_eq!(stats.returned, 0);
        assert_eq!(stats.in_use(), 0);
    }

    #[test]
    fn test_discard() {
        let pool = BufferPool::new(config(4, 0));
        let mut buf = pool.acquire();
        buf.write_u32_be(12345).unwrap();
        buf.discard();
        assert_eq!(pool.available(), 0);
        assert_eq!(pool.stats().in_use(), 0);
    }

    #[test]
    fn test_warm_and_clear() {
        let pool = BufferPool::new(config(20, 0));
        pool.warm(10);
        assert_eq!(pool.available(), 10);
        pool.warm(50);
        assert_eq!(pool.available(), 20);
        pool.clear();
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_multi_thread() {
        use std::thread;

        let pool = Arc::new(BufferPool::new(config(64, 4)));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let p = Arc::clone(&pool);
                thread::spawn(move || {
                    for i in 0..100u32 {
                        let mut buf = p.acquire();
                        buf.write_u32_le(i + t).unwrap();
                        assert_eq!(buf.read_u32_le().unwrap(), i + t);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        let s = pool.stats();
        assert_eq!(s.acquired, 400);
        assert_eq!(s.returned, 400);
        assert_eq!(s.in_use(), 0);
        assert!(s.available <= 64);
    }
}
