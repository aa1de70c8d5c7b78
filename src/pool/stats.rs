// src/pool/stats.rs
//! Statistics tracking for buffer pools.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Live counters shared between a pool and its outstanding buffers.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) allocated: AtomicUsize,
    pub(crate) acquired: AtomicUsize,
    pub(crate) hits: AtomicUsize,
    pub(crate) returned: AtomicUsize,
    pub(crate) detached: AtomicUsize,
}

impl Counters {
    #[inline]
    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, available: usize, max_pool_size: usize) -> PoolStats {
        PoolStats {
            available,
            allocated: self.allocated.load(Ordering::Relaxed),
            acquired: self.acquired.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            detached: self.detached.load(Ordering::Relaxed),
            max_pool_size,
        }
    }
}

/// Point-in-time statistics of a [`BufferPool`](crate::BufferPool).
///
/// Counters are read with `Relaxed` ordering and may be slightly stale under
/// concurrent use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of idle buffers in the pool
    pub available: usize,
    /// Buffers allocated since pool creation (pre-warmed ones included)
    pub allocated: usize,
    /// Total number of `acquire()` calls
    pub acquired: usize,
    /// `acquire()` calls served by an idle buffer
    pub hits: usize,
    /// Buffers released back, whether kept or discarded
    pub returned: usize,
    /// Buffers taken out of pool management with `detach()`
    pub detached: usize,
    /// Maximum number of idle buffers the pool keeps
    pub max_pool_size: usize,
}

impl PoolStats {
    /// Returns the number of buffers currently handed out.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursorbuf::prelude::*;
    ///
    /// let pool = BufferPool::new(PoolConfig::default());
    /// let _buf = pool.acquire();
    ///
    /// let stats = pool.stats();
    /// assert_eq!(stats.in_use(), 1);
    /// ```
    pub fn in_use(&self) -> usize {
        self.acquired
            .saturating_sub(self.returned)
            .saturating_sub(self.detached)
    }

    /// Returns the share of acquires served by an idle buffer, as a
    /// percentage (0.0-100.0). Pre-warmed buffers count as hits.
    pub fn hit_rate(&self) -> f64 {
        if self.acquired == 0 {
            return 0.0;
        }
        (self.hits as f64 / self.acquired as f64) * 100.0
    }
}
