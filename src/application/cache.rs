//! Fail-open cache-aside layer.
//!
//! Wraps a [`CacheStore`] backend and owns its failure semantics: any
//! backend error or timeout degrades to a miss on reads and a dropped
//! write on stores. Failures are logged and counted so operators can
//! observe an unavailable cache without it ever failing a request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::warn;

use crate::error::CacheError;
use crate::port::CacheStore;

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    errors: AtomicU64,
    dropped_writes: AtomicU64,
}

/// Point-in-time view of the cache telemetry counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub errors: u64,
    pub dropped_writes: u64,
}

pub struct CacheAside<C> {
    backend: C,
    op_timeout: Duration,
    counters: Counters,
}

impl<C: CacheStore> CacheAside<C> {
    pub fn new(backend: C, op_timeout: Duration) -> Self {
        Self {
            backend,
            op_timeout,
            counters: Counters::default(),
        }
    }

    /// Read a key. Backend errors and timeouts degrade to `None`.
    pub async fn get(&self, key: &str) -> Option<String> {
        let outcome = match tokio::time::timeout(self.op_timeout, self.backend.get(key)).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        };

        match outcome {
            Ok(Some(value)) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Ok(None) => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Write a key. Backend errors and timeouts drop the write silently
    /// (the next read recomputes).
    pub async fn put(&self, key: &str, value: &str, ttl: Duration) {
        let outcome = match tokio::time::timeout(self.op_timeout, self.backend.set(key, value, ttl))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        };

        if let Err(e) = outcome {
            warn!(key, error = %e, "cache write failed, dropping entry");
            self.counters.errors.fetch_add(1, Ordering::Relaxed);
            self.counters.dropped_writes.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            errors: self.counters.errors.load(Ordering::Relaxed),
            dropped_writes: self.counters.dropped_writes.load(Ordering::Relaxed),
        }
    }
}
