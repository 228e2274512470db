//! Implementations of ports (hexagonal adapters).

pub mod memory;
pub mod redis;
pub mod seed;

use std::time::Duration;

use crate::error::CacheError;
use crate::port::CacheStore;

pub use memory::{MemoryCache, MemoryRecordStore};
pub use redis::RedisCache;
pub use seed::{load_dir, SeedSummary};

/// Runtime-selected cache backend. Port traits return opaque futures, so
/// backend choice is an enum rather than a trait object.
pub enum CacheBackend {
    Memory(MemoryCache),
    Redis(RedisCache),
}

impl CacheStore for CacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::Redis(cache) => cache.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => cache.set(key, value, ttl).await,
            Self::Redis(cache) => cache.set(key, value, ttl).await,
        }
    }
}
