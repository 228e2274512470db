//! Cache store port.
//!
//! The cache holds serialized report blobs keyed by deterministic strings.
//! It is key- and TTL-agnostic: key construction and TTL choice belong to
//! the report orchestrator. Contents are ephemeral and reconstructible;
//! implementations are never treated as authoritative.

use std::future::Future;
use std::time::Duration;

use crate::error::CacheError;

pub trait CacheStore: Send + Sync {
    /// Fetch a stored value if present and unexpired. A healthy miss is
    /// `Ok(None)`, not an error.
    fn get(&self, key: &str)
        -> impl Future<Output = Result<Option<String>, CacheError>> + Send;

    /// Store a value with an expiry, unconditionally overwriting any
    /// existing entry for the key.
    fn set(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;
}
