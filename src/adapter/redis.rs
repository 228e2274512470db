//! Redis cache backend.
//!
//! Uses a tokio connection manager, which multiplexes one connection and
//! reconnects on its own; clones are cheap per-call handles.

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::error::CacheError;
use crate::port::CacheStore;

pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect to a Redis instance, e.g. `redis://127.0.0.1:6379`.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(|e| CacheError::Connect(e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| CacheError::Connect(e.to_string()))?;
        Ok(Self { conn })
    }
}

impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        conn.get(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}
