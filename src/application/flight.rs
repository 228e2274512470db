//! Single-flight coalescing for cache misses.
//!
//! Concurrent misses for the same cache key serialize behind a per-key
//! async mutex: the first caller computes and populates the cache,
//! followers re-check the cache under the permit and hit. Map entries are
//! reclaimed when the last interested caller releases its permit.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct SingleFlight {
    permits: DashMap<String, Arc<Mutex<()>>>,
}

/// Held for the duration of one compute-and-store attempt. Dropping the
/// permit releases the key and prunes the slot once nobody else waits.
pub struct FlightPermit<'a> {
    flight: &'a SingleFlight,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SingleFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive rights to compute the value for `key`.
    pub async fn acquire(&self, key: &str) -> FlightPermit<'_> {
        let slot = self
            .permits
            .entry(key.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = slot.lock_owned().await;
        FlightPermit {
            flight: self,
            key: key.to_owned(),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn slots(&self) -> usize {
        self.permits.len()
    }
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        // Release the lock before inspecting the slot's refcount.
        self.guard.take();
        self.flight
            .permits
            .remove_if(&self.key, |_, slot| Arc::strong_count(slot) == 1);
    }
}
