//! Fault-injection and counting doubles for the outbound ports.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::{Customer, CustomerId, Order, OrderFilter, Page, Product, ProductId};
use crate::error::{CacheError, StoreError};
use crate::port::{CacheStore, RecordStore};

/// Wraps a record store, counting every read and write that reaches it.
/// Used to assert that validation failures stop before any I/O and that
/// cache hits skip recomputation.
pub struct CountingStore<S> {
    inner: S,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

impl<S: RecordStore> RecordStore for CountingStore<S> {
    async fn customer(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        self.tick();
        self.inner.customer(id).await
    }

    async fn customers(&self, page: &Page) -> Result<(Vec<Customer>, u64), StoreError> {
        self.tick();
        self.inner.customers(page).await
    }

    async fn products(&self, page: &Page) -> Result<(Vec<Product>, u64), StoreError> {
        self.tick();
        self.inner.products(page).await
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        self.tick();
        self.inner.products_by_ids(ids).await
    }

    async fn orders_matching(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        self.tick();
        self.inner.orders_matching(filter).await
    }

    async fn orders_page(
        &self,
        filter: &OrderFilter,
        page: &Page,
        newest_first: bool,
    ) -> Result<(Vec<Order>, u64), StoreError> {
        self.tick();
        self.inner.orders_page(filter, page, newest_first).await
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.insert_order(order).await
    }
}

/// A record store whose every operation fails.
#[derive(Default)]
pub struct FailingStore;

impl FailingStore {
    fn err() -> StoreError {
        StoreError::Unavailable("injected store outage".to_string())
    }
}

impl RecordStore for FailingStore {
    async fn customer(&self, _id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        Err(Self::err())
    }

    async fn customers(&self, _page: &Page) -> Result<(Vec<Customer>, u64), StoreError> {
        Err(Self::err())
    }

    async fn products(&self, _page: &Page) -> Result<(Vec<Product>, u64), StoreError> {
        Err(Self::err())
    }

    async fn products_by_ids(&self, _ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        Err(Self::err())
    }

    async fn orders_matching(&self, _filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        Err(Self::err())
    }

    async fn orders_page(
        &self,
        _filter: &OrderFilter,
        _page: &Page,
        _newest_first: bool,
    ) -> Result<(Vec<Order>, u64), StoreError> {
        Err(Self::err())
    }

    async fn insert_order(&self, _order: Order) -> Result<(), StoreError> {
        Err(Self::err())
    }
}

/// Wraps a record store, delaying every order scan. Lets concurrency
/// tests hold one request inside the compute phase while another
/// arrives.
pub struct DelayedStore<S> {
    inner: S,
    delay: Duration,
}

impl<S> DelayedStore<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<S: RecordStore> RecordStore for DelayedStore<S> {
    async fn customer(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        self.inner.customer(id).await
    }

    async fn customers(&self, page: &Page) -> Result<(Vec<Customer>, u64), StoreError> {
        self.inner.customers(page).await
    }

    async fn products(&self, page: &Page) -> Result<(Vec<Product>, u64), StoreError> {
        self.inner.products(page).await
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        self.inner.products_by_ids(ids).await
    }

    async fn orders_matching(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.orders_matching(filter).await
    }

    async fn orders_page(
        &self,
        filter: &OrderFilter,
        page: &Page,
        newest_first: bool,
    ) -> Result<(Vec<Order>, u64), StoreError> {
        self.inner.orders_page(filter, page, newest_first).await
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        self.inner.insert_order(order).await
    }
}

/// A cache whose every operation fails with a backend error.
#[derive(Default)]
pub struct FailingCache;

impl CacheStore for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Backend("injected cache outage".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Backend("injected cache outage".to_string()))
    }
}

/// A cache that hangs longer than any sane per-call timeout.
#[derive(Default)]
pub struct HangingCache;

impl CacheStore for HangingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

