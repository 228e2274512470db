//! Shared dataset and wiring helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use orderlens::adapter::{MemoryCache, MemoryRecordStore};
use orderlens::application::{CacheAside, ReportService};
use orderlens::domain::{Customer, OrderStatus, Product};
use orderlens::port::{CacheStore, RecordStore};
use orderlens::testkit::fixtures;

pub const CACHE_TIMEOUT: Duration = Duration::from_millis(250);
pub const TTL: Duration = Duration::from_secs(300);

/// Canonical shop dataset used across the report suites.
///
/// Ada's orders:
/// - 2023-12-01 completed, Keyboard x1 @20        -> 20   (before January)
/// - 2024-01-05 completed, Keyboard x5 @20        -> 100
/// - 2024-01-10 completed, Mouse x3 @10 + Widget x4 @5 -> 50
/// - 2024-01-20 completed, Widget x5 @5           -> 25
/// - 2024-02-15 pending,   Mouse x8 @10           -> 80
///
/// Bo has no orders. The Widget has no category.
pub struct Shop {
    pub store: MemoryRecordStore,
    pub ada: Customer,
    pub bo: Customer,
    pub keyboard: Product,
    pub mouse: Product,
    pub desk: Product,
    pub widget: Product,
}

pub fn shop() -> Shop {
    let store = MemoryRecordStore::new();

    let ada = fixtures::customer("Ada");
    let bo = fixtures::customer("Bo");
    store.insert_customer(ada.clone());
    store.insert_customer(bo.clone());

    let keyboard = fixtures::product("Keyboard", Some("Electronics"), "20");
    let mouse = fixtures::product("Mouse", Some("Electronics"), "10");
    let desk = fixtures::product("Desk", Some("Furniture"), "100");
    let widget = fixtures::product("Widget", None, "5");
    for product in [&keyboard, &mouse, &desk, &widget] {
        store.insert_product(product.clone());
    }

    store.push_order(fixtures::completed_order(
        &ada.id,
        "2023-12-01T09:00:00Z",
        vec![fixtures::line(&keyboard.id, 1, "20")],
    ));
    store.push_order(fixtures::completed_order(
        &ada.id,
        "2024-01-05T09:00:00Z",
        vec![fixtures::line(&keyboard.id, 5, "20")],
    ));
    store.push_order(fixtures::completed_order(
        &ada.id,
        "2024-01-10T12:00:00Z",
        vec![
            fixtures::line(&mouse.id, 3, "10"),
            fixtures::line(&widget.id, 4, "5"),
        ],
    ));
    store.push_order(fixtures::completed_order(
        &ada.id,
        "2024-01-20T18:30:00Z",
        vec![fixtures::line(&widget.id, 5, "5")],
    ));
    store.push_order(fixtures::order(
        &ada.id,
        "2024-02-15T10:00:00Z",
        OrderStatus::Pending,
        vec![fixtures::line(&mouse.id, 8, "10")],
    ));

    Shop {
        store,
        ada,
        bo,
        keyboard,
        mouse,
        desk,
        widget,
    }
}

/// Wire a report service over any store with an in-memory cache.
pub fn service<S: RecordStore>(store: Arc<S>) -> ReportService<S, MemoryCache> {
    ReportService::new(
        store,
        CacheAside::new(MemoryCache::new(), CACHE_TIMEOUT),
        TTL,
    )
}

/// Wire a report service over any store and cache backend.
pub fn service_with_cache<S: RecordStore, C: CacheStore>(
    store: Arc<S>,
    cache: C,
) -> ReportService<S, C> {
    ReportService::new(store, CacheAside::new(cache, CACHE_TIMEOUT), TTL)
}
