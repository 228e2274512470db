//! Record store port.
//!
//! The record store owns the durable customer/product/order collections
//! and executes the filter stage of aggregation pipelines; everything
//! downstream of the filter (group, join, sort, limit) runs in the
//! aggregation engine.
//!
//! # Implementation Notes
//!
//! - Implementations must be thread-safe (`Send + Sync`)
//! - Reads must return rows in a deterministic (insertion) order so that
//!   grouped sums are reproducible across identical runs

use std::future::Future;

use crate::domain::{Customer, CustomerId, Order, OrderFilter, Page, Product, ProductId};
use crate::error::StoreError;

pub trait RecordStore: Send + Sync {
    /// Look up one customer by id.
    fn customer(
        &self,
        id: &CustomerId,
    ) -> impl Future<Output = Result<Option<Customer>, StoreError>> + Send;

    /// List customers with the total collection count.
    fn customers(
        &self,
        page: &Page,
    ) -> impl Future<Output = Result<(Vec<Customer>, u64), StoreError>> + Send;

    /// List products with the total collection count.
    fn products(
        &self,
        page: &Page,
    ) -> impl Future<Output = Result<(Vec<Product>, u64), StoreError>> + Send;

    /// Batch lookup of products by id. Unknown ids are silently absent
    /// from the result (join stages drop unmatched rows).
    fn products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> impl Future<Output = Result<Vec<Product>, StoreError>> + Send;

    /// All orders matching a filter, in insertion order.
    fn orders_matching(
        &self,
        filter: &OrderFilter,
    ) -> impl Future<Output = Result<Vec<Order>, StoreError>> + Send;

    /// One page of orders matching a filter, with the total match count.
    /// `newest_first` sorts by order timestamp descending before paging.
    fn orders_page(
        &self,
        filter: &OrderFilter,
        page: &Page,
        newest_first: bool,
    ) -> impl Future<Output = Result<(Vec<Order>, u64), StoreError>> + Send;

    /// Persist a newly placed order.
    fn insert_order(&self, order: Order) -> impl Future<Output = Result<(), StoreError>> + Send;
}
