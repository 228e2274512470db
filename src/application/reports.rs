//! Report orchestration: parameter validation, cache-aside resolution and
//! the translation of backend failures into generic per-report errors.
//!
//! The cacheable path runs CACHE_LOOKUP -> {HIT -> RETURN; MISS ->
//! COMPUTE -> STORE -> RETURN} with no retries: a COMPUTE failure is
//! terminal for the request, a STORE failure is swallowed by the
//! cache-aside layer and does not affect the returned value.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::{debug, error, warn};

use super::cache::{CacheAside, CacheStats};
use super::engine::AggregationEngine;
use super::flight::SingleFlight;
use crate::domain::{
    Customer, CustomerId, CustomerSpending, LineItem, Money, Order, OrderFilter, Page, Product,
    ProductId, SalesAnalytics, TopProductEntry,
};
use crate::error::{ReportKind, RequestError, Result, StoreError};
use crate::port::{CacheStore, RecordStore};

/// Report-type tag for sales analytics cache keys.
const SALES_ANALYTICS_TAG: &str = "salesAnalytics";

/// One page of a record listing plus the total collection count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

/// Unvalidated line item of an order placement request.
#[derive(Debug, Clone)]
pub struct LineItemRequest {
    pub product_id: String,
    pub quantity: u32,
    pub price_at_purchase: Money,
}

pub struct ReportService<S, C> {
    store: Arc<S>,
    engine: AggregationEngine<S>,
    cache: CacheAside<C>,
    flight: SingleFlight,
    ttl: Duration,
}

impl<S: RecordStore, C: CacheStore> ReportService<S, C> {
    pub fn new(store: Arc<S>, cache: CacheAside<C>, ttl: Duration) -> Self {
        Self {
            engine: AggregationEngine::new(store.clone()),
            store,
            cache,
            flight: SingleFlight::new(),
            ttl,
        }
    }

    /// Spending summary for one customer, or `None` when the customer has
    /// no orders. Not cached.
    pub async fn customer_spending(&self, customer_id: &str) -> Result<Option<CustomerSpending>> {
        let customer = parse_customer_id(customer_id)?;
        self.engine
            .customer_spending(&customer)
            .await
            .map_err(|e| self.report_failure(ReportKind::CustomerSpending, e))
    }

    /// At most `limit` products ranked by units sold descending. Not cached.
    pub async fn top_selling_products(&self, limit: i64) -> Result<Vec<TopProductEntry>> {
        let limit = positive_limit(limit)?;
        self.engine
            .top_selling_products(limit)
            .await
            .map_err(|e| self.report_failure(ReportKind::TopSellingProducts, e))
    }

    /// Time-windowed sales report, resolved cache-aside.
    ///
    /// The key is built from the raw parameter strings with no
    /// normalization, so differently-formatted-but-equal dates receive
    /// independent cache entries. Callers wanting shared entries must
    /// canonicalize their date strings.
    pub async fn sales_analytics(&self, start_raw: &str, end_raw: &str) -> Result<SalesAnalytics> {
        let start = parse_point("startDate", start_raw)?;
        let end = parse_point("endDate", end_raw)?;
        let key = format!("{SALES_ANALYTICS_TAG}:{start_raw}:{end_raw}");

        if let Some(report) = self.cached_sales(&key).await {
            return Ok(report);
        }

        // Miss: serialize concurrent computations of this key. A leader
        // that finished while we waited shows up in the re-check.
        let _permit = self.flight.acquire(&key).await;
        if let Some(report) = self.cached_sales(&key).await {
            return Ok(report);
        }

        let report = self
            .engine
            .sales_analytics(start, end)
            .await
            .map_err(|e| self.report_failure(ReportKind::SalesAnalytics, e))?;

        match serde_json::to_string(&report) {
            Ok(blob) => self.cache.put(&key, &blob, self.ttl).await,
            Err(e) => warn!(key = %key, error = %e, "report not serializable, skipping cache write"),
        }

        Ok(report)
    }

    async fn cached_sales(&self, key: &str) -> Option<SalesAnalytics> {
        let blob = self.cache.get(key).await?;
        match serde_json::from_str(&blob) {
            Ok(report) => {
                debug!(key, "cache hit for sales analytics");
                Some(report)
            }
            Err(e) => {
                warn!(key, error = %e, "undecodable cache entry, recomputing");
                None
            }
        }
    }

    /// Paginated customer listing.
    pub async fn customers(&self, limit: i64, offset: u64) -> Result<Listing<Customer>> {
        let page = page(limit, offset)?;
        let (rows, total) = self
            .store
            .customers(&page)
            .await
            .map_err(|e| self.report_failure(ReportKind::Customers, e))?;
        Ok(Listing { rows, total })
    }

    /// Paginated product listing.
    pub async fn products(&self, limit: i64, offset: u64) -> Result<Listing<Product>> {
        let page = page(limit, offset)?;
        let (rows, total) = self
            .store
            .products(&page)
            .await
            .map_err(|e| self.report_failure(ReportKind::Products, e))?;
        Ok(Listing { rows, total })
    }

    /// Paginated order listing in insertion order.
    pub async fn orders(&self, limit: i64, offset: u64) -> Result<Listing<Order>> {
        let page = page(limit, offset)?;
        let (rows, total) = self
            .store
            .orders_page(&OrderFilter::all(), &page, false)
            .await
            .map_err(|e| self.report_failure(ReportKind::Orders, e))?;
        Ok(Listing { rows, total })
    }

    /// One customer's orders, newest first.
    pub async fn customer_orders(
        &self,
        customer_id: &str,
        limit: i64,
        offset: u64,
    ) -> Result<Listing<Order>> {
        let customer = parse_customer_id(customer_id)?;
        let page = page(limit, offset)?;
        let filter = OrderFilter::all().customer(customer);
        let (rows, total) = self
            .store
            .orders_page(&filter, &page, true)
            .await
            .map_err(|e| self.report_failure(ReportKind::CustomerOrders, e))?;
        Ok(Listing { rows, total })
    }

    /// Place a pending order for a customer. All referenced products are
    /// fetched in one batch; the total is computed from the line items.
    pub async fn place_order(
        &self,
        customer_id: &str,
        items: Vec<LineItemRequest>,
    ) -> Result<Order> {
        let customer = parse_customer_id(customer_id)?;
        if items.is_empty() {
            return Err(RequestError::EmptyOrder.into());
        }

        let mut line_items = Vec::with_capacity(items.len());
        for item in &items {
            let product_id = ProductId::parse(&item.product_id)
                .map_err(|_| RequestError::InvalidId { field: "productId" })?;
            if item.quantity == 0 {
                return Err(RequestError::ZeroQuantity { product_id }.into());
            }
            line_items.push(LineItem {
                product_id,
                quantity: item.quantity,
                price_at_purchase: item.price_at_purchase,
            });
        }

        self.store
            .customer(&customer)
            .await
            .map_err(|e| self.report_failure(ReportKind::PlaceOrder, e))?
            .ok_or(RequestError::UnknownCustomer {
                id: customer.clone(),
            })?;

        let mut wanted: Vec<ProductId> = Vec::new();
        let mut seen: HashSet<&ProductId> = HashSet::new();
        for item in &line_items {
            if seen.insert(&item.product_id) {
                wanted.push(item.product_id.clone());
            }
        }

        let found = self
            .store
            .products_by_ids(&wanted)
            .await
            .map_err(|e| self.report_failure(ReportKind::PlaceOrder, e))?;
        let known: HashSet<&ProductId> = found.iter().map(|p| &p.id).collect();
        for id in &wanted {
            if !known.contains(id) {
                return Err(RequestError::UnknownProduct { id: id.clone() }.into());
            }
        }

        let order = Order::place(customer, line_items, Utc::now());
        self.store
            .insert_order(order.clone())
            .await
            .map_err(|e| self.report_failure(ReportKind::PlaceOrder, e))?;

        Ok(order)
    }

    /// Telemetry snapshot of the cache-aside layer.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn report_failure(&self, kind: ReportKind, err: StoreError) -> crate::error::Error {
        error!(report = ?kind, error = %err, "record store operation failed");
        crate::error::Error::Report(kind)
    }
}

fn parse_customer_id(raw: &str) -> Result<CustomerId> {
    CustomerId::parse(raw).map_err(|_| RequestError::InvalidId { field: "customerId" }.into())
}

/// Parse a point in time: RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC assumed),
/// or `YYYY-MM-DD` (UTC midnight).
fn parse_point(field: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(RequestError::InvalidDate {
        field,
        value: raw.to_string(),
    }
    .into())
}

fn positive_limit(limit: i64) -> Result<usize> {
    if limit <= 0 {
        return Err(RequestError::NonPositiveLimit { value: limit }.into());
    }
    Ok(limit as usize)
}

fn page(limit: i64, offset: u64) -> Result<Page> {
    Ok(Page {
        limit: positive_limit(limit)?,
        offset: offset as usize,
    })
}
