//! Orderlens - sales analytics reporting over transactional records.
//!
//! This crate computes derived reports (customer spending, top-selling
//! products, time-windowed sales analytics) from customer/product/order
//! records and serves them through a cache-aside read path that trades
//! freshness for latency.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] - Records, typed identifiers, filters and derived reports
//! - [`port`] - Outbound traits: [`port::RecordStore`], [`port::CacheStore`]
//! - [`adapter`] - In-memory store and cache, Redis cache, CSV seed import
//! - [`application`] - Aggregation pipelines and engine, fail-open
//!   cache-aside layer with telemetry, single-flight miss coalescing, and
//!   the report orchestrator
//! - [`cli`] - Subcommand definitions and dispatch
//! - [`config`] - TOML configuration with environment overrides
//! - [`error`] - Error taxonomy for the crate
//!
//! The aggregation engine composes each report from declarative stages:
//! the filter pushes down to the record store, grouping is
//! insertion-ordered with exact `Decimal` accumulators, joins are batched
//! product lookups, and ranking is a stable sort. Identical inputs always
//! produce identical reports.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use orderlens::adapter::{MemoryCache, MemoryRecordStore};
//! use orderlens::application::{CacheAside, ReportService};
//!
//! # async fn demo() -> orderlens::error::Result<()> {
//! let store = Arc::new(MemoryRecordStore::new());
//! let cache = CacheAside::new(MemoryCache::new(), Duration::from_millis(250));
//! let service = ReportService::new(store, cache, Duration::from_secs(300));
//!
//! let report = service.sales_analytics("2024-01-01", "2024-01-31").await?;
//! println!("revenue: {}", report.total_revenue);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
