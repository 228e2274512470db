use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::domain::{CustomerId, ProductId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Request validation errors. Raised before any store or cache access;
/// the message names the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid {field}: not a well-formed record id")]
    InvalidId { field: &'static str },

    #[error("invalid {field}: '{value}' does not parse as a date")]
    InvalidDate { field: &'static str, value: String },

    #[error("limit must be greater than 0, got {value}")]
    NonPositiveLimit { value: i64 },

    #[error("order must contain at least one line item")]
    EmptyOrder,

    #[error("line item quantity must be greater than 0 for product {product_id}")]
    ZeroQuantity { product_id: ProductId },

    #[error("customer {id} does not exist")]
    UnknownCustomer { id: CustomerId },

    #[error("product {id} not found")]
    UnknownProduct { id: ProductId },
}

/// Record store backend failures. Translated to a generic per-report
/// failure at the orchestrator boundary; never shown to callers verbatim.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    #[error("record store backend error: {0}")]
    Backend(String),
}

/// Cache backend failures. Always fail-open: callers observe these only
/// as telemetry, never as a request failure.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    #[error("cache connect failed: {0}")]
    Connect(String),

    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Seed-data import errors.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("order {order} references unknown {kind} '{reference}'")]
    UnknownReference {
        order: String,
        kind: &'static str,
        reference: String,
    },

    #[error("order {order} has an unreadable items column: {reason}")]
    BadItems { order: String, reason: String },

    #[error("order {order} has an unreadable {field}: '{value}'")]
    BadField {
        order: String,
        field: &'static str,
        value: String,
    },
}

/// The report a request was computing when its backend failed. The
/// `Display` form is the full user-facing message, which deliberately
/// carries no backend detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    CustomerSpending,
    TopSellingProducts,
    SalesAnalytics,
    Customers,
    Products,
    Orders,
    CustomerOrders,
    PlaceOrder,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::CustomerSpending => "failed to fetch customer spending data",
            Self::TopSellingProducts => "failed to fetch top-selling products",
            Self::SalesAnalytics => "failed to fetch sales analytics",
            Self::Customers => "failed to fetch customers",
            Self::Products => "failed to fetch products",
            Self::Orders => "failed to fetch orders",
            Self::CustomerOrders => "failed to fetch customer orders",
            Self::PlaceOrder => "failed to place order",
        };
        f.write_str(message)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    /// Generic per-report failure. The underlying cause is logged at the
    /// orchestrator boundary before translation.
    #[error("{0}")]
    Report(ReportKind),
}

pub type Result<T> = std::result::Result<T, Error>;
