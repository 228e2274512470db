//! Derived report types produced by the aggregation engine.
//!
//! Wire names are camelCase to match the serialized cache entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CustomerId, ProductId};
use super::money::Money;

/// Spending summary for one customer over all of their orders.
///
/// A customer with zero orders has no summary at all (`None` at the
/// engine boundary), never a zero-valued one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSpending {
    pub customer_id: CustomerId,
    pub total_spent: Money,
    pub average_order_value: Money,
    pub last_order_date: DateTime<Utc>,
}

/// One entry of the top-selling products ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: ProductId,
    pub name: String,
    pub total_sold: u64,
}

/// Revenue attributed to one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Money,
}

/// Time-windowed sales report: completed-order totals plus a per-category
/// revenue breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalytics {
    pub total_revenue: Money,
    pub completed_orders: u64,
    pub category_breakdown: Vec<CategoryRevenue>,
}

impl SalesAnalytics {
    /// The explicit zero report returned when no orders match the window.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            total_revenue: Money::ZERO,
            completed_orders: 0,
            category_breakdown: Vec::new(),
        }
    }
}
