//! Transactional records: customers, products, orders and their filters.
//!
//! These are the read-side views of the durable records owned by the
//! record store. Orders embed their line items; the order total is
//! captured at placement time and never recomputed from later product
//! price changes.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CustomerId, OrderId, ProductId};
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub location: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub price: Money,
    pub stock: u32,
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

/// One product-quantity-price record embedded within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price_at_purchase: Money,
}

impl LineItem {
    /// Revenue contributed by this line: quantity x price-at-purchase.
    #[must_use]
    pub fn line_total(&self) -> Money {
        Decimal::from(self.quantity) * self.price_at_purchase
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<LineItem>,
    pub total_amount: Money,
    pub ordered_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Build a pending order, capturing the total from its line items.
    #[must_use]
    pub fn place(customer_id: CustomerId, items: Vec<LineItem>, at: DateTime<Utc>) -> Self {
        let total_amount = items.iter().map(LineItem::line_total).sum();
        Self {
            id: OrderId::generate(),
            customer_id,
            items,
            total_amount,
            ordered_at: at,
            status: OrderStatus::Pending,
        }
    }
}

/// Declarative order filter, executed by the record store (the filter
/// stage of an aggregation pipeline is pushed down to the store).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub customer: Option<CustomerId>,
    pub status: Option<OrderStatus>,
    /// Inclusive [start, end] window on the order timestamp.
    pub window: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl OrderFilter {
    /// Filter matching every order.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to one customer's orders.
    #[must_use]
    pub fn customer(mut self, customer: CustomerId) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Restrict to orders in one lifecycle state.
    #[must_use]
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to orders placed within [start, end], inclusive on both ends.
    #[must_use]
    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.window = Some((start, end));
        self
    }

    /// Whether an order satisfies every configured predicate.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(customer) = &self.customer {
            if &order.customer_id != customer {
                return false;
            }
        }
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some((start, end)) = self.window {
            if order.ordered_at < start || order.ordered_at > end {
                return false;
            }
        }
        true
    }
}

/// Pagination window for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}
