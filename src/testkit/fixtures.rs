//! Builders for domain records used across tests.
//!
//! Factory functions keep tests focused on assertions rather than
//! construction boilerplate. Identifiers are freshly generated; callers
//! keep the returned record to reference its id.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    Customer, CustomerId, LineItem, Order, OrderId, OrderStatus, Product, ProductId,
};

/// Parse an RFC 3339 timestamp; panics on malformed test input.
pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .unwrap_or_else(|_| panic!("bad test timestamp: {raw}"))
        .with_timezone(&Utc)
}

/// Parse a decimal literal; panics on malformed test input.
pub fn money(raw: &str) -> Decimal {
    raw.parse()
        .unwrap_or_else(|_| panic!("bad test amount: {raw}"))
}

/// Create a customer with a generated id.
pub fn customer(name: &str) -> Customer {
    Customer {
        id: CustomerId::generate(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        age: 30,
        location: "Berlin".to_string(),
        gender: "other".to_string(),
    }
}

/// Create a product with a generated id.
pub fn product(name: &str, category: Option<&str>, price: &str) -> Product {
    Product {
        id: ProductId::generate(),
        name: name.to_string(),
        category: category.map(str::to_string),
        price: money(price),
        stock: 100,
    }
}

/// Create a line item for an existing product.
pub fn line(product_id: &ProductId, quantity: u32, price: &str) -> LineItem {
    LineItem {
        product_id: product_id.clone(),
        quantity,
        price_at_purchase: money(price),
    }
}

/// Create an order in a given state, totaled from its line items.
pub fn order(
    customer_id: &CustomerId,
    at: &str,
    status: OrderStatus,
    items: Vec<LineItem>,
) -> Order {
    let total_amount = items.iter().map(LineItem::line_total).sum();
    Order {
        id: OrderId::generate(),
        customer_id: customer_id.clone(),
        items,
        total_amount,
        ordered_at: ts(at),
        status,
    }
}

/// Create a completed order, totaled from its line items.
pub fn completed_order(customer_id: &CustomerId, at: &str, items: Vec<LineItem>) -> Order {
    order(customer_id, at, OrderStatus::Completed, items)
}
