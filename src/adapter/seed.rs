//! CSV seed-data import.
//!
//! Loads `customers.csv`, `products.csv` and `orders.csv` from a
//! directory into a [`MemoryRecordStore`]. External ids in the dumps are
//! remapped to freshly generated record ids, with order references
//! resolved through the remapping so the imported graph stays consistent.
//! Order totals are recomputed from the line items rather than trusted
//! from the dump.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use super::memory::MemoryRecordStore;
use crate::domain::{
    Customer, CustomerId, LineItem, Order, OrderId, OrderStatus, Product, ProductId,
};
use crate::error::SeedError;

#[derive(Debug, Deserialize)]
struct CustomerRow {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    email: String,
    age: u32,
    location: String,
    gender: String,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    category: String,
    price: Decimal,
    stock: u32,
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "customerId")]
    customer_id: String,
    products: String,
    #[serde(rename = "orderDate")]
    order_date: String,
    status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    product_id: String,
    quantity: u32,
    price_at_purchase: Decimal,
}

/// Row counts of a completed import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
}

/// Import all three seed files from `dir` into `store`.
pub fn load_dir(dir: &Path, store: &MemoryRecordStore) -> Result<SeedSummary, SeedError> {
    let mut customer_ids: HashMap<String, CustomerId> = HashMap::new();
    let mut product_ids: HashMap<String, ProductId> = HashMap::new();

    let customers = read_rows::<CustomerRow>(&dir.join("customers.csv"))?;
    for row in &customers {
        let id = CustomerId::generate();
        customer_ids.insert(row.id.clone(), id.clone());
        store.insert_customer(Customer {
            id,
            name: row.name.clone(),
            email: row.email.clone(),
            age: row.age,
            location: row.location.clone(),
            gender: row.gender.clone(),
        });
    }

    let products = read_rows::<ProductRow>(&dir.join("products.csv"))?;
    for row in &products {
        let id = ProductId::generate();
        product_ids.insert(row.id.clone(), id.clone());
        store.insert_product(Product {
            id,
            name: row.name.clone(),
            category: if row.category.is_empty() {
                None
            } else {
                Some(row.category.clone())
            },
            price: row.price,
            stock: row.stock,
        });
    }

    let orders = read_rows::<OrderRow>(&dir.join("orders.csv"))?;
    for row in &orders {
        let customer_id =
            customer_ids
                .get(&row.customer_id)
                .ok_or_else(|| SeedError::UnknownReference {
                    order: row.id.clone(),
                    kind: "customer",
                    reference: row.customer_id.clone(),
                })?;

        let items = parse_items(row, &product_ids)?;
        let total_amount = items.iter().map(LineItem::line_total).sum();
        let ordered_at = parse_order_date(row)?;
        let status: OrderStatus = row.status.parse().map_err(|_| SeedError::BadField {
            order: row.id.clone(),
            field: "status",
            value: row.status.clone(),
        })?;

        store.push_order(Order {
            id: OrderId::generate(),
            customer_id: customer_id.clone(),
            items,
            total_amount,
            ordered_at,
            status,
        });
    }

    let summary = SeedSummary {
        customers: customers.len(),
        products: products.len(),
        orders: orders.len(),
    };
    info!(
        customers = summary.customers,
        products = summary.products,
        orders = summary.orders,
        "seed data imported"
    );
    Ok(summary)
}

fn read_rows<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let file = path.display().to_string();
    let data = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        file: file.clone(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(data.as_bytes());

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|e| SeedError::Csv {
            file: file.clone(),
            source: e,
        })?);
    }
    Ok(rows)
}

fn parse_items(
    row: &OrderRow,
    product_ids: &HashMap<String, ProductId>,
) -> Result<Vec<LineItem>, SeedError> {
    // Seed dumps quote the items array with single quotes.
    let normalized = row.products.replace('\'', "\"");
    let raw: Vec<RawItem> =
        serde_json::from_str(&normalized).map_err(|e| SeedError::BadItems {
            order: row.id.clone(),
            reason: e.to_string(),
        })?;

    raw.into_iter()
        .map(|item| {
            let product_id =
                product_ids
                    .get(&item.product_id)
                    .ok_or_else(|| SeedError::UnknownReference {
                        order: row.id.clone(),
                        kind: "product",
                        reference: item.product_id.clone(),
                    })?;
            Ok(LineItem {
                product_id: product_id.clone(),
                quantity: item.quantity,
                price_at_purchase: item.price_at_purchase,
            })
        })
        .collect()
}

fn parse_order_date(row: &OrderRow) -> Result<DateTime<Utc>, SeedError> {
    let raw = row.order_date.as_str();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(SeedError::BadField {
        order: row.id.clone(),
        field: "orderDate",
        value: row.order_date.clone(),
    })
}
