//! Terminal rendering for listings and reports.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::application::Listing;
use crate::domain::{Customer, Order, Product, TopProductEntry};

#[derive(Tabled)]
struct CustomerRow {
    id: String,
    name: String,
    email: String,
    age: u32,
    location: String,
}

#[derive(Tabled)]
struct ProductRow {
    id: String,
    name: String,
    category: String,
    price: String,
    stock: u32,
}

#[derive(Tabled)]
struct OrderRow {
    id: String,
    customer: String,
    date: String,
    status: String,
    items: usize,
    total: String,
}

#[derive(Tabled)]
struct TopProductRow {
    rank: usize,
    id: String,
    name: String,
    total_sold: u64,
}

pub fn print_customers(listing: &Listing<Customer>) {
    let rows: Vec<CustomerRow> = listing
        .rows
        .iter()
        .map(|c| CustomerRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            email: c.email.clone(),
            age: c.age,
            location: c.location.clone(),
        })
        .collect();
    print_listing(rows, listing.rows.len(), listing.total);
}

pub fn print_products(listing: &Listing<Product>) {
    let rows: Vec<ProductRow> = listing
        .rows
        .iter()
        .map(|p| ProductRow {
            id: p.id.to_string(),
            name: p.name.clone(),
            category: p.category.clone().unwrap_or_default(),
            price: p.price.to_string(),
            stock: p.stock,
        })
        .collect();
    print_listing(rows, listing.rows.len(), listing.total);
}

pub fn print_orders(listing: &Listing<Order>) {
    let rows: Vec<OrderRow> = listing
        .rows
        .iter()
        .map(|o| OrderRow {
            id: o.id.to_string(),
            customer: o.customer_id.to_string(),
            date: o.ordered_at.to_rfc3339(),
            status: format!("{:?}", o.status).to_lowercase(),
            items: o.items.len(),
            total: o.total_amount.to_string(),
        })
        .collect();
    print_listing(rows, listing.rows.len(), listing.total);
}

pub fn print_top_products(entries: &[TopProductEntry]) {
    let rows: Vec<TopProductRow> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| TopProductRow {
            rank: i + 1,
            id: e.product_id.to_string(),
            name: e.name.clone(),
            total_sold: e.total_sold,
        })
        .collect();
    println!("{}", styled(Table::new(rows)));
}

/// Pretty-print a report as JSON (the same shape the cache stores).
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to render report: {e}"),
    }
}

fn print_listing<R: Tabled>(rows: Vec<R>, shown: usize, total: u64) {
    println!("{}", styled(Table::new(rows)));
    println!("showing {shown} of {total}");
}

fn styled(mut table: Table) -> Table {
    table.with(Style::sharp());
    table
}
