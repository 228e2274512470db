//! In-memory record store.
//!
//! Collections are Vecs in insertion order, which is the deterministic
//! iteration order the aggregation engine relies on for reproducible
//! grouped sums. Indexes exist only where lookups need them.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{Customer, CustomerId, Order, OrderFilter, Page, Product, ProductId};
use crate::error::StoreError;
use crate::port::RecordStore;

#[derive(Default)]
struct Tables {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    customer_index: HashMap<CustomerId, usize>,
    product_index: HashMap<ProductId, usize>,
}

#[derive(Default)]
pub struct MemoryRecordStore {
    tables: RwLock<Tables>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_customer(&self, customer: Customer) {
        let mut tables = self.tables.write();
        let idx = tables.customers.len();
        tables.customer_index.insert(customer.id.clone(), idx);
        tables.customers.push(customer);
    }

    pub fn insert_product(&self, product: Product) {
        let mut tables = self.tables.write();
        let idx = tables.products.len();
        tables.product_index.insert(product.id.clone(), idx);
        tables.products.push(product);
    }

    pub fn push_order(&self, order: Order) {
        self.tables.write().orders.push(order);
    }
}

fn page_of<T: Clone>(rows: &[T], page: &Page) -> Vec<T> {
    rows.iter()
        .skip(page.offset)
        .take(page.limit)
        .cloned()
        .collect()
}

impl RecordStore for MemoryRecordStore {
    async fn customer(&self, id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .customer_index
            .get(id)
            .map(|&i| tables.customers[i].clone()))
    }

    async fn customers(&self, page: &Page) -> Result<(Vec<Customer>, u64), StoreError> {
        let tables = self.tables.read();
        Ok((
            page_of(&tables.customers, page),
            tables.customers.len() as u64,
        ))
    }

    async fn products(&self, page: &Page) -> Result<(Vec<Product>, u64), StoreError> {
        let tables = self.tables.read();
        Ok((
            page_of(&tables.products, page),
            tables.products.len() as u64,
        ))
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables.read();
        Ok(ids
            .iter()
            .filter_map(|id| tables.product_index.get(id))
            .map(|&i| tables.products[i].clone())
            .collect())
    }

    async fn orders_matching(&self, filter: &OrderFilter) -> Result<Vec<Order>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn orders_page(
        &self,
        filter: &OrderFilter,
        page: &Page,
        newest_first: bool,
    ) -> Result<(Vec<Order>, u64), StoreError> {
        let tables = self.tables.read();
        let mut matched: Vec<Order> = tables
            .orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        let total = matched.len() as u64;
        if newest_first {
            matched.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at));
        }
        Ok((page_of(&matched, page), total))
    }

    async fn insert_order(&self, order: Order) -> Result<(), StoreError> {
        self.push_order(order);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::fixtures;

    #[tokio::test]
    async fn orders_matching_preserves_insertion_order() {
        let store = MemoryRecordStore::new();
        let customer = fixtures::customer("Ada");
        store.insert_customer(customer.clone());

        for day in [3, 1, 2] {
            store.push_order(fixtures::completed_order(
                &customer.id,
                &format!("2024-01-0{day}T00:00:00Z"),
                vec![],
            ));
        }

        let orders = store.orders_matching(&OrderFilter::all()).await.unwrap();
        let days: Vec<u32> = orders
            .iter()
            .map(|o| chrono::Datelike::day(&o.ordered_at))
            .collect();
        assert_eq!(days, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn orders_page_sorts_newest_first_when_asked() {
        let store = MemoryRecordStore::new();
        let customer = fixtures::customer("Ada");
        store.insert_customer(customer.clone());
        for day in [3, 1, 2] {
            store.push_order(fixtures::completed_order(
                &customer.id,
                &format!("2024-01-0{day}T00:00:00Z"),
                vec![],
            ));
        }

        let (rows, total) = store
            .orders_page(&OrderFilter::all(), &Page::default(), true)
            .await
            .unwrap();
        assert_eq!(total, 3);
        let days: Vec<u32> = rows
            .iter()
            .map(|o| chrono::Datelike::day(&o.ordered_at))
            .collect();
        assert_eq!(days, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn products_by_ids_skips_unknown_ids() {
        let store = MemoryRecordStore::new();
        let keyboard = fixtures::product("Keyboard", Some("Electronics"), "49.99");
        store.insert_product(keyboard.clone());

        let found = store
            .products_by_ids(&[keyboard.id.clone(), ProductId::generate()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, keyboard.id);
    }
}
