//! Aggregation engine: translates report requests into pipeline
//! executions over the record store and shapes the grouped output into
//! derived report types.
//!
//! Inputs reaching this layer are already validated; the engine deals
//! only in typed identifiers and parsed timestamps.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::pipeline::{rank_desc, Accumulate, Grouped};
use crate::domain::{
    CategoryRevenue, CustomerId, CustomerSpending, LineItem, Money, Order, OrderFilter,
    OrderStatus, ProductId, SalesAnalytics, TopProductEntry,
};
use crate::error::StoreError;
use crate::port::RecordStore;

/// Category bucket for line items whose product carries no category.
const UNCATEGORIZED: &str = "uncategorized";

#[derive(Default)]
struct SpendingAcc {
    total: Money,
    count: u64,
    last: Option<DateTime<Utc>>,
}

impl Accumulate<Order> for SpendingAcc {
    fn absorb(&mut self, order: &Order) {
        self.total += order.total_amount;
        self.count += 1;
        if self.last.map_or(true, |seen| order.ordered_at > seen) {
            self.last = Some(order.ordered_at);
        }
    }
}

#[derive(Default)]
struct UnitsAcc {
    units: u64,
}

impl Accumulate<LineItem> for UnitsAcc {
    fn absorb(&mut self, item: &LineItem) {
        self.units += u64::from(item.quantity);
    }
}

#[derive(Default)]
struct RevenueAcc {
    revenue: Money,
}

impl Accumulate<LineItem> for RevenueAcc {
    fn absorb(&mut self, item: &LineItem) {
        self.revenue += item.line_total();
    }
}

pub struct AggregationEngine<S> {
    store: Arc<S>,
}

impl<S: RecordStore> AggregationEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Spending summary for one customer: filter orders by customer, group
    /// by customer id accumulating sum/count/max(ordered-at).
    ///
    /// Zero matching orders is a distinct no-data result (`None`), not a
    /// zero-valued summary.
    pub async fn customer_spending(
        &self,
        customer: &CustomerId,
    ) -> Result<Option<CustomerSpending>, StoreError> {
        let filter = OrderFilter::all().customer(customer.clone());
        let orders = self.store.orders_matching(&filter).await?;

        let mut groups: Grouped<CustomerId, SpendingAcc> = Grouped::new();
        for order in &orders {
            groups.feed(order.customer_id.clone(), order);
        }

        let Some((customer_id, acc)) = groups.into_entries().into_iter().next() else {
            return Ok(None);
        };
        let Some(last_order_date) = acc.last else {
            return Ok(None);
        };

        Ok(Some(CustomerSpending {
            customer_id,
            total_spent: acc.total,
            average_order_value: acc.total / Decimal::from(acc.count),
            last_order_date,
        }))
    }

    /// Top-selling products: unwind line items over all orders, group by
    /// product summing quantity, rank descending, take `limit`, then join
    /// product names. Products no longer in the catalog drop out of the
    /// ranking (inner join).
    pub async fn top_selling_products(
        &self,
        limit: usize,
    ) -> Result<Vec<TopProductEntry>, StoreError> {
        let orders = self.store.orders_matching(&OrderFilter::all()).await?;

        let mut units: Grouped<ProductId, UnitsAcc> = Grouped::new();
        for order in &orders {
            for item in &order.items {
                units.feed(item.product_id.clone(), item);
            }
        }

        let ranked = rank_desc(units.into_entries(), |acc| acc.units, limit);

        let ids: Vec<ProductId> = ranked.iter().map(|(id, _)| id.clone()).collect();
        let products = self.store.products_by_ids(&ids).await?;
        let names: HashMap<&ProductId, &str> = products
            .iter()
            .map(|p| (&p.id, p.name.as_str()))
            .collect();

        Ok(ranked
            .iter()
            .filter_map(|(id, acc)| {
                names.get(id).map(|name| TopProductEntry {
                    product_id: id.clone(),
                    name: (*name).to_string(),
                    total_sold: acc.units,
                })
            })
            .collect())
    }

    /// Time-windowed sales report: one snapshot of completed orders in
    /// [start, end] feeds both the revenue/count totals and the
    /// per-category breakdown.
    ///
    /// An empty window yields the explicit zero report, with whatever
    /// breakdown the snapshot produced (necessarily empty).
    pub async fn sales_analytics(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SalesAnalytics, StoreError> {
        let filter = OrderFilter::all()
            .status(OrderStatus::Completed)
            .between(start, end);
        let orders = self.store.orders_matching(&filter).await?;

        let total_revenue: Money = orders.iter().map(|o| o.total_amount).sum();
        let completed_orders = orders.len() as u64;

        let category_breakdown = self.category_breakdown(&orders).await?;

        if completed_orders == 0 {
            return Ok(SalesAnalytics {
                category_breakdown,
                ..SalesAnalytics::zero()
            });
        }

        Ok(SalesAnalytics {
            total_revenue,
            completed_orders,
            category_breakdown,
        })
    }

    /// Breakdown sub-aggregation: unwind line items, join product
    /// category, group by category summing quantity x price-at-purchase.
    /// Line items whose product is gone are dropped; products without a
    /// category bucket under [`UNCATEGORIZED`].
    async fn category_breakdown(
        &self,
        orders: &[Order],
    ) -> Result<Vec<CategoryRevenue>, StoreError> {
        let mut ids: Vec<ProductId> = Vec::new();
        let mut seen: HashSet<&ProductId> = HashSet::new();
        for order in orders {
            for item in &order.items {
                if seen.insert(&item.product_id) {
                    ids.push(item.product_id.clone());
                }
            }
        }

        let products = self.store.products_by_ids(&ids).await?;
        let categories: HashMap<&ProductId, Option<&str>> = products
            .iter()
            .map(|p| (&p.id, p.category.as_deref()))
            .collect();

        let mut revenue: Grouped<String, RevenueAcc> = Grouped::new();
        for order in orders {
            for item in &order.items {
                let Some(category) = categories.get(&item.product_id) else {
                    continue;
                };
                let bucket = category.unwrap_or(UNCATEGORIZED).to_string();
                revenue.feed(bucket, item);
            }
        }

        Ok(revenue
            .into_entries()
            .into_iter()
            .map(|(category, acc)| CategoryRevenue {
                category,
                revenue: acc.revenue,
            })
            .collect())
    }
}
