//! Aggregation semantics: spending summaries, top-product rankings and
//! windowed sales reports over the in-memory store.

mod support;

use std::sync::Arc;

use orderlens::adapter::MemoryRecordStore;
use orderlens::port::RecordStore;
use orderlens::testkit::fixtures;
use rust_decimal_macros::dec;

use support::{service, shop};

#[tokio::test]
async fn spending_summary_covers_all_of_a_customers_orders() {
    let shop = shop();
    let svc = service(Arc::new(shop.store));

    let summary = svc
        .customer_spending(shop.ada.id.as_str())
        .await
        .unwrap()
        .expect("Ada has orders");

    // 20 + 100 + 50 + 25 + 80 across five orders, newest 2024-02-15.
    assert_eq!(summary.total_spent, dec!(275));
    assert_eq!(summary.average_order_value, dec!(55));
    assert_eq!(summary.last_order_date, fixtures::ts("2024-02-15T10:00:00Z"));
    assert_eq!(summary.customer_id, shop.ada.id);
}

#[tokio::test]
async fn customer_without_orders_yields_no_summary() {
    let shop = shop();
    let svc = service(Arc::new(shop.store));

    let summary = svc.customer_spending(shop.bo.id.as_str()).await.unwrap();
    assert!(summary.is_none());
}

#[tokio::test]
async fn top_products_rank_by_units_with_limit() {
    let shop = shop();
    let svc = service(Arc::new(shop.store));

    // Mouse 3+8=11, Widget 4+5=9, Keyboard 1+5=6, Desk unsold.
    let entries = svc.top_selling_products(2).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].product_id, shop.mouse.id);
    assert_eq!(entries[0].total_sold, 11);
    assert_eq!(entries[0].name, "Mouse");
    assert_eq!(entries[1].product_id, shop.widget.id);
    assert_eq!(entries[1].total_sold, 9);
}

#[tokio::test]
async fn top_products_scenario_from_three_orders() {
    let store = Arc::new(MemoryRecordStore::new());
    let customer = fixtures::customer("Cleo");
    store.insert_customer(customer.clone());

    let a = fixtures::product("Alpha", None, "1");
    let b = fixtures::product("Beta", None, "1");
    let c = fixtures::product("Gamma", None, "1");
    for product in [&a, &b, &c] {
        store.insert_product(product.clone());
    }
    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-03-01T00:00:00Z",
        vec![fixtures::line(&a.id, 5, "1")],
    ));
    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-03-02T00:00:00Z",
        vec![fixtures::line(&b.id, 3, "1")],
    ));
    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-03-03T00:00:00Z",
        vec![fixtures::line(&c.id, 8, "1")],
    ));

    let entries = service(store).top_selling_products(2).await.unwrap();
    let ranked: Vec<(&str, u64)> = entries
        .iter()
        .map(|e| (e.name.as_str(), e.total_sold))
        .collect();
    assert_eq!(ranked, vec![("Gamma", 8), ("Alpha", 5)]);
}

#[tokio::test]
async fn top_products_tie_keeps_first_seen_order() {
    let store = Arc::new(MemoryRecordStore::new());
    let customer = fixtures::customer("Cleo");
    store.insert_customer(customer.clone());

    let first = fixtures::product("First", None, "1");
    let second = fixtures::product("Second", None, "1");
    for product in [&first, &second] {
        store.insert_product(product.clone());
    }
    // Both sell 4 units; First appears in an earlier order.
    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-03-01T00:00:00Z",
        vec![fixtures::line(&first.id, 4, "1")],
    ));
    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-03-02T00:00:00Z",
        vec![fixtures::line(&second.id, 4, "1")],
    ));

    let entries = service(store).top_selling_products(2).await.unwrap();
    assert_eq!(entries[0].name, "First");
    assert_eq!(entries[1].name, "Second");
}

#[tokio::test]
async fn sales_analytics_totals_the_window() {
    let shop = shop();
    let svc = service(Arc::new(shop.store));

    let report = svc
        .sales_analytics("2024-01-01", "2024-01-31")
        .await
        .unwrap();

    // Completed January orders: 100 + 50 + 25. The December order and the
    // pending February order stay out.
    assert_eq!(report.total_revenue, dec!(175));
    assert_eq!(report.completed_orders, 3);
}

#[tokio::test]
async fn sales_analytics_breakdown_groups_by_category() {
    let shop = shop();
    let svc = service(Arc::new(shop.store));

    let report = svc
        .sales_analytics("2024-01-01", "2024-01-31")
        .await
        .unwrap();

    // Electronics: keyboard 5x20 + mouse 3x10 = 130; the category-less
    // widget buckets under "uncategorized": 4x5 + 5x5 = 45.
    let buckets: Vec<(&str, rust_decimal::Decimal)> = report
        .category_breakdown
        .iter()
        .map(|c| (c.category.as_str(), c.revenue))
        .collect();
    assert_eq!(
        buckets,
        vec![("Electronics", dec!(130)), ("uncategorized", dec!(45))]
    );
}

#[tokio::test]
async fn empty_window_yields_the_explicit_zero_report() {
    let shop = shop();
    let svc = service(Arc::new(shop.store));

    let report = svc
        .sales_analytics("2020-01-01", "2020-12-31")
        .await
        .unwrap();

    assert_eq!(report.total_revenue, dec!(0));
    assert_eq!(report.completed_orders, 0);
    assert!(report.category_breakdown.is_empty());
}

#[tokio::test]
async fn window_bounds_are_inclusive() {
    let store = Arc::new(MemoryRecordStore::new());
    let customer = fixtures::customer("Edge");
    store.insert_customer(customer.clone());
    let product = fixtures::product("Thing", Some("Misc"), "10");
    store.insert_product(product.clone());

    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-01-01T00:00:00Z",
        vec![fixtures::line(&product.id, 1, "10")],
    ));
    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-01-31T00:00:00Z",
        vec![fixtures::line(&product.id, 1, "10")],
    ));
    store.push_order(fixtures::completed_order(
        &customer.id,
        "2024-01-31T00:00:01Z",
        vec![fixtures::line(&product.id, 1, "10")],
    ));

    let report = service(store)
        .sales_analytics("2024-01-01", "2024-01-31")
        .await
        .unwrap();

    // Both boundary orders count; one second past the end does not.
    assert_eq!(report.completed_orders, 2);
    assert_eq!(report.total_revenue, dec!(20));
}

#[tokio::test]
async fn order_totals_match_their_line_items() {
    let shop = shop();

    let orders = shop
        .store
        .orders_matching(&orderlens::domain::OrderFilter::all())
        .await
        .unwrap();
    for order in orders {
        let expected: rust_decimal::Decimal = order
            .items
            .iter()
            .map(orderlens::domain::LineItem::line_total)
            .sum();
        assert_eq!(order.total_amount, expected);
    }
}
