//! Command-line interface definitions.

pub mod output;
pub mod run;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Orderlens - sales analytics reporting over transactional records.
#[derive(Parser, Debug)]
#[command(name = "orderlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the seed-data directory from the config file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List customers
    Customers(PageArgs),

    /// List products
    Products(PageArgs),

    /// List orders
    Orders(PageArgs),

    /// List one customer's orders, newest first
    CustomerOrders(CustomerOrdersArgs),

    /// Spending summary for one customer
    Spending {
        /// Customer record id
        customer_id: String,
    },

    /// Top-selling products ranked by units sold
    TopProducts {
        /// Maximum number of entries
        #[arg(short, long)]
        limit: i64,
    },

    /// Time-windowed sales analytics (cached)
    Sales(SalesArgs),

    /// Place a pending order
    PlaceOrder(PlaceOrderArgs),
}

/// Pagination flags shared by listing commands.
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page size
    #[arg(short, long, default_value_t = 10)]
    pub limit: i64,

    /// Rows to skip
    #[arg(short, long, default_value_t = 0)]
    pub offset: u64,
}

#[derive(Args, Debug)]
pub struct CustomerOrdersArgs {
    /// Customer record id
    pub customer_id: String,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug)]
pub struct SalesArgs {
    /// Window start (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Window end, inclusive
    #[arg(long)]
    pub end: String,

    /// Print cache telemetry after the report
    #[arg(long)]
    pub cache_stats: bool,
}

#[derive(Args, Debug)]
pub struct PlaceOrderArgs {
    /// Customer record id
    pub customer_id: String,

    /// Line item as productId:quantity:price (repeatable)
    #[arg(long = "item", value_parser = parse_item_spec)]
    pub items: Vec<ItemSpec>,
}

/// One `--item` flag: product id, quantity and price-at-purchase.
#[derive(Debug, Clone)]
pub struct ItemSpec {
    pub product_id: String,
    pub quantity: u32,
    pub price: Decimal,
}

fn parse_item_spec(raw: &str) -> Result<ItemSpec, String> {
    let mut parts = raw.splitn(3, ':');
    let (Some(product_id), Some(quantity), Some(price)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err("expected productId:quantity:price".to_string());
    };
    let quantity: u32 = quantity
        .parse()
        .map_err(|_| format!("quantity '{quantity}' is not a whole number"))?;
    let price: Decimal = price
        .parse()
        .map_err(|_| format!("price '{price}' is not a number"))?;
    Ok(ItemSpec {
        product_id: product_id.to_string(),
        quantity,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn item_spec_parses_all_three_fields() {
        let spec = parse_item_spec("65a1b2c3d4e5f6a7b8c9d0e1:2:19.99").unwrap();
        assert_eq!(spec.product_id, "65a1b2c3d4e5f6a7b8c9d0e1");
        assert_eq!(spec.quantity, 2);
        assert_eq!(spec.price, dec!(19.99));
    }

    #[test]
    fn item_spec_rejects_missing_parts() {
        assert!(parse_item_spec("abc:2").is_err());
        assert!(parse_item_spec("abc:two:1.0").is_err());
    }
}
