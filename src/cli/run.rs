//! Command dispatch: wire the adapters once, then run one subcommand.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::{self, CacheBackend, MemoryCache, MemoryRecordStore, RedisCache};
use crate::application::{CacheAside, LineItemRequest, ReportService};
use crate::cli::{output, Cli, Commands};
use crate::config::{CacheBackendKind, Config};
use crate::error::{ConfigError, Result};

/// Execute the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;

    // Apply CLI overrides
    if let Some(ref data_dir) = cli.data_dir {
        config.store.data_dir = data_dir.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    config.init_logging();

    let store = Arc::new(MemoryRecordStore::new());
    let summary = adapter::load_dir(&config.store.data_dir, &store)?;
    info!(
        customers = summary.customers,
        products = summary.products,
        orders = summary.orders,
        data_dir = %config.store.data_dir.display(),
        "record store ready"
    );

    let backend = match config.cache.backend {
        CacheBackendKind::Memory => CacheBackend::Memory(MemoryCache::new()),
        CacheBackendKind::Redis => {
            let url = config
                .redis_url()
                .ok_or(ConfigError::MissingField { field: "cache.url" })?;
            CacheBackend::Redis(RedisCache::connect(&url).await?)
        }
    };
    let cache = CacheAside::new(
        backend,
        Duration::from_millis(config.cache.op_timeout_ms),
    );
    let service = ReportService::new(
        store,
        cache,
        Duration::from_secs(config.cache.ttl_seconds),
    );

    match cli.command {
        Commands::Customers(page) => {
            let listing = service.customers(page.limit, page.offset).await?;
            output::print_customers(&listing);
        }
        Commands::Products(page) => {
            let listing = service.products(page.limit, page.offset).await?;
            output::print_products(&listing);
        }
        Commands::Orders(page) => {
            let listing = service.orders(page.limit, page.offset).await?;
            output::print_orders(&listing);
        }
        Commands::CustomerOrders(args) => {
            let listing = service
                .customer_orders(&args.customer_id, args.page.limit, args.page.offset)
                .await?;
            output::print_orders(&listing);
        }
        Commands::Spending { customer_id } => {
            match service.customer_spending(&customer_id).await? {
                Some(summary) => output::print_json(&summary),
                None => println!("no spending data for customer {customer_id}"),
            }
        }
        Commands::TopProducts { limit } => {
            let entries = service.top_selling_products(limit).await?;
            output::print_top_products(&entries);
        }
        Commands::Sales(args) => {
            let report = service.sales_analytics(&args.start, &args.end).await?;
            output::print_json(&report);
            if args.cache_stats {
                let stats = service.cache_stats();
                info!(
                    hits = stats.hits,
                    misses = stats.misses,
                    errors = stats.errors,
                    dropped_writes = stats.dropped_writes,
                    "cache telemetry"
                );
            }
        }
        Commands::PlaceOrder(args) => {
            let items: Vec<LineItemRequest> = args
                .items
                .iter()
                .map(|spec| LineItemRequest {
                    product_id: spec.product_id.clone(),
                    quantity: spec.quantity,
                    price_at_purchase: spec.price,
                })
                .collect();
            let order = service.place_order(&args.customer_id, items).await?;
            output::print_json(&order);
        }
    }

    Ok(())
}
