//! Demo binary: load one product's detail view and optionally place a demo
//! order, printing the same content the original page rendered.
//!
//! ```bash
//! RUST_LOG=info cargo run -- --base-url http://localhost:8080 --product-id prod-123 --order
//! ```

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use storefront::api::http::HttpStoreApi;
use storefront::lifecycle::{setup_tracing, StoreConfig, StorefrontSystem, DEMO_USER_ID};
use storefront::model::ProductId;
use storefront::view::{OrderPolicy, ViewState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "Product detail view against the storefront backends")]
struct Args {
    /// Origin serving the /api/* routes.
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    /// Product to display (the demo catalog knows prod-123 and prod-456).
    #[arg(long, default_value = "prod-123")]
    product_id: String,

    /// Upstream request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Place a demo order when the product is in stock.
    #[arg(long)]
    order: bool,

    /// Allow concurrent duplicate order submissions (the legacy behavior).
    #[arg(long)]
    allow_duplicate_orders: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let args = Args::parse();

    let config = StoreConfig {
        base_url: args.base_url,
        timeout: Duration::from_secs(args.timeout_secs),
        user_id: DEMO_USER_ID.to_string(),
        order_policy: if args.allow_duplicate_orders {
            OrderPolicy::AllowDuplicates
        } else {
            OrderPolicy::SingleFlight
        },
    };

    let api = HttpStoreApi::new(&config.base_url, config.timeout).map_err(|e| e.to_string())?;
    let system = StorefrontSystem::new(Arc::new(api), &config);

    let product_id = ProductId::from(args.product_id);
    info!(%product_id, "Loading product view");
    let state = system
        .view_client
        .activate(product_id)
        .await
        .map_err(|e| e.to_string())?;
    render(&state);

    if args.order {
        if state.can_order() {
            let outcome = system
                .view_client
                .place_order()
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", outcome.status_line());
        } else {
            // UI-level gate: the order action is simply not offered.
            println!("Product is not available, no order placed.");
        }
    }

    system.shutdown().await?;
    Ok(())
}

/// Plain-text rendering of the detail view: the content of the original
/// page without any of its styling.
fn render(state: &ViewState) {
    if let Some(message) = state.error_message() {
        println!("Error: {message}");
        return;
    }
    let Some(detail) = state.detail() else {
        println!("Loading...");
        return;
    };

    println!("{}", detail.product.name);
    println!("${}", detail.product.price);
    println!("{}", detail.product.description);
    if let Some(label) = state.stock_label() {
        println!("[{label}]");
    }
    println!();
    println!("Reviews ({}/5)", detail.reviews.average_rating);
    for review in &detail.reviews.reviews {
        println!("  {} - {}*", review.user, review.rating);
        println!("    {}", review.text);
        println!("    {}", review.date);
    }
}
