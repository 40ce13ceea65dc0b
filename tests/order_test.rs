//! Order placement scenarios: the demo order flow end to end, including the
//! duplicate-submission policies and the independence of the order error
//! path from the loaded product view.

use std::sync::Arc;
use std::time::Duration;
use storefront::api::mock::{MockStoreApi, RecordedCall};
use storefront::api::{ApiError, Endpoint};
use storefront::lifecycle::{StoreConfig, StorefrontSystem};
use storefront::model::{InventoryStatus, OrderReceipt, OrderRequest, Product, ReviewSummary};
use storefront::view::{OrderOutcome, OrderPolicy, ViewError};

fn product(id: &str) -> Product {
    Product {
        id: id.into(),
        name: "Smart Watch".to_string(),
        price: 149.99,
        description: "Counts steps".to_string(),
        image_url: format!("/img/{id}.png"),
    }
}

fn reviews() -> ReviewSummary {
    ReviewSummary {
        average_rating: 4.0,
        reviews: vec![],
    }
}

fn expect_view_reads(api: &MockStoreApi, id: &str, quantity: u32) {
    api.expect_product(id).return_ok(product(id));
    api.expect_reviews(id).return_ok(reviews());
    api.expect_inventory(id).return_ok(InventoryStatus {
        quantity,
        available: quantity > 0,
    });
}

async fn loaded_system(api: &Arc<MockStoreApi>, id: &str) -> StorefrontSystem {
    expect_view_reads(api, id, 3);
    let system = StorefrontSystem::new(Arc::clone(api), &StoreConfig::default());
    system.view_client.activate(id.into()).await.unwrap();
    system
}

/// Success path: the server's order id is reported verbatim and the request
/// always carries quantity 1 and the fixed demo identity.
#[tokio::test]
async fn placing_an_order_reports_the_server_order_id() {
    let api = Arc::new(MockStoreApi::new());
    let system = loaded_system(&api, "prod-456").await;
    api.expect_order().return_ok(OrderReceipt {
        order_id: "ord-789".to_string(),
    });

    let outcome = system.view_client.place_order().await.unwrap();
    assert_eq!(outcome.status_line(), "Order placed! ID: ord-789");

    let order_calls: Vec<_> = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, RecordedCall::Order(_)))
        .collect();
    assert_eq!(
        order_calls,
        vec![RecordedCall::Order(OrderRequest {
            product_id: "prod-456".into(),
            quantity: 1,
            user_id: "demo-user".to_string(),
        })]
    );

    // The outcome is also recorded in the view state.
    let state = system.view_client.snapshot().await.unwrap();
    assert_eq!(
        state.order_outcome,
        Some(OrderOutcome::Placed {
            order_id: "ord-789".to_string()
        })
    );

    api.verify();
    system.shutdown().await.unwrap();
}

/// A rejected order shows its failure message next to the still-valid
/// product view; the loaded detail is untouched.
#[tokio::test]
async fn order_failure_does_not_disturb_the_product_view() {
    let api = Arc::new(MockStoreApi::new());
    let system = loaded_system(&api, "prod-123").await;
    api.expect_order().return_err(ApiError::Status {
        endpoint: Endpoint::Order,
        status: 409,
        detail: Some("out of stock".to_string()),
    });

    let before = system.view_client.snapshot().await.unwrap();
    let outcome = system.view_client.place_order().await.unwrap();
    assert_eq!(outcome.status_line(), "Order failed: out of stock");

    let after = system.view_client.snapshot().await.unwrap();
    assert_eq!(after.detail(), before.detail());
    assert_eq!(
        after.order_outcome,
        Some(OrderOutcome::Failed {
            message: "out of stock".to_string()
        })
    );
    system.shutdown().await.unwrap();
}

/// A rejection without a structured detail falls back to "Unknown error".
#[tokio::test]
async fn order_failure_without_detail_is_unknown_error() {
    let api = Arc::new(MockStoreApi::new());
    let system = loaded_system(&api, "prod-123").await;
    api.expect_order().return_err(ApiError::Transport {
        endpoint: Endpoint::Order,
        message: "connection reset".to_string(),
    });

    let outcome = system.view_client.place_order().await.unwrap();
    assert_eq!(outcome.status_line(), "Order failed: Unknown error");
    system.shutdown().await.unwrap();
}

/// Under the default SingleFlight policy a second click while an order is
/// pending is rejected instead of issuing a duplicate request.
#[tokio::test(start_paused = true)]
async fn single_flight_rejects_a_second_order_while_pending() {
    let api = Arc::new(MockStoreApi::new());
    let system = loaded_system(&api, "prod-123").await;
    api.expect_order()
        .delay(Duration::from_millis(50))
        .return_ok(OrderReceipt {
            order_id: "ord-1".to_string(),
        });

    let client = system.view_client.clone();
    let first = tokio::spawn(async move { client.place_order().await });
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }

    let second = system.view_client.place_order().await;
    assert_eq!(second, Err(ViewError::OrderInFlight));

    let outcome = first.await.unwrap().unwrap();
    assert_eq!(outcome.status_line(), "Order placed! ID: ord-1");

    // Only one request reached the ordering service.
    let order_calls = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, RecordedCall::Order(_)))
        .count();
    assert_eq!(order_calls, 1);
    api.verify();
    system.shutdown().await.unwrap();
}

/// AllowDuplicates reproduces the original behavior: every click issues its
/// own request.
#[tokio::test(start_paused = true)]
async fn allow_duplicates_issues_one_request_per_click() {
    let api = Arc::new(MockStoreApi::new());
    expect_view_reads(&api, "prod-123", 3);
    let config = StoreConfig {
        order_policy: OrderPolicy::AllowDuplicates,
        ..StoreConfig::default()
    };
    let system = StorefrontSystem::new(Arc::clone(&api), &config);
    system
        .view_client
        .activate("prod-123".into())
        .await
        .unwrap();

    for n in 1..=2 {
        api.expect_order()
            .delay(Duration::from_millis(50))
            .return_ok(OrderReceipt {
                order_id: format!("ord-{n}"),
            });
    }

    let client_one = system.view_client.clone();
    let first = tokio::spawn(async move { client_one.place_order().await });
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    let client_two = system.view_client.clone();
    let second = tokio::spawn(async move { client_two.place_order().await });

    assert!(first.await.unwrap().is_ok());
    assert!(second.await.unwrap().is_ok());

    let order_calls = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, RecordedCall::Order(_)))
        .count();
    assert_eq!(order_calls, 2);
    api.verify();
    system.shutdown().await.unwrap();
}

/// Activating a new product discards the previous order outcome along with
/// the rest of the old view.
#[tokio::test]
async fn reactivation_clears_the_order_outcome() {
    let api = Arc::new(MockStoreApi::new());
    let system = loaded_system(&api, "prod-123").await;
    api.expect_order().return_ok(OrderReceipt {
        order_id: "ord-1".to_string(),
    });
    system.view_client.place_order().await.unwrap();

    expect_view_reads(&api, "prod-456", 5);
    let state = system
        .view_client
        .activate("prod-456".into())
        .await
        .unwrap();
    assert_eq!(state.order_outcome, None);
    system.shutdown().await.unwrap();
}

/// An order that settles after the product changed is still reported to its
/// caller but not written into the new activation's state.
#[tokio::test(start_paused = true)]
async fn stale_order_outcome_is_reported_but_not_applied() {
    let api = Arc::new(MockStoreApi::new());
    let system = loaded_system(&api, "prod-123").await;
    api.expect_order()
        .delay(Duration::from_millis(50))
        .return_ok(OrderReceipt {
            order_id: "ord-9".to_string(),
        });

    let client = system.view_client.clone();
    let pending_order = tokio::spawn(async move { client.place_order().await });
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }

    expect_view_reads(&api, "prod-456", 5);
    system
        .view_client
        .activate("prod-456".into())
        .await
        .unwrap();

    let outcome = pending_order.await.unwrap().unwrap();
    assert_eq!(outcome.status_line(), "Order placed! ID: ord-9");

    let state = system.view_client.snapshot().await.unwrap();
    assert_eq!(
        state.detail().map(|d| d.product.id.clone()),
        Some("prod-456".into())
    );
    assert_eq!(state.order_outcome, None);
    system.shutdown().await.unwrap();
}

/// The order action needs an active product; before any activation it is
/// rejected outright.
#[tokio::test]
async fn order_before_activation_is_rejected() {
    let api = Arc::new(MockStoreApi::new());
    let system = StorefrontSystem::new(Arc::clone(&api), &StoreConfig::default());

    let result = system.view_client.place_order().await;
    assert_eq!(result, Err(ViewError::NoActiveProduct));
    system.shutdown().await.unwrap();
}
