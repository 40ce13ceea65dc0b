//! # Aggregator
//!
//! Issues the three independent reads for one product concurrently and
//! reconciles them into either a fully populated [`ProductDetail`] or a
//! single [`AggregationError`]. There is deliberately no partial-success
//! state: all three requests are dispatched together, the aggregation waits
//! for every one of them to settle, and only then does it report a result,
//! so the caller never sees a flash of partial content.
//!
//! When more than one read fails, the product error takes precedence, then
//! reviews, then inventory. The successful sibling results are dropped.

use crate::api::{ApiError, Endpoint, StoreApi};
use crate::model::ProductId;
use crate::view::state::ProductDetail;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// The single error an activation collapses to.
///
/// Its `Display` form is the user-visible message: the failing response's
/// structured `detail` when present, otherwise the generic fallback. No
/// record is kept of which of the three reads failed beyond the message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AggregationError {
    /// The failing read carried a structured detail message.
    #[error("{0}")]
    Upstream(String),

    /// The failing read had no usable detail (transport failure or a bare
    /// error status).
    #[error("Failed to load product")]
    Unavailable,

    /// A response decoded into something other than the expected entity.
    /// Malformed upstream data surfaces here instead of reaching the view.
    #[error("invalid {endpoint} response: {message}")]
    Validation { endpoint: Endpoint, message: String },
}

impl From<ApiError> for AggregationError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => AggregationError::Upstream(detail),
            ApiError::Invalid { endpoint, message } => {
                AggregationError::Validation { endpoint, message }
            }
            _ => AggregationError::Unavailable,
        }
    }
}

/// Fetches product, reviews and inventory for `product_id` concurrently.
///
/// All three requests carry the same identifier and are in flight at the same
/// time; the join settles only after every request has.
#[instrument(skip(api))]
pub async fn aggregate<S: StoreApi>(
    api: &S,
    product_id: &ProductId,
) -> Result<ProductDetail, AggregationError> {
    debug!("dispatching product, review and inventory reads");
    let (product, reviews, inventory) = tokio::join!(
        api.product(product_id),
        api.reviews(product_id),
        api.inventory(product_id),
    );

    // Precedence on multi-failure: product, then reviews, then inventory.
    let product = product.map_err(|e| fail(Endpoint::Product, e))?;
    let reviews = reviews.map_err(|e| fail(Endpoint::Reviews, e))?;
    let inventory = inventory.map_err(|e| fail(Endpoint::Inventory, e))?;

    if product.id != *product_id {
        warn!(returned = %product.id, "catalog returned a different product");
        return Err(AggregationError::Validation {
            endpoint: Endpoint::Product,
            message: format!("expected product {product_id}, got {}", product.id),
        });
    }

    Ok(ProductDetail {
        product,
        reviews,
        inventory,
    })
}

fn fail(endpoint: Endpoint, error: ApiError) -> AggregationError {
    warn!(%endpoint, %error, "aggregation read failed");
    error.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockStoreApi;
    use crate::model::{InventoryStatus, Product, ReviewSummary};

    fn product(id: &str) -> Product {
        Product {
            id: id.into(),
            name: "Smart Watch".to_string(),
            price: 149.99,
            description: "Tracks things".to_string(),
            image_url: "/img/watch.png".to_string(),
        }
    }

    fn reviews() -> ReviewSummary {
        ReviewSummary {
            average_rating: 4.0,
            reviews: vec![],
        }
    }

    fn in_stock(quantity: u32) -> InventoryStatus {
        InventoryStatus {
            quantity,
            available: quantity > 0,
        }
    }

    #[tokio::test]
    async fn product_error_wins_over_later_failures() {
        let api = MockStoreApi::new();
        api.expect_product("prod-1").return_err(ApiError::Status {
            endpoint: Endpoint::Product,
            status: 404,
            detail: Some("not found".to_string()),
        });
        api.expect_reviews("prod-1").return_err(ApiError::Status {
            endpoint: Endpoint::Reviews,
            status: 500,
            detail: Some("review store down".to_string()),
        });
        api.expect_inventory("prod-1").return_ok(in_stock(5));

        let error = aggregate(&api, &"prod-1".into()).await.unwrap_err();
        assert_eq!(error, AggregationError::Upstream("not found".to_string()));
        assert_eq!(error.to_string(), "not found");
        api.verify();
    }

    #[tokio::test]
    async fn failure_without_detail_uses_the_generic_message() {
        let api = MockStoreApi::new();
        api.expect_product("prod-1").return_ok(product("prod-1"));
        api.expect_reviews("prod-1").return_ok(reviews());
        api.expect_inventory("prod-1")
            .return_err(ApiError::Transport {
                endpoint: Endpoint::Inventory,
                message: "connection refused".to_string(),
            });

        let error = aggregate(&api, &"prod-1".into()).await.unwrap_err();
        assert_eq!(error.to_string(), "Failed to load product");
    }

    #[tokio::test]
    async fn mismatched_product_id_is_a_validation_failure() {
        let api = MockStoreApi::new();
        api.expect_product("prod-1").return_ok(product("prod-2"));
        api.expect_reviews("prod-1").return_ok(reviews());
        api.expect_inventory("prod-1").return_ok(in_stock(1));

        let error = aggregate(&api, &"prod-1".into()).await.unwrap_err();
        assert!(matches!(
            error,
            AggregationError::Validation {
                endpoint: Endpoint::Product,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_body_names_the_offending_endpoint() {
        let api = MockStoreApi::new();
        api.expect_product("prod-1").return_ok(product("prod-1"));
        api.expect_reviews("prod-1").return_err(ApiError::Invalid {
            endpoint: Endpoint::Reviews,
            message: "missing field `averageRating`".to_string(),
        });
        api.expect_inventory("prod-1").return_ok(in_stock(1));

        let error = aggregate(&api, &"prod-1".into()).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid review response: missing field `averageRating`"
        );
    }
}
