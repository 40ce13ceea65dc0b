//! Typed wire entities consumed from the four backend services.
//!
//! Every struct here is an immutable value object deserialized at the api
//! boundary (see [`crate::api`]). Field names map 1:1 onto the upstream JSON
//! contracts (`imageUrl`, `averageRating`, `orderId`, ...) via serde renames,
//! so a response that does not match the expected shape fails loudly instead
//! of leaking untyped data into the view.

pub mod inventory;
pub mod order;
pub mod product;
pub mod review;

pub use inventory::InventoryStatus;
pub use order::{OrderReceipt, OrderRequest};
pub use product::{Product, ProductId};
pub use review::{Review, ReviewSummary};

use serde::{Deserialize, Serialize};

/// Error envelope shared by all four upstreams.
///
/// On a non-success status each service may include a structured `detail`
/// field describing the failure; it becomes the user-visible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The rename attributes, not the Rust field names, define the wire
    /// contract; this pins the camelCase keys the services actually speak.
    #[test]
    fn order_request_serializes_with_camel_case_keys() {
        let request = OrderRequest {
            product_id: "prod-123".into(),
            quantity: 1,
            user_id: "demo-user".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "productId": "prod-123",
                "quantity": 1,
                "userId": "demo-user",
            })
        );
    }

    #[test]
    fn product_deserializes_from_the_catalog_shape() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "prod-123",
            "name": "Wireless Headphones",
            "price": 99.99,
            "description": "Noise cancelling",
            "imageUrl": "/img/headphones.png",
        }))
        .unwrap();
        assert_eq!(product.id, ProductId("prod-123".to_string()));
        assert_eq!(product.image_url, "/img/headphones.png");
    }

    #[test]
    fn error_body_tolerates_a_missing_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.detail, None);
    }
}
