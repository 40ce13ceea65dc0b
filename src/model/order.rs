//! Order DTOs exchanged with the ordering service.

use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// Payload for `POST /api/order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub user_id: String,
}

/// Success body of `POST /api/order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
}
