//! Product entities as served by the catalog service.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque identifier for a product (e.g. `prod-123`).
///
/// The token is assigned by the catalog service; this crate never inspects
/// its contents, it only threads it through requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry, exactly as returned by `GET /api/product/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price in the store's single currency unit. No localization.
    pub price: f64,
    pub description: String,
    pub image_url: String,
}
