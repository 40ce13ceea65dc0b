//! # Backend API Boundary
//!
//! This module defines the seam between the view core and the four upstream
//! services (catalog, review, inventory, ordering). The [`StoreApi`] trait is
//! the only way the view talks to the outside world:
//!
//! - [`http::HttpStoreApi`] - the production implementation over reqwest.
//! - [`mock::MockStoreApi`] - a scripted in-memory double for tests.
//!
//! Schema validation happens here: responses are deserialized into the typed
//! entities of [`crate::model`], and a body that does not match becomes
//! [`ApiError::Invalid`] instead of propagating unchecked data into the view.

pub mod http;
pub mod mock;

use crate::model::{InventoryStatus, OrderReceipt, OrderRequest, Product, ProductId, ReviewSummary};
use async_trait::async_trait;
use std::fmt::Display;
use thiserror::Error;

/// The upstream endpoint a request was addressed to.
///
/// Only used for diagnostics; the view never branches on which of the three
/// reads failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Product,
    Reviews,
    Inventory,
    Order,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Endpoint::Product => "product",
            Endpoint::Reviews => "review",
            Endpoint::Inventory => "inventory",
            Endpoint::Order => "order",
        };
        write!(f, "{name}")
    }
}

/// Errors produced at the api boundary.
///
/// `Clone + PartialEq` so tests can script and compare them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("{endpoint} request failed: {message}")]
    Transport { endpoint: Endpoint, message: String },

    /// The upstream answered with a non-success status. `detail` carries the
    /// structured message from the error body when one was present.
    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        detail: Option<String>,
    },

    /// The response body did not deserialize into the expected entity.
    #[error("invalid {endpoint} response: {message}")]
    Invalid { endpoint: Endpoint, message: String },
}

impl ApiError {
    /// The upstream's structured `detail` message, when one exists.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// The four upstream calls consumed by the view core.
///
/// Implementations must be cheap to share behind an `Arc`; the view actor
/// clones the handle into each spawned fetch task.
#[async_trait]
pub trait StoreApi: Send + Sync + 'static {
    /// `GET /api/product/{id}`
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// `GET /api/review/{id}`
    async fn reviews(&self, id: &ProductId) -> Result<ReviewSummary, ApiError>;

    /// `GET /api/inventory/{id}`
    async fn inventory(&self, id: &ProductId) -> Result<InventoryStatus, ApiError>;

    /// `POST /api/order`
    async fn place_order(&self, request: &OrderRequest) -> Result<OrderReceipt, ApiError>;
}
