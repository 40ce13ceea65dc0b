//! # HTTP Implementation of [`StoreApi`]
//!
//! Talks to the real backends over reqwest. All four routes live under one
//! base URL (an edge proxy fans them out to the individual services), so the
//! client only needs a single origin and a request timeout.
//!
//! Error mapping:
//! - connection/timeout failures become [`ApiError::Transport`];
//! - non-success statuses become [`ApiError::Status`], with the `detail`
//!   field recovered from the error body when it parses;
//! - success bodies that do not deserialize become [`ApiError::Invalid`].

use crate::api::{ApiError, Endpoint, StoreApi};
use crate::model::{
    ErrorBody, InventoryStatus, OrderReceipt, OrderRequest, Product, ProductId, ReviewSummary,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Production [`StoreApi`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStoreApi {
    /// Builds a client for the given origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%endpoint, %url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint,
                message: e.to_string(),
            })?;
        Self::decode(endpoint, response).await
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: Endpoint,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            // Recover the structured detail message if the error body has one.
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                detail,
            });
        }
        response.json::<T>().await.map_err(|e| ApiError::Invalid {
            endpoint,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    async fn product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.get_json(Endpoint::Product, &format!("/api/product/{id}"))
            .await
    }

    async fn reviews(&self, id: &ProductId) -> Result<ReviewSummary, ApiError> {
        self.get_json(Endpoint::Reviews, &format!("/api/review/{id}"))
            .await
    }

    async fn inventory(&self, id: &ProductId) -> Result<InventoryStatus, ApiError> {
        self.get_json(Endpoint::Inventory, &format!("/api/inventory/{id}"))
            .await
    }

    async fn place_order(&self, request: &OrderRequest) -> Result<OrderReceipt, ApiError> {
        let url = format!("{}/api/order", self.base_url);
        debug!(product_id = %request.product_id, %url, "POST");
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: Endpoint::Order,
                message: e.to_string(),
            })?;
        Self::decode(Endpoint::Order, response).await
    }
}
