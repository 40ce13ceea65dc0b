//! # System Lifecycle & Wiring
//!
//! Orchestration for the storefront view: configuration, observability setup
//! and the [`StorefrontSystem`] that spawns the view actor and manages its
//! graceful shutdown.
//!
//! The wiring pattern is deliberately simple:
//!
//! 1. Build a [`StoreApi`] implementation (HTTP in production, the mock in
//!    tests).
//! 2. Hand it to [`StorefrontSystem::new`], which spawns the actor and keeps
//!    its task handle.
//! 3. Drive the view through [`StorefrontSystem::view_client`].
//! 4. `shutdown()` drops the client, which closes the request channel; the
//!    actor drains in-flight work and exits, and shutdown awaits it.

pub mod tracing;

pub use self::tracing::setup_tracing;

use crate::api::StoreApi;
use crate::view::{self, OrderPolicy, ViewClient};
use ::tracing::{error, info};
use std::sync::Arc;
use std::time::Duration;

/// Placeholder identity attached to every demo order. There is no real
/// authentication context in this demo.
pub const DEMO_USER_ID: &str = "demo-user";

/// Runtime configuration for the storefront view.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Origin serving the `/api/*` routes.
    pub base_url: String,
    /// Per-request timeout for upstream calls.
    pub timeout: Duration,
    /// Identity sent with order submissions.
    pub user_id: String,
    /// Duplicate-submission policy for the order action.
    pub order_policy: OrderPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(10),
            user_id: DEMO_USER_ID.to_string(),
            order_policy: OrderPolicy::default(),
        }
    }
}

/// Runtime orchestrator for the product-detail view.
pub struct StorefrontSystem {
    /// Client for driving the view actor.
    pub view_client: ViewClient,

    /// Task handle of the running actor (used for graceful shutdown).
    handle: tokio::task::JoinHandle<()>,
}

impl StorefrontSystem {
    /// Spawns the view actor over `api` and returns the running system.
    pub fn new<S: StoreApi>(api: Arc<S>, config: &StoreConfig) -> Self {
        let (actor, view_client) = view::new(api, config.user_id.clone(), config.order_policy);
        let handle = tokio::spawn(actor.run());
        Self {
            view_client,
            handle,
        }
    }

    /// Gracefully shuts the system down.
    ///
    /// Dropping the client closes the request channel; the actor finishes
    /// whatever is in flight and exits its loop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.view_client);
        if let Err(e) = self.handle.await {
            error!("View actor task failed: {e:?}");
            return Err(format!("View actor task failed: {e:?}"));
        }
        info!("System shutdown complete.");
        Ok(())
    }
}
