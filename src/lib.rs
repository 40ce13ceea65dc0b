//! # Storefront
//!
//! Core of a storefront demo: one product's detail view, aggregated from
//! three independent backend services (catalog, review, inventory), plus a
//! demo order action against a fourth (ordering). The rest of the original
//! page - chrome, styling, navigation - is out of scope; this crate is the
//! part with actual control flow.
//!
//! ## Architecture
//!
//! - **[`model`]** - typed wire entities matching the upstream JSON contracts.
//! - **[`api`]** - the [`StoreApi`](api::StoreApi) seam: an HTTP
//!   implementation for production and a scripted mock for tests. Schema
//!   validation lives here; malformed upstream data becomes an error instead
//!   of leaking into the view.
//! - **[`view`]** - the core: a view actor that owns the per-activation
//!   [`ViewState`](view::ViewState), runs the three reads concurrently, and
//!   discards results from superseded activations via a generation token.
//! - **[`lifecycle`]** - configuration, tracing setup and system wiring.
//!
//! ## Failure model
//!
//! Two error paths, deliberately independent:
//!
//! - an **aggregation failure** (any of the three reads) replaces the whole
//!   view with a single message - there is no partial product display;
//! - an **order failure** is shown alongside the still-valid product view
//!   and never disturbs it. The user can simply retry.
//!
//! Neither propagates past the view as an error; both are rendered into the
//! state as display strings.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use storefront::api::http::HttpStoreApi;
//! use storefront::lifecycle::{setup_tracing, StoreConfig, StorefrontSystem};
//! use std::sync::Arc;
//!
//! setup_tracing();
//! let config = StoreConfig::default();
//! let api = Arc::new(HttpStoreApi::new(&config.base_url, config.timeout)?);
//! let system = StorefrontSystem::new(api, &config);
//!
//! let state = system.view_client.activate("prod-123".into()).await?;
//! println!("{:?}", state.stock_label());
//! system.shutdown().await?;
//! ```
//!
//! ## Testing
//!
//! [`api::mock::MockStoreApi`] scripts the four upstreams with an
//! expectation-builder API (including latency injection on paused tokio
//! time), so every scenario - partial failures, slow superseded activations,
//! rejected orders - runs deterministically without a network. See `tests/`.

pub mod api;
pub mod lifecycle;
pub mod model;
pub mod view;
