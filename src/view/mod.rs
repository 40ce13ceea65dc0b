//! # Product-Detail View Core
//!
//! The only part of the storefront with non-trivial control flow: loading one
//! product's detail page from three independent backends and placing a demo
//! order against a fourth.
//!
//! ## Components
//!
//! - [`state`] - the pure [`ViewState`] machine with the generation-token
//!   supersession rule. No I/O, trivially unit-testable.
//! - [`aggregator`] - concurrent three-way fetch, all-or-nothing merge.
//! - [`order`] - single order submission with an independent error path.
//! - [`actor`] / [`client`] - the event loop that owns the state and the
//!   handle used to drive it.
//!
//! ## Lifecycle
//!
//! ```rust,ignore
//! let api = Arc::new(HttpStoreApi::new(base_url, timeout)?);
//! let (actor, view) = view::new(api, "demo-user", OrderPolicy::default());
//! tokio::spawn(actor.run());
//!
//! let state = view.activate("prod-123".into()).await?;
//! if state.can_order() {
//!     let outcome = view.place_order().await?;
//!     println!("{}", outcome.status_line());
//! }
//! ```
//!
//! Re-activating with another id discards everything from the previous
//! activation, including results that are still in flight: they come back
//! tagged with a stale [`Generation`](state::Generation) and are dropped on
//! the event loop instead of applied.

pub mod actor;
pub mod aggregator;
pub mod client;
pub mod error;
pub mod order;
pub mod state;

pub use actor::{OrderPolicy, ViewActor};
pub use aggregator::AggregationError;
pub use client::ViewClient;
pub use error::ViewError;
pub use state::{Generation, OrderOutcome, ProductDetail, ViewState};

use crate::api::StoreApi;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Request channel capacity; settlement messages share it with client calls.
const CHANNEL_CAPACITY: usize = 32;

/// Creates a view actor over `api` together with its client.
pub fn new<S: StoreApi>(
    api: Arc<S>,
    user_id: impl Into<String>,
    policy: OrderPolicy,
) -> (ViewActor<S>, ViewClient) {
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
    let actor = ViewActor::new(receiver, sender.downgrade(), api, user_id.into(), policy);
    (actor, ViewClient::new(sender))
}
