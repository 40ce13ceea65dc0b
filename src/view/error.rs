//! Error type for the view actor and its client.

use thiserror::Error;

/// Failures of the view machinery itself.
///
/// Note that aggregation and order failures are *not* here: both are caught
/// at the component boundary and rendered into the [`crate::view::ViewState`]
/// as display strings. `ViewError` only covers talking to the actor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// The view actor is gone (channel closed).
    #[error("view closed")]
    ViewClosed,

    /// A newer product selection replaced this activation before it settled.
    #[error("activation superseded by a newer product selection")]
    Superseded,

    /// An order submission is already pending and the configured policy is
    /// [`crate::view::OrderPolicy::SingleFlight`].
    #[error("an order is already in flight")]
    OrderInFlight,

    /// `place_order` was called before any product was activated.
    #[error("no product is active")]
    NoActiveProduct,
}
