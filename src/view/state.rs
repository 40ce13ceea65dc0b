//! # View State Machine
//!
//! Pure, I/O-free state for one product-detail view. The concurrency lives in
//! [`crate::view::actor`]; everything here is a plain value transition, which
//! keeps the supersession rule trivially testable.
//!
//! Ownership of the fields is split by writer:
//! - the Aggregator is the only writer of the [`ViewPhase`]
//!   (product/reviews/inventory);
//! - the Order Initiator is the only writer of the [`OrderOutcome`].
//!
//! Each activation is tagged with a [`Generation`]; results carrying a stale
//! generation are discarded instead of applied, so a late response for a
//! previously selected product can never overwrite the current view.

use crate::model::{InventoryStatus, Product, ProductId, ReviewSummary};
use crate::view::aggregator::AggregationError;

/// Ownership token for one activation of the view.
///
/// Bumped by [`ProductView::activate`]; spawned fetch and order tasks carry
/// the generation they were started under, and their results are applied only
/// while it is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// The combined snapshot of the three aggregation reads.
///
/// Populated atomically: either all three fields are present or none is.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub product: Product,
    pub reviews: ReviewSummary,
    pub inventory: InventoryStatus,
}

/// Where the aggregation currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewPhase {
    /// Requests are in flight (also the pre-activation state).
    Loading,
    /// All three reads succeeded.
    Loaded(ProductDetail),
    /// At least one read failed; the single user-visible message. Successful
    /// sibling results were discarded, there is no partial view.
    Error(String),
}

/// Result of the most recent order submission, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    Placed { order_id: String },
    Failed { message: String },
}

impl OrderOutcome {
    /// The exact line shown to the user.
    pub fn status_line(&self) -> String {
        match self {
            OrderOutcome::Placed { order_id } => format!("Order placed! ID: {order_id}"),
            OrderOutcome::Failed { message } => format!("Order failed: {message}"),
        }
    }
}

/// The per-activation snapshot handed to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: ViewPhase,
    /// Additive: set by order settlement, cleared only by re-activation.
    pub order_outcome: Option<OrderOutcome>,
}

impl ViewState {
    fn loading() -> Self {
        Self {
            phase: ViewPhase::Loading,
            order_outcome: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ViewPhase::Loading)
    }

    pub fn detail(&self) -> Option<&ProductDetail> {
        match &self.phase {
            ViewPhase::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            ViewPhase::Error(message) => Some(message),
            _ => None,
        }
    }

    /// UI-level gate for the order action: loaded and reported available.
    /// The Order Initiator itself does not re-check this.
    pub fn can_order(&self) -> bool {
        self.detail().is_some_and(|d| d.inventory.available)
    }

    /// The stock badge text, once loaded.
    pub fn stock_label(&self) -> Option<String> {
        self.detail().map(|d| {
            if d.inventory.available {
                format!("In Stock: {}", d.inventory.quantity)
            } else {
                "Out of Stock".to_string()
            }
        })
    }
}

/// Owner of the view state and the generation counter.
///
/// All transitions are synchronous; the actor calls them from its event loop,
/// making it the single writer.
#[derive(Debug, Default)]
pub struct ProductView {
    generation: Generation,
    product_id: Option<ProductId>,
    state: ViewState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::loading()
    }
}

impl ProductView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Starts a new activation for `product_id`.
    ///
    /// Discards all previous state, including any order outcome, and returns
    /// the new generation token to tag the fetches with.
    pub fn activate(&mut self, product_id: ProductId) -> Generation {
        self.generation = self.generation.next();
        self.product_id = Some(product_id);
        self.state = ViewState::loading();
        self.generation
    }

    /// Applies a settled aggregation, unless it belongs to a superseded
    /// activation. Returns whether the result was applied.
    pub fn apply_aggregation(
        &mut self,
        generation: Generation,
        result: Result<ProductDetail, AggregationError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state.phase = match result {
            Ok(detail) => ViewPhase::Loaded(detail),
            Err(error) => ViewPhase::Error(error.to_string()),
        };
        true
    }

    /// Applies a settled order outcome under the same generation rule.
    /// Only `order_outcome` is written; the loaded detail is untouched.
    pub fn apply_order(&mut self, generation: Generation, outcome: OrderOutcome) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state.order_outcome = Some(outcome);
        true
    }
}
