//! # View Actor
//!
//! The single writer of the view state. One Tokio task owns the
//! [`ProductView`] and processes [`ViewRequest`] messages sequentially, so no
//! locking is needed: fetch and order tasks run concurrently, but their
//! results re-enter the loop as settlement messages and are applied one at a
//! time, gated on the [`Generation`] they were spawned under.
//!
//! The actor holds only a weak handle to its own channel. Spawned tasks
//! upgrade it for the duration of one settlement message, so dropping the
//! last [`ViewClient`](crate::view::ViewClient) shuts the loop down once the
//! in-flight work has drained.

use crate::api::StoreApi;
use crate::view::aggregator::{aggregate, AggregationError};
use crate::view::error::ViewError;
use crate::view::order::submit_order;
use crate::view::state::{Generation, OrderOutcome, ProductDetail, ProductView, ViewState};
use crate::model::ProductId;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// One-shot responder carried by client-facing requests.
pub type Respond<T> = oneshot::Sender<Result<T, ViewError>>;

/// What to do with order submissions that arrive while one is pending.
///
/// The original storefront allowed unlimited concurrent clicks; here the
/// behavior is explicit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderPolicy {
    /// Reject `place_order` with [`ViewError::OrderInFlight`] while a
    /// submission is pending.
    #[default]
    SingleFlight,
    /// Every invocation issues its own request, duplicates included.
    AllowDuplicates,
}

/// Messages processed by the [`ViewActor`].
///
/// The `*Settled` variants are internal: spawned tasks post them back into
/// the same channel so that every state write happens on the event loop.
#[derive(Debug)]
pub enum ViewRequest {
    /// Start (or restart) the view for a product. Responds once this
    /// activation settles, or with [`ViewError::Superseded`] if a newer
    /// activation arrives first.
    Activate {
        product_id: ProductId,
        respond_to: Respond<ViewState>,
    },
    /// Submit a demo order for the currently active product.
    PlaceOrder { respond_to: Respond<OrderOutcome> },
    /// Observe the current state (including `Loading`).
    Snapshot {
        respond_to: oneshot::Sender<ViewState>,
    },
    AggregationSettled {
        generation: Generation,
        result: Result<ProductDetail, AggregationError>,
    },
    OrderSettled {
        generation: Generation,
        outcome: OrderOutcome,
        respond_to: Respond<OrderOutcome>,
    },
}

/// The server half of the view. Created via [`crate::view::new`]; run it with
/// `tokio::spawn(actor.run())`.
pub struct ViewActor<S: StoreApi> {
    receiver: mpsc::Receiver<ViewRequest>,
    /// Weak so the actor's own handle does not keep the channel open.
    sender: mpsc::WeakSender<ViewRequest>,
    api: Arc<S>,
    user_id: String,
    policy: OrderPolicy,
    view: ProductView,
    /// Responder of the not-yet-settled activation, if any.
    pending_view: Option<Respond<ViewState>>,
    order_in_flight: bool,
}

impl<S: StoreApi> ViewActor<S> {
    pub(crate) fn new(
        receiver: mpsc::Receiver<ViewRequest>,
        sender: mpsc::WeakSender<ViewRequest>,
        api: Arc<S>,
        user_id: String,
        policy: OrderPolicy,
    ) -> Self {
        Self {
            receiver,
            sender,
            api,
            user_id,
            policy,
            view: ProductView::new(),
            pending_view: None,
            order_in_flight: false,
        }
    }

    /// Runs the event loop until every client and in-flight task is gone.
    pub async fn run(mut self) {
        info!(policy = ?self.policy, "View actor started");

        while let Some(request) = self.receiver.recv().await {
            match request {
                ViewRequest::Activate {
                    product_id,
                    respond_to,
                } => self.handle_activate(product_id, respond_to),
                ViewRequest::PlaceOrder { respond_to } => self.handle_place_order(respond_to),
                ViewRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.view.state().clone());
                }
                ViewRequest::AggregationSettled { generation, result } => {
                    self.handle_aggregation_settled(generation, result)
                }
                ViewRequest::OrderSettled {
                    generation,
                    outcome,
                    respond_to,
                } => self.handle_order_settled(generation, outcome, respond_to),
            }
        }

        info!("View actor shutdown");
    }

    fn handle_activate(&mut self, product_id: ProductId, respond_to: Respond<ViewState>) {
        let generation = self.view.activate(product_id.clone());
        info!(%product_id, generation = generation.value(), "Activated");

        // The previous activation, if still pending, is superseded now.
        if let Some(stale) = self.pending_view.take() {
            let _ = stale.send(Err(ViewError::Superseded));
        }
        self.pending_view = Some(respond_to);

        let Some(sender) = self.sender.upgrade() else {
            return; // shutting down
        };
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = aggregate(api.as_ref(), &product_id).await;
            let _ = sender
                .send(ViewRequest::AggregationSettled { generation, result })
                .await;
        });
    }

    fn handle_aggregation_settled(
        &mut self,
        generation: Generation,
        result: Result<ProductDetail, AggregationError>,
    ) {
        if !self.view.apply_aggregation(generation, result) {
            debug!(
                generation = generation.value(),
                "stale aggregation discarded"
            );
            return;
        }
        match self.view.state().error_message() {
            None => info!(generation = generation.value(), "Loaded"),
            Some(error) => warn!(generation = generation.value(), error, "Load failed"),
        }
        if let Some(respond_to) = self.pending_view.take() {
            let _ = respond_to.send(Ok(self.view.state().clone()));
        }
    }

    fn handle_place_order(&mut self, respond_to: Respond<OrderOutcome>) {
        let Some(product_id) = self.view.product_id().cloned() else {
            let _ = respond_to.send(Err(ViewError::NoActiveProduct));
            return;
        };
        if self.policy == OrderPolicy::SingleFlight && self.order_in_flight {
            debug!(%product_id, "order rejected, one already in flight");
            let _ = respond_to.send(Err(ViewError::OrderInFlight));
            return;
        }
        let Some(sender) = self.sender.upgrade() else {
            let _ = respond_to.send(Err(ViewError::ViewClosed));
            return;
        };

        let generation = self.view.generation();
        let api = Arc::clone(&self.api);
        let user_id = self.user_id.clone();
        self.order_in_flight = true;
        tokio::spawn(async move {
            let outcome = submit_order(api.as_ref(), &product_id, &user_id).await;
            let _ = sender
                .send(ViewRequest::OrderSettled {
                    generation,
                    outcome,
                    respond_to,
                })
                .await;
        });
    }

    fn handle_order_settled(
        &mut self,
        generation: Generation,
        outcome: OrderOutcome,
        respond_to: Respond<OrderOutcome>,
    ) {
        self.order_in_flight = false;
        if !self.view.apply_order(generation, outcome.clone()) {
            // The caller still gets their answer; only the state write is
            // skipped, since the view now shows a different product.
            debug!(
                generation = generation.value(),
                "stale order outcome not applied"
            );
        }
        let _ = respond_to.send(Ok(outcome));
    }
}
