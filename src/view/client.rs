//! # View Client
//!
//! Type-safe handle for talking to the [`ViewActor`](crate::view::ViewActor).
//! Cheap to clone (it holds only a channel sender) and shareable across
//! tasks; a closed channel maps to [`ViewError::ViewClosed`].

use crate::model::ProductId;
use crate::view::actor::ViewRequest;
use crate::view::error::ViewError;
use crate::view::state::{OrderOutcome, ViewState};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for one product-detail view.
#[derive(Clone)]
pub struct ViewClient {
    sender: mpsc::Sender<ViewRequest>,
}

impl ViewClient {
    pub(crate) fn new(sender: mpsc::Sender<ViewRequest>) -> Self {
        Self { sender }
    }

    /// Activates the view for `product_id` and waits for this activation to
    /// settle into its terminal state.
    ///
    /// Returns [`ViewError::Superseded`] if another activation replaces this
    /// one before its reads finish; the late results are discarded, never
    /// applied.
    #[instrument(skip(self))]
    pub async fn activate(&self, product_id: ProductId) -> Result<ViewState, ViewError> {
        debug!("sending activate");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Activate {
                product_id,
                respond_to,
            })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewClosed)?
    }

    /// Submits a demo order for the currently active product and waits for
    /// the outcome. The outcome is also recorded in the view state unless
    /// the product changed while the order was in flight.
    #[instrument(skip(self))]
    pub async fn place_order(&self) -> Result<OrderOutcome, ViewError> {
        debug!("sending place_order");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::PlaceOrder { respond_to })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewClosed)?
    }

    /// Observes the current view state without waiting for anything to
    /// settle (this is how callers see `Loading`).
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<ViewState, ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewRequest::Snapshot { respond_to })
            .await
            .map_err(|_| ViewError::ViewClosed)?;
        response.await.map_err(|_| ViewError::ViewClosed)
    }
}
