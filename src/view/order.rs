//! # Order Initiator
//!
//! Submits one demo order and reports the outcome. The submission is
//! independent of the aggregation: it never touches the loaded product view,
//! and a failure is a recoverable displayed message, never an error that
//! propagates. Availability is a UI-level gate
//! ([`crate::view::ViewState::can_order`]); this function attempts the
//! submission regardless, and the ordering service has the final say.

use crate::api::StoreApi;
use crate::model::{OrderRequest, ProductId};
use crate::view::state::OrderOutcome;
use tracing::{debug, info, instrument, warn};

/// Every demo order is for exactly one unit.
pub const ORDER_QUANTITY: u32 = 1;

/// Fallback message when a rejection carries no structured detail.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Places a single order for `product_id` on behalf of `user_id`.
///
/// Transport failures, error statuses and business-rule rejections (e.g.
/// out-of-stock at submission time) all surface identically as
/// [`OrderOutcome::Failed`].
#[instrument(skip(api))]
pub async fn submit_order<S: StoreApi>(
    api: &S,
    product_id: &ProductId,
    user_id: &str,
) -> OrderOutcome {
    let request = OrderRequest {
        product_id: product_id.clone(),
        quantity: ORDER_QUANTITY,
        user_id: user_id.to_string(),
    };
    debug!(?request, "submitting order");

    match api.place_order(&request).await {
        Ok(receipt) => {
            info!(order_id = %receipt.order_id, "order placed");
            OrderOutcome::Placed {
                order_id: receipt.order_id,
            }
        }
        Err(error) => {
            warn!(%error, "order rejected");
            let message = error
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
            OrderOutcome::Failed { message }
        }
    }
}
