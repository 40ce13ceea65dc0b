//! Inventory status as served by the inventory service.

use serde::{Deserialize, Serialize};

/// The response of `GET /api/inventory/{id}`.
///
/// The inventory service is expected to set `available` only when
/// `quantity > 0`, but this crate does not enforce that invariant; the flag
/// is displayed as received and gates the order action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStatus {
    pub quantity: u32,
    pub available: bool,
}
