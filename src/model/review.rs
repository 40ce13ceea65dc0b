//! Review entities as served by the review service.

use serde::{Deserialize, Serialize};

/// A single customer review.
///
/// `date` is a display string assigned upstream; it is rendered verbatim and
/// never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user: String,
    pub text: String,
    /// Expected 0-5; shown as received, not clamped.
    pub rating: f32,
    pub date: String,
}

/// The response of `GET /api/review/{id}`: an aggregate rating plus the
/// individual reviews in upstream order. The sequence is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub average_rating: f32,
    pub reviews: Vec<Review>,
}
