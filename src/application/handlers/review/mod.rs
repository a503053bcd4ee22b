//! Review handlers.

mod review_history;
mod submit_review;

pub use review_history::{ReviewHistoryHandler, ReviewHistoryQuery};
pub use submit_review::{SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult};
