//! ReviewHistoryHandler - Query handler for a student's recent reviews.

use std::sync::Arc;

use crate::domain::foundation::{CoreError, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewStore;

/// Query for a student's most recent reviews.
#[derive(Debug, Clone)]
pub struct ReviewHistoryQuery {
    pub user_id: UserId,
    pub limit: usize,
}

/// Handler for review history queries.
pub struct ReviewHistoryHandler {
    reviews: Arc<dyn ReviewStore>,
}

impl ReviewHistoryHandler {
    pub fn new(reviews: Arc<dyn ReviewStore>) -> Self {
        Self { reviews }
    }

    /// Returns reviews newest first, up to the requested limit.
    pub async fn handle(&self, query: ReviewHistoryQuery) -> Result<Vec<Review>, CoreError> {
        self.reviews
            .recent_for_user(&query.user_id, query.limit)
            .await
    }
}
