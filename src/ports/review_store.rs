//! ReviewStore port for code review persistence.

use async_trait::async_trait;

use crate::domain::foundation::{CoreError, UserId};
use crate::domain::review::Review;

/// Store for completed code reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Persist a completed review.
    async fn insert(&self, review: &Review) -> Result<(), CoreError>;

    /// Fetch the most recent reviews for a user, newest first.
    async fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Review>, CoreError>;
}
