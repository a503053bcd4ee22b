//! In-memory review store implementation.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{CoreError, UserId};
use crate::domain::review::Review;
use crate::ports::ReviewStore;

/// In-memory implementation of the ReviewStore port.
///
/// Reviews are append-only; insertion order is preserved per user.
#[derive(Default)]
pub struct InMemoryReviewStore {
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryReviewStore {
    /// Creates a new empty review store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored reviews.
    pub async fn len(&self) -> usize {
        self.reviews.read().await.len()
    }

    /// Returns true if no reviews are stored.
    pub async fn is_empty(&self) -> bool {
        self.reviews.read().await.is_empty()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn insert(&self, review: &Review) -> Result<(), CoreError> {
        self.reviews.write().await.push(review.clone());
        Ok(())
    }

    async fn recent_for_user(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<Review>, CoreError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .rev()
            .filter(|r| &r.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
