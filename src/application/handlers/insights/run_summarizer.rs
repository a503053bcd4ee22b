//! RunSummarizerHandler - Periodic background summarization of learning trends.
//!
//! Runs detached from the request path: the submit flow spawns it on every
//! fifth submission and never awaits it. Every failure inside the task is
//! logged and swallowed; a failed summarization must never affect a
//! student-facing operation.

use std::sync::Arc;

use crate::domain::context::render_trend_context;
use crate::domain::foundation::{CoreError, UserId};
use crate::domain::profile::ProfileUpdate;
use crate::ports::{AiProvider, CompletionRequest, ProfileStore, ReviewStore};

/// Trend synthesis tolerates a little creativity.
const SUMMARIZER_TEMPERATURE: f32 = 0.3;

/// How many recent reviews feed one summarization pass.
const REVIEW_WINDOW: usize = 10;

const SUMMARIZER_SYSTEM_PROMPT: &str = "You are analyzing a student's recent \
code reviews to extract learning trends. Return ONLY a JSON object with keys: \
trajectory (string), recurring_struggles (array of strings), emerging_strengths \
(array of strings), and recommended_focus (array of strings).";

/// Handler that summarizes recent reviews into profile insights.
pub struct RunSummarizerHandler {
    ai: Arc<dyn AiProvider>,
    profiles: Arc<dyn ProfileStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl RunSummarizerHandler {
    pub fn new(
        ai: Arc<dyn AiProvider>,
        profiles: Arc<dyn ProfileStore>,
        reviews: Arc<dyn ReviewStore>,
    ) -> Self {
        Self {
            ai,
            profiles,
            reviews,
        }
    }

    /// Spawns a detached summarization task for the user.
    ///
    /// Errors never leave the task; they are logged at warn level.
    pub fn spawn(self: Arc<Self>, user_id: UserId) {
        tokio::spawn(async move {
            if let Err(err) = self.handle(&user_id).await {
                tracing::warn!(
                    user_id = %user_id,
                    error = %err,
                    "background summarization failed"
                );
            }
        });
    }

    /// Runs one summarization pass.
    ///
    /// Short-circuits when there is nothing new to summarize: no profile,
    /// no reviews, or no submissions since the last pass.
    pub async fn handle(&self, user_id: &UserId) -> Result<(), CoreError> {
        let Some(profile) = self.profiles.get(user_id).await? else {
            return Ok(());
        };
        if profile.last_summarized_at == profile.submissions_count {
            return Ok(());
        }

        let reviews = self.reviews.recent_for_user(user_id, REVIEW_WINDOW).await?;
        if reviews.is_empty() {
            return Ok(());
        }

        let context = render_trend_context(&profile, &reviews);
        let insights = self
            .ai
            .complete_structured(
                CompletionRequest::new(context)
                    .with_system(SUMMARIZER_SYSTEM_PROMPT)
                    .with_temperature(SUMMARIZER_TEMPERATURE),
            )
            .await?;

        self.profiles
            .merge(
                user_id,
                ProfileUpdate::new()
                    .with_insights(insights)
                    .with_last_summarized_at(profile.submissions_count),
            )
            .await?;

        tracing::info!(
            user_id = %user_id,
            submissions = profile.submissions_count,
            "learning trends summarized"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::memory::{InMemoryProfileStore, InMemoryReviewStore};
    use crate::domain::foundation::{ProblemId, Timestamp};
    use crate::domain::review::{Review, ReviewAnalysis};
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("student-1").unwrap()
    }

    async fn seed_reviews(store: &InMemoryReviewStore, count: usize) {
        for i in 0..count {
            store
                .insert(&Review::new(
                    user(),
                    ProblemId::new("two-sum").unwrap(),
                    "Two Sum",
                    format!("attempt {i}"),
                    "python",
                    ReviewAnalysis::default(),
                    Timestamp::now(),
                ))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn stores_insights_and_watermark() {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let reviews = Arc::new(InMemoryReviewStore::new());
        profiles.create_initial(&user()).await.unwrap();
        profiles
            .merge(&user(), ProfileUpdate::new().incrementing_submissions())
            .await
            .unwrap();
        seed_reviews(&reviews, 3).await;

        let insights = json!({
            "trajectory": "improving",
            "recurring_struggles": ["off-by-one errors"],
            "emerging_strengths": ["hash maps"],
            "recommended_focus": ["two pointers"]
        });
        let handler = RunSummarizerHandler::new(
            Arc::new(MockAiProvider::new().with_json_response(&insights)),
            Arc::clone(&profiles) as Arc<dyn ProfileStore>,
            reviews,
        );

        handler.handle(&user()).await.unwrap();

        let profile = profiles.get(&user()).await.unwrap().unwrap();
        assert_eq!(profile.insights, Some(insights));
        assert_eq!(profile.last_summarized_at, 1);
    }

    #[tokio::test]
    async fn short_circuits_when_already_summarized() {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let reviews = Arc::new(InMemoryReviewStore::new());
        profiles.create_initial(&user()).await.unwrap();
        seed_reviews(&reviews, 2).await;

        let ai = MockAiProvider::new();
        let provider = Arc::new(ai.clone());
        let handler = RunSummarizerHandler::new(
            provider,
            Arc::clone(&profiles) as Arc<dyn ProfileStore>,
            reviews,
        );

        // Fresh profile: submissions_count == last_summarized_at == 0.
        handler.handle(&user()).await.unwrap();
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_profile_is_a_no_op() {
        let handler = RunSummarizerHandler::new(
            Arc::new(MockAiProvider::new()),
            Arc::new(InMemoryProfileStore::new()),
            Arc::new(InMemoryReviewStore::new()),
        );

        assert!(handler.handle(&user()).await.is_ok());
    }
}
