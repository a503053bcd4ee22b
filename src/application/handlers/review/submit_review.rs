//! SubmitReviewHandler - Command handler for reviewing a code submission.
//!
//! Orchestrates the full submission flow: render the personalized review
//! context, invoke structured generation, normalize the analysis, persist
//! the review, fold the proposed deltas into the profile, and kick off the
//! background summarizer on every fifth submission.

use std::sync::Arc;

use crate::application::handlers::insights::RunSummarizerHandler;
use crate::domain::context::render_reviewer_context;
use crate::domain::foundation::{CoreError, ProblemId, Timestamp, UserId};
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::domain::review::{Review, ReviewAnalysis};
use crate::ports::{AiProvider, CompletionRequest, ProblemStore, ProfileStore, ReviewStore};

/// Review generation runs at low temperature, favoring determinism.
const REVIEW_TEMPERATURE: f32 = 0.2;

/// Every Nth submission triggers a background trend summarization.
const SUMMARIZE_EVERY: u32 = 5;

const REVIEW_SYSTEM_PROMPT: &str = "You are a rigorous but encouraging \
algorithms mentor reviewing a student's code submission. Analyze correctness, \
complexity, and style against the student's profile. Return ONLY a JSON object \
with keys: score (0-10 integer), strengths (array of strings), weaknesses \
(array of strings), thinking_style (string), concept_gaps (array of strings), \
known_concepts (array of strings), topics_to_revise (array of strings), \
detailed_feedback (string), and profile_updates (object with skills mapping \
concept names to 0.0-1.0 scores, plus gaps, strengths, and mistake_patterns \
arrays).";

/// Command to review one code submission.
#[derive(Debug, Clone)]
pub struct SubmitReviewCommand {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub code: String,
    pub language: String,
}

/// Result of a completed review.
#[derive(Debug, Clone)]
pub struct SubmitReviewResult {
    pub review: Review,
    pub profile: Profile,
}

/// Handler for code submissions.
pub struct SubmitReviewHandler {
    ai: Arc<dyn AiProvider>,
    profiles: Arc<dyn ProfileStore>,
    reviews: Arc<dyn ReviewStore>,
    problems: Arc<dyn ProblemStore>,
    summarizer: Option<Arc<RunSummarizerHandler>>,
}

impl SubmitReviewHandler {
    pub fn new(
        ai: Arc<dyn AiProvider>,
        profiles: Arc<dyn ProfileStore>,
        reviews: Arc<dyn ReviewStore>,
        problems: Arc<dyn ProblemStore>,
    ) -> Self {
        Self {
            ai,
            profiles,
            reviews,
            problems,
            summarizer: None,
        }
    }

    /// Enables the periodic background summarizer.
    pub fn with_summarizer(mut self, summarizer: Arc<RunSummarizerHandler>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub async fn handle(&self, cmd: SubmitReviewCommand) -> Result<SubmitReviewResult, CoreError> {
        let problem = self
            .problems
            .get(&cmd.problem_id)
            .await?
            .ok_or_else(|| CoreError::ProblemNotFound(cmd.problem_id.clone()))?;

        let profile = self
            .profiles
            .get(&cmd.user_id)
            .await?
            .ok_or_else(|| CoreError::ProfileNotFound(cmd.user_id.clone()))?;

        let context = render_reviewer_context(&problem, &cmd.code, &profile, &cmd.language);
        let raw = self
            .ai
            .complete_structured(
                CompletionRequest::new(context)
                    .with_system(REVIEW_SYSTEM_PROMPT)
                    .with_temperature(REVIEW_TEMPERATURE),
            )
            .await?;
        let analysis = ReviewAnalysis::from_value(&raw);

        let review = Review::new(
            cmd.user_id.clone(),
            cmd.problem_id.clone(),
            &problem.title,
            &cmd.code,
            &cmd.language,
            analysis.clone(),
            Timestamp::now(),
        );
        self.reviews.insert(&review).await?;

        let merged = self
            .profiles
            .merge(&cmd.user_id, Self::profile_update_from(&analysis))
            .await?;

        if merged.submissions_count % SUMMARIZE_EVERY == 0 {
            if let Some(summarizer) = &self.summarizer {
                Arc::clone(summarizer).spawn(cmd.user_id.clone());
            }
        }

        tracing::info!(
            user_id = %cmd.user_id,
            problem_id = %cmd.problem_id,
            score = analysis.score,
            "submission reviewed"
        );

        Ok(SubmitReviewResult {
            review,
            profile: merged,
        })
    }

    /// Folds the analysis into a single profile update.
    ///
    /// Gap and strength lists only replace when the model proposed a
    /// non-empty list; an empty delta never wipes existing entries.
    fn profile_update_from(analysis: &ReviewAnalysis) -> ProfileUpdate {
        let deltas = &analysis.profile_updates;
        let mut update = ProfileUpdate::new()
            .with_skills(deltas.skills.clone())
            .with_mistake_patterns(deltas.mistake_patterns.clone())
            .with_new_weaknesses(analysis.concept_gaps.clone())
            .with_known_concepts(analysis.known_concepts.clone())
            .with_thinking_style(&analysis.thinking_style)
            .incrementing_submissions();
        if !deltas.gaps.is_empty() {
            update = update.replace_gaps(deltas.gaps.clone());
        }
        if !deltas.strengths.is_empty() {
            update = update.replace_strengths(deltas.strengths.clone());
        }
        update
    }
}
