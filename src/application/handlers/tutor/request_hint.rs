//! RequestHintHandler - Progressive hint generation.
//!
//! Each granted hint is appended to the profile's hint log so the next
//! request can list every prior hint under a do-not-repeat instruction.

use std::sync::Arc;

use crate::domain::context::render_hint_context;
use crate::domain::foundation::{CoreError, ProblemId, UserId};
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::ports::{AiProvider, CompletionRequest, ProblemStore, ProfileStore};

const HINT_TEMPERATURE: f32 = 0.55;
const HINT_MAX_TOKENS: u32 = 180;

const HINT_SYSTEM_PROMPT: &str = "You are an algorithms tutor giving one \
short progressive hint. Never reveal the full approach or any code. The hint \
must move the student one step past the hints already given, phrased as a \
nudge or a question.";

/// Command for one hint request.
#[derive(Debug, Clone)]
pub struct RequestHintCommand {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    /// Current editor contents, if the student shared them.
    pub current_code: Option<String>,
}

/// A granted hint plus the profile state after logging it.
#[derive(Debug, Clone)]
pub struct HintResult {
    pub hint: String,
    pub profile: Profile,
}

/// Handler for hint requests.
pub struct RequestHintHandler {
    ai: Arc<dyn AiProvider>,
    profiles: Arc<dyn ProfileStore>,
    problems: Arc<dyn ProblemStore>,
}

impl RequestHintHandler {
    pub fn new(
        ai: Arc<dyn AiProvider>,
        profiles: Arc<dyn ProfileStore>,
        problems: Arc<dyn ProblemStore>,
    ) -> Self {
        Self {
            ai,
            profiles,
            problems,
        }
    }

    pub async fn handle(&self, cmd: RequestHintCommand) -> Result<HintResult, CoreError> {
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

        let context = render_hint_context(
            &problem,
            &profile,
            &profile.recent_hints,
            cmd.current_code.as_deref(),
        );
        let response = self
            .ai
            .complete(
                CompletionRequest::new(context)
                    .with_system(HINT_SYSTEM_PROMPT)
                    .with_temperature(HINT_TEMPERATURE)
                    .with_max_tokens(HINT_MAX_TOKENS),
            )
            .await?;
        let hint = response.content.trim().to_string();

        let merged = self
            .profiles
            .merge(&cmd.user_id, ProfileUpdate::new().with_hint(&hint))
            .await?;

        Ok(HintResult {
            hint,
            profile: merged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::memory::{InMemoryProblemStore, InMemoryProfileStore};
    use crate::domain::problem::Problem;

    fn seed() -> InMemoryProblemStore {
        InMemoryProblemStore::new(vec![Problem::new(
            ProblemId::new("two-sum").unwrap(),
            "Two Sum",
            "Find two numbers adding to target.",
            1,
            vec!["Arrays".to_string()],
        )])
    }

    async fn registered_profiles() -> Arc<InMemoryProfileStore> {
        let profiles = Arc::new(InMemoryProfileStore::new());
        profiles
            .create_initial(&UserId::new("student-1").unwrap())
            .await
            .unwrap();
        profiles
    }

    fn command() -> RequestHintCommand {
        RequestHintCommand {
            user_id: UserId::new("student-1").unwrap(),
            problem_id: ProblemId::new("two-sum").unwrap(),
            current_code: Some("for i in nums:\n    pass".to_string()),
        }
    }

    #[tokio::test]
    async fn hint_is_logged_to_profile() {
        let ai = MockAiProvider::new().with_response("  What lookup is O(1)?  ");
        let handler =
            RequestHintHandler::new(Arc::new(ai), registered_profiles().await, Arc::new(seed()));

        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.hint, "What lookup is O(1)?");
        assert_eq!(
            result.profile.recent_hints,
            vec!["What lookup is O(1)?".to_string()]
        );
    }

    #[tokio::test]
    async fn second_request_lists_previous_hint() {
        let ai = MockAiProvider::new()
            .with_response("first hint")
            .with_response("second hint");
        let calls = ai.clone();
        let handler =
            RequestHintHandler::new(Arc::new(ai), registered_profiles().await, Arc::new(seed()));

        handler.handle(command()).await.unwrap();
        let result = handler.handle(command()).await.unwrap();

        assert_eq!(result.profile.recent_hints.len(), 2);
        let second_request = &calls.get_calls()[1];
        assert!(second_request.prompt.contains("1. first hint"));
        assert!(second_request.prompt.contains("DO NOT REPEAT"));
    }

    #[tokio::test]
    async fn unregistered_user_is_rejected_without_side_effects() {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let handler = RequestHintHandler::new(
            Arc::new(MockAiProvider::new().with_response("a hint")),
            Arc::clone(&profiles) as Arc<dyn ProfileStore>,
            Arc::new(seed()),
        );

        let err = handler.handle(command()).await.unwrap_err();

        assert!(matches!(err, CoreError::ProfileNotFound(_)));
        // The rejected request must not leave a profile behind.
        assert!(profiles
            .get(&UserId::new("student-1").unwrap())
            .await
            .unwrap()
            .is_none());
    }
}
