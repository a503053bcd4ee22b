//! CompleteOnboardingHandler - Initial profile inference from onboarding answers.
//!
//! The raw question/answer pairs are stored verbatim on the profile, and the
//! model's inference seeds skills, gaps, strengths, known concepts, and the
//! personalization scalars. Session logs and counters are cleared first, so
//! re-onboarding starts the student fresh. Missing or mistyped inference keys
//! fall back to the profile defaults rather than failing the onboarding.

use std::sync::Arc;

use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::context::render_onboarding_context;
use crate::domain::foundation::{CoreError, UserId};
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::ports::{AiProvider, CompletionRequest, ProfileStore};

const ONBOARDING_TEMPERATURE: f32 = 0.3;

const ONBOARDING_SYSTEM_PROMPT: &str = "You are profiling a new student from \
their onboarding answers. Return ONLY a JSON object with keys: \
experience_level (one of beginner, intermediate, advanced), preferred_style \
(one of visual, verbal, hands_on), goal (string), background (string), \
initial_strengths (array of concept names), initial_gaps (array of concept \
names), known_concepts (array of concept names), and initial_skills (object \
mapping concept names to 0.0-1.0 scores).";

/// Command to complete onboarding for a new user.
#[derive(Debug, Clone)]
pub struct CompleteOnboardingCommand {
    pub user_id: UserId,
    /// Question/answer pairs in presentation order.
    pub answers: Vec<(String, String)>,
}

/// Handler for onboarding completion.
pub struct CompleteOnboardingHandler {
    ai: Arc<dyn AiProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl CompleteOnboardingHandler {
    pub fn new(ai: Arc<dyn AiProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { ai, profiles }
    }

    pub async fn handle(&self, cmd: CompleteOnboardingCommand) -> Result<Profile, CoreError> {
        let context = render_onboarding_context(&cmd.answers);
        let inference = self
            .ai
            .complete_structured(
                CompletionRequest::new(context)
                    .with_system(ONBOARDING_SYSTEM_PROMPT)
                    .with_temperature(ONBOARDING_TEMPERATURE),
            )
            .await?;

        let mut update = Self::update_from_inference(&inference).resetting_session();
        update.onboarding_complete = Some(true);
        update.onboarding_answers = Some(
            cmd.answers
                .iter()
                .cloned()
                .collect::<BTreeMap<String, String>>(),
        );

        let merged = self.profiles.merge(&cmd.user_id, update).await?;

        tracing::info!(user_id = %cmd.user_id, "onboarding completed");
        Ok(merged)
    }

    /// Extracts the inferred seed fields, tolerating missing keys.
    fn update_from_inference(inference: &Value) -> ProfileUpdate {
        let mut update = ProfileUpdate::new();
        update.experience_level = non_empty_string(inference.get("experience_level"));
        update.preferred_style = non_empty_string(inference.get("preferred_style"));
        update.goal = non_empty_string(inference.get("goal"));
        update.background = non_empty_string(inference.get("background"));

        let skills: BTreeMap<String, f64> = inference
            .get("initial_skills")
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(concept, score)| score.as_f64().map(|s| (concept.clone(), s)))
                    .collect()
            })
            .unwrap_or_default();
        update = update
            .with_skills(skills)
            .with_known_concepts(string_list(inference.get("known_concepts")));

        let strengths = string_list(inference.get("initial_strengths"));
        if !strengths.is_empty() {
            update = update.replace_strengths(strengths);
        }
        let gaps = string_list(inference.get("initial_gaps"));
        if !gaps.is_empty() {
            update = update.replace_gaps(gaps);
        }
        update
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::memory::InMemoryProfileStore;
    use serde_json::json;

    fn command() -> CompleteOnboardingCommand {
        CompleteOnboardingCommand {
            user_id: UserId::new("student-1").unwrap(),
            answers: vec![
                (
                    "How much coding experience do you have?".to_string(),
                    "A year of Python.".to_string(),
                ),
                (
                    "What is your goal?".to_string(),
                    "Pass interviews.".to_string(),
                ),
            ],
        }
    }

    #[tokio::test]
    async fn seeds_profile_from_inference() {
        let ai = MockAiProvider::new().with_json_response(&json!({
            "experience_level": "intermediate",
            "preferred_style": "hands_on",
            "goal": "interview preparation",
            "background": "self-taught Python",
            "initial_strengths": ["Arrays"],
            "initial_gaps": ["Recursion"],
            "known_concepts": ["Arrays", "Strings"],
            "initial_skills": {"Arrays": 0.637, "Strings": 0.5}
        }));
        let profiles = Arc::new(InMemoryProfileStore::new());
        let handler =
            CompleteOnboardingHandler::new(Arc::new(ai), Arc::clone(&profiles) as Arc<dyn ProfileStore>);

        let profile = handler.handle(command()).await.unwrap();

        assert!(profile.onboarding_complete);
        assert_eq!(profile.experience_level, "intermediate");
        assert_eq!(profile.preferred_style, "hands_on");
        assert_eq!(profile.goal, "interview preparation");
        assert_eq!(profile.strengths, vec!["Arrays".to_string()]);
        assert_eq!(profile.gaps, vec!["Recursion".to_string()]);
        assert!(profile.known_concepts.contains("Strings"));
        assert_eq!(profile.skills.get("Arrays"), Some(&0.64));
        assert_eq!(profile.skills.get("Strings"), Some(&0.5));
        assert_eq!(profile.onboarding_answers.len(), 2);
    }

    #[tokio::test]
    async fn re_onboarding_clears_session_state() {
        let ai = MockAiProvider::new().with_json_response(&json!({
            "experience_level": "beginner",
            "preferred_style": "visual",
            "goal": "fundamentals",
            "background": "",
            "initial_strengths": []
        }));
        let profiles = Arc::new(InMemoryProfileStore::new());
        let user_id = UserId::new("student-1").unwrap();
        profiles.create_initial(&user_id).await.unwrap();
        profiles
            .merge(
                &user_id,
                ProfileUpdate::new()
                    .with_hint("try a hash map")
                    .with_mistake_patterns(vec!["off-by-one".to_string()])
                    .with_new_weaknesses(vec!["Recursion".to_string()])
                    .incrementing_submissions(),
            )
            .await
            .unwrap();
        let handler = CompleteOnboardingHandler::new(
            Arc::new(ai),
            Arc::clone(&profiles) as Arc<dyn ProfileStore>,
        );

        let profile = handler.handle(command()).await.unwrap();

        assert!(profile.onboarding_complete);
        assert!(profile.recent_hints.is_empty());
        assert!(profile.mistake_patterns.is_empty());
        assert!(profile.recent_weaknesses.is_empty());
        assert_eq!(profile.submissions_count, 0);
    }

    #[tokio::test]
    async fn missing_inference_keys_keep_defaults() {
        let ai = MockAiProvider::new().with_json_response(&json!({
            "experience_level": ""
        }));
        let handler = CompleteOnboardingHandler::new(
            Arc::new(ai),
            Arc::new(InMemoryProfileStore::new()),
        );

        let profile = handler.handle(command()).await.unwrap();

        assert!(profile.onboarding_complete);
        assert_eq!(profile.experience_level, "beginner");
        assert_eq!(profile.preferred_style, "visual");
    }
}
