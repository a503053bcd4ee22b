//! AskTutorHandler - Socratic question answering against a problem.

use std::sync::Arc;

use crate::domain::context::{render_tutor_context, ChatTurn};
use crate::domain::foundation::{CoreError, ProblemId, UserId};
use crate::ports::{AiProvider, CompletionRequest, ProblemStore, ProfileStore};

const TUTOR_TEMPERATURE: f32 = 0.65;
const TUTOR_MAX_TOKENS: u32 = 500;

const TUTOR_SYSTEM_PROMPT: &str = "You are a Socratic algorithms tutor. Never \
give away the solution or write code for the student. Guide their reasoning \
with questions, analogies matched to their preferred learning style, and \
small verifiable steps. Always end your reply with exactly one question.";

/// Command for one tutor exchange.
#[derive(Debug, Clone)]
pub struct AskTutorCommand {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub question: String,
    /// Prior exchanges in chronological order.
    pub history: Vec<ChatTurn>,
}

/// The tutor's reply.
#[derive(Debug, Clone)]
pub struct TutorReply {
    pub answer: String,
}

/// Handler for tutor questions.
pub struct AskTutorHandler {
    ai: Arc<dyn AiProvider>,
    profiles: Arc<dyn ProfileStore>,
    problems: Arc<dyn ProblemStore>,
}

impl AskTutorHandler {
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

    pub async fn handle(&self, cmd: AskTutorCommand) -> Result<TutorReply, CoreError> {
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

        let context = render_tutor_context(&cmd.question, &problem, &profile, &cmd.history);
        let response = self
            .ai
            .complete(
                CompletionRequest::new(context)
                    .with_system(TUTOR_SYSTEM_PROMPT)
                    .with_temperature(TUTOR_TEMPERATURE)
                    .with_max_tokens(TUTOR_MAX_TOKENS),
            )
            .await?;

        Ok(TutorReply {
            answer: response.content,
        })
    }
}
