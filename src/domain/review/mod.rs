//! Code-review records and tolerant normalization of structured model output.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::foundation::{ProblemId, ReviewId, Timestamp, UserId};

/// Thinking style assumed when the model omits one.
pub const DEFAULT_THINKING_STYLE: &str = "brute_force";

/// Profile deltas proposed by the review agent.
///
/// Guaranteed fully keyed after normalization: every collection is present
/// (possibly empty) regardless of what the model actually returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewProfileDeltas {
    pub skills: BTreeMap<String, f64>,
    pub gaps: Vec<String>,
    pub strengths: Vec<String>,
    pub mistake_patterns: Vec<String>,
}

/// Structured result of one review pass.
///
/// Built from raw model output via [`ReviewAnalysis::from_value`], which fills
/// defaults for missing or mistyped keys instead of failing. A total call
/// failure is still surfaced by the caller; defaulting only papers over a
/// *partially* conforming response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub thinking_style: String,
    pub concept_gaps: Vec<String>,
    pub known_concepts: Vec<String>,
    pub topics_to_revise: Vec<String>,
    pub detailed_feedback: String,
    pub profile_updates: ReviewProfileDeltas,
}

impl Default for ReviewAnalysis {
    fn default() -> Self {
        Self {
            score: 0,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            thinking_style: DEFAULT_THINKING_STYLE.to_string(),
            concept_gaps: Vec::new(),
            known_concepts: Vec::new(),
            topics_to_revise: Vec::new(),
            detailed_feedback: String::new(),
            profile_updates: ReviewProfileDeltas::default(),
        }
    }
}

impl ReviewAnalysis {
    /// Normalizes a raw structured response into a fully keyed analysis.
    ///
    /// Missing or wrongly typed keys fall back to their defaults; extra keys
    /// are ignored.
    pub fn from_value(raw: &Value) -> Self {
        let mut analysis = Self::default();
        let Some(obj) = raw.as_object() else {
            return analysis;
        };

        if let Some(score) = obj.get("score").and_then(Value::as_u64) {
            analysis.score = score.min(u32::MAX as u64) as u32;
        }
        analysis.strengths = string_list(obj.get("strengths"));
        analysis.weaknesses = string_list(obj.get("weaknesses"));
        if let Some(style) = obj.get("thinking_style").and_then(Value::as_str) {
            if !style.is_empty() {
                analysis.thinking_style = style.to_string();
            }
        }
        analysis.concept_gaps = string_list(obj.get("concept_gaps"));
        analysis.known_concepts = string_list(obj.get("known_concepts"));
        analysis.topics_to_revise = string_list(obj.get("topics_to_revise"));
        if let Some(feedback) = obj.get("detailed_feedback").and_then(Value::as_str) {
            analysis.detailed_feedback = feedback.to_string();
        }

        if let Some(updates) = obj.get("profile_updates").and_then(Value::as_object) {
            if let Some(skills) = updates.get("skills").and_then(Value::as_object) {
                for (concept, score) in skills {
                    if let Some(score) = score.as_f64() {
                        analysis.profile_updates.skills.insert(concept.clone(), score);
                    }
                }
            }
            analysis.profile_updates.gaps = string_list(updates.get("gaps"));
            analysis.profile_updates.strengths = string_list(updates.get("strengths"));
            analysis.profile_updates.mistake_patterns = string_list(updates.get("mistake_patterns"));
        }

        analysis
    }
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

/// One stored review: immutable once written, never merged.
///
/// Links the submission (user, problem, code, language) to the full structured
/// analysis. Created once by the submit path, read many times by history and
/// the background summarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub problem_id: ProblemId,
    /// Denormalized for summarization context; not a live reference.
    pub problem_title: String,
    pub code: String,
    pub language: String,
    pub created_at: Timestamp,
    pub analysis: ReviewAnalysis,
}

impl Review {
    /// Creates a new review record for a submission.
    pub fn new(
        user_id: UserId,
        problem_id: ProblemId,
        problem_title: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
        analysis: ReviewAnalysis,
        now: Timestamp,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            user_id,
            problem_id,
            problem_title: problem_title.into(),
            code: code.into(),
            language: language.into(),
            created_at: now,
            analysis,
        }
    }
}
