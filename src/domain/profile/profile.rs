//! The Dynamic Profile: per-student mutable learning state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{Timestamp, UserId};

/// Default classification values for a freshly created profile.
pub const DEFAULT_EXPERIENCE_LEVEL: &str = "beginner";
pub const DEFAULT_PREFERRED_STYLE: &str = "visual";
pub const DEFAULT_THINKING_STYLE: &str = "unknown";

/// Per-student learning-state record.
///
/// One document per user, owned by the profile store and mutated only through
/// its merge operation. Every agent call reads a snapshot of this record to
/// build its personalization context, and most agent results fold back into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,

    // One-time initialization outputs
    pub onboarding_complete: bool,
    pub onboarding_answers: BTreeMap<String, String>,

    // Classification strings (free-form, defaulted)
    /// "beginner" | "intermediate" | "advanced"
    pub experience_level: String,
    /// "visual" | "verbal" | "example-based" | "conceptual"
    pub preferred_style: String,
    pub goal: String,
    pub background: String,
    /// Inferred by the review agent, e.g. "brute_force" | "pattern_matching"
    pub thinking_style: String,

    // Learning state
    /// Concept name -> score in [0.0, 1.0], each stored rounded to 2 decimals.
    pub skills: BTreeMap<String, f64>,
    /// Concept names with identified gaps; wholesale-replaced on update.
    pub gaps: Vec<String>,
    /// Concept names that are strong; wholesale-replaced on update.
    pub strengths: Vec<String>,
    /// Short recurring-mistake labels, append-deduped, last 20 kept.
    pub mistake_patterns: Vec<String>,
    /// Hints already given, append-only, last 20 kept. Doubles as dialogue
    /// memory and as the non-repetition constraint set for new hints.
    pub recent_hints: Vec<String>,
    /// Concept-gap labels, most recent first, deduped, capped at 10.
    pub recent_weaknesses: Vec<String>,
    /// Concepts the student has demonstrated; grows monotonically.
    pub known_concepts: BTreeSet<String>,

    // Counters and summarization state
    pub submissions_count: u32,
    /// `submissions_count` at the last successful background pass (audit trail;
    /// triggering itself is modulo-based).
    pub last_summarized_at: u32,
    /// Last structured summarization result, overwritten wholesale.
    pub insights: Option<serde_json::Value>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    /// Returns a blank profile with all documented defaults.
    pub fn empty(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            onboarding_complete: false,
            onboarding_answers: BTreeMap::new(),
            experience_level: DEFAULT_EXPERIENCE_LEVEL.to_string(),
            preferred_style: DEFAULT_PREFERRED_STYLE.to_string(),
            goal: String::new(),
            background: String::new(),
            thinking_style: DEFAULT_THINKING_STYLE.to_string(),
            skills: BTreeMap::new(),
            gaps: Vec::new(),
            strengths: Vec::new(),
            mistake_patterns: Vec::new(),
            recent_hints: Vec::new(),
            recent_weaknesses: Vec::new(),
            known_concepts: BTreeSet::new(),
            submissions_count: 0,
            last_summarized_at: 0,
            insights: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Learning velocity bucket derived from the submission counter.
    pub fn learning_velocity(&self) -> LearningVelocity {
        LearningVelocity::from_submissions(self.submissions_count)
    }

    /// Session depth bucket derived from the number of hints given.
    pub fn session_depth(&self) -> SessionDepth {
        SessionDepth::from_hints(self.recent_hints.len())
    }

    /// Top `n` skills by score descending, ties broken by concept name.
    pub fn top_skills(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> =
            self.skills.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        // BTreeMap iteration already orders names, so sort_by on score alone
        // is a stable descending rank with name tiebreak.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(n);
        ranked
    }
}

/// How quickly the student is progressing, bucketed on submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningVelocity {
    /// Fewer than 5 submissions
    Slow,
    /// 5-19 submissions
    Normal,
    /// 20 or more submissions
    Fast,
}

impl LearningVelocity {
    /// Calculates velocity from the submission counter.
    pub fn from_submissions(count: u32) -> Self {
        match count {
            0..=4 => Self::Slow,
            5..=19 => Self::Normal,
            _ => Self::Fast,
        }
    }
}

impl std::fmt::Display for LearningVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slow => write!(f, "slow (early stage)"),
            Self::Normal => write!(f, "normal"),
            Self::Fast => write!(f, "fast (experienced user)"),
        }
    }
}

/// How deep the current tutoring session is, bucketed on hints given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionDepth {
    /// Fewer than 2 hints given
    Early,
    /// 2-4 hints given
    Mid,
    /// 5 or more hints given
    Deep,
}

impl SessionDepth {
    /// Calculates session depth from the hint count.
    pub fn from_hints(count: usize) -> Self {
        match count {
            0..=1 => Self::Early,
            2..=4 => Self::Mid,
            _ => Self::Deep,
        }
    }
}

impl std::fmt::Display for SessionDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Early => write!(f, "early"),
            Self::Mid => write!(f, "mid"),
            Self::Deep => write!(f, "deep"),
        }
    }
}
