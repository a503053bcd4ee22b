//! Typed profile merge: a closed set of recognized fields, each with its own
//! combine function.
//!
//! Incoming agent results never touch the profile directly; they are expressed
//! as a [`ProfileUpdate`] and folded in by [`Profile::apply`]. Fields outside
//! this set are unrepresentable, so profile schema drift cannot happen through
//! the merge path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Profile, DEFAULT_THINKING_STYLE};
use crate::domain::foundation::Timestamp;

/// Maximum retained mistake-pattern labels.
pub const MISTAKE_PATTERN_CAP: usize = 20;
/// Maximum retained hints. Single authoritative cap for every hint write path.
pub const RECENT_HINT_CAP: usize = 20;
/// Maximum retained recent-weakness labels.
pub const RECENT_WEAKNESS_CAP: usize = 10;

/// A field-wise update to a [`Profile`].
///
/// Every field is optional; an empty update is a no-op apart from the
/// `updated_at` refresh. Combine semantics per field:
///
/// | field | policy |
/// |---|---|
/// | `skills` | per-key upsert, values rounded to 2 decimals |
/// | `gaps`, `strengths` | wholesale replace |
/// | `mistake_patterns` | append, dedupe keeping first seen, keep last 20 |
/// | `push_hint` | append one, keep last 20 |
/// | `new_weaknesses` | prepend, dedupe against old, keep first 10 |
/// | `known_concepts` | set union (never shrinks) |
/// | scalar fields | wholesale replace |
/// | `increment_submissions` | add one to the counter |
/// | `reset_session` | clear session logs and counters before other fields fold in |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub skills: BTreeMap<String, f64>,
    pub gaps: Option<Vec<String>>,
    pub strengths: Option<Vec<String>>,
    pub mistake_patterns: Vec<String>,
    pub push_hint: Option<String>,
    pub new_weaknesses: Vec<String>,
    pub known_concepts: Vec<String>,

    pub experience_level: Option<String>,
    pub preferred_style: Option<String>,
    pub goal: Option<String>,
    pub background: Option<String>,
    pub thinking_style: Option<String>,

    pub onboarding_complete: Option<bool>,
    pub onboarding_answers: Option<BTreeMap<String, String>>,

    pub increment_submissions: bool,
    pub last_summarized_at: Option<u32>,
    pub insights: Option<serde_json::Value>,

    /// Wipes mistake patterns, hint log, recent weaknesses, thinking style,
    /// and the submission counters before any other field applies. Used when
    /// onboarding re-seeds an existing profile.
    pub reset_session: bool,
}

impl ProfileUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a single skill score (rounded at apply time).
    pub fn with_skill(mut self, concept: impl Into<String>, score: f64) -> Self {
        self.skills.insert(concept.into(), score);
        self
    }

    /// Upserts a batch of skill scores.
    pub fn with_skills(mut self, skills: BTreeMap<String, f64>) -> Self {
        self.skills.extend(skills);
        self
    }

    /// Replaces the gap list wholesale.
    pub fn replace_gaps(mut self, gaps: Vec<String>) -> Self {
        self.gaps = Some(gaps);
        self
    }

    /// Replaces the strength list wholesale.
    pub fn replace_strengths(mut self, strengths: Vec<String>) -> Self {
        self.strengths = Some(strengths);
        self
    }

    /// Appends mistake-pattern labels (deduped at apply time).
    pub fn with_mistake_patterns(mut self, patterns: Vec<String>) -> Self {
        self.mistake_patterns.extend(patterns);
        self
    }

    /// Appends one hint to the hint log.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.push_hint = Some(hint.into());
        self
    }

    /// Records freshly observed concept gaps (prepended at apply time).
    pub fn with_new_weaknesses(mut self, gaps: Vec<String>) -> Self {
        self.new_weaknesses.extend(gaps);
        self
    }

    /// Unions concept names into the known set.
    pub fn with_known_concepts(mut self, concepts: Vec<String>) -> Self {
        self.known_concepts.extend(concepts);
        self
    }

    /// Sets the inferred thinking style.
    pub fn with_thinking_style(mut self, style: impl Into<String>) -> Self {
        self.thinking_style = Some(style.into());
        self
    }

    /// Marks the submission counter for a single increment.
    pub fn incrementing_submissions(mut self) -> Self {
        self.increment_submissions = true;
        self
    }

    /// Overwrites the stored insights wholesale.
    pub fn with_insights(mut self, insights: serde_json::Value) -> Self {
        self.insights = Some(insights);
        self
    }

    /// Records the submission count at which summarization last ran.
    pub fn with_last_summarized_at(mut self, count: u32) -> Self {
        self.last_summarized_at = Some(count);
        self
    }

    /// Clears the per-session fields before the rest of the update applies.
    pub fn resetting_session(mut self) -> Self {
        self.reset_session = true;
        self
    }

    /// True if this update touches skills or gaps, i.e. the knowledge-graph
    /// edge set needs a best-effort sync after the merge.
    pub fn touches_graph(&self) -> bool {
        !self.skills.is_empty() || self.gaps.is_some()
    }
}

/// Rounds a skill score to 2 decimal places.
fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Appends `incoming` to `current`, removing duplicates while preserving
/// first-seen order, then keeps the last `cap` entries.
fn append_dedupe_cap(current: &[String], incoming: &[String], cap: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(current.len() + incoming.len());
    for item in current.iter().chain(incoming.iter()) {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    if merged.len() > cap {
        merged.drain(..merged.len() - cap);
    }
    merged
}

/// Prepends `incoming` to `current`, dropping old entries that reappear in the
/// new batch, then keeps the first `cap` entries (most recent first).
fn prepend_dedupe_cap(current: &[String], incoming: &[String], cap: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(current.len() + incoming.len());
    for item in incoming {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    for item in current {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged.truncate(cap);
    merged
}

impl Profile {
    /// Folds an update into this profile, field by field, then refreshes
    /// `updated_at`.
    pub fn apply(&mut self, update: ProfileUpdate, now: Timestamp) {
        if update.reset_session {
            self.mistake_patterns.clear();
            self.recent_hints.clear();
            self.recent_weaknesses.clear();
            self.thinking_style = DEFAULT_THINKING_STYLE.to_string();
            self.submissions_count = 0;
            self.last_summarized_at = 0;
        }

        for (concept, score) in update.skills {
            self.skills.insert(concept, round_score(score));
        }

        if let Some(gaps) = update.gaps {
            self.gaps = gaps;
        }
        if let Some(strengths) = update.strengths {
            self.strengths = strengths;
        }

        if !update.mistake_patterns.is_empty() {
            self.mistake_patterns = append_dedupe_cap(
                &self.mistake_patterns,
                &update.mistake_patterns,
                MISTAKE_PATTERN_CAP,
            );
        }

        if let Some(hint) = update.push_hint {
            self.recent_hints.push(hint);
            if self.recent_hints.len() > RECENT_HINT_CAP {
                let excess = self.recent_hints.len() - RECENT_HINT_CAP;
                self.recent_hints.drain(..excess);
            }
        }

        if !update.new_weaknesses.is_empty() {
            self.recent_weaknesses = prepend_dedupe_cap(
                &self.recent_weaknesses,
                &update.new_weaknesses,
                RECENT_WEAKNESS_CAP,
            );
        }

        self.known_concepts.extend(update.known_concepts);

        if let Some(level) = update.experience_level {
            self.experience_level = level;
        }
        if let Some(style) = update.preferred_style {
            self.preferred_style = style;
        }
        if let Some(goal) = update.goal {
            self.goal = goal;
        }
        if let Some(background) = update.background {
            self.background = background;
        }
        if let Some(style) = update.thinking_style {
            self.thinking_style = style;
        }

        if let Some(complete) = update.onboarding_complete {
            self.onboarding_complete = complete;
        }
        if let Some(answers) = update.onboarding_answers {
            self.onboarding_answers = answers;
        }

        if update.increment_submissions {
            self.submissions_count += 1;
        }
        if let Some(count) = update.last_summarized_at {
            self.last_summarized_at = count;
        }
        if let Some(insights) = update.insights {
            self.insights = Some(insights);
        }

        self.updated_at = now;
    }
}
