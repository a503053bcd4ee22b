//! Practice-problem reference data, read-only to this core.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProblemId;

/// Worked example attached to a problem statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemExample {
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A practice problem, externally owned and seeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub description: String,
    /// 1 (easiest) to 5 (hardest)
    pub difficulty: u8,
    /// Concept taxonomy nodes this problem exercises.
    pub concept_ids: Vec<String>,
    pub constraints: Vec<String>,
    pub examples: Vec<ProblemExample>,
}

impl Problem {
    /// Creates a problem with no constraints or examples.
    pub fn new(
        id: ProblemId,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: u8,
        concept_ids: Vec<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            difficulty,
            concept_ids,
            constraints: Vec::new(),
            examples: Vec::new(),
        }
    }
}
