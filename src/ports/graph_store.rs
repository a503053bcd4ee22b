//! GraphStore port for the external concept knowledge graph.
//!
//! The concept taxonomy (nodes, prerequisite edges) is read-only external
//! fact data. The only write path is the per-student skill/gap overlay
//! mirrored from profile merges.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// A named DSA concept node with prerequisite edges to other concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptNode {
    pub id: String,
    pub name: String,
    /// Curriculum tier, lower tiers come first.
    pub tier: u32,
    /// 1 (easiest) to 5 (hardest).
    pub difficulty: u8,
    pub description: String,
    /// IDs of concepts that must be learned before this one.
    pub prerequisite_ids: Vec<String>,
}

/// Per-student graph overlay: skill scores and gap markers by concept name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentOverlay {
    /// Concept name to latest skill score.
    pub skills: Vec<(String, f64)>,
    /// Concept names currently flagged as gaps.
    pub gaps: Vec<String>,
}

/// Skill/gap snapshot pushed to the graph after a profile merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayUpdate {
    pub skills: Vec<(String, f64)>,
    pub gaps: Vec<String>,
}

impl OverlayUpdate {
    /// Returns true if there is nothing to sync.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.gaps.is_empty()
    }
}

/// Graph store errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Named concept does not exist in the taxonomy.
    #[error("concept not found: {0}")]
    ConceptNotFound(String),

    /// Query execution failed.
    #[error("graph query failed: {0}")]
    Query(String),

    /// Graph backend is unreachable.
    #[error("graph unavailable: {0}")]
    Unavailable(String),
}

/// Store for the concept knowledge graph and per-student overlays.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Mirror a student's skill scores and gaps onto the graph.
    ///
    /// Callers treat this as best-effort: failures are logged and swallowed,
    /// never propagated into the enclosing profile merge.
    async fn sync_student(&self, user_id: &UserId, update: &OverlayUpdate)
        -> Result<(), GraphError>;

    /// List every concept in the taxonomy.
    async fn concepts(&self) -> Result<Vec<ConceptNode>, GraphError>;

    /// Fetch a student's current skill/gap overlay.
    async fn student_overlay(&self, user_id: &UserId) -> Result<StudentOverlay, GraphError>;

    /// Concepts whose direct prerequisites are all mastered by the student,
    /// excluding concepts already mastered or flagged as gaps, ordered by
    /// (tier ascending, difficulty ascending), limited to `limit`.
    async fn next_concepts(
        &self,
        user_id: &UserId,
        mastery_threshold: f64,
        limit: usize,
    ) -> Result<Vec<ConceptNode>, GraphError>;

    /// Look up a concept by exact name.
    async fn concept_by_name(&self, name: &str) -> Result<Option<ConceptNode>, GraphError>;

    /// Shortest prerequisite path between two named concepts, inclusive.
    async fn path_between(&self, from: &str, to: &str) -> Result<Vec<ConceptNode>, GraphError>;
}
