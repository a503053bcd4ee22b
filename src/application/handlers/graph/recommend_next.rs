//! RecommendNextHandler - Next-concept recommendation.
//!
//! Queries the knowledge graph for concepts whose prerequisites are all
//! mastered. When the graph yields nothing, degrades to looking up the
//! student's first recorded profile gap by name; the degrade is best-effort
//! and may still return an empty list.

use std::sync::Arc;

use crate::domain::foundation::{CoreError, UserId};
use crate::ports::{ConceptNode, GraphStore, ProfileStore};

/// A skill score at or above this counts as mastered.
const MASTERY_THRESHOLD: f64 = 0.7;

/// At most this many recommendations per query.
const RECOMMENDATION_LIMIT: usize = 3;

/// Handler for next-concept recommendations.
pub struct RecommendNextHandler {
    graph: Arc<dyn GraphStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl RecommendNextHandler {
    pub fn new(graph: Arc<dyn GraphStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { graph, profiles }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<ConceptNode>, CoreError> {
        let recommended = self
            .graph
            .next_concepts(user_id, MASTERY_THRESHOLD, RECOMMENDATION_LIMIT)
            .await
            .map_err(|e| CoreError::store(e.to_string()))?;
        if !recommended.is_empty() {
            return Ok(recommended);
        }

        // Fallback: resolve the first recorded profile gap by name.
        let Some(profile) = self.profiles.get(user_id).await? else {
            return Ok(Vec::new());
        };
        let Some(first_gap) = profile.gaps.first() else {
            return Ok(Vec::new());
        };

        let concept = self
            .graph
            .concept_by_name(first_gap)
            .await
            .map_err(|e| CoreError::store(e.to_string()))?;
        Ok(concept.into_iter().collect())
    }
}
