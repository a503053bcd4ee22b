//! LearningPathHandler - Prerequisite path between two named concepts.

use std::sync::Arc;

use crate::domain::foundation::CoreError;
use crate::ports::{ConceptNode, GraphError, GraphStore};

/// Query for a learning path between two concepts.
#[derive(Debug, Clone)]
pub struct LearningPathQuery {
    pub from: String,
    pub to: String,
}

/// Handler for learning-path queries.
pub struct LearningPathHandler {
    graph: Arc<dyn GraphStore>,
}

impl LearningPathHandler {
    pub fn new(graph: Arc<dyn GraphStore>) -> Self {
        Self { graph }
    }

    /// Returns the path inclusive of both endpoints, or an empty list when
    /// the concepts are not connected.
    pub async fn handle(&self, query: LearningPathQuery) -> Result<Vec<ConceptNode>, CoreError> {
        self.graph
            .path_between(&query.from, &query.to)
            .await
            .map_err(|e| match e {
                GraphError::ConceptNotFound(name) => {
                    CoreError::Validation(crate::domain::foundation::ValidationError::invalid_value(
                        "concept",
                        format!("unknown concept: {name}"),
                    ))
                }
                other => CoreError::store(other.to_string()),
            })
    }
}
