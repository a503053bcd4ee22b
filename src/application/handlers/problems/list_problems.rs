//! ListProblemsHandler - Catalogue listing with optional filters.

use std::sync::Arc;

use crate::domain::foundation::CoreError;
use crate::domain::problem::Problem;
use crate::ports::{ProblemFilter, ProblemStore};

/// Handler for problem catalogue queries.
pub struct ListProblemsHandler {
    problems: Arc<dyn ProblemStore>,
}

impl ListProblemsHandler {
    pub fn new(problems: Arc<dyn ProblemStore>) -> Self {
        Self { problems }
    }

    pub async fn handle(&self, filter: ProblemFilter) -> Result<Vec<Problem>, CoreError> {
        self.problems.list(&filter).await
    }
}
