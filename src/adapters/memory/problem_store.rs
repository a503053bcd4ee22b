//! In-memory problem store implementation.
//!
//! The problem catalogue is reference data; this adapter is seeded once at
//! construction and serves reads only.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::{CoreError, ProblemId};
use crate::domain::problem::Problem;
use crate::ports::{ProblemFilter, ProblemStore};

/// In-memory implementation of the ProblemStore port.
#[derive(Default)]
pub struct InMemoryProblemStore {
    problems: HashMap<ProblemId, Problem>,
    /// Stable listing order, independent of map iteration.
    order: Vec<ProblemId>,
}

impl InMemoryProblemStore {
    /// Creates a store seeded with the given problems.
    pub fn new(problems: Vec<Problem>) -> Self {
        let order = problems.iter().map(|p| p.id.clone()).collect();
        let problems = problems.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { problems, order }
    }

    /// Returns the number of seeded problems.
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Returns true if the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[async_trait]
impl ProblemStore for InMemoryProblemStore {
    async fn get(&self, problem_id: &ProblemId) -> Result<Option<Problem>, CoreError> {
        Ok(self.problems.get(problem_id).cloned())
    }

    async fn list(&self, filter: &ProblemFilter) -> Result<Vec<Problem>, CoreError> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.problems.get(id))
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }
}
