//! ProblemStore port for the practice problem catalogue.

use async_trait::async_trait;

use crate::domain::foundation::{CoreError, ProblemId};
use crate::domain::problem::Problem;

/// Optional filters for listing problems.
#[derive(Debug, Clone, Default)]
pub struct ProblemFilter {
    /// Only problems with this exact difficulty.
    pub difficulty: Option<u8>,
    /// Only problems tagged with this concept.
    pub concept: Option<String>,
}

impl ProblemFilter {
    /// Returns true if the problem passes every set filter.
    pub fn matches(&self, problem: &Problem) -> bool {
        if let Some(difficulty) = self.difficulty {
            if problem.difficulty != difficulty {
                return false;
            }
        }
        if let Some(concept) = &self.concept {
            if !problem.concept_ids.iter().any(|c| c == concept) {
                return false;
            }
        }
        true
    }
}

/// Read-only store for practice problems.
#[async_trait]
pub trait ProblemStore: Send + Sync {
    /// Fetch a problem by ID.
    async fn get(&self, problem_id: &ProblemId) -> Result<Option<Problem>, CoreError>;

    /// List problems matching the filter.
    async fn list(&self, filter: &ProblemFilter) -> Result<Vec<Problem>, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Problem {
        Problem::new(
            ProblemId::new("two-sum").unwrap(),
            "Two Sum",
            "Find two numbers that add to target.",
            2,
            vec!["arrays".to_string(), "hash-maps".to_string()],
        )
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(ProblemFilter::default().matches(&sample()));
    }

    #[test]
    fn difficulty_filter_is_exact() {
        let filter = ProblemFilter {
            difficulty: Some(2),
            ..Default::default()
        };
        assert!(filter.matches(&sample()));

        let filter = ProblemFilter {
            difficulty: Some(3),
            ..Default::default()
        };
        assert!(!filter.matches(&sample()));
    }

    #[test]
    fn concept_filter_checks_tags() {
        let filter = ProblemFilter {
            concept: Some("hash-maps".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&sample()));

        let filter = ProblemFilter {
            concept: Some("graphs".to_string()),
            ..Default::default()
        };
        assert!(!filter.matches(&sample()));
    }
}
