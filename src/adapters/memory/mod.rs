//! In-memory adapters for the storage ports.
//!
//! Suitable for development, testing, and single-process deployments.
//! Document-store and graph-database backed implementations slot in behind
//! the same ports.

mod graph_store;
mod problem_store;
mod profile_store;
mod review_store;

pub use graph_store::InMemoryGraphStore;
pub use problem_store::InMemoryProblemStore;
pub use profile_store::InMemoryProfileStore;
pub use review_store::InMemoryReviewStore;
