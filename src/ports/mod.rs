//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AiProvider` - LLM completion generation (plain and structured)
//! - `ProfileStore` - student profile persistence and merge
//! - `ReviewStore` - immutable code-review records
//! - `ProblemStore` - read-only problem catalogue
//! - `GraphStore` - concept taxonomy queries and student overlay sync

mod ai_provider;
mod graph_store;
mod problem_store;
mod profile_store;
mod review_store;

pub use ai_provider::{
    parse_structured, AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};
pub use graph_store::{ConceptNode, GraphError, GraphStore, OverlayUpdate, StudentOverlay};
pub use problem_store::{ProblemFilter, ProblemStore};
pub use profile_store::ProfileStore;
pub use review_store::ReviewStore;
