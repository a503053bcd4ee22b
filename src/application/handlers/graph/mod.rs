//! Knowledge-graph handlers.

mod learning_path;
mod recommend_next;

pub use learning_path::{LearningPathHandler, LearningPathQuery};
pub use recommend_next::RecommendNextHandler;
