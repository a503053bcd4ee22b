//! Problem catalogue handlers.

mod list_problems;

pub use list_problems::ListProblemsHandler;
