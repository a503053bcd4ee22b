//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each handler takes already-validated inputs and returns either a
//! normalized structured result or an explicit failure, never a raw
//! provider response.

pub mod handlers;

pub use handlers::{
    AskTutorCommand, AskTutorHandler, CompleteOnboardingCommand, CompleteOnboardingHandler,
    HintResult, LearningPathHandler, LearningPathQuery, ListProblemsHandler, RecommendNextHandler,
    RequestHintCommand, RequestHintHandler, ReviewHistoryHandler, ReviewHistoryQuery,
    RunSummarizerHandler, SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult, TutorReply,
};
