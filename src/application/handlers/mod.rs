//! Command and query handlers, grouped by concern.

pub mod graph;
pub mod insights;
pub mod problems;
pub mod profile;
pub mod review;
pub mod tutor;

pub use graph::{LearningPathHandler, LearningPathQuery, RecommendNextHandler};
pub use insights::RunSummarizerHandler;
pub use problems::ListProblemsHandler;
pub use profile::{CompleteOnboardingCommand, CompleteOnboardingHandler};
pub use review::{
    ReviewHistoryHandler, ReviewHistoryQuery, SubmitReviewCommand, SubmitReviewHandler,
    SubmitReviewResult,
};
pub use tutor::{
    AskTutorCommand, AskTutorHandler, HintResult, RequestHintCommand, RequestHintHandler,
    TutorReply,
};
