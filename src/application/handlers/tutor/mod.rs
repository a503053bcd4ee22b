//! Tutor and hint handlers.

mod ask_tutor;
mod request_hint;

pub use ask_tutor::{AskTutorCommand, AskTutorHandler, TutorReply};
pub use request_hint::{HintResult, RequestHintCommand, RequestHintHandler};
