//! Background insight handlers.

mod run_summarizer;

pub use run_summarizer::RunSummarizerHandler;
