//! Algo Mentor - Adaptive-Learning Backend Core
//!
//! This crate implements the profile-state and personalization-context engine
//! behind an AI tutoring product for data-structure/algorithm practice: a
//! per-student Dynamic Profile converging under typed field merges, and
//! deterministic context renderers feeding review, tutoring, hint, and
//! trend-summarization agents.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
