//! Domain layer: pure types and logic with no I/O.

pub mod context;
pub mod foundation;
pub mod problem;
pub mod profile;
pub mod review;
