//! Adapters - Implementations of ports for concrete technologies.

pub mod ai;
pub mod memory;
