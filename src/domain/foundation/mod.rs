//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{CoreError, ValidationError};
pub use ids::{ProblemId, ReviewId, UserId};
pub use timestamp::Timestamp;
