//! Error types for the domain layer.

use thiserror::Error;

use super::{ProblemId, UserId};

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid value: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid value validation error.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Caller-facing error taxonomy for the core's exported operations.
///
/// Best-effort side effects (graph sync, background summarization) deliberately
/// have no variant here: their failures are logged and swallowed at the site
/// where they occur and never reach a caller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No profile exists for the given user. Precondition failure, no retry.
    #[error("profile not found for user '{0}'")]
    ProfileNotFound(UserId),

    /// No problem exists with the given id. Precondition failure, no retry.
    #[error("problem not found: '{0}'")]
    ProblemNotFound(ProblemId),

    /// A profile already exists for the user (initial creation only).
    #[error("profile already exists for user '{0}'")]
    DuplicateProfile(UserId),

    /// The generation call failed on the primary provider and on the fallback.
    #[error("generation failed: {0}")]
    Provider(String),

    /// Underlying store failure.
    #[error("store error: {0}")]
    Store(String),

    /// Input failed value-object validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a store error.
    pub fn store(message: impl Into<String>) -> Self {
        CoreError::Store(message.into())
    }
}
