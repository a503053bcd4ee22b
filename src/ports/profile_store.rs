//! ProfileStore port for student profile persistence.

use async_trait::async_trait;

use crate::domain::foundation::{CoreError, UserId};
use crate::domain::profile::{Profile, ProfileUpdate};

/// Store for student profiles.
///
/// Implementations must serialize concurrent merges for the same user so
/// that no submitted update is lost.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile by user ID.
    async fn get(&self, user_id: &UserId) -> Result<Option<Profile>, CoreError>;

    /// Create an empty initial profile for a new user.
    ///
    /// Fails with [`CoreError::DuplicateProfile`] if one already exists.
    async fn create_initial(&self, user_id: &UserId) -> Result<Profile, CoreError>;

    /// Apply an update to a stored profile and return the merged result.
    ///
    /// If no profile exists yet, implementations create an empty one first
    /// and apply the update to it.
    async fn merge(&self, user_id: &UserId, update: ProfileUpdate) -> Result<Profile, CoreError>;
}
