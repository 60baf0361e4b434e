use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::User;

/// Failures a repository implementation can report
///
/// Absence is not a failure: lookups signal it with `Ok(None)`. `NotFound`
/// is reserved for mutations aimed at a row that does not exist.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Email '{0}' is already in use")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence port for the User entity
///
/// The email column carries a uniqueness constraint in every implementation;
/// a violated constraint surfaces as [`RepositoryError::DuplicateEmail`].
/// That constraint, not any caller-side pre-check, is the authoritative
/// uniqueness guarantee.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persists a new user, returning the stored row
    async fn create(&self, user: &User) -> RepositoryResult<User>;

    /// Finds a user by ID
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Finds a user by email address
    async fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Returns a page of users ordered by creation time
    async fn get_all(&self, skip: u64, limit: u64) -> RepositoryResult<Vec<User>>;

    /// Returns the total number of stored users
    async fn count(&self) -> RepositoryResult<u64>;

    /// Overwrites an existing user's row, returning the stored result
    async fn update(&self, user: &User) -> RepositoryResult<User>;

    /// Removes a user, returning whether a row existed and was deleted
    async fn delete(&self, id: Uuid) -> RepositoryResult<bool>;
}
