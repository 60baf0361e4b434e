use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::{User, UserCategory};

/// Request body for creating a user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Request body for a partial user update
///
/// `None` means "field not supplied" and leaves the stored value untouched;
/// `Some` values, including empty strings, go through validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

impl UpdateUserRequest {
    /// Returns whether at least one field was supplied
    pub fn has_updates(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.age.is_some()
    }
}

/// Read-only projection of a user plus derived fields
///
/// Never persisted; rebuilt from the entity on every read so the derived
/// `is_adult` and `category` values cannot drift from the stored age.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub is_adult: bool,
    pub category: UserCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            is_adult: user.is_adult(),
            category: UserCategory::from_age(user.age),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// One page of users with pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub users: Vec<UserResponse>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl UserPage {
    pub fn new(users: Vec<UserResponse>, total: u64, skip: u64, limit: u64) -> Self {
        Self {
            users,
            total,
            skip,
            limit,
            // Saturate: an out-of-range skip means there is no next page,
            // never an overflow
            has_next: skip.saturating_add(limit) < total,
            has_previous: skip > 0,
        }
    }
}

/// Outcome of a permission check
///
/// A denied action is a valid answer, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDecision {
    pub user_id: Uuid,
    pub action: String,
    pub allowed: bool,
}
