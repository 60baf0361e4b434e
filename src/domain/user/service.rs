use std::sync::Arc;

use super::category::UserCategory;
use super::user::User;
use crate::domain::notifications::WelcomeNotifier;

/// Minimum name length after trimming surrounding whitespace
const NAME_MIN_LEN: usize = 2;
/// Maximum raw name length
const NAME_MAX_LEN: usize = 100;
/// Inclusive age range
const AGE_MIN: i32 = 0;
const AGE_MAX: i32 = 150;

/// Cross-entity business rules for users
///
/// Owns every rule that does not belong to a single entity: creation and
/// update validation, age-band categorization, the action permission table,
/// and welcome-email orchestration.
///
/// Validation accumulates ALL violated rules rather than stopping at the
/// first, so that one call surfaces every problem at once.
pub struct UserDomainService {
    notifier: Arc<dyn WelcomeNotifier>,
}

impl UserDomainService {
    pub fn new(notifier: Arc<dyn WelcomeNotifier>) -> Self {
        Self { notifier }
    }

    /// Validates a user for creation, returning every violated rule
    pub fn validate_user_creation(&self, user: &User) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if user.name.trim().len() < NAME_MIN_LEN {
            errors.push(format!(
                "Name must be at least {} characters long",
                NAME_MIN_LEN
            ));
        }
        if user.name.len() > NAME_MAX_LEN {
            errors.push(format!("Name must be at most {} characters long", NAME_MAX_LEN));
        }
        if !user.has_valid_email() {
            errors.push("Email address is not valid".to_string());
        }
        if user.age < AGE_MIN || user.age > AGE_MAX {
            errors.push(format!("Age must be between {} and {}", AGE_MIN, AGE_MAX));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates an updated user against the stored record
    ///
    /// Runs creation validation, then enforces identifier immutability: an
    /// update whose entity carries a different id than the record it claims
    /// to replace is rejected outright.
    pub fn validate_user_update(&self, user: &User, current: &User) -> Result<(), Vec<String>> {
        let mut errors = match self.validate_user_creation(user) {
            Ok(()) => Vec::new(),
            Err(errors) => errors,
        };

        if user.id != current.id {
            errors.push("User id cannot be changed".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Fires the welcome notification for a newly created user
    ///
    /// Fire-and-forget, at-most-once: the outcome never aborts or rolls back
    /// the creation that triggered it.
    pub async fn welcome_new_user(&self, user: &User) -> bool {
        let sent = self.notifier.send_welcome_email(user).await;
        if !sent {
            tracing::warn!(user_id = %user.id, "Welcome email could not be sent");
        }
        sent
    }

    /// Returns the age band the user falls into
    pub fn category_for(&self, user: &User) -> UserCategory {
        UserCategory::from_age(user.age)
    }

    /// Checks whether the user may perform a named action
    ///
    /// Unknown actions are denied.
    pub fn can_perform(&self, user: &User, action: &str) -> bool {
        match action {
            "create_content" | "purchase" => user.is_adult(),
            "view_content" => user.age >= 13,
            "basic_actions" => true,
            _ => false,
        }
    }
}
