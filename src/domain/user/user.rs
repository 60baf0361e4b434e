use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
///
/// The sole domain record of the service. Carries no validation of its own:
/// invalid names, emails, or ages are accepted at construction and rejected
/// only by [`UserDomainService`](super::UserDomainService), so that a single
/// validation pass can report every violation at once.
///
/// # Invariants
/// - `id` is assigned exactly once at construction and never reassigned
/// - `updated_at >= created_at` at all times
/// - every mutation refreshes `updated_at`
///
/// # Example
/// ```
/// use userdeck_api::domain::user::User;
///
/// let user = User::new("Ann Lee".to_string(), "ann@example.com".to_string(), 30);
/// assert!(user.is_adult());
/// assert_eq!(user.created_at, user.updated_at);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a generated id and both timestamps set to now
    pub fn new(name: String, email: String, age: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            age,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the user is 18 or older. Pure.
    pub fn is_adult(&self) -> bool {
        self.age >= 18
    }

    /// Best-effort email shape check: an `@` followed by a domain part
    /// containing a `.`. Not an RFC validator.
    pub fn has_valid_email(&self) -> bool {
        match self.email.split_once('@') {
            Some((_, domain)) => domain.contains('.'),
            None => false,
        }
    }

    /// Applies the supplied fields and refreshes `updated_at`.
    ///
    /// Absent fields (`None`) leave the current value untouched; a present
    /// but empty value is applied as-is and left for the domain validator to
    /// reject. Calling with no fields still refreshes `updated_at`.
    pub fn update_info(&mut self, name: Option<String>, email: Option<String>, age: Option<i32>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(age) = age {
            self.age = age;
        }
        self.updated_at = Utc::now();
    }

    /// Reconstructs a user from stored columns
    ///
    /// Bypasses id and timestamp generation; only repository implementations
    /// should call this.
    pub fn from_persistence(
        id: Uuid,
        name: String,
        email: String,
        age: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            age,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_id_and_matching_timestamps() {
        let user = User::new("Ann".to_string(), "ann@example.com".to_string(), 30);

        assert!(!user.id.is_nil());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn new_user_timestamps_are_recent() {
        let before = Utc::now();
        let user = User::new("Ann".to_string(), "ann@example.com".to_string(), 30);
        let after = Utc::now();

        assert!(before <= user.created_at && user.created_at <= after);
    }

    #[test]
    fn is_adult_matches_age_threshold() {
        for age in 0..=150 {
            let user = User::new("Ann".to_string(), "ann@example.com".to_string(), age);
            assert_eq!(user.is_adult(), age >= 18);
        }
    }

    #[test]
    fn valid_email_shape_accepted() {
        let user = User::new("Maria".to_string(), "maria@example.com".to_string(), 25);
        assert!(user.has_valid_email());
    }

    #[test]
    fn email_without_at_rejected() {
        let user = User::new("Joao".to_string(), "joaoexample.com".to_string(), 25);
        assert!(!user.has_valid_email());
    }

    #[test]
    fn email_without_dot_in_domain_rejected() {
        let user = User::new("Joao".to_string(), "joao@example".to_string(), 25);
        assert!(!user.has_valid_email());
    }

    #[test]
    fn dot_before_at_does_not_count() {
        let user = User::new("Joao".to_string(), "joao.silva@example".to_string(), 25);
        assert!(!user.has_valid_email());
    }

    #[test]
    fn update_info_applies_only_supplied_fields() {
        let mut user = User::new("Ann".to_string(), "ann@example.com".to_string(), 30);

        user.update_info(None, None, Some(15));

        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.age, 15);
    }

    #[test]
    fn update_info_with_no_fields_still_refreshes_updated_at() {
        let mut user = User::new("Ann".to_string(), "ann@example.com".to_string(), 30);
        let before = user.updated_at;

        // Utc::now() has nanosecond resolution; a spin is enough to advance it
        std::thread::sleep(std::time::Duration::from_millis(1));
        user.update_info(None, None, None);

        assert_eq!(user.name, "Ann");
        assert_eq!(user.age, 30);
        assert!(user.updated_at > before);
        assert!(user.updated_at >= user.created_at);
    }

    #[test]
    fn entity_accepts_invalid_values_without_error() {
        // Validation lives in the domain service, not here
        let user = User::new("".to_string(), "not-an-email".to_string(), -5);
        assert_eq!(user.age, -5);
        assert!(!user.has_valid_email());
    }
}
