use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    CreateUserRequest, PermissionDecision, UpdateUserRequest, UserPage, UserResponse,
};
use crate::application::result::OperationResult;
use crate::domain::repositories::{RepositoryError, UserRepository};
use crate::domain::user::{User, UserDomainService};

/// Inclusive age range accepted at the request boundary
const AGE_MIN: i32 = 0;
const AGE_MAX: i32 = 150;

/// Application-level orchestration of the user CRUD operations
///
/// Each operation validates, talks to the repository port, and wraps its
/// outcome in an [`OperationResult`]. Expected failures (invalid input,
/// conflict, not-found) are envelope variants; only genuinely unexpected
/// repository faults are downgraded to a generic internal-error envelope,
/// with the detail logged rather than leaked to the caller.
pub struct UserUseCase {
    repository: Arc<dyn UserRepository>,
    service: UserDomainService,
}

impl UserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, service: UserDomainService) -> Self {
        Self {
            repository,
            service,
        }
    }

    /// Creates a user
    ///
    /// Flow: field validation → email uniqueness pre-check → entity
    /// construction (trimmed name, normalized email) → domain validation →
    /// persist → welcome notification (outcome ignored). The pre-check is an
    /// optimization only; the store's unique constraint is the real
    /// guarantee, and its violation maps to the same conflict envelope.
    pub async fn create_user(&self, request: CreateUserRequest) -> OperationResult<UserResponse> {
        if let Err(errors) = validate_create_request(&request) {
            return OperationResult::invalid_input("Invalid input", errors);
        }

        let email = normalize_email(&request.email);

        match self.repository.get_by_email(&email).await {
            Ok(Some(_)) => return OperationResult::conflict("Email is already in use"),
            Ok(None) => {}
            Err(e) => return internal("checking email uniqueness", e),
        }

        let user = User::new(request.name.trim().to_string(), email, request.age);

        if let Err(errors) = self.service.validate_user_creation(&user) {
            return OperationResult::invalid_input("User validation failed", errors);
        }

        let created = match self.repository.create(&user).await {
            Ok(created) => created,
            Err(RepositoryError::DuplicateEmail(_)) => {
                return OperationResult::conflict("Email is already in use");
            }
            Err(e) => return internal("creating user", e),
        };

        let response = UserResponse::from(&created);

        // Fire-and-forget: a failed welcome email never fails the create
        let _ = self.service.welcome_new_user(&created).await;

        OperationResult::created("User created successfully", response)
    }

    /// Fetches a user by id
    pub async fn get_user(&self, id: Uuid) -> OperationResult<UserResponse> {
        match self.repository.get_by_id(id).await {
            Ok(Some(user)) => {
                OperationResult::ok("User retrieved successfully", UserResponse::from(&user))
            }
            Ok(None) => OperationResult::not_found(format!("User {} not found", id)),
            Err(e) => internal("fetching user", e),
        }
    }

    /// Fetches a user by email address
    pub async fn get_user_by_email(&self, email: &str) -> OperationResult<UserResponse> {
        let email = normalize_email(email);

        match self.repository.get_by_email(&email).await {
            Ok(Some(user)) => {
                OperationResult::ok("User retrieved successfully", UserResponse::from(&user))
            }
            Ok(None) => OperationResult::not_found(format!("No user with email '{}'", email)),
            Err(e) => internal("fetching user by email", e),
        }
    }

    /// Lists one page of users with pagination metadata
    ///
    /// The total comes from a dedicated count query, never from fetching
    /// every row.
    pub async fn list_users(&self, skip: u64, limit: u64) -> OperationResult<UserPage> {
        let total = match self.repository.count().await {
            Ok(total) => total,
            Err(e) => return internal("counting users", e),
        };

        let users = match self.repository.get_all(skip, limit).await {
            Ok(users) => users,
            Err(e) => return internal("listing users", e),
        };

        let responses = users.iter().map(UserResponse::from).collect();
        let page = UserPage::new(responses, total, skip, limit);

        OperationResult::ok("Users retrieved successfully", page)
    }

    /// Applies a partial update to a user
    ///
    /// Rejects an empty update set, enforces email uniqueness against other
    /// users, and lets the domain service enforce id immutability.
    pub async fn update_user(
        &self,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> OperationResult<UserResponse> {
        if !request.has_updates() {
            return OperationResult::invalid_input(
                "No fields to update",
                vec!["At least one field must be supplied".to_string()],
            );
        }

        let current = match self.repository.get_by_id(id).await {
            Ok(Some(user)) => user,
            Ok(None) => return OperationResult::not_found(format!("User {} not found", id)),
            Err(e) => return internal("fetching user", e),
        };

        let new_email = request.email.as_deref().map(normalize_email);

        if let Some(ref email) = new_email {
            if *email != current.email {
                match self.repository.get_by_email(email).await {
                    Ok(Some(other)) if other.id != id => {
                        return OperationResult::conflict("Email is already in use");
                    }
                    Ok(_) => {}
                    Err(e) => return internal("checking email uniqueness", e),
                }
            }
        }

        let mut updated = current.clone();
        updated.update_info(
            request.name.map(|n| n.trim().to_string()),
            new_email,
            request.age,
        );

        if let Err(errors) = self.service.validate_user_update(&updated, &current) {
            return OperationResult::invalid_input("User validation failed", errors);
        }

        match self.repository.update(&updated).await {
            Ok(stored) => {
                OperationResult::ok("User updated successfully", UserResponse::from(&stored))
            }
            Err(RepositoryError::DuplicateEmail(_)) => {
                OperationResult::conflict("Email is already in use")
            }
            Err(RepositoryError::NotFound(_)) => {
                OperationResult::not_found(format!("User {} not found", id))
            }
            Err(e) => internal("updating user", e),
        }
    }

    /// Deletes a user
    ///
    /// Checks existence first so a missing row is reported as not-found
    /// rather than a silent no-op; the store is left untouched in that case.
    pub async fn delete_user(&self, id: Uuid) -> OperationResult<UserResponse> {
        match self.repository.get_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => return OperationResult::not_found(format!("User {} not found", id)),
            Err(e) => return internal("fetching user", e),
        }

        match self.repository.delete(id).await {
            Ok(true) => OperationResult::ok_message("User deleted successfully"),
            // The row vanished between check and delete
            Ok(false) => OperationResult::not_found(format!("User {} not found", id)),
            Err(e) => internal("deleting user", e),
        }
    }

    /// Checks whether a user may perform a named action
    ///
    /// A denial is a successful answer carrying `allowed: false`, not an
    /// error; only an unknown user id produces a not-found envelope.
    pub async fn check_permission(
        &self,
        id: Uuid,
        action: &str,
    ) -> OperationResult<PermissionDecision> {
        let user = match self.repository.get_by_id(id).await {
            Ok(Some(user)) => user,
            Ok(None) => return OperationResult::not_found(format!("User {} not found", id)),
            Err(e) => return internal("fetching user", e),
        };

        let allowed = self.service.can_perform(&user, action);
        let message = if allowed {
            format!("User may perform '{}'", action)
        } else {
            format!("User may not perform '{}'", action)
        };

        OperationResult::ok(
            message,
            PermissionDecision {
                user_id: id,
                action: action.to_string(),
                allowed,
            },
        )
    }
}

/// Field-level request validation, accumulating every violation
fn validate_create_request(request: &CreateUserRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if request.name.trim().is_empty() {
        errors.push("Name must not be empty".to_string());
    }
    if !has_email_shape(&request.email) {
        errors.push("Email address is not valid".to_string());
    }
    if request.age < AGE_MIN || request.age > AGE_MAX {
        errors.push(format!("Age must be between {} and {}", AGE_MIN, AGE_MAX));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn has_email_shape(email: &str) -> bool {
    match email.split_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Logs the failure with its context and returns the generic envelope;
/// raw detail never reaches the caller
fn internal<T>(context: &str, error: RepositoryError) -> OperationResult<T> {
    tracing::error!(context, error = %error, "Unexpected repository failure");
    OperationResult::internal("Internal server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::result::OutcomeKind;
    use crate::domain::notifications::{MockNotifier, WelcomeNotifier};
    use crate::domain::user::UserCategory;
    use crate::infrastructure::repositories::InMemoryUserRepository;

    fn usecase() -> UserUseCase {
        usecase_with_notifier(Arc::new(MockNotifier::succeeding()))
    }

    fn usecase_with_notifier(notifier: Arc<dyn WelcomeNotifier>) -> UserUseCase {
        UserUseCase::new(
            Arc::new(InMemoryUserRepository::new()),
            UserDomainService::new(notifier),
        )
    }

    fn ann() -> CreateUserRequest {
        CreateUserRequest {
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            age: 30,
        }
    }

    #[tokio::test]
    async fn create_happy_path() {
        let usecase = usecase();

        let result = usecase.create_user(ann()).await;

        assert!(result.success);
        assert_eq!(result.kind, OutcomeKind::Created);
        let user = result.data.unwrap();
        assert_eq!(user.name, "Ann Lee");
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.age, 30);
        assert!(user.is_adult);
        assert_eq!(user.category, UserCategory::Adult);
        assert!(!user.id.is_nil());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn create_normalizes_name_and_email() {
        let usecase = usecase();

        let result = usecase
            .create_user(CreateUserRequest {
                name: "  Ann Lee  ".to_string(),
                email: " Ann@Example.COM ".to_string(),
                age: 30,
            })
            .await;

        let user = result.data.unwrap();
        assert_eq!(user.name, "Ann Lee");
        assert_eq!(user.email, "ann@example.com");
    }

    #[tokio::test]
    async fn create_accumulates_every_field_error() {
        let usecase = usecase();

        let result = usecase
            .create_user(CreateUserRequest {
                name: "".to_string(),
                email: "not-an-email".to_string(),
                age: -5,
            })
            .await;

        assert!(!result.success);
        assert_eq!(result.kind, OutcomeKind::InvalidInput);
        assert_eq!(result.errors.len(), 3, "expected all three violations: {:?}", result.errors);
    }

    #[tokio::test]
    async fn create_duplicate_email_conflicts() {
        let usecase = usecase();
        usecase.create_user(ann()).await;

        let result = usecase
            .create_user(CreateUserRequest {
                name: "Other Ann".to_string(),
                ..ann()
            })
            .await;

        assert!(!result.success);
        assert_eq!(result.kind, OutcomeKind::Conflict);
        assert!(result.message.contains("already in use"));

        // No second row was created
        let page = usecase.list_users(0, 10).await.data.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn create_succeeds_even_when_welcome_email_fails() {
        let usecase = usecase_with_notifier(Arc::new(MockNotifier::failing()));

        let result = usecase.create_user(ann()).await;

        assert!(result.success);
    }

    #[tokio::test]
    async fn get_missing_user_is_not_found() {
        let usecase = usecase();

        let result = usecase.get_user(Uuid::new_v4()).await;

        assert!(!result.success);
        assert_eq!(result.kind, OutcomeKind::NotFound);
    }

    #[tokio::test]
    async fn get_by_email_normalizes_lookup() {
        let usecase = usecase();
        usecase.create_user(ann()).await;

        let result = usecase.get_user_by_email(" ANN@example.com ").await;

        assert!(result.success);
        assert_eq!(result.data.unwrap().name, "Ann Lee");
    }

    #[tokio::test]
    async fn partial_update_changes_only_supplied_fields() {
        let usecase = usecase();
        let created = usecase.create_user(ann()).await.data.unwrap();

        let result = usecase
            .update_user(
                created.id,
                UpdateUserRequest {
                    age: Some(15),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.success);
        let updated = result.data.unwrap();
        assert_eq!(updated.name, "Ann Lee");
        assert_eq!(updated.email, "ann@example.com");
        assert_eq!(updated.age, 15);
        assert_eq!(updated.category, UserCategory::Teen);
        assert!(!updated.is_adult);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn update_with_no_fields_rejected() {
        let usecase = usecase();
        let created = usecase.create_user(ann()).await.data.unwrap();

        let result = usecase
            .update_user(created.id, UpdateUserRequest::default())
            .await;

        assert!(!result.success);
        assert_eq!(result.kind, OutcomeKind::InvalidInput);
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let usecase = usecase();

        let result = usecase
            .update_user(
                Uuid::new_v4(),
                UpdateUserRequest {
                    age: Some(20),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result.kind, OutcomeKind::NotFound);
    }

    #[tokio::test]
    async fn update_to_another_users_email_conflicts() {
        let usecase = usecase();
        usecase.create_user(ann()).await;
        let bob = usecase
            .create_user(CreateUserRequest {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                age: 40,
            })
            .await
            .data
            .unwrap();

        let result = usecase
            .update_user(
                bob.id,
                UpdateUserRequest {
                    email: Some("ann@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result.kind, OutcomeKind::Conflict);
    }

    #[tokio::test]
    async fn update_keeping_own_email_is_allowed() {
        let usecase = usecase();
        let created = usecase.create_user(ann()).await.data.unwrap();

        let result = usecase
            .update_user(
                created.id,
                UpdateUserRequest {
                    email: Some("ann@example.com".to_string()),
                    name: Some("Ann B. Lee".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(result.success, "{}", result.message);
    }

    #[tokio::test]
    async fn update_with_empty_name_fails_validation() {
        let usecase = usecase();
        let created = usecase.create_user(ann()).await.data.unwrap();

        let result = usecase
            .update_user(
                created.id,
                UpdateUserRequest {
                    name: Some("".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(result.kind, OutcomeKind::InvalidInput);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let usecase = usecase();
        let created = usecase.create_user(ann()).await.data.unwrap();

        let deleted = usecase.delete_user(created.id).await;
        assert!(deleted.success);

        let result = usecase.get_user(created.id).await;
        assert_eq!(result.kind, OutcomeKind::NotFound);
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let usecase = usecase();

        let result = usecase.delete_user(Uuid::new_v4()).await;

        assert_eq!(result.kind, OutcomeKind::NotFound);
    }

    #[tokio::test]
    async fn permission_check_denies_minor_purchase() {
        let usecase = usecase();
        let teen = usecase
            .create_user(CreateUserRequest {
                name: "Kim".to_string(),
                email: "kim@example.com".to_string(),
                age: 16,
            })
            .await
            .data
            .unwrap();

        let purchase = usecase.check_permission(teen.id, "purchase").await;
        assert!(purchase.success);
        assert!(!purchase.data.unwrap().allowed);

        let view = usecase.check_permission(teen.id, "view_content").await;
        assert!(view.data.unwrap().allowed);

        let fly = usecase.check_permission(teen.id, "fly").await;
        assert!(!fly.data.unwrap().allowed);
    }

    #[tokio::test]
    async fn listing_with_oversized_skip_returns_empty_page() {
        let usecase = usecase();
        usecase.create_user(ann()).await;

        let result = usecase.list_users(u64::MAX, 10).await;

        assert!(result.success);
        let page = result.data.unwrap();
        assert!(page.users.is_empty());
        assert_eq!(page.total, 1);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[tokio::test]
    async fn pagination_metadata_on_last_partial_page() {
        let usecase = usecase();
        for i in 0..25 {
            usecase
                .create_user(CreateUserRequest {
                    name: format!("User {:02}", i),
                    email: format!("user{:02}@example.com", i),
                    age: 20 + (i % 50),
                })
                .await;
        }

        let result = usecase.list_users(20, 10).await;

        assert!(result.success);
        let page = result.data.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.users.len(), 5);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }
}
