use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::User;

/// In-memory implementation of UserRepository (for development/testing)
///
/// Enforces the same email uniqueness the SQLite adapter gets from its
/// UNIQUE constraint, so callers exercise the conflict path without a
/// database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<User> {
        let mut users = self.users.write().await;

        let email_taken = users.values().any(|u| u.email == user.email);
        if email_taken {
            return Err(RepositoryError::DuplicateEmail(user.email.clone()));
        }

        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_all(&self, skip: u64, limit: u64) -> RepositoryResult<Vec<User>> {
        let users = self.users.read().await;

        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Ok(all
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let users = self.users.read().await;
        Ok(users.len() as u64)
    }

    async fn update(&self, user: &User) -> RepositoryResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound(user.id));
        }

        let email_taken = users
            .values()
            .any(|u| u.id != user.id && u.email == user.email);
        if email_taken {
            return Err(RepositoryError::DuplicateEmail(user.email.clone()));
        }

        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id).is_some())
    }
}
