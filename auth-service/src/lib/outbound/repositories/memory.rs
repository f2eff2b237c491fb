use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::RepositoryError;

/// Process-local user store.
///
/// Enforces the same email uniqueness as the `users_email_key` constraint.
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::DuplicateKey(user.email.to_string()));
        }
        if users.contains_key(&user.id) {
            return Err(RepositoryError::DuplicateKey(user.id.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, RepositoryError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(email.to_string()))
    }

    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        if let Some(email) = &changes.email {
            if users
                .values()
                .any(|other| other.id != *id && &other.email == email)
            {
                return Err(RepositoryError::DuplicateKey(email.to_string()));
            }
        }

        let user = users
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        changes.apply_to(user, Utc::now());

        Ok(user.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}
