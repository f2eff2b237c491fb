use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::RepositoryError;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration, login and token validation.
///
/// Holds the user store and the immutable credentials configuration; safe to
/// share across concurrent requests behind an `Arc`.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token configuration
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hash_password(&self, password: &Password) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password.expose())
            .map_err(UserError::Hashing)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            role: Role::User,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await.map_err(|e| match e {
            RepositoryError::DuplicateKey(key) => UserError::UserAlreadyExists(key),
            other => UserError::persistence("failed to create user", other),
        })?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<String, UserError> {
        let user = match self.repository.find_by_email(email).await {
            Ok(user) => user,
            Err(RepositoryError::NotFound(_)) => {
                self.authenticator.reject_unknown_account(password.expose());
                tracing::debug!("Authentication rejected: unknown email");
                return Err(UserError::InvalidCredentials);
            }
            Err(e) => return Err(UserError::persistence("failed to find user", e)),
        };

        match self
            .authenticator
            .verify_password(password.expose(), &user.password_hash)
        {
            Ok(()) => {}
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user.id, "Authentication rejected: wrong password");
                return Err(UserError::InvalidCredentials);
            }
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                return Err(UserError::InvalidCredentials);
            }
            Err(AuthenticationError::JwtError(e)) => return Err(UserError::Token(e)),
        }

        let token = self.authenticator.issue_token(user.id, user.role)?;

        tracing::info!(user_id = %user.id, role = %user.role, "Access token issued");

        Ok(token)
    }

    async fn validate_token(&self, token: &str) -> Result<AccessToken, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(error = %e, "Token validation failed");
            e
        })?;

        Ok(AccessToken::try_from(claims)?)
    }

    async fn validate_authorization_header(
        &self,
        header_value: &str,
    ) -> Result<AccessToken, UserError> {
        let token = auth::extract_bearer(header_value)?;
        self.validate_token(token).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository.find_by_id(id).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => UserError::NotFound(id.to_string()),
            other => UserError::persistence("failed to get user", other),
        })
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        if command.is_empty() {
            return Err(UserError::EmptyUpdate);
        }

        let password_hash = command
            .password
            .as_ref()
            .map(|password| self.hash_password(password))
            .transpose()?;

        let changes = UserChanges {
            email: command.email,
            password_hash,
            role: command.role,
        };

        let updated_user = self
            .repository
            .update(id, changes)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => UserError::NotFound(id.to_string()),
                RepositoryError::DuplicateKey(key) => UserError::UserAlreadyExists(key),
                other => UserError::persistence("failed to update user", other),
            })?;

        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await.map_err(|e| match e {
            RepositoryError::NotFound(_) => UserError::NotFound(id.to_string()),
            other => UserError::persistence("failed to delete user", other),
        })?;

        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
