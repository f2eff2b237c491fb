use async_trait::async_trait;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::RepositoryError;
use crate::user::errors::UserError;

/// Port for authentication use-case operations, called by transport adapters.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Created user entity (password already hashed)
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `Persistence` - Store operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Check credentials and issue an access token.
    ///
    /// # Returns
    /// Signed access token string
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Token` - Token signing failed
    /// * `Persistence` - Store operation failed
    async fn authenticate(
        &self,
        email: &EmailAddress,
        password: &Password,
    ) -> Result<String, UserError>;

    /// Validate a raw access token.
    ///
    /// # Errors
    /// * `Token` - Malformed, bad signature, missing claim or expired
    async fn validate_token(&self, token: &str) -> Result<AccessToken, UserError>;

    /// Validate the value of an `Authorization: Bearer <token>` header.
    ///
    /// # Errors
    /// * `Token` - Missing `Bearer ` prefix, or any `validate_token` failure
    async fn validate_authorization_header(
        &self,
        header_value: &str,
    ) -> Result<AccessToken, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Persistence` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Errors
    /// * `EmptyUpdate` - No field set in the command
    /// * `NotFound` - User does not exist
    /// * `UserAlreadyExists` - New email is already registered
    /// * `Persistence` - Store operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Persistence` - Store operation failed
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateKey` - Email is already registered
    /// * `Database` - Database operation failed
    async fn create(&self, user: User) -> Result<User, RepositoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No user with this ID
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError>;

    /// Retrieve user by email address (exact, case-sensitive match).
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, RepositoryError>;

    /// Apply field changes to an existing user and bump `updated_at`.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DuplicateKey` - New email is already registered
    /// * `Database` - Database operation failed
    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, RepositoryError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Database` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;
}
