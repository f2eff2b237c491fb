use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::Role;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Credentials coordinator combining password hashing and token handling.
///
/// Holds only immutable configuration, so one instance can be shared
/// across all requests.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
    /// Hash verified against when the account does not exist, so unknown
    /// and known emails cost the same Argon2 work.
    dummy_hash: Option<String>,
}

const DUMMY_PASSWORD: &str = "unknown-account-placeholder";

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator with HS256 tokens and default hashing parameters.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued access tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::from_parts(PasswordHasher::new(), JwtHandler::new(jwt_secret), token_ttl)
    }

    /// Assemble an authenticator from configured components.
    pub fn from_parts(
        password_hasher: PasswordHasher,
        jwt_handler: JwtHandler,
        token_ttl: Duration,
    ) -> Self {
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD).ok();

        Self {
            password_hasher,
            jwt_handler,
            token_ttl,
            dummy_hash,
        }
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Spend one password verification on a throwaway hash and report
    /// `InvalidCredentials`. Used when no account matches the login.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        match &self.dummy_hash {
            Some(hash) => {
                let _ = self.password_hasher.verify(password, hash);
            }
            None => {
                let _ = self.password_hasher.hash(password);
            }
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue an access token for `subject` with the configured TTL.
    pub fn issue_token(&self, subject: impl ToString, role: Role) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, role, self.token_ttl)
    }

    /// Validate and decode an access token, including its expiry.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.parse(token)
    }
}
