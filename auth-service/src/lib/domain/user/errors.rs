use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password too long: maximum {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Failures reported by a user store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for all user and authentication operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("No fields to update")]
    EmptyUpdate,

    // Domain-level errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(PasswordError),

    #[error("{context}: {source}")]
    Persistence {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl UserError {
    /// Wrap a store failure with the operation it interrupted.
    pub fn persistence(context: &'static str, source: RepositoryError) -> Self {
        UserError::Persistence { context, source }
    }

    /// True for malformed caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UserError::InvalidUserId(_)
                | UserError::InvalidEmail(_)
                | UserError::InvalidPassword(_)
                | UserError::EmptyUpdate
        )
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_persistence_keeps_source() {
        let err = UserError::persistence(
            "failed to delete user",
            RepositoryError::Database("connection reset".to_string()),
        );

        assert_eq!(
            err.to_string(),
            "failed to delete user: Database error: connection reset"
        );
        let source = err.source().expect("source preserved");
        assert_eq!(source.to_string(), "Database error: connection reset");
    }

    #[test]
    fn test_validation_kinds() {
        assert!(UserError::EmptyUpdate.is_validation());
        assert!(UserError::from(PasswordPolicyError::Empty).is_validation());
        assert!(!UserError::InvalidCredentials.is_validation());
        assert!(!UserError::Token(JwtError::TokenExpired).is_validation());
    }
}
