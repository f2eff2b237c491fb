use std::fmt;
use std::str::FromStr;

use auth::Claims;
use auth::JwtError;
pub use auth::Role;
use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `password_hash` always holds a PHC hash string, never raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The address is
/// kept exactly as given; lookups are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password on its way to the hasher.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MAX_LENGTH: usize = 1024;

    /// Accept a plaintext password.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password exceeds 1024 bytes
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        if password.len() > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: password.len(),
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Validated claim set of an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessToken {
    pub user_id: UserId,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TryFrom<Claims> for AccessToken {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = UserId::from_string(&claims.sub)
            .map_err(|_| JwtError::MissingClaim("sub".to_string()))?;
        let issued_at = Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .ok_or_else(|| JwtError::MissingClaim("iat".to_string()))?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| JwtError::MissingClaim("exp".to_string()))?;

        Ok(Self {
            user_id,
            role: claims.role,
            issued_at,
            expires_at,
        })
    }
}

/// Command to register a new user
#[derive(Debug)]
pub struct CreateUserCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated; at least one must be set.
#[derive(Debug, Default)]
pub struct UpdateUserCommand {
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub role: Option<Role>,
}

impl UpdateUserCommand {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.role.is_none()
    }
}

/// Field changes handed to the user store. Passwords arrive already hashed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<EmailAddress>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none() && self.role.is_none()
    }

    /// Apply the changes to an in-memory user record.
    pub fn apply_to(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password_hash) = &self.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        user.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_email_kept_verbatim() {
        let email = EmailAddress::new("Alice@Example.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "Alice@Example.com");
        assert_ne!(
            email,
            EmailAddress::new("alice@example.com".to_string()).unwrap()
        );
    }

    #[test]
    fn test_password_policy() {
        assert_eq!(Password::new(String::new()), Err(PasswordPolicyError::Empty));
        assert!(matches!(
            Password::new("x".repeat(1025)),
            Err(PasswordPolicyError::TooLong { max: 1024, .. })
        ));
        assert_eq!(Password::new("hunter2".to_string()).unwrap().expose(), "hunter2");
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let command = CreateUserCommand::new(
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            Password::new("hunter2".to_string()).unwrap(),
        );

        let printed = format!("{:?}", command);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("alice@example.com"));
    }

    #[test]
    fn test_access_token_from_claims() {
        let user_id = UserId::new();
        let claims = Claims::for_subject(user_id, Role::Admin, Duration::minutes(5)).unwrap();

        let token = AccessToken::try_from(claims.clone()).unwrap();
        assert_eq!(token.user_id, user_id);
        assert_eq!(token.role, Role::Admin);
        assert_eq!(token.issued_at.timestamp(), claims.iat);
        assert_eq!(token.expires_at.timestamp(), claims.exp);
        assert!(token.expires_at > token.issued_at);
    }

    #[test]
    fn test_access_token_rejects_non_uuid_subject() {
        let claims = Claims::for_subject("not-a-uuid", Role::User, Duration::minutes(5)).unwrap();

        assert_eq!(
            AccessToken::try_from(claims),
            Err(JwtError::MissingClaim("sub".to_string()))
        );
    }

    #[test]
    fn test_changes_apply_to_user() {
        let now = Utc::now();
        let mut user = User {
            id: UserId::new(),
            email: EmailAddress::new("old@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$old".to_string(),
            role: Role::User,
            created_at: now,
            updated_at: now,
        };

        let changes = UserChanges {
            role: Some(Role::Admin),
            ..Default::default()
        };
        let later = now + Duration::seconds(10);
        changes.apply_to(&mut user, later);

        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email.as_str(), "old@example.com");
        assert_eq!(user.updated_at, later);
        assert_eq!(user.created_at, now);
    }
}
