//! Authentication primitives library
//!
//! Provides the building blocks of the auth service:
//! - Password hashing (Argon2id, configurable work factor)
//! - Access token issuance and validation (HMAC-signed JWT)
//! - Bearer header extraction
//! - A credentials coordinator tying both together
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{JwtHandler, Role};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("user123", Role::User, Duration::minutes(15)).unwrap();
//! let claims = handler.parse(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{extract_bearer, Authenticator, Role};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! auth.verify_password("password123", &hash).unwrap();
//! let token = auth.issue_token("user123", Role::User).unwrap();
//!
//! // Validate a presented Authorization header
//! let header = format!("Bearer {}", token);
//! let claims = auth.validate_token(extract_bearer(&header).unwrap()).unwrap();
//! assert_eq!(claims.role, Role::User);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::extract_bearer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::Role;
pub use password::PasswordError;
pub use password::PasswordHasher;
