use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Missing or invalid claim: {0}")]
    MissingClaim(String),

    #[error("Authorization header must start with 'Bearer '")]
    MissingBearerPrefix,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Error for parsing a role from its wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRoleError(pub String);
