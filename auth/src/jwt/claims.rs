use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::errors::JwtError;
use super::errors::UnknownRoleError;

/// Role tag carried in every access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Wire form of the role (`"user"` or `"admin"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRoleError(other.to_string())),
        }
    }
}

/// Access token claim set.
///
/// All four claims are required. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Role of the subject
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued now and expiring after `ttl`.
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` is outside the representable time range
    pub fn for_subject(subject: impl ToString, role: Role, ttl: Duration) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("token TTL of {}s is out of range", ttl.num_seconds()))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Check if token is expired. A token is still valid at exactly `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Build claims from a raw decoded payload, checking presence and type of
    /// every required claim.
    ///
    /// # Errors
    /// * `MissingClaim` - A claim is absent or has the wrong type
    pub(crate) fn from_payload(payload: &HashMap<String, Value>) -> Result<Self, JwtError> {
        let sub = payload
            .get("sub")
            .and_then(Value::as_str)
            .ok_or_else(|| JwtError::MissingClaim("sub".to_string()))?;

        let role = payload
            .get("role")
            .and_then(Value::as_str)
            .and_then(|role| Role::from_str(role).ok())
            .ok_or_else(|| JwtError::MissingClaim("role".to_string()))?;

        let iat = payload
            .get("iat")
            .and_then(Value::as_i64)
            .ok_or_else(|| JwtError::MissingClaim("iat".to_string()))?;

        let exp = payload
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or_else(|| JwtError::MissingClaim("exp".to_string()))?;

        Ok(Self {
            sub: sub.to_string(),
            role,
            iat,
            exp,
        })
    }
}
