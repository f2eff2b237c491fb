use std::collections::HashMap;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;
use serde_json::Value;

use super::claims::Claims;
use super::claims::Role;
use super::errors::JwtError;

/// JWT token handler for issuing and parsing access tokens.
///
/// Signs with a symmetric secret and one HMAC algorithm (HS256 by default).
/// Parsing only accepts tokens whose header names exactly that algorithm.
#[derive(Clone)]
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler using HS256.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a JWT handler for a named HMAC algorithm (`HS256`, `HS384`, `HS512`).
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Name is unknown or not a symmetric algorithm
    pub fn with_algorithm(secret: &[u8], algorithm: &str) -> Result<Self, JwtError> {
        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| JwtError::UnsupportedAlgorithm(algorithm.to_string()))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                algorithm,
                ..Self::new(secret)
            }),
            other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode any serializable payload into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for `subject` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - `ttl` is not positive or too large, or signing failed
    pub fn issue(&self, subject: impl ToString, role: Role, ttl: Duration) -> Result<String, JwtError> {
        if ttl <= Duration::zero() {
            return Err(JwtError::EncodingFailed(
                "token TTL must be positive".to_string(),
            ));
        }

        self.encode(&Claims::for_subject(subject, role, ttl)?)
    }

    /// Parse and validate a token against the current time.
    ///
    /// # Errors
    /// * `MalformedToken` - Token structure is invalid or the header algorithm differs
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `MissingClaim` - A required claim is absent or of the wrong type
    /// * `TokenExpired` - `exp` is in the past
    pub fn parse(&self, token: &str) -> Result<Claims, JwtError> {
        self.parse_at(token, Utc::now().timestamp())
    }

    /// Parse and validate a token, checking expiry against `now` (Unix seconds).
    pub fn parse_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let header = decode_header(token).map_err(|e| JwtError::MalformedToken(e.to_string()))?;

        if header.alg != self.algorithm {
            return Err(JwtError::MalformedToken(format!(
                "unexpected signing algorithm {:?}",
                header.alg
            )));
        }

        let mut validation = Validation::new(self.algorithm);
        // Claims are checked by Claims::from_payload and expiry below
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let token_data = decode::<HashMap<String, Value>>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::MalformedToken(e.to_string()),
            })?;

        let claims = Claims::from_payload(&token_data.claims)?;

        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
