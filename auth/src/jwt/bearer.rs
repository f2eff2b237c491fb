use super::errors::JwtError;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Strip the `Bearer ` prefix from an `Authorization` header value.
///
/// The prefix is matched literally and case-sensitively.
///
/// # Errors
/// * `MissingBearerPrefix` - Header value does not start with `Bearer `
pub fn extract_bearer(header_value: &str) -> Result<&str, JwtError> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(JwtError::MissingBearerPrefix)
}
