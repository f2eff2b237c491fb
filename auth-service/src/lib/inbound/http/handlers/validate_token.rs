use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::Role;

/// Echo the claims of the bearer token already checked by the middleware.
pub async fn validate_token(
    Extension(token): Extension<AccessToken>,
) -> ApiSuccess<ValidateTokenResponseData> {
    ApiSuccess::new(StatusCode::OK, (&token).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub user_id: String,
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for ValidateTokenResponseData {
    fn from(token: &AccessToken) -> Self {
        Self {
            user_id: token.user_id.to_string(),
            role: token.role,
            issued_at: token.issued_at,
            expires_at: token.expires_at,
        }
    }
}
