use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn authenticate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    // Malformed input fails the same way as a wrong password
    let Json(body) = body.map_err(|e| {
        tracing::debug!(error = %e, "Login body rejected");
        ApiError::invalid_credentials()
    })?;
    let email = EmailAddress::new(body.email).map_err(|_| ApiError::invalid_credentials())?;
    let password = Password::new(body.password).map_err(|_| ApiError::invalid_credentials())?;

    let token = state
        .auth_service
        .authenticate(&email, &password)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            token,
            token_type: "Bearer".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
    pub token_type: String,
}
