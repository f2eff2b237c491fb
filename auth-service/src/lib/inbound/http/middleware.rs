use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Middleware that validates the bearer token and stores its claims as an
/// [`AccessToken`] request extension.
pub async fn authenticate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    let token = state
        .auth_service
        .validate_authorization_header(header_value)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Token validation failed");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(token);

    Ok(next.run(req).await)
}

/// Parse the target user id from the path and check that the caller may act
/// on it. Callers may act on themselves; admins may act on anyone.
pub fn authorize_target(caller: &AccessToken, raw_user_id: &str) -> Result<UserId, ApiError> {
    let user_id =
        UserId::from_string(raw_user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if caller.user_id != user_id && caller.role != Role::Admin {
        tracing::warn!(
            caller = %caller.user_id,
            target = %user_id,
            "Rejected access to another user"
        );
        return Err(ApiError::Forbidden(
            "Not allowed to access this user".to_string(),
        ));
    }

    Ok(user_id)
}
