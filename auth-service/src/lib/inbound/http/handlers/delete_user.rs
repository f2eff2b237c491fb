use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AccessToken;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::authorize_target;
use crate::inbound::http::router::AppState;

pub async fn delete_user<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Extension(caller): Extension<AccessToken>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = authorize_target(&caller, &user_id)?;

    state
        .auth_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
