use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::authorize_target;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let email = self.email.map(EmailAddress::new).transpose()?;
        let password = self.password.map(Password::new).transpose()?;

        Ok(UpdateUserCommand {
            email,
            password,
            role: self.role,
        })
    }
}

pub async fn update_user<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Extension(caller): Extension<AccessToken>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = authorize_target(&caller, &id)?;

    if req.role.is_some() && caller.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "Only administrators may change roles".to_string(),
        ));
    }

    let command = req.try_into_command()?;

    state
        .auth_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
