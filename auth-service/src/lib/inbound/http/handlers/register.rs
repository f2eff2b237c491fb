use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let command = body.try_into_domain()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    email: String,
    password: String,
}

impl RegisterRequestBody {
    fn try_into_domain(self) -> Result<CreateUserCommand, UserError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        Ok(CreateUserCommand::new(email, password))
    }
}
