use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod authenticate;
pub mod delete_user;
pub mod get_user;
pub mod register;
pub mod update_user;
pub mod validate_token;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// The single response used for every failed login, whatever the cause.
    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(UserError::InvalidCredentials.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        if err.is_validation() {
            return ApiError::UnprocessableEntity(err.to_string());
        }

        match err {
            UserError::InvalidCredentials => ApiError::invalid_credentials(),
            UserError::Token(_) => ApiError::Unauthorized(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::UserAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a user. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtError;

    use super::*;
    use crate::user::errors::EmailError;
    use crate::user::errors::RepositoryError;

    #[test]
    fn test_user_error_mapping() {
        assert!(matches!(
            ApiError::from(UserError::InvalidEmail(EmailError::InvalidFormat("x".into()))),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::EmptyUpdate),
            ApiError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::Token(JwtError::TokenExpired)),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::UserAlreadyExists("a@b.c".into())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::NotFound("id".into())),
            ApiError::NotFound(_)
        ));
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::invalid_credentials()
        );
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let err = UserError::persistence(
            "failed to create user",
            RepositoryError::Database("password authentication failed for user postgres".into()),
        );

        assert_eq!(
            ApiError::from(err),
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }
}
