use tonic::Status;

use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod authenticate;
pub mod get_user;
pub mod register;
pub mod validate_token;

impl From<User> for crate::proto::User {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

impl From<UserError> for Status {
    fn from(err: UserError) -> Self {
        if err.is_validation() {
            return Status::invalid_argument(err.to_string());
        }

        match err {
            UserError::InvalidCredentials | UserError::Token(_) => {
                Status::unauthenticated(err.to_string())
            }
            UserError::NotFound(_) => Status::not_found(err.to_string()),
            UserError::UserAlreadyExists(_) => Status::already_exists(err.to_string()),
            _ => {
                tracing::error!(error = %err, "RPC failed");
                Status::internal("Internal server error")
            }
        }
    }
}
