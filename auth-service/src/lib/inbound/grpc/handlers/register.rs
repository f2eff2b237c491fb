use tonic::Status;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::user::errors::UserError;

pub async fn register<S: AuthServicePort>(
    service: &S,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    let email = EmailAddress::new(request.email).map_err(UserError::from)?;
    let password = Password::new(request.password).map_err(UserError::from)?;

    let user = service
        .register(CreateUserCommand::new(email, password))
        .await?;

    Ok(RegisterResponse {
        user: Some(user.into()),
    })
}
