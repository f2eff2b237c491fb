use tonic::Status;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::ports::AuthServicePort;
use crate::proto::AuthenticateRequest;
use crate::proto::AuthenticateResponse;
use crate::user::errors::UserError;

pub async fn authenticate<S: AuthServicePort>(
    service: &S,
    request: AuthenticateRequest,
) -> Result<AuthenticateResponse, Status> {
    let email =
        EmailAddress::new(request.email).map_err(|_| Status::from(UserError::InvalidCredentials))?;
    let password = Password::new(request.password)
        .map_err(|_| Status::from(UserError::InvalidCredentials))?;

    let token = service.authenticate(&email, &password).await?;

    Ok(AuthenticateResponse {
        token,
        token_type: "Bearer".to_string(),
    })
}
