use tonic::Status;

use crate::domain::user::ports::AuthServicePort;
use crate::proto::ValidateTokenRequest;
use crate::proto::ValidateTokenResponse;

pub async fn validate_token<S: AuthServicePort>(
    service: &S,
    request: ValidateTokenRequest,
) -> Result<ValidateTokenResponse, Status> {
    let token = service.validate_token(&request.token).await?;

    Ok(ValidateTokenResponse {
        user_id: token.user_id.to_string(),
        role: token.role.as_str().to_string(),
        issued_at: token.issued_at.timestamp(),
        expires_at: token.expires_at.timestamp(),
    })
}
