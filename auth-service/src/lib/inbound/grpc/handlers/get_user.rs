use tonic::Status;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::proto::GetUserRequest;
use crate::proto::GetUserResponse;

pub async fn get_user<S: AuthServicePort>(
    service: &S,
    request: GetUserRequest,
) -> Result<GetUserResponse, Status> {
    let user_id = UserId::from_string(&request.user_id)
        .map_err(|e| Status::invalid_argument(format!("Invalid user ID: {}", e)))?;

    let user = service.get_user(&user_id).await?;

    Ok(GetUserResponse {
        user: Some(user.into()),
    })
}
