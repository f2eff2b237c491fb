use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::authenticate;
use super::handlers::get_user;
use super::handlers::register;
use super::handlers::validate_token;
use crate::domain::user::ports::AuthServicePort;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::AuthenticateRequest;
use crate::proto::AuthenticateResponse;
use crate::proto::GetUserRequest;
use crate::proto::GetUserResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::proto::ValidateTokenRequest;
use crate::proto::ValidateTokenResponse;

pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> AuthServiceProto for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn authenticate(
        &self,
        request: Request<AuthenticateRequest>,
    ) -> Result<Response<AuthenticateResponse>, Status> {
        let response =
            authenticate::authenticate(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn validate_token(
        &self,
        request: Request<ValidateTokenRequest>,
    ) -> Result<Response<ValidateTokenResponse>, Status> {
        let response =
            validate_token::validate_token(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let response = get_user::get_user(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
