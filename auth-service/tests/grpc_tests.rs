mod common;

use std::sync::Arc;

use auth_service::domain::user::service::AuthService;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::outbound::repositories::InMemoryUserRepository;
use auth_service::proto::auth_service_server::AuthService as _;
use auth_service::proto::AuthenticateRequest;
use auth_service::proto::GetUserRequest;
use auth_service::proto::RegisterRequest;
use auth_service::proto::ValidateTokenRequest;
use common::test_authenticator;
use tonic::Code;
use tonic::Request;

fn grpc_service() -> AuthGrpcService<AuthService<InMemoryUserRepository>> {
    let auth_service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(test_authenticator()),
    );
    AuthGrpcService::new(Arc::new(auth_service))
}

fn register_request(email: &str) -> Request<RegisterRequest> {
    Request::new(RegisterRequest {
        email: email.to_string(),
        password: "pass_word!".to_string(),
    })
}

#[tokio::test]
async fn test_register_authenticate_validate() {
    let service = grpc_service();

    let user = service
        .register(register_request("nicola@example.com"))
        .await
        .expect("register failed")
        .into_inner()
        .user
        .expect("user missing");
    assert_eq!(user.email, "nicola@example.com");
    assert_eq!(user.role, "user");

    let login = service
        .authenticate(Request::new(AuthenticateRequest {
            email: "nicola@example.com".to_string(),
            password: "pass_word!".to_string(),
        }))
        .await
        .expect("authenticate failed")
        .into_inner();
    assert_eq!(login.token_type, "Bearer");

    let claims = service
        .validate_token(Request::new(ValidateTokenRequest { token: login.token }))
        .await
        .expect("validate failed")
        .into_inner();
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.role, "user");
    assert_eq!(claims.expires_at - claims.issued_at, 15 * 60);

    let fetched = service
        .get_user(Request::new(GetUserRequest { user_id: user.id.clone() }))
        .await
        .expect("get_user failed")
        .into_inner()
        .user
        .expect("user missing");
    assert_eq!(fetched, user);
}

#[tokio::test]
async fn test_error_codes() {
    let service = grpc_service();
    service
        .register(register_request("nicola@example.com"))
        .await
        .expect("register failed");

    let duplicate = service
        .register(register_request("nicola@example.com"))
        .await
        .unwrap_err();
    assert_eq!(duplicate.code(), Code::AlreadyExists);

    let invalid = service
        .register(register_request("not-an-email"))
        .await
        .unwrap_err();
    assert_eq!(invalid.code(), Code::InvalidArgument);

    let wrong_password = service
        .authenticate(Request::new(AuthenticateRequest {
            email: "nicola@example.com".to_string(),
            password: "wrong".to_string(),
        }))
        .await
        .unwrap_err();
    let unknown_email = service
        .authenticate(Request::new(AuthenticateRequest {
            email: "nobody@example.com".to_string(),
            password: "pass_word!".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(wrong_password.code(), Code::Unauthenticated);
    assert_eq!(wrong_password.message(), unknown_email.message());

    let garbage = service
        .validate_token(Request::new(ValidateTokenRequest {
            token: "not.a.token".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(garbage.code(), Code::Unauthenticated);

    let missing = service
        .get_user(Request::new(GetUserRequest {
            user_id: uuid::Uuid::new_v4().to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(missing.code(), Code::NotFound);

    let bad_id = service
        .get_user(Request::new(GetUserRequest {
            user_id: "nope".to_string(),
        }))
        .await
        .unwrap_err();
    assert_eq!(bad_id.code(), Code::InvalidArgument);
}
