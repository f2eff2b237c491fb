#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth_service::domain::user::models::EmailAddress;
use auth_service::domain::user::models::Role;
use auth_service::domain::user::models::UserChanges;
use auth_service::domain::user::ports::UserRepository;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Build an authenticator with a cheap Argon2 work factor for tests.
pub fn test_authenticator() -> Authenticator {
    let password_hasher =
        PasswordHasher::with_params(8 * 1024, 1, 1).expect("Failed to build password hasher");

    Authenticator::from_parts(
        password_hasher,
        JwtHandler::new(JWT_SECRET),
        chrono::Duration::minutes(15),
    )
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::new(test_authenticator()),
        ));

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response body.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the issued token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("token missing")
            .to_string()
    }

    /// Register a user, log in and return `(user_id, token)`.
    pub async fn register_and_login(&self, email: &str, password: &str) -> (String, String) {
        let body = self.register(email, password).await;
        let user_id = body["data"]["id"].as_str().expect("id missing").to_string();
        let token = self.login(email, password).await;
        (user_id, token)
    }

    /// Promote a stored user straight through the repository.
    pub async fn promote_to_admin(&self, email: &str) {
        let email = EmailAddress::new(email.to_string()).expect("valid email");
        let user = self
            .repository
            .find_by_email(&email)
            .await
            .expect("user exists");

        let changes = UserChanges {
            role: Some(Role::Admin),
            ..Default::default()
        };
        self.repository
            .update(&user.id, changes)
            .await
            .expect("Failed to promote user");
    }
}
