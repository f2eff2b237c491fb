use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::delete_user::delete_user;
use super::handlers::get_user::get_user;
use super::handlers::register::register;
use super::handlers::update_user::update_user;
use super::handlers::validate_token::validate_token;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::AuthServicePort;

pub struct AppState<S: AuthServicePort> {
    pub auth_service: Arc<S>,
}

impl<S: AuthServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
        }
    }
}

pub fn create_router<S: AuthServicePort>(auth_service: Arc<S>) -> Router {
    let state = AppState { auth_service };

    let public_routes = Router::new()
        .route("/api/auth/login", post(authenticate::<S>))
        .route("/api/users", post(register::<S>));

    let protected_routes = Router::new()
        .route("/api/auth/validate", get(validate_token))
        .route(
            "/api/users/:user_id",
            get(get_user::<S>)
                .patch(update_user::<S>)
                .delete(delete_user::<S>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    // Headers are left out of the span so bearer tokens never reach the logs
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
