use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationMiddleware;
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

use super::handlers::login::login;
use super::handlers::protected::protected;
use super::handlers::signup::signup;
use super::middleware::authorize;
use crate::domain::user::ports::CredentialGatePort;

#[derive(Clone)]
pub struct AppState {
    pub credential_gate: Arc<dyn CredentialGatePort>,
    pub authorization: Arc<AuthorizationMiddleware>,
}

pub fn create_router(
    credential_gate: Arc<dyn CredentialGatePort>,
    authorization: Arc<AuthorizationMiddleware>,
) -> Router {
    let state = AppState {
        credential_gate,
        authorization,
    };

    let public_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login));

    let protected_routes = Router::new()
        .route("/protected", get(protected))
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    // Headers are left out of the span: Authorization carries the token.
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
