use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn protected(Extension(user): Extension<AuthenticatedUser>) -> (StatusCode, String) {
    tracing::debug!(issuer = %user.issuer, "Serving protected resource");
    (StatusCode::OK, format!("hello {}", user.email))
}
