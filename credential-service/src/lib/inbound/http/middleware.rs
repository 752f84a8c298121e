use auth::AuthorizationError;
use auth::UNAUTHORIZED_MESSAGE;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified token claims in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
    pub issuer: String,
}

/// Middleware that admits a request only with a valid bearer token.
///
/// Every rejection carries the same 401 body; the reason is only logged.
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A header that is not valid UTF-8 counts as malformed.
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());

    let claims = state.authorization.check(header).map_err(|e| {
        let expired = matches!(&e, AuthorizationError::InvalidToken(err) if err.is_expired());
        tracing::warn!(reason = %e, expired, "Request rejected");
        ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        email: claims.email,
        issuer: claims.iss,
    });

    Ok(next.run(req).await)
}
