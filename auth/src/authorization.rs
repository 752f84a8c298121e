use std::sync::Arc;

use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;

/// Message returned to clients for every rejected request.
pub const UNAUTHORIZED_MESSAGE: &str = "Error: auth not valid";

/// Reasons a request was rejected by [`AuthorizationMiddleware`].
///
/// Only for logging. Clients always see [`UNAUTHORIZED_MESSAGE`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header is not a scheme and token pair")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),
}

/// Request gate for protected routes.
///
/// Framework independent: callers hand over the raw `Authorization` header
/// value and get back either the verified claims or a rejection.
pub struct AuthorizationMiddleware {
    codec: Arc<TokenCodec>,
}

impl AuthorizationMiddleware {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    /// Admit or reject a request based on its `Authorization` header.
    ///
    /// The header must contain a space; the token is the segment right
    /// after the first one. The scheme itself is not checked.
    ///
    /// # Arguments
    /// * `authorization_header` - Raw header value, `None` when absent
    ///
    /// # Returns
    /// Claims of the verified token
    ///
    /// # Errors
    /// * `MissingHeader` - No header was sent
    /// * `MalformedHeader` - Header has no space-delimited token
    /// * `InvalidToken` - Token failed verification
    pub fn check(&self, authorization_header: Option<&str>) -> Result<Claims, AuthorizationError> {
        let header = authorization_header.ok_or(AuthorizationError::MissingHeader)?;
        let token = Self::extract_token(header)?;

        Ok(self.codec.verify(token)?)
    }

    fn extract_token(header: &str) -> Result<&str, AuthorizationError> {
        let (_scheme, rest) = header
            .split_once(' ')
            .ok_or(AuthorizationError::MalformedHeader)?;

        Ok(rest.split(' ').next().unwrap_or_default())
    }
}
