use thiserror::Error;

/// Error type for token operations.
///
/// Every decoding variant is an invalid token as far as clients are
/// concerned; the variants exist so the reason can be logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token declares unexpected signing algorithm: {0}")]
    AlgorithmMismatch(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is invalid")]
    InvalidIssuer,
}

impl JwtError {
    pub fn is_expired(&self) -> bool {
        matches!(self, JwtError::Expired)
    }
}
