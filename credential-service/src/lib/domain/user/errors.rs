use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for credential validation failures, in the order they are checked
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Email can't be empty")]
    EmptyEmail,

    #[error("Email is incorrect")]
    InvalidEmail,

    #[error("Password is too short (min {min} char)")]
    PasswordTooShort { min: usize, actual: usize },
}

/// Top-level error for signup and login
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Error on user data: {0}")]
    InvalidCredentials(#[from] CredentialsError),

    #[error("User already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("User not authorized")]
    Unauthorized,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<tokio::task::JoinError> for CredentialError {
    fn from(err: tokio::task::JoinError) -> Self {
        CredentialError::Unknown(format!("Blocking task failed: {}", err))
    }
}
