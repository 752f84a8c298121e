use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::CredentialError;

pub mod login;
pub mod protected;
pub mod signup;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    PreconditionFailed(String),
    Unauthorized(String),
}

impl ApiError {
    /// Signup reports backend failures as 400 rather than 500; existing
    /// clients depend on that status.
    pub fn from_signup(err: CredentialError) -> Self {
        match ApiError::from(err) {
            ApiError::InternalServerError(_) => {
                ApiError::BadRequest("Error on user registration".to_string())
            }
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::PreconditionFailed(msg) => (StatusCode::PRECONDITION_FAILED, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials(_) => ApiError::BadRequest(err.to_string()),
            CredentialError::EmailAlreadyExists(_) => ApiError::PreconditionFailed(err.to_string()),
            CredentialError::Unauthorized => ApiError::Unauthorized(err.to_string()),
            CredentialError::Password(_)
            | CredentialError::Token(_)
            | CredentialError::DatabaseError(_)
            | CredentialError::Unknown(_) => {
                // Details stay in the logs.
                tracing::error!(error = %err, "Credential operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Error on user data: {}", rejection.body_text()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
