use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::CredentialError;

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let Json(body) = body?;
    let credentials = body
        .try_into_credentials()
        .map_err(ApiError::from_signup)?;

    state
        .credential_gate
        .signup(credentials)
        .await
        .map_err(ApiError::from_signup)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

impl SignupRequest {
    fn try_into_credentials(self) -> Result<Credentials, CredentialError> {
        Ok(Credentials::parse(self.email, self.password)?)
    }
}

/// Sanitized user; the password never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub id: i64,
    pub email: String,
}

impl From<&User> for SignupResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            email: user.email.as_str().to_string(),
        }
    }
}
