use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Credentials;
use crate::inbound::http::router::AppState;
use crate::user::errors::CredentialError;
use crate::user::ports::IssuedToken;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let credentials = Credentials::parse(body.email, body.password)
        .map_err(|e| ApiError::from(CredentialError::from(e)))?;

    state
        .credential_gate
        .login(credentials)
        .await
        .map_err(ApiError::from)
        .map(|IssuedToken(token)| ApiSuccess::new(StatusCode::OK, LoginResponseData { token }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
