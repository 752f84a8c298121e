use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::user::errors::CredentialError;
use crate::user::ports::CredentialGatePort;
use crate::user::ports::IssuedToken;
use crate::user::ports::UserRegistry;

/// Domain service implementation for signup and login.
///
/// Password hashing and verification run on the blocking pool so that the
/// deliberately slow work never holds up other requests.
pub struct CredentialGate<UR>
where
    UR: UserRegistry,
{
    registry: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> CredentialGate<UR>
where
    UR: UserRegistry,
{
    /// Create a new credential gate with injected dependencies.
    ///
    /// # Arguments
    /// * `registry` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(registry: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            registry,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> CredentialGatePort for CredentialGate<UR>
where
    UR: UserRegistry,
{
    async fn signup(&self, credentials: Credentials) -> Result<User, CredentialError> {
        let Credentials { email, password } = credentials;

        if self.registry.find_by_email(&email).await?.is_some() {
            return Err(CredentialError::EmailAlreadyExists(email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
                .await??;

        // The registry re-checks uniqueness; a concurrent signup for the same
        // email surfaces here as EmailAlreadyExists.
        let id = self
            .registry
            .create(NewUser {
                email: email.clone(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %id, "User signed up");

        Ok(User {
            id,
            email,
            password_hash: String::new(),
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, CredentialError> {
        let Credentials { email, password } = credentials;

        let claims = self.authenticator.claims_for(email.as_str());
        let pending = self.authenticator.prepare_token(&claims)?;

        let user = self.registry.find_by_email(&email).await?;

        let authenticator = Arc::clone(&self.authenticator);
        let result = tokio::task::spawn_blocking(move || match user {
            Some(user) => {
                authenticator.authenticate(password.as_str(), &user.password_hash, pending)
            }
            None => {
                tracing::debug!("Login for unknown email");
                Err(authenticator.reject_unknown_user(password.as_str(), pending))
            }
        })
        .await?;

        match result {
            Ok(authenticated) => {
                tracing::info!("User logged in");
                Ok(IssuedToken(authenticated.access_token))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!("Login rejected");
                Err(CredentialError::Unauthorized)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }
}
