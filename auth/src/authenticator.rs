use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Plaintext behind the hash verified for logins with an unknown email.
const UNKNOWN_USER_PASSWORD: &str = "unknown-user-placeholder";

/// Authentication coordinator combining password verification and token issuance.
///
/// Shares its [`TokenCodec`] with the authorization side so that tokens are
/// issued and verified under the same secret and issuer.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
    expiration_hours: Option<i64>,
    unknown_user_hash: OnceLock<String>,
}

/// A signed token that has not been released to the caller yet.
///
/// The only way to get the token string out is [`Authenticator::authenticate`],
/// which requires the password to verify first.
pub struct PendingToken(String);

impl fmt::Debug for PendingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PendingToken(..)")
    }
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_codec` - Codec used to sign issued tokens
    /// * `expiration_hours` - Lifetime of issued tokens, `None` for tokens without `exp`
    pub fn new(token_codec: Arc<TokenCodec>, expiration_hours: Option<i64>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec,
            expiration_hours,
            unknown_user_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Build the claim set for a user of this service.
    pub fn claims_for(&self, email: &str) -> Claims {
        Claims::for_email(email, self.token_codec.issuer(), self.expiration_hours)
    }

    /// Sign a token now and hold it back until the password is verified.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn prepare_token(&self, claims: &Claims) -> Result<PendingToken, JwtError> {
        self.token_codec.issue(claims).map(PendingToken)
    }

    /// Verify credentials and release a prepared token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `token` - Token prepared with [`Authenticator::prepare_token`]
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be used
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        token: PendingToken,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        match self.password_hasher.verify(password, stored_hash) {
            Ok(()) => Ok(AuthenticationResult {
                access_token: token.0,
            }),
            Err(PasswordError::Mismatch) => Err(AuthenticationError::InvalidCredentials),
            Err(e) => Err(AuthenticationError::PasswordError(e)),
        }
    }

    /// Reject a login for an email with no stored hash.
    ///
    /// Runs a full verification against a placeholder hash first, so an
    /// unknown email costs as much as a wrong password.
    pub fn reject_unknown_user(
        &self,
        password: &str,
        _token: PendingToken,
    ) -> AuthenticationError {
        let hash = self.unknown_user_hash.get_or_init(|| {
            self.password_hasher
                .hash(UNKNOWN_USER_PASSWORD)
                .unwrap_or_default()
        });
        let _ = self.password_hasher.verify(password, hash);

        AuthenticationError::InvalidCredentials
    }
}
