use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by every token this service issues.
///
/// Decoding rejects payloads missing `email` or `iss`. `exp` is optional and
/// omitted from the payload when unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Email of the authenticated user
    pub email: String,

    /// Issuer
    pub iss: String,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create claims for a user, without expiration.
    pub fn new(email: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            iss: issuer.into(),
            exp: None,
        }
    }

    /// Create claims for a user, optionally expiring after `expiration_hours`.
    ///
    /// # Arguments
    /// * `email` - Email of the user the token is for
    /// * `issuer` - Issuer identifying this service
    /// * `expiration_hours` - Hours until token expires, `None` for no `exp` claim
    pub fn for_email(
        email: impl Into<String>,
        issuer: impl Into<String>,
        expiration_hours: Option<i64>,
    ) -> Self {
        let claims = Self::new(email, issuer);
        match expiration_hours {
            Some(hours) => {
                let expiration = Utc::now() + Duration::hours(hours);
                claims.with_expiration(expiration.timestamp())
            }
            None => claims,
        }
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }
}
