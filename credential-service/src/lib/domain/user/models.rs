use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::user::errors::CredentialsError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._\-+]+@[A-Za-z0-9._\-+]+\..{2,}$").expect("email pattern is valid")
});

/// Registered user as stored by the registry.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// User about to be persisted; the registry assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
}

/// User identifier assigned by persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// The uniqueness key for users. Must be non-empty and look like
/// `local@domain.tld` with a TLD of at least two characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `EmptyEmail` - Email is empty
    /// * `InvalidEmail` - Email does not match the expected shape
    pub fn new(email: String) -> Result<Self, CredentialsError> {
        if email.is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        if !EMAIL_PATTERN.is_match(&email) {
            return Err(CredentialsError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password in transit. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// # Errors
    /// * `PasswordTooShort` - Fewer than 8 bytes
    pub fn new(password: String) -> Result<Self, CredentialsError> {
        let length = password.len();
        if length < Self::MIN_LENGTH {
            return Err(CredentialsError::PasswordTooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Validated email and password pair, as submitted to signup and login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: Password,
}

impl Credentials {
    /// Validate raw input.
    ///
    /// Email is checked before password; the first failing rule is reported.
    pub fn parse(email: String, password: String) -> Result<Self, CredentialsError> {
        let email = EmailAddress::new(email)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }
}
