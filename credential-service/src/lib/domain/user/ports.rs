use async_trait::async_trait;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::CredentialError;

/// Signed token handed to a client after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken(pub String);

/// Port for credential operations.
#[async_trait]
pub trait CredentialGatePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `credentials` - Validated email and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Registry operation failed
    async fn signup(&self, credentials: Credentials) -> Result<User, CredentialError>;

    /// Exchange credentials for a token.
    ///
    /// # Arguments
    /// * `credentials` - Validated email and password
    ///
    /// # Returns
    /// Signed token for the user
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown email or wrong password
    /// * `Token` - Token generation failed
    /// * `DatabaseError` - Registry operation failed
    async fn login(&self, credentials: Credentials) -> Result<IssuedToken, CredentialError>;
}

/// Persistence operations for users, keyed by email.
#[async_trait]
pub trait UserRegistry: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Registry operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, CredentialError>;

    /// Persist a new user.
    ///
    /// Must reject a duplicate email on its own, even when the caller checked
    /// beforehand: a concurrent insert may have happened in between.
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Registry operation failed
    async fn create(&self, user: NewUser) -> Result<UserId, CredentialError>;
}
