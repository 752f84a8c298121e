//! Authentication core library
//!
//! Framework-independent building blocks for credential and token handling:
//! - Password hashing (Argon2id)
//! - Token issuance and verification (HS256 only)
//! - Request authorization from an `Authorization` header
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", "my-service");
//! let claims = Claims::new("a@b.com", "my-service");
//! let token = codec.issue(&claims).unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), claims);
//! ```
//!
//! ## Protecting a Request
//! ```
//! use std::sync::Arc;
//! use auth::{AuthorizationMiddleware, Claims, TokenCodec};
//!
//! let codec = Arc::new(TokenCodec::new(b"secret_key_at_least_32_bytes_long!", "my-service"));
//! let token = codec.issue(&Claims::new("a@b.com", "my-service")).unwrap();
//!
//! let middleware = AuthorizationMiddleware::new(codec);
//! let claims = middleware.check(Some(&format!("Bearer {}", token))).unwrap();
//! assert_eq!(claims.email, "a@b.com");
//! assert!(middleware.check(Some("Bearer garbage")).is_err());
//! ```

pub mod authenticator;
pub mod authorization;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::PendingToken;
pub use authorization::AuthorizationError;
pub use authorization::AuthorizationMiddleware;
pub use authorization::UNAUTHORIZED_MESSAGE;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
