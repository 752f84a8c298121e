use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Memory cost in KiB.
const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Salted one-way password hashing (Argon2id).
///
/// The work factor is fixed at construction and identical for every hash
/// this instance produces. Hashes embed their own salt and parameters in PHC
/// string format, so two hashes of the same password never compare equal and
/// must only be checked through [`PasswordHasher::verify`].
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a new password hasher with the service-wide work factor.
    pub fn new() -> Self {
        Self {
            params: Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
                .unwrap_or_default(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison is constant-time; how many leading bytes match
    /// is not observable through timing.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match the hash
    /// * `InvalidHash` - Stored hash is not a parsable PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

        // Parameters come from the PHC string, so hashes made under an older
        // work factor still verify.
        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordError::Mismatch,
                other => PasswordError::InvalidHash(other.to_string()),
            })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "password1";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert_eq!(hasher.verify(password, &hash), Ok(()));
        assert_eq!(
            hasher.verify("password2", &hash),
            Err(PasswordError::Mismatch)
        );
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("password1").expect("Failed to hash password");
        let second = hasher.hash("password1").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("password1", &first).is_ok());
        assert!(hasher.verify("password1", &second).is_ok());
    }

    #[test]
    fn test_verify_is_exact() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password1").expect("Failed to hash password");

        for candidate in ["password", "password12", "Password1", "password1 ", ""] {
            assert_eq!(
                hasher.verify(candidate, &hash),
                Err(PasswordError::Mismatch),
                "{candidate:?} must not verify"
            );
        }
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }
}
