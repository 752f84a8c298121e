use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs claim sets into tokens and verifies tokens back into claim sets.
///
/// Only HS256 is ever produced or accepted. Verification is stateless: the
/// secret and issuer fixed at construction are all that is consulted.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
}

impl TokenCodec {
    /// Create a new codec.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret
    /// * `issuer` - Issuer written into, and required from, every token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - The secret is never logged nor included in any error
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: issuer.into(),
        }
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token.
    ///
    /// The declared algorithm is checked before any signature work is done,
    /// so a token naming another algorithm (or `none`) is rejected outright.
    ///
    /// # Errors
    /// * `Malformed` - Token or its header cannot be decoded
    /// * `AlgorithmMismatch` - Header declares something other than HS256
    /// * `InvalidSignature` - Signature does not match header and claims
    /// * `Expired` - Token carries an `exp` in the past
    /// * `InvalidIssuer` - Token was issued by someone else
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let header = decode_header(token).map_err(|e| JwtError::Malformed(e.to_string()))?;
        if header.alg != self.algorithm {
            return Err(JwtError::AlgorithmMismatch(format!("{:?}", header.alg)));
        }

        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        // A token is expired the second its `exp` has passed.
        validation.leeway = 0;
        validation.set_issuer(&[self.issuer.as_str()]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm => {
                        JwtError::AlgorithmMismatch(format!("{:?}", header.alg))
                    }
                    ErrorKind::ExpiredSignature => JwtError::Expired,
                    ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
