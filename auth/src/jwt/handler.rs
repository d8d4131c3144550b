use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Signs and checks JWTs with a single shared secret.
///
/// The algorithm is fixed to HS256; tokens carrying any other `alg` header
/// are rejected. Time-based validation is left to the caller, which owns the
/// clock (see [`crate::Authenticator`]).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a handler for `secret`.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration, never from code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign `claims` into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Check the signature and structure of `token` and return its claims.
    ///
    /// Expiry is not checked here.
    ///
    /// # Errors
    /// * `DecodingFailed` - Signature mismatch, wrong algorithm or malformed token
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::DecodingFailed(e.to_string()))
    }
}
