use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// One-way credential hasher (Argon2id, random salt per hash).
///
/// Output is a PHC string, so the algorithm parameters and salt travel with
/// the hash and verification needs nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// Two calls with the same input produce different strings.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` for any mismatch. Comparison is delegated to the
    /// Argon2 verifier, which compares digests in constant time.
    ///
    /// # Errors
    /// * `MalformedHash` - `stored` is not a parseable PHC string
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
