use thiserror::Error;

/// Error type for credential hashing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a valid PHC string.
    ///
    /// This is never a credential mismatch: it means the stored record is
    /// corrupt or was written by a different scheme.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
