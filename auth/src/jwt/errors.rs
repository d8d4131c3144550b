use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Bad signature, wrong algorithm or malformed structure.
    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),
}
