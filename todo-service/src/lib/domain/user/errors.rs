use thiserror::Error;

use crate::domain::access::AccessError;
use crate::domain::page::PageError;
use crate::domain::user::models::UserId;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid page: {0}")]
    InvalidPage(#[from] PageError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token generation failed: {0}")]
    Token(#[from] auth::JwtError),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error("User with id {0} not found")]
    NotFound(UserId),

    #[error("User with email {0} not found")]
    NotFoundByEmail(String),

    #[error("Username {0} already exists")]
    UsernameAlreadyExists(String),

    #[error("Email {0} already exists")]
    EmailAlreadyExists(String),

    /// Update collided with another account. Not field-specific.
    #[error("Username or Email already exists")]
    AccountConflict,

    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Every principal resolution failure, whatever the cause.
    #[error("Could not validate credentials")]
    CouldNotValidateCredentials,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::AuthenticationError> for UserError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
            auth::AuthenticationError::InvalidToken => UserError::CouldNotValidateCredentials,
            auth::AuthenticationError::PasswordError(e) => UserError::Password(e),
            auth::AuthenticationError::JwtError(e) => UserError::Token(e),
        }
    }
}
