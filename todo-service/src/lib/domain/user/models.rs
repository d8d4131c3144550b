use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered account. The password hash never leaves the
/// domain and outbound layers.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Username value type
///
/// Any non-empty text is accepted; uniqueness is enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// # Errors
    /// * `Empty` - Username is the empty string
    pub fn new(username: String) -> Result<Self, UsernameError> {
        if username.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account fields ready for insertion; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Command to create a new user with domain types
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl CreateUserCommand {
    /// # Arguments
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command replacing every mutable field of an account.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}
