use std::sync::Arc;

use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token kind label returned alongside every issued token.
pub const BEARER: &str = "Bearer";

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Holds the signing secret, the token lifetime and the clock; nothing here
/// is global, so tests build one with their own secret and clock.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

/// An issued access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
    /// Always [`BEARER`]
    pub token_type: String,
}

impl AuthenticationResult {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER.to_string(),
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Forged, malformed, expired or subject-less token. Deliberately a
    /// single variant.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator backed by the system clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for HS256 signing
    /// * `token_ttl` - Lifetime of every issued token
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self::with_clock(jwt_secret, token_ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(jwt_secret: &[u8], token_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            clock,
            token_ttl,
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;
        Ok(AuthenticationResult::bearer(access_token))
    }

    /// Issue a token for `subject` expiring `token_ttl` from now.
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.clock.now(), self.token_ttl);
        self.jwt_handler.encode(&claims)
    }

    /// Validate `token` and return its subject.
    ///
    /// Signature, structure, expiry (`exp <= now` is expired) and presence of
    /// a subject are all checked; every failure is reported as
    /// `InvalidToken`.
    pub fn verify_token(&self, token: &str) -> Result<String, AuthenticationError> {
        let claims = self
            .jwt_handler
            .decode(token)
            .map_err(|_| AuthenticationError::InvalidToken)?;

        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(AuthenticationError::InvalidToken);
        }

        claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or(AuthenticationError::InvalidToken)
    }

    /// Re-issue a still-valid token for the same subject with a fresh expiry.
    ///
    /// # Errors
    /// * `InvalidToken` - `token` fails [`Authenticator::verify_token`]
    /// * `JwtError` - Token generation failed
    pub fn refresh_token(&self, token: &str) -> Result<AuthenticationResult, AuthenticationError> {
        let subject = self.verify_token(token)?;
        let access_token = self.issue_token(&subject)?;
        Ok(AuthenticationResult::bearer(access_token))
    }
}
