//! Authentication utilities library
//!
//! Provides the credential and token infrastructure used by the to-do
//! service:
//! - Password hashing (Argon2id)
//! - JWT token generation and validation (HS256)
//! - Token issuance, verification and refresh against an injectable clock
//!
//! The service defines its own domain errors and adapts these
//! implementations behind its ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::new().with_subject("alice@example.com");
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("alice@example.com"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue a token
//! let result = auth.authenticate("password123", &hash, "alice@example.com").unwrap();
//! assert_eq!(result.token_type, "Bearer");
//!
//! // Resolve the subject back from the token
//! let subject = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
