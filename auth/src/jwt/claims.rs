use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set signed into a bearer token.
///
/// `sub` carries the account email. Every field is optional on the wire so a
/// token missing one still decodes and is rejected by the caller instead of
/// failing deserialization with a different error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims for `subject`, valid from `issued_at` for `ttl`.
    pub fn for_subject(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: Some((issued_at + ttl).timestamp()),
            iat: Some(issued_at.timestamp()),
        }
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Whether the token is no longer valid at `now` (Unix timestamp).
    ///
    /// The expiry instant itself is already invalid, and a token without
    /// `exp` never counts as valid.
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp.map_or(true, |exp| exp <= now)
    }
}
