//! Token entities for JWT-based authentication.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TokenError;

/// Claim carrying the identity an access token's session is keyed by
pub const USERNAME_CLAIM: &str = "username";

/// Registered claims written by the codec; caller values under these names are overwritten
pub const RESERVED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Caller-supplied custom claims, ordered by name
pub type ClaimSet = serde_json::Map<String, Value>;

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject
    pub sub: String,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Expiration (seconds since epoch)
    pub exp: i64,

    /// Custom claims; empty for refresh tokens
    #[serde(flatten)]
    pub custom: ClaimSet,
}

impl Claims {
    /// Looks up a custom claim
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    /// Looks up a custom claim holding a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The `username` claim, present on access tokens
    pub fn username(&self) -> Option<&str> {
        self.get_str(USERNAME_CLAIM)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Extracts the `username` claim an access token's session record is keyed by
///
/// # Errors
///
/// `TokenError::MissingClaim` when the claim is absent or not a string.
pub fn require_username(claims: &ClaimSet) -> Result<&str, TokenError> {
    claims
        .get(USERNAME_CLAIM)
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| TokenError::MissingClaim {
            claim: USERNAME_CLAIM.to_string(),
        })
}

/// Kind of token minted by the issuance service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived, carries custom claims
    Access,
    /// Longer-lived, subject only, chained to one access token
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// When the access token stops verifying
    pub access_expires_at: DateTime<Utc>,

    /// When the refresh token stops verifying
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Seconds until the access token expires, zero once it has
    pub fn access_expires_in(&self) -> i64 {
        (self.access_expires_at - Utc::now()).num_seconds().max(0)
    }
}
