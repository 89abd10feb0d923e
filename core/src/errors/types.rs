//! Error types for token handling, session storage and logout
//!
//! Authentication failures are kept distinct from infrastructure failures so
//! callers can answer "unauthorized" without masking an outage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid signing key: {reason}")]
    InvalidKey { reason: String },

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Error code used in API responses
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::InvalidKey { .. } => "INVALID_KEY",
            TokenError::MalformedToken => "MALFORMED_TOKEN",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::TokenRevoked => "TOKEN_REVOKED",
            TokenError::MissingClaim { .. } => "MISSING_CLAIM",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }

    /// Whether this error means the presented token was rejected
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedToken
                | TokenError::InvalidSignature
                | TokenError::TokenExpired
                | TokenError::TokenRevoked
        )
    }
}

/// Session store failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Session store timed out during {operation}")]
    Timeout { operation: String },
}

/// Authentication flow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No active session for this identity")]
    SessionNotFound,
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// The single response every rejected token collapses into
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Unauthorized")
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidKey { .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", "Token signing is misconfigured")
            }
            TokenError::TokenGenerationFailed | TokenError::MissingClaim { .. } => {
                ErrorResponse::new(err.code(), err.to_string())
            }
            // Never reveal why a token was rejected.
            _ => ErrorResponse::unauthorized(),
        }
    }
}

impl From<StoreError> for ErrorResponse {
    fn from(_: StoreError) -> Self {
        ErrorResponse::new("SERVICE_UNAVAILABLE", "Session store temporarily unavailable")
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionNotFound => ErrorResponse::new("SESSION_NOT_FOUND", err.to_string()),
        }
    }
}
