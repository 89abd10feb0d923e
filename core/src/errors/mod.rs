//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, ErrorResponse, StoreError, TokenError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// The presented credentials were rejected (bad, expired or revoked token)
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            DomainError::Token(err) => err.is_rejection(),
            DomainError::Auth(AuthError::SessionNotFound) => true,
            _ => false,
        }
    }

    /// The failure came from the session store and may succeed on retry
    pub fn is_infrastructure_failure(&self) -> bool {
        matches!(self, DomainError::Store(_))
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Config { .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", "Token signing is misconfigured")
            }
            DomainError::Auth(e) => e.into(),
            DomainError::Token(e) => e.into(),
            DomainError::Store(e) => e.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
