//! # TokenSession Core
//!
//! Domain layer for hybrid stateless/stateful sessions: signed access and
//! refresh tokens that verify on their own, paired with a revocable session
//! record in a key-value store.
//!
//! - [`services::token`] derives key material, encodes/verifies tokens and issues them
//! - [`services::session`] revokes sessions on logout
//! - [`repositories::session`] defines the store seam and an in-memory store

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::entities::{ClaimSet, Claims, SessionRecord, TokenKind, TokenPair};
pub use errors::{AuthError, DomainError, DomainResult, ErrorResponse, StoreError, TokenError};
pub use repositories::{MemorySessionStore, SessionStore};
pub use services::{
    JwtCodec, KeyMaterial, SessionService, SigningKey, TokenCodec, TokenService,
    TokenServiceConfig,
};
