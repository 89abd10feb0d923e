//! Domain entities representing tokens and sessions.

pub mod session;
pub mod token;

// Re-export commonly used types
pub use session::SessionRecord;
pub use token::{
    require_username, ClaimSet, Claims, TokenKind, TokenPair,
    RESERVED_CLAIMS, USERNAME_CLAIM,
};
