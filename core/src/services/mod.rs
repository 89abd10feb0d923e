//! Business services containing token and session use cases.

pub mod session;
pub mod token;

// Re-export commonly used types
pub use session::SessionService;
pub use token::{
    expiration_from, JwtCodec, KeyMaterial, SigningKey, TokenCodec, TokenService,
    TokenServiceConfig,
};
