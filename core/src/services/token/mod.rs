//! Token service module for JWT management
//!
//! - HMAC key material derived from a Base64 secret
//! - Compact JWS encoding and verification
//! - Access/refresh issuance recorded in the session store

mod codec;
mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use codec::{expiration_from, JwtCodec, TokenCodec};
pub use config::TokenServiceConfig;
pub use key_manager::{
    derive_signing_key, encode_base64_secret, KeyMaterial, SigningKey, MIN_KEY_BYTES,
};
pub use service::TokenService;
