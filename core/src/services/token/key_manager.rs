//! HMAC key material for JWT signing and verification

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Smallest secret accepted for HMAC signing (256 bits)
pub const MIN_KEY_BYTES: usize = 32;

/// Symmetric key used both to sign and to verify
///
/// The HMAC variant follows the key length: 64 bytes or more selects HS512,
/// 48 or more HS384, anything else HS256.
#[derive(Clone)]
pub struct SigningKey {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    len: usize,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &self.algorithm)
            .field("len", &self.len)
            .finish()
    }
}

impl SigningKey {
    /// Builds a key from raw secret bytes
    ///
    /// # Errors
    ///
    /// `TokenError::InvalidKey` if fewer than [`MIN_KEY_BYTES`] bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DomainError> {
        if bytes.len() < MIN_KEY_BYTES {
            return Err(TokenError::InvalidKey {
                reason: format!(
                    "secret is {} bytes, at least {} are required",
                    bytes.len(),
                    MIN_KEY_BYTES
                ),
            }
            .into());
        }

        let algorithm = match bytes.len() {
            n if n >= 64 => Algorithm::HS512,
            n if n >= 48 => Algorithm::HS384,
            _ => Algorithm::HS256,
        };

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            len: bytes.len(),
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Length of the secret in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Decodes a Base64 secret and builds the signing key from it
///
/// # Errors
///
/// `TokenError::InvalidKey` if the secret is not valid Base64 or too short.
pub fn derive_signing_key(base64_secret: &str) -> Result<SigningKey, DomainError> {
    let bytes = STANDARD
        .decode(base64_secret.trim())
        .map_err(|e| TokenError::InvalidKey {
            reason: format!("secret is not valid Base64: {}", e),
        })?;

    SigningKey::from_bytes(&bytes)
}

/// Base64-encodes a plain-text secret's UTF-8 bytes
pub fn encode_base64_secret(plain_secret: &str) -> String {
    STANDARD.encode(plain_secret.as_bytes())
}

/// Secret, derived signing key and expiration policy
///
/// The key is derived once at construction, so a bad secret fails fast.
#[derive(Clone)]
pub struct KeyMaterial {
    config: TokenServiceConfig,
    signing_key: SigningKey,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("signing_key", &self.signing_key)
            .field("access_ttl_minutes", &self.config.access_token_expiration_minutes)
            .field("refresh_ttl_minutes", &self.config.refresh_token_expiration_minutes)
            .finish()
    }
}

impl KeyMaterial {
    /// Creates key material from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(KeyMaterial)` - Key derived successfully
    /// * `Err(DomainError)` - The secret is malformed or too short
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        let signing_key = derive_signing_key(&config.secret_key)?;
        Ok(Self { config, signing_key })
    }

    /// The raw Base64-encoded secret
    pub fn secret(&self) -> &str {
        &self.config.secret_key
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    pub fn access_ttl_minutes(&self) -> i64 {
        self.config.access_token_expiration_minutes
    }

    pub fn refresh_ttl_minutes(&self) -> i64 {
        self.config.refresh_token_expiration_minutes
    }
}
