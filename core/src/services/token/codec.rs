//! Compact JWS encoding and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::entities::token::{ClaimSet, Claims, RESERVED_CLAIMS};
use crate::errors::{DomainError, TokenError};

use super::key_manager::SigningKey;

/// Encodes claims into signed tokens and verifies them back
pub trait TokenCodec: Send + Sync {
    /// Signs `claims` plus `sub`, `iat = now` and `exp = expiration`
    fn encode(
        &self,
        claims: &ClaimSet,
        subject: &str,
        expiration: DateTime<Utc>,
        key: &SigningKey,
    ) -> Result<String, DomainError>;

    /// Verifies the signature, then expiry, and returns the payload
    fn decode_and_verify(&self, token: &str, key: &SigningKey) -> Result<Claims, DomainError>;

    /// Same checks as [`TokenCodec::decode_and_verify`], discarding the payload
    fn verify_only(&self, token: &str, key: &SigningKey) -> Result<(), DomainError> {
        self.decode_and_verify(token, key).map(|_| ())
    }
}

/// Absolute UTC instant `minutes` from now
///
/// Saturates at the representable range instead of overflowing.
pub fn expiration_from(minutes: i64) -> DateTime<Utc> {
    Duration::try_minutes(minutes)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .unwrap_or(if minutes < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// HMAC-SHA2 JWT codec built on `jsonwebtoken`
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtCodec;

impl JwtCodec {
    pub fn new() -> Self {
        Self
    }

    fn validation(key: &SigningKey) -> Validation {
        let mut validation = Validation::new(key.algorithm());
        // Any HMAC header is checked against our key, so a foreign key reads as a bad signature.
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenCodec for JwtCodec {
    fn encode(
        &self,
        claims: &ClaimSet,
        subject: &str,
        expiration: DateTime<Utc>,
        key: &SigningKey,
    ) -> Result<String, DomainError> {
        let mut payload = claims.clone();
        for reserved in RESERVED_CLAIMS {
            payload.remove(reserved);
        }
        payload.insert("sub".to_string(), Value::from(subject));
        payload.insert("iat".to_string(), Value::from(Utc::now().timestamp()));
        payload.insert("exp".to_string(), Value::from(expiration.timestamp()));

        let header = Header::new(key.algorithm());
        encode(&header, &payload, key.encoding_key()).map_err(|e| {
            error!("Failed to sign token: {}", e);
            match e.kind() {
                ErrorKind::InvalidKeyFormat | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidKey {
                        reason: e.to_string(),
                    }
                    .into()
                }
                _ => DomainError::Token(TokenError::TokenGenerationFailed),
            }
        })
    }

    fn decode_and_verify(&self, token: &str, key: &SigningKey) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, key.decoding_key(), &Self::validation(key))
            .map_err(|e| {
                debug!("Token rejected: {:?}", e.kind());
                let kind = match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenError::InvalidSignature
                    }
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidKeyFormat => TokenError::InvalidKey {
                        reason: e.to_string(),
                    },
                    _ => TokenError::MalformedToken,
                };
                DomainError::Token(kind)
            })?;

        Ok(token_data.claims)
    }
}
