//! Token issuance service

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::entities::token::{require_username, ClaimSet, Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;

use super::codec::{expiration_from, JwtCodec, TokenCodec};
use super::config::TokenServiceConfig;
use super::key_manager::KeyMaterial;

/// Mints access/refresh tokens and records them in the session store
///
/// The store entries only exist so a session can be revoked later; ordinary
/// request validation is the stateless signature and expiry check.
pub struct TokenService<S: SessionStore, C: TokenCodec = JwtCodec> {
    store: S,
    codec: C,
    keys: KeyMaterial,
}

impl<S: SessionStore> TokenService<S, JwtCodec> {
    /// Creates a new token service using the JWT codec
    ///
    /// # Arguments
    ///
    /// * `store` - Session store recording issued tokens
    /// * `config` - Secret and expiration policy
    ///
    /// # Returns
    ///
    /// A new `TokenService` instance or `TokenError::InvalidKey` if the secret is unusable
    pub fn new(store: S, config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_codec(store, JwtCodec::new(), config)
    }
}

impl<S: SessionStore, C: TokenCodec> TokenService<S, C> {
    /// Creates a token service with an explicit codec
    pub fn with_codec(store: S, codec: C, config: TokenServiceConfig) -> Result<Self, DomainError> {
        let keys = KeyMaterial::new(config)?;
        Ok(Self { store, codec, keys })
    }

    pub fn key_material(&self) -> &KeyMaterial {
        &self.keys
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Issues an access token and registers it under the `username` claim
    ///
    /// # Arguments
    ///
    /// * `claims` - Custom claims; must contain a string `username`
    /// * `subject` - Token subject
    /// * `ttl_minutes` - Minutes until the token expires
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The signed access token
    /// * `Err(DomainError)` - Missing `username`, signing failure or store failure
    pub async fn issue_access_token(
        &self,
        claims: &ClaimSet,
        subject: &str,
        ttl_minutes: i64,
    ) -> Result<String, DomainError> {
        self.access_token_until(claims, subject, expiration_from(ttl_minutes))
            .await
    }

    /// Issues a refresh token and chains it to `access_token` in the store
    ///
    /// The entry is keyed by the access token, not the identity, so logout can
    /// reach it starting from the identity alone.
    pub async fn issue_refresh_token(
        &self,
        subject: &str,
        ttl_minutes: i64,
        access_token: &str,
    ) -> Result<String, DomainError> {
        self.refresh_token_until(subject, expiration_from(ttl_minutes), access_token)
            .await
    }

    /// Issues an access token and its chained refresh token with the configured lifetimes
    pub async fn issue_token_pair(
        &self,
        claims: &ClaimSet,
        subject: &str,
    ) -> Result<TokenPair, DomainError> {
        let access_expires_at = expiration_from(self.keys.access_ttl_minutes());
        let refresh_expires_at = expiration_from(self.keys.refresh_ttl_minutes());

        let access_token = self
            .access_token_until(claims, subject, access_expires_at)
            .await?;
        let refresh_token = self
            .refresh_token_until(subject, refresh_expires_at, &access_token)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Verifies a token with this service's key and returns its claims
    pub fn decode_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.codec.decode_and_verify(token, self.keys.signing_key())
    }

    /// Verifies a token with this service's key
    pub fn verify_token(&self, token: &str) -> Result<(), DomainError> {
        self.codec.verify_only(token, self.keys.signing_key())
    }

    /// Full session check: the token must verify and still be the one
    /// registered for its `username`
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Token valid and session active
    /// * `Err(TokenError::TokenRevoked)` - Token verifies but its session was revoked or replaced
    /// * `Err(DomainError::Store)` - The store could not be consulted
    pub async fn authenticate(&self, access_token: &str) -> Result<Claims, DomainError> {
        let claims = self.decode_token(access_token)?;

        let username = match claims.username() {
            Some(name) => name.to_string(),
            None => {
                warn!("Token for subject '{}' carries no username claim", claims.sub);
                return Err(TokenError::MalformedToken.into());
            }
        };

        match self.store.get(&username).await? {
            Some(registered) if registered == access_token => Ok(claims),
            _ => {
                warn!("Rejected token for '{}': session revoked", username);
                Err(TokenError::TokenRevoked.into())
            }
        }
    }

    async fn access_token_until(
        &self,
        claims: &ClaimSet,
        subject: &str,
        expiration: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let username = require_username(claims)?;
        let token = self
            .codec
            .encode(claims, subject, expiration, self.keys.signing_key())?;

        self.store
            .set(username, &token, self.keys.access_ttl_minutes())
            .await?;

        info!("Issued {} token for '{}'", TokenKind::Access, username);
        Ok(token)
    }

    async fn refresh_token_until(
        &self,
        subject: &str,
        expiration: DateTime<Utc>,
        access_token: &str,
    ) -> Result<String, DomainError> {
        let token = self.codec.encode(
            &ClaimSet::new(),
            subject,
            expiration,
            self.keys.signing_key(),
        )?;

        self.store
            .set(access_token, &token, self.keys.refresh_ttl_minutes())
            .await?;

        info!("Issued {} token for subject '{}'", TokenKind::Refresh, subject);
        Ok(token)
    }
}
