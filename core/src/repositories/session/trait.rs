//! Session store trait: a key-value store with per-key time-to-live.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DomainError;

/// Key-value store holding the revocable half of a session
///
/// Keys are identities or access-token strings, values are token strings.
/// Every operation must be atomic per key; no cross-key transactions are
/// required. Expiry is enforced by the store: once a key's TTL has elapsed
/// it reads as absent without an explicit delete.
///
/// # Errors
/// Infrastructure failures are reported as `DomainError::Store`, with
/// timeouts kept distinct. An absent key is never an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `value` under `key`, overwriting unconditionally
    ///
    /// # Arguments
    /// * `key` - Identity or access token
    /// * `value` - Token string
    /// * `ttl_minutes` - Time to live; zero or negative means already expired
    async fn set(&self, key: &str, value: &str, ttl_minutes: i64) -> Result<(), DomainError>;

    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key present and not expired
    /// * `Ok(None)` - Key absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Check whether `key` is present and not expired
    async fn exists(&self, key: &str) -> Result<bool, DomainError>;

    /// Delete `key`. Idempotent: deleting an absent key succeeds.
    ///
    /// # Returns
    /// * `Ok(true)` - A key was removed
    /// * `Ok(false)` - Nothing was stored under `key`
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;
}

/// Key as it may appear in logs: identities verbatim, token-shaped keys masked
///
/// A key is token-shaped when its last `:`-separated segment (prefixes are
/// `prefix:key`) has three dot-separated parts and starts with a JSON header
/// (`eyJ`).
pub fn loggable_key(key: &str) -> &str {
    let tail = key.rsplit(':').next().unwrap_or(key);
    if tail.starts_with("eyJ") && tail.matches('.').count() == 2 {
        "<token>"
    } else {
        key
    }
}

#[async_trait]
impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    async fn set(&self, key: &str, value: &str, ttl_minutes: i64) -> Result<(), DomainError> {
        (**self).set(key, value, ttl_minutes).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        (**self).exists(key).await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        (**self).delete(key).await
    }
}
