//! Redis-backed session store
//!
//! Keys are identities and access tokens, optionally namespaced with the
//! configured prefix. Expiry is delegated to Redis (`SET ... EX`).

use async_trait::async_trait;
use tracing::debug;
use ts_core::errors::DomainError;
use ts_core::repositories::loggable_key;
use ts_core::SessionStore;

use super::redis_client::RedisClient;

/// `SessionStore` over a shared `RedisClient`
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn key(&self, key: &str) -> String {
        self.client.config().make_key(key)
    }
}

/// Largest `EX` Redis accepts with room left for the current time in milliseconds
pub(crate) const MAX_EXPIRY_SECONDS: u64 = (i64::MAX / 1000 / 2) as u64;

/// Convert a TTL in minutes to the seconds Redis expects
///
/// `None` when the entry would already be expired. Lifetimes past
/// `MAX_EXPIRY_SECONDS` are capped there.
pub(crate) fn ttl_seconds(ttl_minutes: i64) -> Option<u64> {
    if ttl_minutes <= 0 {
        return None;
    }
    u64::try_from(ttl_minutes)
        .ok()
        .map(|minutes| minutes.saturating_mul(60).min(MAX_EXPIRY_SECONDS))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, key: &str, value: &str, ttl_minutes: i64) -> Result<(), DomainError> {
        let key = self.key(key);

        match ttl_seconds(ttl_minutes) {
            Some(seconds) => self.client.set_with_expiry(&key, value, seconds).await?,
            None => {
                // Redis rejects non-positive EX; an expired entry is an absent one.
                debug!("Non-positive TTL for '{}', removing instead", loggable_key(&key));
                self.client.delete(&key).await?;
            }
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.client.get(&self.key(key)).await?)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key(key)).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        Ok(self.client.delete(&self.key(key)).await?)
    }
}
