//! Redis cache client implementation
//!
//! Wraps a multiplexed connection with a per-command response timeout and
//! bounded retries for transient failures. Only the commands the session
//! store needs are exposed: SET with expiry, GET, EXISTS, DEL and TTL.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};
use ts_core::repositories::loggable_key;

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Upper bound for the exponential backoff between attempts
const MAX_RETRY_DELAY_MS: u64 = 5000;

type CommandFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client with per-command timeouts and retry logic
///
/// Cloning is cheap: clones share the underlying multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisClient {
    /// Connect using `config`, retrying the initial connection with backoff
    ///
    /// # Errors
    /// * `InfrastructureError::Config` - The URL could not be parsed
    /// * `InfrastructureError::Cache` - No connection after `max_retries` attempts
    /// * `InfrastructureError::Timeout` - The final attempt got no answer in time
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(
            "Creating Redis client for {} (timeout {}ms, {} attempts)",
            mask_url(&config.url),
            config.response_timeout_ms,
            config.max_retries
        );

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::connect_with_retry(&client, &config).await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.config.response_timeout_ms)
    }

    async fn connect_with_retry(
        client: &Client,
        config: &CacheConfig,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let max_attempts = config.max_retries.max(1);
        let response_timeout = Duration::from_millis(config.response_timeout_ms);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!("Connecting to Redis (attempt {}/{})", attempts, max_attempts);

            let outcome = with_timeout(
                "CONNECT",
                response_timeout,
                client.get_multiplexed_async_connection(),
            )
            .await;

            match outcome {
                Ok(connection) => {
                    info!("Connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    let delay = backoff_delay(config.retry_delay_ms, attempts);
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// SET `key` to `value` with a lifetime of `expiry_seconds` (must be > 0)
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", loggable_key(key), expiry_seconds);

        self.execute_with_retry("SET", |mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
    }

    /// GET `key`; `None` when absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let value = self
            .execute_with_retry("GET", |mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.get::<_, Option<String>>(key).await })
            })
            .await?;

        debug!("Key '{}' found: {}", loggable_key(key), value.is_some());
        Ok(value)
    }

    /// DEL `key`; `true` if something was removed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let deleted_count = self
            .execute_with_retry("DEL", |mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await?;

        debug!("Deleted key '{}': {}", loggable_key(key), deleted_count > 0);
        Ok(deleted_count > 0)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        self.execute_with_retry("EXISTS", |mut conn| {
            let key = key.to_string();

            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
    }

    /// Remaining lifetime of `key` in seconds
    ///
    /// `None` if the key does not exist or has no expiry.
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let ttl = self
            .execute_with_retry("TTL", |mut conn| {
                let key = key.to_string();

                Box::pin(async move { conn.ttl::<_, i64>(key).await })
            })
            .await?;

        Ok((ttl >= 0).then_some(ttl))
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry("PING", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if response == "PONG" {
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Run `operation` with the response timeout, retrying transient failures
    ///
    /// Timeouts are retried like I/O errors; if the last attempt times out the
    /// error stays `InfrastructureError::Timeout`.
    async fn execute_with_retry<F, T>(
        &self,
        name: &str,
        operation: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> CommandFuture<T>,
    {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match with_timeout(name, self.response_timeout(), operation(conn)).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < max_attempts && is_retriable(&e) => {
                    let delay = backoff_delay(self.config.retry_delay_ms, attempts);
                    warn!(
                        "Redis {} failed (attempt {}/{}): {}. Retrying in {}ms...",
                        name, attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    error!("Redis {} failed after {} attempts: {}", name, attempts, e);
                    return Err(e);
                }
            }
        }
    }
}

/// Await `future`, giving up after `limit`
pub(crate) async fn with_timeout<T, Fut>(
    operation: &str,
    limit: Duration,
    future: Fut,
) -> Result<T, InfrastructureError>
where
    Fut: Future<Output = RedisResult<T>>,
{
    match timeout(limit, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(InfrastructureError::Cache(e)),
        Err(_) => Err(InfrastructureError::Timeout {
            operation: operation.to_string(),
        }),
    }
}

/// Delay before retry number `attempt` (1-based): doubles each time, capped
pub(crate) fn backoff_delay(base_ms: u64, attempt: u32) -> u64 {
    let factor = 1u64 << attempt.saturating_sub(1).min(16);
    base_ms.saturating_mul(factor).min(MAX_RETRY_DELAY_MS)
}

pub(crate) fn is_retriable(error: &InfrastructureError) -> bool {
    match error {
        InfrastructureError::Timeout { .. } => true,
        InfrastructureError::Cache(e) => is_retriable_error(e),
        _ => false,
    }
}

/// Whether a Redis error is transient
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let (Some(at_pos), Some(proto_end)) = (url.rfind('@'), url.find("://")) {
        if at_pos > proto_end {
            return format!("{}****{}", &url[..proto_end + 3], &url[at_pos..]);
        }
    }
    url.to_string()
}
