//! # Infrastructure Layer
//!
//! Concrete adapters for the TokenSession domain:
//! - **Cache**: Redis client with retries and a Redis-backed `SessionStore`
//! - **Telemetry**: `tracing` subscriber setup driven by `LoggingConfig`
//! - **Bootstrap**: loads configuration and wires the token and session services

use std::sync::Arc;

use ts_core::errors::{DomainError, StoreError};
use ts_core::{SessionService, TokenService, TokenServiceConfig};
use ts_shared::config::{AppConfig, Environment};

/// Cache module - Redis client and session store
pub mod cache;

/// Tracing subscriber setup
pub mod telemetry;

use cache::{RedisClient, RedisSessionStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A Redis command got no response within the configured timeout
    #[error("Cache operation '{operation}' timed out")]
    Timeout { operation: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised while building domain services
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(error: config::ConfigError) -> Self {
        InfrastructureError::Config(error.to_string())
    }
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Timeout { operation } => StoreError::Timeout { operation },
            InfrastructureError::Domain(DomainError::Store(inner)) => inner,
            other => StoreError::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Domain(inner) => inner,
            InfrastructureError::Config(message) => DomainError::Config { message },
            other => DomainError::Store(other.into()),
        }
    }
}

/// Token and session services sharing one Redis-backed store
pub struct InfrastructureServices {
    pub config: AppConfig,
    pub tokens: TokenService<Arc<RedisSessionStore>>,
    pub sessions: SessionService<Arc<RedisSessionStore>>,
}

/// Initialize infrastructure services
///
/// Loads `.env` files (if present), reads `config_path`, `TOKENSESSION__*`
/// and the plain `JWT_*`/`REDIS_*` variables, installs the tracing subscriber, connects to Redis and builds
/// both services over the same store.
///
/// # Errors
/// * `InfrastructureError::Config` - Unreadable configuration or a rejected secret
/// * `InfrastructureError::Cache` - Redis could not be reached
pub async fn initialize(config_path: &str) -> Result<InfrastructureServices, InfrastructureError> {
    let config = load_config(config_path)?;
    telemetry::init_tracing(&config.logging);

    tracing::info!("Initializing infrastructure for {}", config.environment);

    if config.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            return Err(InfrastructureError::Config(
                "JWT secret must be set in production".to_string(),
            ));
        }
        tracing::warn!("Using the development JWT secret");
    }
    config.jwt.validate().map_err(InfrastructureError::Config)?;

    let client = RedisClient::new(config.cache.clone()).await?;
    let store = Arc::new(RedisSessionStore::new(client));

    let tokens = TokenService::new(Arc::clone(&store), TokenServiceConfig::from(&config.jwt))?;
    let sessions = SessionService::new(store);

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices {
        config,
        tokens,
        sessions,
    })
}

/// Load configuration from a file and the environment
///
/// `.env.<environment>` is read before `.env`; neither overrides variables
/// already set in the process.
fn load_config(config_path: &str) -> Result<AppConfig, InfrastructureError> {
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok(); // Load .env file if present

    let config = AppConfig::load(config_path)?;
    Ok(config)
}
