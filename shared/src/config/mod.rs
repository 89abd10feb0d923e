//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing secret and expiration policy
//! - `cache` - Redis session store configuration
//! - `environment` - environment detection and logging configuration

pub mod auth;
pub mod cache;
pub mod environment;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Prefix for environment variable overrides, e.g. `TOKENSESSION__JWT__SECRET_KEY`
pub const ENV_PREFIX: &str = "TOKENSESSION";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Token signing configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Session store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load layered configuration from the process environment
    ///
    /// Later sources win: logging defaults for the environment, an optional
    /// file at `path`, `TOKENSESSION__*` variables, then the plain variables
    /// (`JWT_SECRET_KEY`, `REDIS_URL`, `ENVIRONMENT`, ...).
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// [`AppConfig::load`] with plain variables read through `lookup`
    pub fn load_with<F>(path: &str, lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let environment = match environment::ENV_VARS.iter().find_map(|name| lookup(*name)) {
            Some(name) => Some(
                name.parse::<Environment>()
                    .map_err(config::ConfigError::Message)?,
            ),
            None => None,
        };
        let logging = LoggingConfig::for_environment(environment.unwrap_or_default());

        let mut builder = config::Config::builder()
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", logging.format.as_str())?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("environment", environment.map(|env| env.to_string()))?;

        for (variable, key) in auth::ENV_OVERRIDES.iter().chain(cache::ENV_OVERRIDES.iter()) {
            builder = builder.set_override_option(*key, lookup(*variable))?;
        }

        builder.build()?.try_deserialize()
    }
}
