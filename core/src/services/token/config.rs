//! Configuration for the token service

use ts_shared::config::JwtConfig;

/// Immutable configuration handed to the token service at construction
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// Base64-encoded HMAC secret
    pub secret_key: String,
    /// Access token lifetime, also the TTL of the `identity -> access token` entry
    pub access_token_expiration_minutes: i64,
    /// Refresh token lifetime, also the TTL of the `access token -> refresh token` entry
    pub refresh_token_expiration_minutes: i64,
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("secret_key", &"<redacted>")
            .field("access_token_expiration_minutes", &self.access_token_expiration_minutes)
            .field("refresh_token_expiration_minutes", &self.refresh_token_expiration_minutes)
            .finish()
    }
}

impl TokenServiceConfig {
    pub fn new(
        secret_key: impl Into<String>,
        access_token_expiration_minutes: i64,
        refresh_token_expiration_minutes: i64,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            access_token_expiration_minutes,
            refresh_token_expiration_minutes,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self::new(
            config.secret_key.clone(),
            config.access_token_expiration_minutes,
            config.refresh_token_expiration_minutes,
        )
    }
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(config: JwtConfig) -> Self {
        Self::from(&config)
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        JwtConfig::default().into()
    }
}
