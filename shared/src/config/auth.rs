//! Token signing and expiration configuration

use serde::{Deserialize, Serialize};

/// Placeholder secret used when nothing is configured (Base64 of a 46-byte phrase)
const DEVELOPMENT_SECRET: &str = "ZGV2ZWxvcG1lbnQtc2VjcmV0LXBsZWFzZS1jaGFuZ2UtaW4tcHJvZHVjdGlvbg==";

/// Plain environment variables and the `jwt.*` settings they override
pub const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("JWT_SECRET_KEY", "jwt.secret_key"),
    (
        "JWT_ACCESS_TOKEN_EXPIRATION_MINUTES",
        "jwt.access_token_expiration_minutes",
    ),
    (
        "JWT_REFRESH_TOKEN_EXPIRATION_MINUTES",
        "jwt.refresh_token_expiration_minutes",
    ),
];

/// JWT signing configuration
///
/// The secret is stored Base64-encoded; the signing key is derived by decoding it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Base64-encoded shared secret for HMAC signing
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_minutes")]
    pub access_token_expiration_minutes: i64,

    /// Refresh token lifetime in minutes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_token_expiration_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            access_token_expiration_minutes: default_access_minutes(),
            refresh_token_expiration_minutes: default_refresh_minutes(),
        }
    }
}

impl JwtConfig {
    /// Create a configuration with the given Base64-encoded secret
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Set the access token lifetime in minutes
    pub fn with_access_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiration_minutes = minutes;
        self
    }

    /// Set the refresh token lifetime in minutes
    pub fn with_refresh_minutes(mut self, minutes: i64) -> Self {
        self.refresh_token_expiration_minutes = minutes;
        self
    }

    /// Check if using the built-in development secret
    pub fn is_using_default_secret(&self) -> bool {
        self.secret_key == DEVELOPMENT_SECRET
    }

    /// Validate scalar settings. Key material itself is checked when the key is derived.
    pub fn validate(&self) -> Result<(), String> {
        if self.secret_key.trim().is_empty() {
            return Err("JWT secret key must not be empty".to_string());
        }
        if self.access_token_expiration_minutes <= 0 {
            return Err(format!(
                "access token expiration must be positive, got {}",
                self.access_token_expiration_minutes
            ));
        }
        if self.refresh_token_expiration_minutes < self.access_token_expiration_minutes {
            return Err(format!(
                "refresh token expiration ({}) must not be shorter than access token expiration ({})",
                self.refresh_token_expiration_minutes, self.access_token_expiration_minutes
            ));
        }
        Ok(())
    }
}

fn default_secret_key() -> String {
    DEVELOPMENT_SECRET.to_string()
}

fn default_access_minutes() -> i64 {
    30
}

fn default_refresh_minutes() -> i64 {
    420
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiration_minutes, 30);
        assert_eq!(config.refresh_token_expiration_minutes, 420);
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("c2VjcmV0")
            .with_access_minutes(120)
            .with_refresh_minutes(1800);

        assert_eq!(config.access_token_expiration_minutes, 120);
        assert_eq!(config.refresh_token_expiration_minutes, 1800);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(JwtConfig::new("   ").validate().is_err());
        assert!(JwtConfig::default().with_access_minutes(0).validate().is_err());
        assert!(JwtConfig::default()
            .with_access_minutes(60)
            .with_refresh_minutes(30)
            .validate()
            .is_err());
    }
}
