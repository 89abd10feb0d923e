//! Shared configuration types for the TokenSession workspace
//!
//! Configuration arrives here already parsed; the core crate consumes it
//! through its own immutable service configuration.

pub mod config;

pub use config::{AppConfig, CacheConfig, Environment, JwtConfig, LogFormat, LoggingConfig};
