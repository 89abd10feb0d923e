//! Cache module for Redis-backed session storage
//!
//! Provides a Redis client with per-command timeouts and retry logic, and the
//! `SessionStore` implementation built on top of it.

pub mod redis_client;
pub mod session_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use session_store::RedisSessionStore;

// Re-export commonly used types
pub use ts_shared::config::CacheConfig;
