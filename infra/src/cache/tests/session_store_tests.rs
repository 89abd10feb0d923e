//! Unit tests for the Redis session store

use ts_core::SessionStore;

use crate::cache::session_store::{ttl_seconds, MAX_EXPIRY_SECONDS};
use crate::cache::{CacheConfig, RedisClient, RedisSessionStore};

#[test]
fn test_ttl_minutes_to_seconds() {
    assert_eq!(ttl_seconds(1), Some(60));
    assert_eq!(ttl_seconds(420), Some(25_200));
    assert_eq!(ttl_seconds(0), None);
    assert_eq!(ttl_seconds(-5), None);
    assert_eq!(ttl_seconds(i64::MAX), Some(MAX_EXPIRY_SECONDS));
    assert_eq!(ttl_seconds(i64::MAX / 60), Some(MAX_EXPIRY_SECONDS));
}

async fn connect(prefix: &str) -> RedisSessionStore {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let client = RedisClient::new(CacheConfig::new(url).with_prefix(prefix))
        .await
        .unwrap();
    RedisSessionStore::new(client)
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_prefix_is_applied() {
    let store = connect("ts_infra_unit").await;

    store.set("alice", "token", 5).await.unwrap();

    let raw = store.client().get("ts_infra_unit:alice").await.unwrap();
    assert_eq!(raw, Some("token".to_string()));
    assert!(store.delete("alice").await.unwrap());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_non_positive_ttl_removes_entry() {
    let store = connect("ts_infra_unit").await;

    store.set("bob", "token", 5).await.unwrap();
    store.set("bob", "newer", 0).await.unwrap();

    assert!(!store.exists("bob").await.unwrap());
    assert_eq!(store.get("bob").await.unwrap(), None);
}
