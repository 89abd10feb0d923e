//! Unit tests for the in-memory session store

use std::sync::Arc;

use crate::repositories::session::{loggable_key, MemorySessionStore, SessionStore};

#[tokio::test]
async fn test_set_get_exists_delete() {
    let store = MemorySessionStore::new();

    store.set("alice", "access-token", 30).await.unwrap();

    assert_eq!(store.get("alice").await.unwrap(), Some("access-token".to_string()));
    assert!(store.exists("alice").await.unwrap());

    assert!(store.delete("alice").await.unwrap());
    assert_eq!(store.get("alice").await.unwrap(), None);
    assert!(!store.exists("alice").await.unwrap());
}

#[tokio::test]
async fn test_set_overwrites_unconditionally() {
    let store = MemorySessionStore::new();

    store.set("alice", "first", 30).await.unwrap();
    store.set("alice", "second", 30).await.unwrap();

    assert_eq!(store.get("alice").await.unwrap(), Some("second".to_string()));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = MemorySessionStore::new();

    assert!(!store.delete("nobody").await.unwrap());
    assert!(!store.delete("nobody").await.unwrap());
}

#[tokio::test]
async fn test_zero_ttl_reads_as_absent() {
    let store = MemorySessionStore::new();

    store.set("alice", "access-token", 0).await.unwrap();

    assert_eq!(store.get("alice").await.unwrap(), None);
    assert!(!store.exists("alice").await.unwrap());
}

#[tokio::test]
async fn test_negative_ttl_reads_as_absent() {
    let store = MemorySessionStore::new();

    store.set("alice", "access-token", -5).await.unwrap();

    assert!(!store.exists("alice").await.unwrap());
    assert!(!store.delete("alice").await.unwrap());
}

#[tokio::test]
async fn test_purge_expired() {
    let store = MemorySessionStore::new();

    store.set("expired-1", "v", 0).await.unwrap();
    store.set("expired-2", "v", 0).await.unwrap();
    store.set("live", "v", 10).await.unwrap();

    assert_eq!(store.purge_expired().await, 2);
    assert_eq!(store.len().await, 1);
    assert!(!store.is_empty().await);
}

#[tokio::test]
async fn test_shared_through_arc() {
    let store = Arc::new(MemorySessionStore::new());
    let writer: Arc<MemorySessionStore> = Arc::clone(&store);

    writer.set("alice", "token", 5).await.unwrap();

    assert!(SessionStore::exists(&store, "alice").await.unwrap());
}

#[test]
fn test_loggable_key_masks_tokens() {
    assert_eq!(loggable_key("alice"), "alice");
    assert_eq!(loggable_key("alice@example.com"), "alice@example.com");
    assert_eq!(loggable_key("eyJhbGciOi.eyJzdWIiOi.c2lnbmF0dXJl"), "<token>");
    assert_eq!(loggable_key("session:eyJhbGciOi.eyJzdWIiOi.c2lnbmF0dXJl"), "<token>");
}

#[test]
fn test_loggable_key_keeps_dotted_identities() {
    assert_eq!(loggable_key("john.doe@example.com"), "john.doe@example.com");
    assert_eq!(loggable_key("a.b.c"), "a.b.c");
    assert_eq!(loggable_key("session:john.doe@example.com"), "session:john.doe@example.com");
}

#[tokio::test]
async fn test_huge_ttl_never_expires() {
    let store = MemorySessionStore::new();

    store.set("alice", "access-token", i64::MAX).await.unwrap();
    store.set("bob", "access-token", i64::MAX / 60).await.unwrap();

    assert_eq!(store.get("alice").await.unwrap(), Some("access-token".to_string()));
    assert!(store.exists("bob").await.unwrap());
    assert_eq!(store.purge_expired().await, 0);
}
