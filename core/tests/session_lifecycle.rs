//! End-to-end session lifecycle against the in-memory store
//!
//! Run with: cargo test -p ts_core --test session_lifecycle

use std::sync::Arc;

use serde_json::json;
use ts_core::{
    ClaimSet, DomainError, ErrorResponse, MemorySessionStore, SessionService, SessionStore,
    TokenError, TokenService, TokenServiceConfig,
};
use ts_core::services::token::encode_base64_secret;
use ts_shared::config::JwtConfig;

fn jwt_config() -> JwtConfig {
    JwtConfig::new(encode_base64_secret("integration-secret-with-at-least-32-bytes"))
        .with_access_minutes(120)
        .with_refresh_minutes(1800)
}

fn alice() -> ClaimSet {
    json!({"username": "alice", "role": "user"})
        .as_object()
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn test_issue_authenticate_logout() {
    let store = Arc::new(MemorySessionStore::new());
    let tokens = TokenService::new(Arc::clone(&store), TokenServiceConfig::from(&jwt_config()))
        .expect("Failed to create token service");
    let sessions = SessionService::new(Arc::clone(&store));

    let access = tokens.issue_access_token(&alice(), "alice", 120).await.unwrap();
    let refresh = tokens
        .issue_refresh_token("alice", 1800, &access)
        .await
        .unwrap();

    let claims = tokens.decode_token(&access).unwrap();
    assert_eq!(claims.get_str("role"), Some("user"));
    assert!(tokens.authenticate(&access).await.is_ok());

    assert_eq!(store.get("alice").await.unwrap(), Some(access.clone()));
    assert_eq!(store.get(&access).await.unwrap(), Some(refresh.clone()));

    sessions.logout("alice").await.unwrap();

    assert!(!store.exists("alice").await.unwrap());
    assert!(!store.exists(&access).await.unwrap());

    // Signature and expiry still hold; the session does not.
    assert!(tokens.verify_token(&access).is_ok());
    assert!(tokens.verify_token(&refresh).is_ok());
    let rejected = tokens.authenticate(&access).await.unwrap_err();
    assert_eq!(rejected, DomainError::Token(TokenError::TokenRevoked));
    assert!(rejected.is_authentication_failure());

    let response: ErrorResponse = rejected.into();
    assert_eq!(response.error, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_relogin_after_logout() {
    let store = Arc::new(MemorySessionStore::new());
    let tokens = TokenService::new(Arc::clone(&store), jwt_config().into()).unwrap();
    let sessions = SessionService::new(Arc::clone(&store));

    let first = tokens.issue_token_pair(&alice(), "alice").await.unwrap();
    assert!(sessions.invalidate("alice").await.unwrap());
    assert!(!sessions.invalidate("alice").await.unwrap());

    // Tokens carry whole-second timestamps; a new second yields a new token.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let second = tokens.issue_token_pair(&alice(), "alice").await.unwrap();
    assert_ne!(first.access_token, second.access_token);
    assert!(sessions.is_active("alice").await.unwrap());
    assert_eq!(store.get("alice").await.unwrap(), Some(second.access_token.clone()));
    assert!(tokens.authenticate(&second.access_token).await.is_ok());
    assert!(!store.exists(&first.access_token).await.unwrap());
    assert_eq!(
        tokens.authenticate(&first.access_token).await,
        Err(DomainError::Token(TokenError::TokenRevoked))
    );
}

#[tokio::test]
async fn test_logout_without_session() {
    let store = Arc::new(MemorySessionStore::new());
    let sessions = SessionService::new(Arc::clone(&store));

    let error = sessions.logout("ghost").await.unwrap_err();
    assert!(error.is_authentication_failure());
    assert!(store.is_empty().await);
}
