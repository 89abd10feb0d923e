//! Test doubles for SessionStore

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::errors::{DomainError, StoreError};

use super::memory::MemorySessionStore;
use super::r#trait::SessionStore;

/// Store operation selector for [`FailingSessionStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Set,
    Get,
    Exists,
    Delete,
}

/// Memory-backed store whose selected operations fail with a fixed error
pub struct FailingSessionStore {
    inner: MemorySessionStore,
    failing: Vec<Operation>,
    error: StoreError,
}

impl FailingSessionStore {
    /// Fail `operations` with `StoreError::Unavailable`
    pub fn unavailable(operations: &[Operation]) -> Self {
        Self {
            inner: MemorySessionStore::new(),
            failing: operations.to_vec(),
            error: StoreError::Unavailable {
                message: "connection refused".to_string(),
            },
        }
    }

    /// Fail `operations` with `StoreError::Timeout`
    pub fn timing_out(operations: &[Operation]) -> Self {
        Self {
            inner: MemorySessionStore::new(),
            failing: operations.to_vec(),
            error: StoreError::Timeout {
                operation: "mock".to_string(),
            },
        }
    }

    /// Backing store, for seeding entries directly
    pub fn inner(&self) -> &MemorySessionStore {
        &self.inner
    }

    fn check(&self, operation: Operation) -> Result<(), DomainError> {
        if self.failing.contains(&operation) {
            Err(DomainError::Store(self.error.clone()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn set(&self, key: &str, value: &str, ttl_minutes: i64) -> Result<(), DomainError> {
        self.check(Operation::Set)?;
        self.inner.set(key, value, ttl_minutes).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check(Operation::Get)?;
        self.inner.get(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.check(Operation::Exists)?;
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.check(Operation::Delete)?;
        self.inner.delete(key).await
    }
}

/// Memory-backed store counting writes and deletes
#[derive(Default)]
pub struct CountingSessionStore {
    inner: MemorySessionStore,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    /// Remove the key right after `exists` reports it, as a concurrent logout would
    vanish_after_exists: bool,
}

impl CountingSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store where another caller removes the key between `exists` and `get`
    pub fn racing() -> Self {
        Self {
            vanish_after_exists: true,
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &MemorySessionStore {
        &self.inner
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Total mutating calls made through this store
    pub fn mutations(&self) -> usize {
        self.sets() + self.deletes()
    }
}

#[async_trait]
impl SessionStore for CountingSessionStore {
    async fn set(&self, key: &str, value: &str, ttl_minutes: i64) -> Result<(), DomainError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl_minutes).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.inner.get(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let present = self.inner.exists(key).await?;
        if present && self.vanish_after_exists {
            self.inner.delete(key).await?;
        }
        Ok(present)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }
}
