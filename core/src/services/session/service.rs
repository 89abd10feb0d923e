//! Session invalidation service

use tracing::{debug, info, warn};

use crate::domain::entities::session::SessionRecord;
use crate::errors::{AuthError, DomainError};
use crate::repositories::SessionStore;

/// Revokes sessions by deleting their store entries
pub struct SessionService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deletes the session registered for `identity`
    ///
    /// Removes `identity -> access token` and the `access token -> refresh
    /// token` entry chained to it.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A session was found and revoked
    /// * `Ok(false)` - No session (never issued, already revoked or expired); nothing was written
    /// * `Err(DomainError::Store)` - The store failed; the session state is unknown
    pub async fn invalidate(&self, identity: &str) -> Result<bool, DomainError> {
        if !self.store.exists(identity).await? {
            debug!("No session registered for '{}'", identity);
            return Ok(false);
        }

        let access_token = self.store.get(identity).await?;
        self.store.delete(identity).await?;

        match access_token {
            Some(access_token) => {
                self.store.delete(&access_token).await?;
                info!("Revoked session for '{}'", identity);
                Ok(true)
            }
            None => {
                // Removed between exists and get by a concurrent logout or TTL expiry.
                debug!("Session for '{}' vanished during invalidation", identity);
                Ok(false)
            }
        }
    }

    /// Logs `identity` out
    ///
    /// # Errors
    ///
    /// * `AuthError::SessionNotFound` - There was no session to end
    /// * `DomainError::Store` - The store failed
    pub async fn logout(&self, identity: &str) -> Result<(), DomainError> {
        if self.invalidate(identity).await? {
            Ok(())
        } else {
            warn!("Logout requested for '{}' without an active session", identity);
            Err(AuthError::SessionNotFound.into())
        }
    }

    /// Whether `identity` still has a registered access token
    pub async fn is_active(&self, identity: &str) -> Result<bool, DomainError> {
        self.store.exists(identity).await
    }

    /// Reads both chained entries for `identity`
    pub async fn find_session(&self, identity: &str) -> Result<Option<SessionRecord>, DomainError> {
        let Some(access_token) = self.store.get(identity).await? else {
            return Ok(None);
        };
        let refresh_token = self.store.get(&access_token).await?;

        Ok(Some(SessionRecord {
            identity: identity.to_string(),
            access_token,
            refresh_token,
        }))
    }
}
