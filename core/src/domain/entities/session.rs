//! Store-side view of a login session.

use serde::{Deserialize, Serialize};

/// The two chained store entries created at issuance:
/// `identity -> access_token` and `access_token -> refresh_token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Identity (username) the session is keyed by
    pub identity: String,

    /// Access token currently registered for the identity
    pub access_token: String,

    /// Refresh token chained to the access token, if it has not expired
    pub refresh_token: Option<String>,
}

impl SessionRecord {
    /// Whether a refresh token is still chained to this session
    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}
