//! Session revocation
//!
//! A session is active while the store still maps its identity to an access
//! token. Deleting that entry, together with the refresh token chained to
//! the access token, is the only way to end a session early.

mod service;


pub use service::SessionService;
