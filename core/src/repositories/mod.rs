pub mod session;

pub use session::{loggable_key, MemorySessionStore, SessionStore};

#[cfg(test)]
pub use session::{CountingSessionStore, FailingSessionStore};
