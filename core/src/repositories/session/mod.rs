pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use r#trait::{loggable_key, SessionStore};
pub use memory::MemorySessionStore;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::{CountingSessionStore, FailingSessionStore};

#[cfg(test)]
mod tests;
