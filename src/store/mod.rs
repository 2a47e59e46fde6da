//! Persistence for match records keyed by session id.

mod error;
mod json_file;
mod memory;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use rps_engine::MatchState;

/// Key-value storage for flat match records.
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Loads the record for a session, if one was saved.
    fn load(&self, session_id: &str) -> Result<Option<MatchState>, StoreError>;

    /// Saves (or replaces) the record for a session.
    fn save(&self, session_id: &str, state: &MatchState) -> Result<(), StoreError>;

    /// Deletes a session's record. Returns whether one existed.
    fn remove(&self, session_id: &str) -> Result<bool, StoreError>;

    /// All stored session ids, sorted.
    fn ids(&self) -> Result<Vec<String>, StoreError>;
}
