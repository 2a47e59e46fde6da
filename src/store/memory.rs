//! In-process session store.

use super::{SessionStore, StoreError};
use rps_engine::MatchState;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Keeps session records in memory. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, MatchState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, MatchState>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }
}

impl SessionStore for MemoryStore {
    #[instrument(skip(self))]
    fn load(&self, session_id: &str) -> Result<Option<MatchState>, StoreError> {
        Ok(self.lock()?.get(session_id).cloned())
    }

    #[instrument(skip(self, state))]
    fn save(&self, session_id: &str, state: &MatchState) -> Result<(), StoreError> {
        self.lock()?.insert(session_id.to_string(), state.clone());
        debug!("Session saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, session_id: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(session_id).is_some())
    }

    #[instrument(skip(self))]
    fn ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids: Vec<String> = self.lock()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
