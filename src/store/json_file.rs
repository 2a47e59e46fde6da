//! Session store backed by a single JSON file.

use super::{SessionStore, StoreError};
use rps_engine::MatchState;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, instrument};

type Records = BTreeMap<String, MatchState>;

/// Stores every session as one JSON object keyed by session id.
///
/// Writes go to a sibling temp file that is renamed over the original, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens the store at `path`. The file is created on first save.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Opening JSON session store");
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self))]
    fn read_all(&self) -> Result<Records, StoreError> {
        if !self.path.exists() {
            debug!("Store file absent; treating as empty");
            return Ok(Records::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Records::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    fn write_all(&self, records: &Records) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(records)?)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Store file written");
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Records) -> T) -> Result<T, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::new("json store lock poisoned"))?;
        let mut records = self.read_all()?;
        let value = f(&mut records);
        self.write_all(&records)?;
        Ok(value)
    }
}

impl SessionStore for JsonFileStore {
    #[instrument(skip(self))]
    fn load(&self, session_id: &str) -> Result<Option<MatchState>, StoreError> {
        Ok(self.read_all()?.remove(session_id))
    }

    #[instrument(skip(self, state))]
    fn save(&self, session_id: &str, state: &MatchState) -> Result<(), StoreError> {
        self.modify(|records| {
            records.insert(session_id.to_string(), state.clone());
        })
    }

    #[instrument(skip(self))]
    fn remove(&self, session_id: &str) -> Result<bool, StoreError> {
        self.modify(|records| records.remove(session_id).is_some())
    }

    #[instrument(skip(self))]
    fn ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_all()?.into_keys().collect())
    }
}
