//! Match session management.
//!
//! Each session owns one match behind its own async lock, so turns and resets
//! on the same session run one at a time while different sessions proceed
//! independently.

use crate::store::{MemoryStore, SessionStore, StoreError};
use derive_more::{Display, Error, From};
use rps_engine::{Match, MatchConfig, MatchError, MatchState, MoveProvider, TurnOutcome};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a match session.
pub type SessionId = String;

type SessionHandle = Arc<tokio::sync::Mutex<Match>>;

/// Errors from session operations.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SessionError {
    /// The match rejected the operation.
    #[display("{}", _0)]
    Match(MatchError),

    /// The session store failed.
    #[display("{}", _0)]
    Store(StoreError),

    /// The session table lock was poisoned by a panicking thread.
    #[display("Session table lock poisoned")]
    #[from(ignore)]
    LockPoisoned,
}

/// Manages all match sessions.
#[derive(Clone)]
pub struct SessionManager {
    config: MatchConfig,
    provider: Arc<dyn MoveProvider>,
    store: Arc<dyn SessionStore>,
    sessions: Arc<Mutex<HashMap<SessionId, SessionHandle>>>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("config", &self.config)
            .field("provider", &self.provider.name())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a session manager.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] for non-positive thresholds.
    #[instrument(skip(provider, store), fields(provider_name = provider.name()))]
    pub fn new(
        config: MatchConfig,
        provider: Arc<dyn MoveProvider>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        info!("Creating session manager");
        Ok(Self {
            config,
            provider,
            store,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Creates a session manager whose sessions live only in memory.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] for non-positive thresholds.
    pub fn in_memory(
        config: MatchConfig,
        provider: Arc<dyn MoveProvider>,
    ) -> Result<Self, MatchError> {
        Self::new(config, provider, Arc::new(MemoryStore::new()))
    }

    /// Thresholds applied to every session.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn table(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionHandle>>, SessionError> {
        self.sessions.lock().map_err(|_| SessionError::LockPoisoned)
    }

    /// Returns the session's match, restoring it from the store or creating a
    /// fresh one on first access.
    ///
    /// The store is read outside the table lock. If another caller loaded the
    /// same session meanwhile, its handle wins.
    #[instrument(skip(self))]
    fn handle(&self, session_id: &str) -> Result<SessionHandle, SessionError> {
        if let Some(handle) = self.table()?.get(session_id) {
            return Ok(Arc::clone(handle));
        }

        let game = match self.store.load(session_id)? {
            Some(state) => {
                debug!(round = state.round(), "Restoring session from store");
                Match::restore(self.config, state)?
            }
            None => {
                info!("Creating new match session");
                Match::new(self.config)?
            }
        };

        let mut sessions = self.table()?;
        let handle = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(game)));
        Ok(Arc::clone(handle))
    }

    /// Whether `handle` is still the one registered for `session_id`.
    fn is_current(&self, session_id: &str, handle: &SessionHandle) -> Result<bool, SessionError> {
        Ok(self
            .table()?
            .get(session_id)
            .is_some_and(|current| Arc::ptr_eq(current, handle)))
    }

    /// Drops `handle` from the table if it is still registered.
    fn evict(&self, session_id: &str, handle: &SessionHandle) -> Result<(), SessionError> {
        let mut sessions = self.table()?;
        if sessions
            .get(session_id)
            .is_some_and(|current| Arc::ptr_eq(current, handle))
        {
            sessions.remove(session_id);
        }
        Ok(())
    }

    /// Locks the session's match, retrying if the session was removed while
    /// this caller waited.
    async fn lock(&self, session_id: &str) -> Result<OwnedMutexGuard<Match>, SessionError> {
        loop {
            let handle = self.handle(session_id)?;
            let guard = Arc::clone(&handle).lock_owned().await;
            if self.is_current(session_id, &handle)? {
                return Ok(guard);
            }
            debug!("Session replaced while waiting; retrying");
        }
    }

    /// Plays one turn in a session.
    ///
    /// On any failure the session keeps the state it had before the call.
    #[instrument(skip(self, raw_token))]
    pub async fn play_turn(
        &self,
        session_id: &str,
        raw_token: &str,
    ) -> Result<TurnOutcome, SessionError> {
        let mut game = self.lock(session_id).await?;

        let before = game.clone();
        let outcome = game.apply_turn(raw_token, self.provider.as_ref()).await?;

        if let Err(e) = self.store.save(session_id, game.state()) {
            warn!(error = %e, "Failed to persist turn; rolling back");
            *game = before;
            return Err(e.into());
        }

        debug!(round = game.state().round(), "Turn persisted");
        Ok(outcome)
    }

    /// Resets a session's match to its starting state.
    ///
    /// The stored record is never restored first, so a session saved under
    /// other thresholds (or corrupted) can always be reset. If the new record
    /// cannot be saved, the session keeps its previous state.
    #[instrument(skip(self))]
    pub async fn reset(&self, session_id: &str) -> Result<MatchState, SessionError> {
        loop {
            let (handle, inserted) = {
                let mut sessions = self.table()?;
                match sessions.get(session_id) {
                    Some(handle) => (Arc::clone(handle), false),
                    None => {
                        let handle = Arc::new(tokio::sync::Mutex::new(Match::new(self.config)?));
                        sessions.insert(session_id.to_string(), Arc::clone(&handle));
                        (handle, true)
                    }
                }
            };

            let mut game = Arc::clone(&handle).lock_owned().await;
            if !self.is_current(session_id, &handle)? {
                continue;
            }

            let before = game.clone();
            game.reset();

            if let Err(e) = self.store.save(session_id, game.state()) {
                warn!(error = %e, "Failed to persist reset; rolling back");
                *game = before;
                if inserted {
                    self.evict(session_id, &handle)?;
                }
                return Err(e.into());
            }

            info!("Session reset");
            return Ok(game.snapshot());
        }
    }

    /// Current state of a session. Never mutates the match.
    #[instrument(skip(self))]
    pub async fn state(&self, session_id: &str) -> Result<MatchState, SessionError> {
        let game = self.lock(session_id).await?;
        Ok(game.snapshot())
    }

    /// Lists every known session, loaded or stored.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, SessionError> {
        let mut ids: BTreeSet<SessionId> = self.store.ids()?.into_iter().collect();
        ids.extend(self.table()?.keys().cloned());
        info!(count = ids.len(), "Listed sessions");
        Ok(ids.into_iter().collect())
    }

    /// Forgets a session in memory and in the store.
    ///
    /// Waits for any turn in flight on the session to finish first.
    #[instrument(skip(self))]
    pub async fn remove(&self, session_id: &str) -> Result<bool, SessionError> {
        let loaded = self.table()?.get(session_id).map(Arc::clone);

        let _guard = match &loaded {
            Some(handle) => Some(Arc::clone(handle).lock_owned().await),
            None => None,
        };
        if let Some(handle) = &loaded {
            self.evict(session_id, handle)?;
        }

        let stored = self.store.remove(session_id)?;
        info!(loaded = loaded.is_some(), stored, "Session removed");
        Ok(loaded.is_some() || stored)
    }
}
