//! Configuration controller.
//!
//! The only mutation and validation boundary for server configuration. The
//! CLI and the networking layer consume this controller; neither touches the
//! store directly. One instance is owned by [`crate::AppCore`] and passed by
//! reference to whatever needs it.

use parking_lot::RwLock;
use thiserror::Error;
use tracing::warn;

use deepcap_storage::{ConfigStore, ServerConfig, StoreError, ValidationError};

use crate::endpoints::{self, EffectiveEndpoints, resolve};

/// Commit failure, tagged so callers can tell invalid input from a storage
/// problem.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("configuration is invalid")]
    Invalid(Vec<ValidationError>),
    #[error("configuration could not be saved")]
    Persist(#[source] StoreError),
}

pub struct ConfigController {
    store: ConfigStore,
    // Cached (record, endpoints) pair, valid for this controller's lifetime.
    // Other processes sharing the database are last-writer-wins and are not
    // notified of commits made here.
    current: RwLock<Option<(ServerConfig, EffectiveEndpoints)>>,
}

impl ConfigController {
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// The active configuration record and its effective endpoints.
    ///
    /// The first call reads through the store; a missing, corrupt, or
    /// incomplete record degrades to the compiled-in production default
    /// without writing anything back. The result is cached until the next
    /// successful [`commit`](Self::commit).
    pub fn current(&self) -> (ServerConfig, EffectiveEndpoints) {
        if let Some(pair) = self.current.read().clone() {
            return pair;
        }

        let mut guard = self.current.write();
        if let Some(pair) = guard.clone() {
            return pair;
        }

        let pair = self.load_initial();
        *guard = Some(pair.clone());
        pair
    }

    fn load_initial(&self) -> (ServerConfig, EffectiveEndpoints) {
        let stored = match self.store.load() {
            Ok(Some(config)) => config,
            Ok(None) => return default_pair(),
            Err(err) => {
                warn!("failed to read stored configuration, using defaults: {err}");
                return default_pair();
            }
        };

        match resolve(&stored) {
            Ok(resolved) => (stored, resolved),
            Err(err) => {
                warn!("stored configuration is incomplete, using defaults: {err}");
                default_pair()
            }
        }
    }

    /// Validate a candidate record without persisting it.
    ///
    /// Collects every violated rule rather than failing fast, so a settings
    /// form can show all field errors at once.
    pub fn propose(&self, candidate: &ServerConfig) -> Result<(), Vec<ValidationError>> {
        candidate.validate()
    }

    /// Validate, dry-run resolve, persist, and swap the cache.
    ///
    /// A persistence failure leaves the cache on the last-known-good pair;
    /// there is no partial commit.
    pub fn commit(&self, candidate: ServerConfig) -> Result<EffectiveEndpoints, CommitError> {
        self.propose(&candidate).map_err(CommitError::Invalid)?;

        let resolved =
            resolve(&candidate).map_err(|err| CommitError::Invalid(vec![err.into()]))?;

        self.store.save(&candidate).map_err(CommitError::Persist)?;

        *self.current.write() = Some((candidate, resolved.clone()));
        Ok(resolved)
    }
}

fn default_pair() -> (ServerConfig, EffectiveEndpoints) {
    (ServerConfig::production(), endpoints::production())
}
