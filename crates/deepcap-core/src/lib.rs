//! DeepCap Core - application core for the DEEP source-capture toolkit.
//!
//! Resolves the active server configuration into effective endpoints, owns
//! the configuration mutation boundary, and provides the web-page capture
//! pipeline that turns a URL into a normalized lead draft.

pub mod controller;
pub mod endpoints;
pub mod leads;
pub mod paths;
pub mod request;

pub use controller::{CommitError, ConfigController};
pub use endpoints::{EffectiveEndpoints, ResolveError, resolve};

use anyhow::Result;
use deepcap_storage::Storage;
use std::sync::Arc;
use tracing::info;

/// Core application state shared by the CLI and any embedding frontend.
///
/// The configuration controller is the only write path for server
/// configuration; consumers read endpoints through it rather than touching
/// storage directly.
pub struct AppCore {
    pub storage: Arc<Storage>,
    pub config: ConfigController,
}

impl AppCore {
    pub fn new(db_path: &str) -> Result<Self> {
        let storage = Arc::new(Storage::new(db_path)?);
        let config = ConfigController::new(storage.config.clone());

        info!("Initializing DeepCap");

        Ok(Self { storage, config })
    }
}
