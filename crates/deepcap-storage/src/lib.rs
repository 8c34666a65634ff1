//! DeepCap Storage - Low-level storage abstraction layer
//!
//! This crate provides the persistence layer for DeepCap, using redb as the
//! embedded database. Each concern gets its own table; values are stored as
//! serialized JSON so that old records remain readable after schema changes.
//!
//! # Tables
//!
//! - `server_config` - Active server configuration (single record)

pub mod config;

pub use config::{
    ActiveConfig, ConfigField, ConfigStore, ServerConfig, StoreError, ValidationError,
};

use redb::Database;
use std::sync::Arc;

/// Central storage manager that initializes all storage subsystems
pub struct Storage {
    db: Arc<Database>,
    pub config: ConfigStore,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will create the database file if it doesn't exist and initialize
    /// all required tables.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let db = Arc::new(Database::create(path)?);
        let config = ConfigStore::new(db.clone())?;

        Ok(Self { db, config })
    }

    /// Get a reference to the underlying database
    pub fn get_db(&self) -> Arc<Database> {
        self.db.clone()
    }
}
