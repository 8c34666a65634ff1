//! Server configuration storage.
//!
//! A single `ServerConfig` record is persisted under one well-known key and
//! selects which DEEP environment outgoing requests target. The stored shape
//! is decoded leniently: missing fields fall back to their defaults and
//! unknown mode strings decode to [`ActiveConfig::Unrecognized`] so that
//! records written by older releases never block startup.

use redb::{Database, ReadableDatabase, TableDefinition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use url::Url;

const CONFIG_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("server_config");

/// Key of the one configuration record. Must stay stable across versions so
/// existing settings are not orphaned.
const CONFIG_KEY: &str = "current";

/// Which endpoint set is authoritative.
///
/// `Unrecognized` is an in-memory state only: it is what unknown mode strings
/// from superseded on-disk shapes (`alpha`, `beta`, ...) decode to. The
/// application never writes it, and the endpoint resolver maps it to the
/// production triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveConfig {
    #[default]
    Production,
    Staging,
    Custom,
    #[serde(other)]
    Unrecognized,
}

impl ActiveConfig {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveConfig::Production => "production",
            ActiveConfig::Staging => "staging",
            ActiveConfig::Custom => "custom",
            ActiveConfig::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ActiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server configuration record.
///
/// The URL fields and the identifier are authoritative only in
/// [`ActiveConfig::Custom`] mode; in the built-in modes they are inert
/// leftovers and are neither validated nor consulted. The serde aliases
/// accept field spellings written by superseded revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub active_config: ActiveConfig,
    #[serde(alias = "webServer", skip_serializing_if = "Option::is_none")]
    pub web_server_url: Option<String>,
    #[serde(alias = "apiServer", skip_serializing_if = "Option::is_none")]
    pub api_server_url: Option<String>,
    #[serde(
        alias = "serverLess",
        alias = "serverless",
        skip_serializing_if = "Option::is_none"
    )]
    pub serverless_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl ServerConfig {
    /// Record selecting the built-in production environment.
    pub fn production() -> Self {
        Self::default()
    }

    /// Record selecting the built-in staging environment.
    pub fn staging() -> Self {
        Self {
            active_config: ActiveConfig::Staging,
            ..Self::default()
        }
    }

    /// Record selecting a user-supplied endpoint triple.
    pub fn custom(
        web_server_url: impl Into<String>,
        api_server_url: impl Into<String>,
        serverless_url: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            active_config: ActiveConfig::Custom,
            web_server_url: Some(web_server_url.into()),
            api_server_url: Some(api_server_url.into()),
            serverless_url: Some(serverless_url.into()),
            identifier: Some(identifier.into()),
        }
    }

    /// Validate the record for persistence.
    ///
    /// Built-in modes validate vacuously: their endpoint triples are compiled
    /// in and any leftover custom fields are ignored. Custom mode requires
    /// the identifier and all three base URLs, each an absolute http(s) URL
    /// with a host. All violations are collected so a caller can surface
    /// every field error at once.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        match self.active_config {
            ActiveConfig::Production | ActiveConfig::Staging => Ok(()),
            ActiveConfig::Unrecognized => Err(vec![ValidationError::UnrecognizedMode]),
            ActiveConfig::Custom => {
                let mut errors = Vec::new();

                match &self.identifier {
                    None => errors.push(ValidationError::Missing(ConfigField::Identifier)),
                    Some(value) if value.trim().is_empty() => {
                        errors.push(ValidationError::Empty(ConfigField::Identifier));
                    }
                    Some(_) => {}
                }

                let urls = [
                    (ConfigField::WebServerUrl, &self.web_server_url),
                    (ConfigField::ApiServerUrl, &self.api_server_url),
                    (ConfigField::ServerlessUrl, &self.serverless_url),
                ];
                for (field, value) in urls {
                    match value {
                        None => errors.push(ValidationError::Missing(field)),
                        Some(value) if value.trim().is_empty() => {
                            errors.push(ValidationError::Empty(field));
                        }
                        Some(value) => {
                            if !is_valid_base_url(value) {
                                errors.push(ValidationError::InvalidUrl { field });
                            }
                        }
                    }
                }

                if errors.is_empty() { Ok(()) } else { Err(errors) }
            }
        }
    }
}

fn is_valid_base_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Fields of [`ServerConfig`] that field-level validation can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigField {
    WebServerUrl,
    ApiServerUrl,
    ServerlessUrl,
    Identifier,
}

impl ConfigField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigField::WebServerUrl => "webServerUrl",
            ConfigField::ApiServerUrl => "apiServerUrl",
            ConfigField::ServerlessUrl => "serverlessUrl",
            ConfigField::Identifier => "identifier",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated validation rule, tied to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required in custom mode")]
    Missing(ConfigField),
    #[error("{0} must not be empty")]
    Empty(ConfigField),
    #[error("{field} must be an absolute http(s) URL with a host")]
    InvalidUrl { field: ConfigField },
    #[error("unrecognized configuration mode")]
    UnrecognizedMode,
}

/// Storage-layer failures.
///
/// A missing record is not an error (`load` returns `Ok(None)`); `Corrupt`
/// means bytes exist under the key but are not decodable at all.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored configuration could not be decoded")]
    Corrupt(#[source] serde_json::Error),
    #[error("configuration could not be encoded")]
    Encode(#[source] serde_json::Error),
    #[error("configuration storage failed")]
    Backend(#[from] redb::Error),
}

impl From<redb::DatabaseError> for StoreError {
    fn from(err: redb::DatabaseError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::TransactionError> for StoreError {
    fn from(err: redb::TransactionError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::TableError> for StoreError {
    fn from(err: redb::TableError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::StorageError> for StoreError {
    fn from(err: redb::StorageError) -> Self {
        Self::Backend(err.into())
    }
}

impl From<redb::CommitError> for StoreError {
    fn from(err: redb::CommitError) -> Self {
        Self::Backend(err.into())
    }
}

/// Server configuration storage
#[derive(Debug, Clone)]
pub struct ConfigStore {
    db: Arc<Database>,
}

impl ConfigStore {
    pub fn new(db: Arc<Database>) -> Result<Self, StoreError> {
        // Create table
        let write_txn = db.begin_write()?;
        write_txn.open_table(CONFIG_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Load the stored configuration record.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet. Old-schema
    /// degradation (unknown mode, absent fields) is the caller's concern;
    /// this only fails when the bytes are not parseable at all.
    pub fn load(&self) -> Result<Option<ServerConfig>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CONFIG_TABLE)?;

        match table.get(CONFIG_KEY)? {
            Some(data) => {
                let config = serde_json::from_slice(data.value()).map_err(StoreError::Corrupt)?;
                Ok(Some(config))
            }
            None => Ok(None),
        }
    }

    /// Replace the stored configuration with `config`.
    ///
    /// The whole record is written in one transaction; there is no
    /// partial-field update path.
    pub fn save(&self, config: &ServerConfig) -> Result<(), StoreError> {
        let serialized = serde_json::to_vec(config).map_err(StoreError::Encode)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CONFIG_TABLE)?;
            table.insert(CONFIG_KEY, serialized.as_slice())?;
        }
        write_txn.commit()?;

        debug!(mode = %config.active_config, "saved server configuration");
        Ok(())
    }
}
