//! Endpoint resolution.
//!
//! Maps a [`ServerConfig`] to the concrete base URLs outgoing requests
//! target. Resolution is a pure function: identical input yields identical
//! output, which makes it usable as a dry-run check before persisting a
//! candidate configuration.

use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use deepcap_storage::{ActiveConfig, ConfigField, ServerConfig, ValidationError};

pub const PRODUCTION_IDENTIFIER: &str = "prod";
pub const STAGING_IDENTIFIER: &str = "staging";

/// The concrete base URLs used for outgoing requests after resolving the
/// active configuration mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveEndpoints {
    pub web_url: Url,
    pub api_url: Url,
    pub serverless_url: Url,
    pub identifier: String,
}

static PRODUCTION: Lazy<EffectiveEndpoints> = Lazy::new(|| EffectiveEndpoints {
    web_url: Url::parse("https://app.thedeep.io").expect("static production web url"),
    api_url: Url::parse("https://prod-api.thedeep.io").expect("static production api url"),
    serverless_url: Url::parse("https://services.thedeep.io")
        .expect("static production serverless url"),
    identifier: PRODUCTION_IDENTIFIER.to_string(),
});

static STAGING: Lazy<EffectiveEndpoints> = Lazy::new(|| EffectiveEndpoints {
    web_url: Url::parse("https://staging.thedeep.io").expect("static staging web url"),
    api_url: Url::parse("https://staging-api.thedeep.io").expect("static staging api url"),
    serverless_url: Url::parse("https://services-alpha.thedeep.io")
        .expect("static staging serverless url"),
    identifier: STAGING_IDENTIFIER.to_string(),
});

/// The compiled-in production triple.
pub fn production() -> EffectiveEndpoints {
    PRODUCTION.clone()
}

/// The compiled-in staging triple.
pub fn staging() -> EffectiveEndpoints {
    STAGING.clone()
}

/// Resolution failure for custom-mode records that bypassed validation.
///
/// The controller is the sole write path and validates before persisting, so
/// hitting this is a programming-contract violation, not a user error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("custom configuration is missing {0}")]
    MissingField(ConfigField),
    #[error("custom configuration field {field} is not a valid URL")]
    InvalidUrl {
        field: ConfigField,
        #[source]
        source: url::ParseError,
    },
}

impl From<ResolveError> for ValidationError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::MissingField(field) => ValidationError::Missing(field),
            ResolveError::InvalidUrl { field, .. } => ValidationError::InvalidUrl { field },
        }
    }
}

/// Resolve a configuration record into effective endpoints.
///
/// Built-in modes ignore every other field of the record and return their
/// compiled-in triple. Custom mode returns the record's own values verbatim
/// rather than silently substituting a default, so traffic is never sent to
/// an empty URL. Unrecognized modes from stale on-disk shapes resolve to the
/// production triple.
pub fn resolve(config: &ServerConfig) -> Result<EffectiveEndpoints, ResolveError> {
    match config.active_config {
        ActiveConfig::Production => Ok(production()),
        ActiveConfig::Staging => Ok(staging()),
        ActiveConfig::Unrecognized => Ok(production()),
        ActiveConfig::Custom => {
            let web_url = custom_url(ConfigField::WebServerUrl, &config.web_server_url)?;
            let api_url = custom_url(ConfigField::ApiServerUrl, &config.api_server_url)?;
            let serverless_url = custom_url(ConfigField::ServerlessUrl, &config.serverless_url)?;
            let identifier = config
                .identifier
                .clone()
                .ok_or(ResolveError::MissingField(ConfigField::Identifier))?;

            Ok(EffectiveEndpoints {
                web_url,
                api_url,
                serverless_url,
                identifier,
            })
        }
    }
}

fn custom_url(field: ConfigField, value: &Option<String>) -> Result<Url, ResolveError> {
    let value = value.as_ref().ok_or(ResolveError::MissingField(field))?;
    Url::parse(value).map_err(|source| ResolveError::InvalidUrl { field, source })
}
