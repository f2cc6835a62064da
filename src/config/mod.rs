//! Configuration layer: typed settings with layered precedence
//! (file → environment).

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;


const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "elytra";
const DEFAULT_DATASET: &str = "production";
const DEFAULT_API_VERSION: &str = "v2021-10-21";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

/// Connection settings for the external content store.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Resolved query endpoint: `{endpoint}/{api_version}/data/query/{dataset}`.
    pub query_url: Url,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment).
pub fn load(config_file: Option<&Path>) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("ELYTRA").separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::from_raw(raw)
}

/// Load settings from an inline TOML document plus the environment.
pub fn load_from_str(toml: &str) -> Result<Settings, LoadError> {
    let raw: RawSettings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .add_source(Environment::with_prefix("ELYTRA").separator("__"))
        .build()?
        .try_deserialize()?;
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    store: RawStoreSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStoreSettings {
    endpoint: Option<String>,
    dataset: Option<String>,
    api_version: Option<String>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            store: build_store_settings(raw.store)?,
            logging: build_logging_settings(raw.logging)?,
        })
    }
}

fn build_store_settings(store: RawStoreSettings) -> Result<StoreSettings, LoadError> {
    let endpoint = store
        .endpoint
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LoadError::invalid("store.endpoint", "is required"))?;
    let base = Url::parse(endpoint)
        .map_err(|err| LoadError::invalid("store.endpoint", format!("failed to parse: {err}")))?;

    let dataset = store.dataset.unwrap_or_else(|| DEFAULT_DATASET.to_string());
    if dataset.trim().is_empty() {
        return Err(LoadError::invalid("store.dataset", "must not be empty"));
    }
    let api_version = store
        .api_version
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
    if api_version.trim().is_empty() {
        return Err(LoadError::invalid("store.api_version", "must not be empty"));
    }

    let query_url = base
        .join(&format!("{api_version}/data/query/{dataset}"))
        .map_err(|err| {
            LoadError::invalid("store.endpoint", format!("failed to resolve query url: {err}"))
        })?;

    let timeout_secs = store
        .request_timeout_seconds
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "store.request_timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(StoreSettings {
        query_url,
        request_timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}
