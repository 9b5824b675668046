//! Config loading (TOML or JSON) and the normalization step that every
//! dispatcher is built from.
//!
//! The raw config stays loosely typed on purpose: each sink accepts a boolean, a
//! string or a table, and the shape is only classified during normalization.

mod error;
mod normalize;
mod structs;

pub use error::ConfigError;
pub use normalize::{
    LevelSpec, NormalizedConfig, NormalizedSink, RawSinkConfig, SinkOptions, normalize,
};
pub use structs::{
    CONSOLE_KEY, ConsoleSink, DATADOG_KEY, DEFAULT_DDSOURCE, DEFAULT_SERVICE, DatadogSink,
    FILE_KEY, FileSink, LOKI_KEY, LokiSink, SHORT_CODE_KEY,
};

use crate::internal;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "sevlog.toml";

/// The caller's configuration before normalization.
///
/// An empty config is valid and builds a dispatcher with no sinks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    root: Map<String, Value>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// `NotAnObject` unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    /// # Errors
    /// JSON syntax errors, or a root that is not an object.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(content)?)
    }

    /// # Errors
    /// TOML syntax errors.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_value(toml::from_str::<Value>(content)?)
    }

    /// Reads a config file; `.json` files are parsed as JSON, anything else as TOML.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        internal::debug("CONFIG", &format!("Reading {}", path.display()));
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Loads `sevlog.toml` from the user's config directory. A missing file is
    /// an empty config, not an error.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or the file is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using empty config");
            return Ok(Self::default());
        }
        let config = Self::load_from(&path)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// `<config_dir>/sevlog/sevlog.toml`
    ///
    /// # Errors
    /// `ConfigDirNotFound` when the platform has no home directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        directories::ProjectDirs::from("", "", "sevlog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Sets or replaces one top-level key.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.root.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    #[must_use]
    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// # Errors
    /// See [`normalize`].
    pub fn normalize(&self) -> Result<NormalizedConfig, ConfigError> {
        normalize::normalize_map(&self.root)
    }
}
