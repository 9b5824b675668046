//! Typed views of the sinks the configurator knows how to build.
//!
//! Normalization keeps every field it does not understand; these views pull out
//! the ones each transport needs and report the ones that are missing.

use super::ConfigError;
use super::normalize::{LevelSpec, NormalizedConfig, NormalizedSink};
use crate::level::DEFAULT_LEVEL;
use reqwest::Url;
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const SHORT_CODE_KEY: &str = "shortCode";
pub const CONSOLE_KEY: &str = "console";
pub const LOKI_KEY: &str = "loki";
pub const FILE_KEY: &str = "file";
pub const DATADOG_KEY: &str = "datadog";

/// Service tag used when no `shortCode` is configured.
pub const DEFAULT_SERVICE: &str = "APP";
/// `ddsource` sent to the remote collector unless overridden.
pub const DEFAULT_DDSOURCE: &str = "rust";

/// Human-readable console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSink {
    pub level: LevelSpec,
    /// ANSI-colored level labels.
    pub colors: bool,
}

/// Log-aggregator mode: the serialized record alone, one per stdout line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LokiSink {
    pub level: LevelSpec,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    pub level: LevelSpec,
    /// Receives pretty-printed structured entries.
    pub text_path: PathBuf,
    /// Receives single-line timestamped text.
    pub json_path: PathBuf,
}

/// Remote log collector reached over HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatadogSink {
    pub level: LevelSpec,
    pub host: String,
    pub service: String,
    pub apikey: String,
    pub ddsource: String,
}

impl DatadogSink {
    /// `https://{host}/v1/input/{apikey}?ddsource={ddsource}&service={service}`,
    /// with the key and query values percent-encoded.
    ///
    /// # Errors
    /// `InvalidField` for `host` when it is not a valid host name.
    pub fn url(&self) -> Result<Url, ConfigError> {
        let invalid_host = || ConfigError::InvalidField {
            key: DATADOG_KEY.to_string(),
            field: "host".to_string(),
        };

        let mut url = Url::parse(&format!("https://{}", self.host)).map_err(|_| invalid_host())?;
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid_host());
        }
        url.path_segments_mut()
            .map_err(|()| invalid_host())?
            .pop_if_empty()
            .extend(["v1", "input", self.apikey.as_str()]);
        url.query_pairs_mut()
            .append_pair("ddsource", &self.ddsource)
            .append_pair("service", &self.service);
        Ok(url)
    }
}

/// Walks `path` through nested objects and returns the string at the end.
fn string_at(
    key: &str,
    fields: &Map<String, Value>,
    path: &[&str],
) -> Result<String, ConfigError> {
    let dotted = path.join(".");
    let mut current = fields;
    let (last, parents) = path.split_last().ok_or_else(|| ConfigError::MissingField {
        key: key.to_string(),
        field: dotted.clone(),
    })?;

    for part in parents {
        current = match current.get(*part) {
            Some(Value::Object(inner)) => inner,
            Some(_) => {
                return Err(ConfigError::InvalidField {
                    key: key.to_string(),
                    field: dotted,
                });
            }
            None => {
                return Err(ConfigError::MissingField {
                    key: key.to_string(),
                    field: dotted,
                });
            }
        };
    }

    match current.get(*last) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ConfigError::InvalidField {
            key: key.to_string(),
            field: dotted,
        }),
        None => Err(ConfigError::MissingField {
            key: key.to_string(),
            field: dotted,
        }),
    }
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

impl NormalizedConfig {
    /// Literal `shortCode`, if set.
    #[must_use]
    pub fn short_code(&self) -> Option<&str> {
        match self.get(SHORT_CODE_KEY) {
            Some(NormalizedSink::Literal(code)) if !code.is_empty() => Some(code.as_str()),
            _ => None,
        }
    }

    /// Upper-cased short code, or `APP`.
    #[must_use]
    pub fn service_name(&self) -> String {
        self.short_code()
            .map_or_else(|| DEFAULT_SERVICE.to_string(), str::to_uppercase)
    }

    /// # Errors
    /// `InvalidField` when `colors` is not a boolean.
    pub fn console(&self) -> Result<Option<ConsoleSink>, ConfigError> {
        let Some(NormalizedSink::Resolved { level, fields }) = self.get(CONSOLE_KEY) else {
            return Ok(None);
        };

        let colors = match fields.get("colors") {
            None => true,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                return Err(ConfigError::InvalidField {
                    key: CONSOLE_KEY.to_string(),
                    field: "colors".to_string(),
                });
            }
        };

        Ok(Some(ConsoleSink {
            level: level.clone(),
            colors,
        }))
    }

    /// Any enabled form turns loki mode on; a literal gets the default threshold.
    #[must_use]
    pub fn loki(&self) -> Option<LokiSink> {
        self.get(LOKI_KEY).map(|sink| LokiSink {
            level: sink.level().cloned().unwrap_or_else(|| DEFAULT_LEVEL.into()),
        })
    }

    /// # Errors
    /// `MissingField`/`InvalidField` for `paths.text` and `paths.json`.
    pub fn file(&self) -> Result<Option<FileSink>, ConfigError> {
        let Some(NormalizedSink::Resolved { level, fields }) = self.get(FILE_KEY) else {
            return Ok(None);
        };

        let text = string_at(FILE_KEY, fields, &["paths", "text"])?;
        let json = string_at(FILE_KEY, fields, &["paths", "json"])?;

        Ok(Some(FileSink {
            level: level.clone(),
            text_path: expand_path(&text),
            json_path: expand_path(&json),
        }))
    }

    /// # Errors
    /// `MissingField`/`InvalidField` for `host`, `service`, `apikey`, and a
    /// non-string `ddsource`.
    pub fn datadog(&self) -> Result<Option<DatadogSink>, ConfigError> {
        let Some(NormalizedSink::Resolved { level, fields }) = self.get(DATADOG_KEY) else {
            return Ok(None);
        };

        let ddsource = if fields.contains_key("ddsource") {
            string_at(DATADOG_KEY, fields, &["ddsource"])?
        } else {
            DEFAULT_DDSOURCE.to_string()
        };

        Ok(Some(DatadogSink {
            level: level.clone(),
            host: string_at(DATADOG_KEY, fields, &["host"])?,
            service: string_at(DATADOG_KEY, fields, &["service"])?,
            apikey: string_at(DATADOG_KEY, fields, &["apikey"])?,
            ddsource,
        }))
    }
}
