//! Turns the loosely-shaped per-sink values into one uniform form.
//!
//! Each sink value is classified exactly once into a [`RawSinkConfig`]; everything
//! after that point works on the enum and never inspects JSON types again.

use super::ConfigError;
use crate::level::{DEFAULT_LEVEL, Severity};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// A threshold as written in the config: a rank number or a level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSpec {
    Rank(u64),
    Name(String),
}

impl LevelSpec {
    /// `None` when the value names no known level (e.g. `12` or `"verbose"`).
    #[must_use]
    pub fn resolve(&self) -> Option<Severity> {
        match self {
            Self::Rank(rank) => Severity::from_rank(*rank),
            Self::Name(name) => name.parse().ok(),
        }
    }

    fn from_field(key: &str, value: &Value) -> Result<Option<Self>, ConfigError> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(Some(
                n.as_u64().map_or_else(|| Self::Name(n.to_string()), Self::Rank),
            )),
            Value::String(s) => Ok(Some(Self::Name(s.clone()))),
            _ => Err(ConfigError::InvalidField {
                key: key.to_string(),
                field: "level".to_string(),
            }),
        }
    }
}

impl From<Severity> for LevelSpec {
    fn from(level: Severity) -> Self {
        Self::Rank(u64::from(level.rank()))
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rank(rank) => write!(f, "{rank}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Object form of a sink: an optional threshold plus whatever else the sink needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkOptions {
    pub level: Option<LevelSpec>,
    /// All other fields, untouched.
    pub fields: Map<String, Value>,
}

/// The accepted shorthand forms for one sink.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSinkConfig {
    /// `false`.
    Disabled,
    /// `true`: on, with the default threshold.
    Enabled,
    /// A table/object.
    Options(SinkOptions),
    /// A plain string, passed through without interpretation.
    Literal(String),
}

impl RawSinkConfig {
    /// Classifies one config value.
    ///
    /// # Errors
    /// `InvalidShape` naming `key` for numbers, arrays and null; `InvalidField` when
    /// an object's `level` is neither a number nor a string.
    pub fn from_value(key: &str, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::Bool(true) => Ok(Self::Enabled),
            Value::Bool(false) => Ok(Self::Disabled),
            Value::String(s) => Ok(Self::Literal(s.clone())),
            Value::Object(map) => {
                let mut fields = map.clone();
                let level = match fields.remove("level") {
                    Some(v) => LevelSpec::from_field(key, &v)?,
                    None => None,
                };
                Ok(Self::Options(SinkOptions { level, fields }))
            }
            Value::Number(_) | Value::Array(_) | Value::Null => Err(ConfigError::InvalidShape {
                key: key.to_string(),
            }),
        }
    }

    /// `None` for disabled sinks.
    #[must_use]
    pub fn normalize(self) -> Option<NormalizedSink> {
        match self {
            Self::Disabled => None,
            Self::Enabled => Some(NormalizedSink::Resolved {
                level: DEFAULT_LEVEL.into(),
                fields: Map::new(),
            }),
            // Only absence counts as unspecified; rank 0 (emerg) is kept.
            Self::Options(SinkOptions { level, fields }) => Some(NormalizedSink::Resolved {
                level: level.unwrap_or_else(|| DEFAULT_LEVEL.into()),
                fields,
            }),
            Self::Literal(s) => Some(NormalizedSink::Literal(s)),
        }
    }
}

/// One enabled sink after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedSink {
    Resolved {
        level: LevelSpec,
        fields: Map<String, Value>,
    },
    Literal(String),
}

impl NormalizedSink {
    #[must_use]
    pub const fn level(&self) -> Option<&LevelSpec> {
        match self {
            Self::Resolved { level, .. } => Some(level),
            Self::Literal(_) => None,
        }
    }

    /// The resolved severity, if the sink has one that names a known level.
    #[must_use]
    pub fn threshold(&self) -> Option<Severity> {
        self.level().and_then(LevelSpec::resolve)
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// Sink key → normalized sink, for every enabled key of the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedConfig {
    sinks: BTreeMap<String, NormalizedSink>,
}

impl NormalizedConfig {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NormalizedSink> {
        self.sinks.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.sinks.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NormalizedSink)> {
        self.sinks.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

/// Normalizes a whole config mapping.
///
/// # Errors
/// `NotAnObject` when `raw` is not a mapping, otherwise the first error from
/// [`RawSinkConfig::from_value`].
pub fn normalize(raw: &Value) -> Result<NormalizedConfig, ConfigError> {
    let Value::Object(map) = raw else {
        return Err(ConfigError::NotAnObject);
    };
    normalize_map(map)
}

pub(super) fn normalize_map(map: &Map<String, Value>) -> Result<NormalizedConfig, ConfigError> {
    let mut sinks = BTreeMap::new();
    for (key, value) in map {
        if let Some(sink) = RawSinkConfig::from_value(key, value)?.normalize() {
            sinks.insert(key.clone(), sink);
        }
    }

    Ok(NormalizedConfig { sinks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_u64_rank_stays_unresolved() {
        let raw = RawSinkConfig::from_value("console", &json!({ "level": -1 })).unwrap();
        let sink = raw.normalize().unwrap();
        assert_eq!(sink.level(), Some(&LevelSpec::Name("-1".to_string())));
        assert_eq!(sink.threshold(), None);
    }

    #[test]
    fn level_of_wrong_type_is_rejected() {
        let err = RawSinkConfig::from_value("file", &json!({ "level": [3] })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { ref key, ref field }
            if key == "file" && field == "level"));
    }

    #[test]
    fn null_level_falls_back_to_default() {
        let raw = RawSinkConfig::from_value("loki", &json!({ "level": null })).unwrap();
        assert_eq!(raw.normalize().unwrap().threshold(), Some(Severity::Info));
    }
}
