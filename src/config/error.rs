//! Configuration error types.

/// Everything that can go wrong between reading a config and building sinks from it.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a config file.
    Io(std::io::Error),
    /// TOML parsing error.
    Toml(toml::de::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// The config root is not a key/value mapping.
    NotAnObject,
    /// A sink value is neither a boolean, a string nor an object.
    InvalidShape { key: String },
    /// A field inside a sink object has the wrong type.
    InvalidField { key: String, field: String },
    /// A sink object lacks a field its transport cannot work without.
    MissingField { key: String, field: String },
}

impl ConfigError {
    /// The sink key the error is about, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidShape { key }
            | Self::InvalidField { key, .. }
            | Self::MissingField { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::NotAnObject => write!(f, "config root must be a table/object"),
            Self::InvalidShape { key } => write!(f, "{key} invalid format"),
            Self::InvalidField { key, field } => write!(f, "{key}.{field} has an invalid type"),
            Self::MissingField { key, field } => write!(f, "{key}.{field} is required"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
