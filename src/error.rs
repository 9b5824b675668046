//! Unified error type for all sevlog operations.

use crate::config::ConfigError;

/// Error type for sevlog operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid or unreadable configuration.
    Config(ConfigError),
    /// I/O error from a console or file transport.
    Io(std::io::Error),
    /// Request to the remote collector failed or was rejected.
    Http(reqwest::Error),
    /// A queued transport dropped a record (queue full or worker gone).
    Delivery(String),
    /// Format/serialization error.
    Format(String),
    /// The global dispatcher was used before `create_instance`.
    Construction(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Delivery(s) => write!(f, "delivery error: {s}"),
            Self::Format(s) => write!(f, "format error: {s}"),
            Self::Construction(s) => write!(f, "construction error: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::Delivery(_) | Self::Format(_) | Self::Construction(_) => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}
