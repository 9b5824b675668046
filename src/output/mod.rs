//! Transports and the composites that group them.
//!
//! The `Output` trait is the seam: the configurator builds console, file and HTTP
//! outputs from config, and callers can push their own into a [`Composite`].

mod composite;
mod console;
mod file;
mod http;

pub use composite::{Composite, CompositeKind};
pub use console::{ConsoleFormat, ConsoleOutput};
pub use file::{FileFormat, FileOutput};
pub use http::{HTTP_QUEUE_CAPACITY, HTTP_TIMEOUT, HttpOutput};

use crate::level::Severity;
use chrono::{DateTime, Local};

/// One entry as a transport sees it, already rendered for its composite.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: Severity,
    /// Raw caller text on the text composite, the serialized record on the json one.
    pub message: &'a str,
    /// Service tag of the owning composite.
    pub service: &'a str,
    pub timestamp: DateTime<Local>,
}

/// `Send + Sync` so a dispatcher can be shared across threads behind an `Arc`.
pub trait Output: Send + Sync {
    /// Short label for diagnostics ("console", "file", "http").
    fn name(&self) -> &'static str;

    /// Entries less urgent than this are skipped by the composite.
    fn threshold(&self) -> Severity;

    /// Renders and delivers one record.
    ///
    /// # Errors
    /// I/O or HTTP errors from the underlying sink.
    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error>;

    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;
}
