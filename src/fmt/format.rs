//! Renderers shared by the console and file transports.

use crate::level::Severity;
use chrono::{DateTime, Local};
use serde::Serialize;

/// `YYYY-MM-DD HH:mm:ss`, the timestamp shown on every human-readable line.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a local timestamp with [`DATE_FORMAT`].
#[must_use]
pub fn format_date(ts: &DateTime<Local>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

/// `[2024-05-01 12:00:00] warn: message`. The label is passed in already
/// rendered so the console can colorize it and the file writer can keep it plain.
#[must_use]
pub fn render_line(ts: &DateTime<Local>, label: &str, message: &str) -> String {
    format!("[{}] {label}: {message}", format_date(ts))
}

#[derive(Debug, Serialize)]
struct PrettyEntry<'a> {
    level: &'a str,
    message: &'a str,
    service: &'a str,
    timestamp: String,
}

/// Multi-line structured dump of one entry, used by the text file transport.
///
/// # Errors
/// Only if serialization fails, which cannot happen for these string fields.
pub fn render_pretty(
    ts: &DateTime<Local>,
    level: Severity,
    message: &str,
    service: &str,
) -> Result<String, serde_json::Error> {
    let entry = PrettyEntry {
        level: level.as_str(),
        message,
        service,
        timestamp: ts.to_rfc3339(),
    };
    serde_json::to_string_pretty(&entry)
}
