//! The dispatcher owns the "text" and "json" composites and renders each call
//! once per composite.
//!
//! It can only be obtained from configuration or from [`DispatcherBuilder`];
//! there is no unconfigured default.

mod builder;
mod from_config;
mod log;

pub use builder::DispatcherBuilder;
pub use log::{Log, Meta};

use crate::fmt::format_date;
use crate::internal;
use crate::level::Severity;
use crate::output::Composite;
use chrono::{DateTime, Local};
use serde_json::Value;

/// Immutable after construction, so it can be shared behind an `Arc` without locks.
#[derive(Debug)]
pub struct Dispatcher {
    text: Option<Composite>,
    json: Option<Composite>,
}

/// `{ text, level, date, ts, ...meta }`, with `meta` keys overriding the built-ins.
///
/// # Errors
/// Serialization failure.
pub fn render_record(
    level: Severity,
    text: &str,
    meta: Meta,
    now: &DateTime<Local>,
) -> Result<String, serde_json::Error> {
    let mut record = Meta::new();
    record.insert("text".to_string(), Value::String(text.to_string()));
    record.insert("level".to_string(), Value::String(level.as_str().to_string()));
    record.insert("date".to_string(), Value::String(format_date(now)));
    record.insert("ts".to_string(), Value::from(now.timestamp()));
    record.extend(meta);
    serde_json::to_string(&Value::Object(record))
}

impl Dispatcher {
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    #[must_use]
    pub const fn has_text(&self) -> bool {
        self.text.is_some()
    }

    #[must_use]
    pub const fn has_json(&self) -> bool {
        self.json.is_some()
    }

    #[must_use]
    pub const fn text(&self) -> Option<&Composite> {
        self.text.as_ref()
    }

    #[must_use]
    pub const fn json(&self) -> Option<&Composite> {
        self.json.as_ref()
    }

    /// Total outputs across both composites.
    #[must_use]
    pub fn transport_count(&self) -> usize {
        self.text.as_ref().map_or(0, Composite::len) + self.json.as_ref().map_or(0, Composite::len)
    }

    /// Service tag of whichever composite exists.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        self.text
            .as_ref()
            .or(self.json.as_ref())
            .map(Composite::service)
    }

    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    pub fn flush(&self) -> Result<(), crate::Error> {
        for composite in [&self.text, &self.json].into_iter().flatten() {
            composite.flush()?;
        }
        Ok(())
    }
}

impl Log for Dispatcher {
    fn log(&self, level: Severity, text: &str, meta: Meta) {
        // Metadata only reaches the json composite.
        if let Some(composite) = &self.text {
            composite.log(level, text);
        }

        if let Some(composite) = &self.json {
            match render_record(level, text, meta, &Local::now()) {
                Ok(record) => composite.log(level, &record),
                Err(e) => {
                    internal::error_runtime("DISPATCHER", &format!("record not serializable: {e}"));
                }
            }
        }
    }
}
