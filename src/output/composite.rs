//! An ordered group of transports sharing one output shape.

use super::{LogRecord, Output};
use crate::internal;
use crate::level::Severity;
use chrono::Local;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    /// Level plus the caller's raw text.
    Text,
    /// Level plus the serialized `{ text, level, date, ts, ...meta }` record.
    Json,
}

impl CompositeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Composite {
    kind: CompositeKind,
    service: String,
    outputs: Vec<Box<dyn Output>>,
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("kind", &self.kind)
            .field("service", &self.service)
            .field(
                "outputs",
                &self.outputs.iter().map(|o| o.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Composite {
    #[must_use]
    pub fn new(kind: CompositeKind, service: impl Into<String>) -> Self {
        Self {
            kind,
            service: service.into(),
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Box::new(output));
        self
    }

    pub fn push(&mut self, output: Box<dyn Output>) {
        self.outputs.push(output);
    }

    #[must_use]
    pub const fn kind(&self) -> CompositeKind {
        self.kind
    }

    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Hands `message` to every output whose threshold admits `level`. A failing
    /// output is reported internally and does not stop the others.
    pub fn log(&self, level: Severity, message: &str) {
        let record = LogRecord {
            level,
            message,
            service: &self.service,
            timestamp: Local::now(),
        };

        for output in &self.outputs {
            if !level.admits(output.threshold()) {
                continue;
            }
            if let Err(e) = output.write(&record) {
                internal::error_runtime(
                    "OUTPUT",
                    &format!("{} {} write failed: {e}", self.kind, output.name()),
                );
            }
        }
    }

    /// # Errors
    /// Returns the first error encountered across all outputs.
    pub fn flush(&self) -> Result<(), crate::Error> {
        for output in &self.outputs {
            output.flush()?;
        }
        Ok(())
    }
}
