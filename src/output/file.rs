//! Append-only file transport.

use super::{LogRecord, Output};
use crate::fmt::{render_line, render_pretty};
use crate::internal;
use crate::level::{DEFAULT_LEVEL, Severity};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Multi-line structured dump: level, message, service, timestamp.
    Pretty,
    /// `[date] level: message` on one line.
    Line,
}

#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
    format: FileFormat,
    threshold: Severity,
}

impl FileOutput {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
            threshold: DEFAULT_LEVEL,
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Severity) -> Self {
        self.threshold = level;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn format(&self) -> FileFormat {
        self.format
    }

    /// The text appended for one record, without the trailing newline.
    ///
    /// # Errors
    /// Serialization failure of the pretty form.
    pub fn render(&self, record: &LogRecord<'_>) -> Result<String, crate::Error> {
        match self.format {
            FileFormat::Line => Ok(render_line(
                &record.timestamp,
                record.level.as_str(),
                record.message,
            )),
            FileFormat::Pretty => Ok(render_pretty(
                &record.timestamp,
                record.level,
                record.message,
                record.service,
            )?),
        }
    }
}

impl Output for FileOutput {
    fn name(&self) -> &'static str {
        "file"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
            internal::debug("FILE", &format!("Created directory: {}", parent.display()));
        }

        // One write_all per record keeps concurrent appends from interleaving mid-line.
        let mut content = self.render(record)?;
        content.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(content.as_bytes())?;

        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
