//! Stdout transport, in two flavors: human-readable lines for a terminal, or the
//! bare message for a log aggregator scraping stdout.

use super::{LogRecord, Output};
use crate::fmt::render_line;
use crate::level::{DEFAULT_LEVEL, Severity};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    /// `[date] level: message`, with the level painted in its display color.
    Text { colors: bool },
    /// The message field only. Used in loki mode, where the message is already JSON.
    Raw,
}

#[derive(Debug, Clone)]
pub struct ConsoleOutput {
    format: ConsoleFormat,
    threshold: Severity,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::text()
    }
}

impl ConsoleOutput {
    /// Colored text at the default threshold.
    #[must_use]
    pub const fn text() -> Self {
        Self {
            format: ConsoleFormat::Text { colors: true },
            threshold: DEFAULT_LEVEL,
        }
    }

    #[must_use]
    pub const fn raw() -> Self {
        Self {
            format: ConsoleFormat::Raw,
            threshold: DEFAULT_LEVEL,
        }
    }

    /// Ignored in raw mode.
    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        if let ConsoleFormat::Text { .. } = self.format {
            self.format = ConsoleFormat::Text { colors: enabled };
        }
        self
    }

    #[must_use]
    pub const fn level(mut self, level: Severity) -> Self {
        self.threshold = level;
        self
    }

    #[must_use]
    pub const fn format(&self) -> ConsoleFormat {
        self.format
    }

    /// The exact line `write` prints, without the trailing newline.
    #[must_use]
    pub fn render(&self, record: &LogRecord<'_>) -> String {
        match self.format {
            ConsoleFormat::Raw => record.message.to_string(),
            ConsoleFormat::Text { colors } => {
                let label = if colors {
                    record.level.style().paint(record.level.as_str())
                } else {
                    record.level.as_str().to_string()
                };
                render_line(&record.timestamp, &label, record.message)
            }
        }
    }
}

impl Output for ConsoleOutput {
    fn name(&self) -> &'static str {
        "console"
    }

    fn threshold(&self) -> Severity {
        self.threshold
    }

    fn write(&self, record: &LogRecord<'_>) -> Result<(), crate::Error> {
        let line = self.render(record);
        writeln!(io::stdout(), "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn record(message: &str) -> LogRecord<'_> {
        LogRecord {
            level: Severity::Warn,
            message,
            service: "APP",
            timestamp: Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap(),
        }
    }

    #[test]
    fn plain_text_line() {
        let out = ConsoleOutput::text().colors(false);
        assert_eq!(out.render(&record("disk low")), "[2024-05-01 12:30:05] warn: disk low");
    }

    #[test]
    fn colored_label_is_wrapped_in_ansi() {
        let out = ConsoleOutput::text();
        assert_eq!(
            out.render(&record("disk low")),
            "[2024-05-01 12:30:05] \x1b[33mwarn\x1b[0m: disk low"
        );
    }

    #[test]
    fn raw_prints_message_only() {
        let out = ConsoleOutput::raw().colors(true);
        assert_eq!(out.format(), ConsoleFormat::Raw);
        assert_eq!(out.render(&record(r#"{"text":"x"}"#)), r#"{"text":"x"}"#);
    }
}
