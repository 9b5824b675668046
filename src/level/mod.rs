//! The eight severities every sink filters on.
//!
//! Ranks run from most urgent (`emerg` = 0) to most verbose (`debugEx` = 7). A sink
//! configured with a threshold admits every entry whose rank is at or below it.

use crate::fmt::{AnsiColor, Style};
use std::fmt;
use std::str::FromStr;

/// Derives `Ord` on the rank, so `Severity::Emerg < Severity::DebugEx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// The process cannot continue.
    Emerg = 0,
    /// A failure caused by the environment (I/O, network, resources).
    ErrorRuntime = 1,
    /// A failure caused by a broken invariant in the program itself.
    ErrorLogic = 2,
    /// Something unexpected that did not stop the operation.
    Warn = 3,
    /// Lifecycle milestones that should stay visible in production.
    Status = 4,
    #[default]
    Info = 5,
    Debug = 6,
    /// Extended debugging, usually too noisy even for development.
    DebugEx = 7,
}

/// Used wherever a threshold is not configured.
pub const DEFAULT_LEVEL: Severity = Severity::Info;

impl Severity {
    /// Config files and JSON records use these exact camelCase names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emerg => "emerg",
            Self::ErrorRuntime => "errorRuntime",
            Self::ErrorLogic => "errorLogic",
            Self::Warn => "warn",
            Self::Status => "status",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::DebugEx => "debugEx",
        }
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Every level in rank order, most urgent first.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::Emerg,
            Self::ErrorRuntime,
            Self::ErrorLogic,
            Self::Warn,
            Self::Status,
            Self::Info,
            Self::Debug,
            Self::DebugEx,
        ]
    }

    /// Reverse lookup from a configured rank number. `None` for anything outside 0..=7.
    #[must_use]
    pub fn from_rank(rank: u64) -> Option<Self> {
        usize::try_from(rank)
            .ok()
            .and_then(|idx| Self::all().get(idx).copied())
    }

    /// Rank → name table, indexed by rank.
    #[must_use]
    pub fn flipped() -> [&'static str; 8] {
        Self::all().map(Self::as_str)
    }

    /// Display color used for the level label on colorized console output.
    #[must_use]
    pub const fn style(self) -> Style {
        match self {
            Self::Emerg => Style::bold(AnsiColor::Red),
            Self::ErrorRuntime | Self::ErrorLogic => Style::plain(AnsiColor::Red),
            Self::Warn => Style::plain(AnsiColor::Yellow),
            Self::Status => Style::bold(AnsiColor::Green),
            Self::Info => Style::plain(AnsiColor::Blue),
            Self::Debug => Style::plain(AnsiColor::Cyan),
            Self::DebugEx => Style::plain(AnsiColor::Grey),
        }
    }

    /// True when an entry at `self` passes a sink filtered at `threshold`.
    #[must_use]
    pub fn admits(self, threshold: Self) -> bool {
        self <= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity: '{}'", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Accepts the canonical names case-insensitively, plus snake_case spellings
    /// so CLI users can type `error_runtime`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "").as_str() {
            "emerg" => Ok(Self::Emerg),
            "errorruntime" => Ok(Self::ErrorRuntime),
            "errorlogic" => Ok(Self::ErrorLogic),
            "warn" => Ok(Self::Warn),
            "status" => Ok(Self::Status),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "debugex" => Ok(Self::DebugEx),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}
