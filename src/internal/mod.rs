//! sevlog's own diagnostics: config warnings and transport failures.
//!
//! These can't go through a dispatcher (the failing one may be the only one), so
//! they are written straight to stderr. Off until `init` or `init_with` runs.

use crate::fmt::render_line;
use crate::level::Severity;
use chrono::Local;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Severity name or rank that switches the diagnostics on.
pub const ENV_VAR: &str = "SEVLOG_INTERNAL_LEVEL";

static THRESHOLD: OnceLock<Option<Severity>> = OnceLock::new();

fn parse_threshold(raw: &str) -> Option<Severity> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(Severity::from_rank)
        .or_else(|| raw.trim().parse().ok())
}

/// Reads [`ENV_VAR`]. Only the first `init`/`init_with` call takes effect.
pub fn init() {
    THRESHOLD.get_or_init(|| {
        std::env::var(ENV_VAR)
            .ok()
            .as_deref()
            .and_then(parse_threshold)
    });
}

/// Enables diagnostics up to `level` regardless of the environment.
pub fn init_with(level: Severity) {
    let _ = THRESHOLD.set(Some(level));
}

/// Whether a diagnostic at `level` would be written.
#[must_use]
pub fn enabled(level: Severity) -> bool {
    matches!(THRESHOLD.get(), Some(Some(threshold)) if level.admits(*threshold))
}

/// Pre-init calls silently vanish.
fn log(level: Severity, scope: &str, msg: &str) {
    if !enabled(level) {
        return;
    }
    let label = format!("sevlog {scope} {level}");
    let _ = writeln!(io::stderr(), "{}", render_line(&Local::now(), &label, msg));
}

/// Failed writes, rejected HTTP posts.
pub fn error_runtime(scope: &str, msg: &str) {
    log(Severity::ErrorRuntime, scope, msg);
}

/// Config that was accepted but probably not what the caller meant.
pub fn warn(scope: &str, msg: &str) {
    log(Severity::Warn, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Severity::Info, scope, msg);
}

/// Which sinks got built and with which thresholds.
pub fn debug(scope: &str, msg: &str) {
    log(Severity::Debug, scope, msg);
}
