//! Command-line front end: send one entry through the configured sinks.
//!
//! Handy for shell scripts and for checking a config file before deploying it.

use crate::config::{Config, SHORT_CODE_KEY};
use crate::group::Group;
use crate::internal;
use crate::level::Severity;
use crate::logger::{Dispatcher, Log, Meta};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

/// sevlog - Send a log entry through the configured sinks.
#[derive(Debug, Parser)]
#[command(name = "sevlog", version, about = "Send a log entry through the configured sinks")]
pub struct Cli {
    /// Config file (TOML, or JSON with a .json extension). Defaults to the user config dir.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides `shortCode` from the config.
    #[arg(short, long)]
    pub short_code: Option<String>,

    /// Tags the entry with a group name.
    #[arg(short, long)]
    pub group: Option<String>,

    /// Metadata as key=value; values that parse as JSON keep their type.
    #[arg(short, long = "meta", value_parser = parse_meta)]
    pub meta: Vec<(String, Value)>,

    /// emerg, errorRuntime, errorLogic, warn, status, info, debug or debugEx
    pub level: Severity,

    /// Message text; multiple words are joined with spaces.
    #[arg(required = true)]
    pub text: Vec<String>,
}

fn parse_meta(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn load_config(cli: &Cli) -> Result<Config, crate::Error> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(match &cli.short_code {
        Some(code) => config.with(SHORT_CODE_KEY, Value::String(code.clone())),
        None => config,
    })
}

/// Runs one CLI invocation.
#[must_use]
pub fn run(cli: Cli) -> ExitCode {
    internal::init();

    let dispatcher = match load_config(&cli).and_then(|config| Dispatcher::from_config(&config)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let text = cli.text.join(" ");
    let meta: Meta = cli.meta.into_iter().collect();

    match cli.group {
        Some(name) => Group::new(&dispatcher, name).log(cli.level, &text, meta),
        None => dispatcher.log(cli.level, &text, meta),
    }

    if let Err(e) = dispatcher.flush() {
        eprintln!("Error flushing outputs: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
