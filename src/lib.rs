#![forbid(unsafe_code)]

//! `sevlog` - Eight-level logging façade with console, file and remote collector sinks.
//!
//! A loosely-shaped config (each sink given as `true`, a string, or a table) is
//! normalized into concrete thresholds and turned into up to two composites:
//! a "text" one receiving level and raw text, and a "json" one receiving a
//! serialized `{ text, level, date, ts, ...meta }` record.
//!
//! # Example
//!
//! ```
//! use sevlog::{Config, Dispatcher, Group, Log};
//! use serde_json::json;
//!
//! let config = Config::from_value(json!({
//!     "shortCode": "api",
//!     "console": { "level": "debug", "colors": false },
//! }))
//! .unwrap();
//!
//! let logger = Dispatcher::from_config(&config).unwrap();
//! logger.status("service started");
//!
//! let worker = Group::new(&logger, "WORKER");
//! worker.warn("queue is backing up");
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `sevlog` binary

pub mod config;
pub mod error;
pub mod fmt;
pub mod global;
pub mod group;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Config, ConfigError, NormalizedConfig, RawSinkConfig, normalize};
pub use error::Error;
pub use global::{Global, create_instance};
pub use group::Group;
pub use level::Severity;
pub use logger::{Dispatcher, DispatcherBuilder, Log, Meta};
pub use output::{Composite, CompositeKind, LogRecord, Output};
