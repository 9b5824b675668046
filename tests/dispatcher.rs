//! Tests for dispatcher construction and routing.

use chrono::{Local, TimeZone};
use serde_json::{Value, json};
use sevlog::logger::render_record;
use sevlog::output::{ConsoleFormat, ConsoleOutput};
use sevlog::{
    Composite, CompositeKind, Config, Dispatcher, Log, LogRecord, Meta, Output, Severity,
};
use std::sync::{Arc, Mutex};

/// Captures what a composite hands to its outputs.
#[derive(Clone, Default)]
struct Capture {
    threshold: Option<Severity>,
    lines: Arc<Mutex<Vec<(Severity, String, String)>>>,
}

impl Capture {
    fn at(level: Severity) -> Self {
        Self {
            threshold: Some(level),
            ..Self::default()
        }
    }

    fn take(&self) -> Vec<(Severity, String, String)> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

impl Output for Capture {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn threshold(&self) -> Severity {
        self.threshold.unwrap_or(Severity::DebugEx)
    }

    fn write(&self, record: &LogRecord<'_>) -> Result<(), sevlog::Error> {
        self.lines.lock().unwrap().push((
            record.level,
            record.message.to_string(),
            record.service.to_string(),
        ));
        Ok(())
    }

    fn flush(&self) -> Result<(), sevlog::Error> {
        Ok(())
    }
}

/// Always fails; the dispatcher must keep going.
struct Broken;

impl Output for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn threshold(&self) -> Severity {
        Severity::DebugEx
    }

    fn write(&self, _record: &LogRecord<'_>) -> Result<(), sevlog::Error> {
        Err(sevlog::Error::Format("nope".to_string()))
    }

    fn flush(&self) -> Result<(), sevlog::Error> {
        Ok(())
    }
}

#[test]
fn empty_config_builds_no_composites() {
    let logger = Dispatcher::from_config(&Config::new()).unwrap();
    assert!(!logger.has_text());
    assert!(!logger.has_json());
    assert_eq!(logger.transport_count(), 0);
    assert_eq!(logger.service(), None);

    logger.info("hello");
    logger.emerg_with("still nothing", Meta::new());
    assert!(logger.flush().is_ok());
}

#[test]
fn invalid_shape_fails_construction() {
    let config = Config::from_value(json!({ "console": 42 })).unwrap();
    let err = Dispatcher::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("console"));
}

#[test]
fn console_builds_text_composite() {
    let config = Config::from_value(json!({ "console": { "level": 6 } })).unwrap();
    let logger = Dispatcher::from_config(&config).unwrap();
    assert!(logger.has_text());
    assert!(!logger.has_json());
    assert_eq!(logger.text().unwrap().kind(), CompositeKind::Text);
}

#[test]
fn loki_replaces_text_console_with_json_console() {
    let config = Config::from_value(json!({ "loki": { "level": 4 }, "console": true })).unwrap();
    let logger = Dispatcher::from_config(&config).unwrap();
    assert!(!logger.has_text());
    assert!(logger.has_json());
    assert_eq!(logger.transport_count(), 1);
}

#[test]
fn literal_sinks_build_nothing() {
    let config = Config::from_value(json!({ "file": "/tmp/x.log", "console": "yes" })).unwrap();
    let logger = Dispatcher::from_config(&config).unwrap();
    assert_eq!(logger.transport_count(), 0);
}

#[test]
fn unknown_threshold_falls_back_to_default() {
    let config = Config::from_value(json!({ "console": { "level": "verbose" } })).unwrap();
    let logger = Dispatcher::from_config(&config).unwrap();
    assert_eq!(logger.transport_count(), 1);
}

#[test]
fn text_gets_raw_text_and_json_gets_record() {
    let text = Capture::default();
    let json_out = Capture::default();
    let logger = Dispatcher::builder()
        .service("SVC")
        .text_output(text.clone())
        .json_output(json_out.clone())
        .build();

    let mut meta = Meta::new();
    meta.insert("user".to_string(), json!(42));
    logger.status_with("booted", meta);

    assert_eq!(
        text.take(),
        vec![(Severity::Status, "booted".to_string(), "SVC".to_string())]
    );

    let captured = json_out.take();
    assert_eq!(captured.len(), 1);
    let record: Value = serde_json::from_str(&captured[0].1).unwrap();
    assert_eq!(record["text"], "booted");
    assert_eq!(record["level"], "status");
    assert_eq!(record["user"], 42);
    assert!(record["ts"].as_i64().unwrap() > 0);
}

#[test]
fn outputs_filter_on_their_own_threshold() {
    let strict = Capture::at(Severity::Warn);
    let chatty = Capture::at(Severity::DebugEx);
    let logger = Dispatcher::builder()
        .text_output(strict.clone())
        .text_output(chatty.clone())
        .build();

    logger.debug_ex("trace me");
    logger.error_logic("bad state");

    assert_eq!(strict.take().len(), 1);
    assert_eq!(chatty.take().len(), 2);
}

#[test]
fn failing_output_does_not_block_others() {
    let capture = Capture::default();
    let logger = Dispatcher::builder()
        .json_output(Broken)
        .json_output(capture.clone())
        .build();

    logger.warn("still delivered");
    assert_eq!(capture.take().len(), 1);
}

#[test]
fn builder_omits_empty_composites() {
    let builder = Dispatcher::builder().json_output(ConsoleOutput::raw());
    assert_eq!(builder.text_count(), 0);
    assert_eq!(builder.json_count(), 1);

    let logger = builder.build();
    assert!(logger.text().is_none());
    assert_eq!(logger.json().unwrap().service(), "APP");
}

#[test]
fn record_shape() {
    let now = Local.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let rendered = render_record(Severity::Info, "hi", Meta::new(), &now).unwrap();
    let record: Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(record["text"], "hi");
    assert_eq!(record["level"], "info");
    assert_eq!(record["date"], "2024-05-01 08:00:00");
    assert_eq!(record["ts"], now.timestamp());
    assert_eq!(record.as_object().unwrap().len(), 4);
}

#[test]
fn record_meta_overrides_builtins() {
    let now = Local::now();
    let mut meta = Meta::new();
    meta.insert("level".to_string(), json!("custom"));
    meta.insert("extra".to_string(), json!([1, 2]));

    let record: Value =
        serde_json::from_str(&render_record(Severity::Debug, "x", meta, &now).unwrap()).unwrap();
    assert_eq!(record["level"], "custom");
    assert_eq!(record["extra"], json!([1, 2]));
}

#[test]
fn console_formats_from_config() {
    let out = ConsoleOutput::text().colors(false).level(Severity::Status);
    assert_eq!(out.format(), ConsoleFormat::Text { colors: false });
    assert_eq!(Output::threshold(&out), Severity::Status);
}

#[test]
fn standalone_composite_filters_per_output() {
    let quiet = Capture::at(Severity::Warn);
    let chatty = Capture::at(Severity::DebugEx);

    let empty = Composite::new(CompositeKind::Text, "JOBS");
    assert!(empty.is_empty());

    let composite = Composite::new(CompositeKind::Text, "JOBS")
        .output(quiet.clone())
        .output(chatty.clone());
    assert!(!composite.is_empty());
    assert_eq!(composite.len(), 2);
    assert_eq!(composite.kind(), CompositeKind::Text);
    assert_eq!(composite.service(), "JOBS");

    composite.log(Severity::Info, "queued");
    composite.log(Severity::ErrorLogic, "bad state");

    assert_eq!(
        quiet.take(),
        vec![(Severity::ErrorLogic, "bad state".to_string(), "JOBS".to_string())]
    );
    assert_eq!(chatty.take().len(), 2);
}
