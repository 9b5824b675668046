//! Tests for name-tagged groups.

use serde_json::{Value, json};
use sevlog::group::GROUP_NAME_KEY;
use sevlog::{Group, Log, Meta, Severity};
use std::cell::RefCell;

/// Records what the wrapped logger receives.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<(Severity, String, Meta)>>,
}

impl Log for Recorder {
    fn log(&self, level: Severity, text: &str, meta: Meta) {
        self.calls.borrow_mut().push((level, text.to_string(), meta));
    }
}

#[test]
fn prefixes_text_and_tags_meta() {
    let recorder = Recorder::default();
    let group = Group::new(&recorder, "WORKER");

    group.warn("failed");

    let calls = recorder.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (level, text, meta) = &calls[0];
    assert_eq!(*level, Severity::Warn);
    assert_eq!(text, "WORKER failed");
    assert_eq!(meta[GROUP_NAME_KEY], Value::String("WORKER".to_string()));
}

#[test]
fn keeps_caller_meta() {
    let recorder = Recorder::default();
    let group = Group::new(&recorder, "DB");

    let mut meta = Meta::new();
    meta.insert("table".to_string(), json!("users"));
    group.error_logic_with("constraint violated", meta);

    let calls = recorder.calls.borrow();
    let (level, _, meta) = &calls[0];
    assert_eq!(*level, Severity::ErrorLogic);
    assert_eq!(meta["table"], "users");
    assert_eq!(meta["groupName"], "DB");
}

#[test]
fn rename_applies_to_later_calls() {
    let recorder = Recorder::default();
    let mut group = Group::new(&recorder, "OLD");

    group.info("first");
    group.set_name("NEW");
    group.debug_ex("second");

    assert_eq!(group.name(), "NEW");
    let texts: Vec<String> = recorder
        .calls
        .borrow()
        .iter()
        .map(|(_, text, _)| text.clone())
        .collect();
    assert_eq!(texts, vec!["OLD first", "NEW second"]);
}

#[test]
fn groups_nest() {
    let recorder = Recorder::default();
    let outer = Group::new(&recorder, "API");
    let inner = Group::new(&outer, "AUTH");

    inner.status("ready");
    assert_eq!(inner.inner().name(), "API");

    let calls = recorder.calls.borrow();
    assert_eq!(calls[0].1, "API AUTH ready");
    assert_eq!(calls[0].2["groupName"], "API");
}

#[test]
fn every_level_forwards() {
    let recorder = Recorder::default();
    let group = Group::new(&recorder, "G");

    group.emerg("a");
    group.error_runtime("b");
    group.error_logic("c");
    group.warn("d");
    group.status("e");
    group.info("f");
    group.debug("g");
    group.debug_ex("h");

    let levels: Vec<Severity> = recorder.calls.borrow().iter().map(|c| c.0).collect();
    assert_eq!(levels, Severity::all().to_vec());
}
