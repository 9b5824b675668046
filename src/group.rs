//! Name-tagged logging for one subsystem.

use crate::level::Severity;
use crate::logger::{Log, Meta};
use serde_json::Value;

/// Metadata key carrying the group name.
pub const GROUP_NAME_KEY: &str = "groupName";

/// Wraps any [`Log`] and tags every entry: the text becomes `"{name} {text}"`
/// and the metadata gains `groupName`.
#[derive(Debug, Clone)]
pub struct Group<L> {
    inner: L,
    name: String,
}

impl<L: Log> Group<L> {
    pub fn new(inner: L, name: impl Into<String>) -> Self {
        Self {
            inner,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Later entries carry the new name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub const fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Log> Log for Group<L> {
    fn log(&self, level: Severity, text: &str, mut meta: Meta) {
        meta.insert(GROUP_NAME_KEY.to_string(), Value::String(self.name.clone()));
        self.inner.log(level, &format!("{} {text}", self.name), meta);
    }
}
