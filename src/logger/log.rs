//! The leveled calling surface shared by the dispatcher, the global accessor and groups.

use crate::level::Severity;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Caller-supplied fields merged into json records.
pub type Meta = Map<String, Value>;

/// Implementors only provide `log`; one method per severity comes for free,
/// plus a `_with` variant that carries metadata.
pub trait Log {
    /// Routes one entry. Never fails: delivery problems stay inside the transports.
    fn log(&self, level: Severity, text: &str, meta: Meta);

    fn emerg(&self, text: &str) {
        self.log(Severity::Emerg, text, Meta::new());
    }

    fn emerg_with(&self, text: &str, meta: Meta) {
        self.log(Severity::Emerg, text, meta);
    }

    fn error_runtime(&self, text: &str) {
        self.log(Severity::ErrorRuntime, text, Meta::new());
    }

    fn error_runtime_with(&self, text: &str, meta: Meta) {
        self.log(Severity::ErrorRuntime, text, meta);
    }

    fn error_logic(&self, text: &str) {
        self.log(Severity::ErrorLogic, text, Meta::new());
    }

    fn error_logic_with(&self, text: &str, meta: Meta) {
        self.log(Severity::ErrorLogic, text, meta);
    }

    fn warn(&self, text: &str) {
        self.log(Severity::Warn, text, Meta::new());
    }

    fn warn_with(&self, text: &str, meta: Meta) {
        self.log(Severity::Warn, text, meta);
    }

    fn status(&self, text: &str) {
        self.log(Severity::Status, text, Meta::new());
    }

    fn status_with(&self, text: &str, meta: Meta) {
        self.log(Severity::Status, text, meta);
    }

    fn info(&self, text: &str) {
        self.log(Severity::Info, text, Meta::new());
    }

    fn info_with(&self, text: &str, meta: Meta) {
        self.log(Severity::Info, text, meta);
    }

    fn debug(&self, text: &str) {
        self.log(Severity::Debug, text, Meta::new());
    }

    fn debug_with(&self, text: &str, meta: Meta) {
        self.log(Severity::Debug, text, meta);
    }

    fn debug_ex(&self, text: &str) {
        self.log(Severity::DebugEx, text, Meta::new());
    }

    fn debug_ex_with(&self, text: &str, meta: Meta) {
        self.log(Severity::DebugEx, text, meta);
    }
}

impl<L: Log + ?Sized> Log for &L {
    fn log(&self, level: Severity, text: &str, meta: Meta) {
        (**self).log(level, text, meta);
    }
}

impl<L: Log + ?Sized> Log for Arc<L> {
    fn log(&self, level: Severity, text: &str, meta: Meta) {
        (**self).log(level, text, meta);
    }
}
