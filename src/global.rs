//! Process-wide dispatcher for call sites that can't have one injected.
//!
//! `create_instance` swaps a freshly built dispatcher into a lock-free slot.
//! Calling it again replaces the previous one; calls already running on the old
//! instance finish against it.

use crate::config::Config;
use crate::level::Severity;
use crate::logger::{Dispatcher, Log, Meta};
use arc_swap::ArcSwapOption;
use std::sync::Arc;

static INSTANCE: ArcSwapOption<Dispatcher> = ArcSwapOption::const_empty();

/// Builds a dispatcher from `config` and makes it the global one.
///
/// # Errors
/// Same as [`Dispatcher::from_config`]; the previous instance stays active on error.
pub fn create_instance(config: &Config) -> Result<Arc<Dispatcher>, crate::Error> {
    let dispatcher = Dispatcher::from_config(config)?;
    Ok(install(dispatcher))
}

/// Makes an already built dispatcher the global one.
pub fn install(dispatcher: Dispatcher) -> Arc<Dispatcher> {
    let dispatcher = Arc::new(dispatcher);
    INSTANCE.store(Some(Arc::clone(&dispatcher)));
    dispatcher
}

/// # Errors
/// `Construction` before the first `create_instance`/`install`.
pub fn instance() -> Result<Arc<Dispatcher>, crate::Error> {
    INSTANCE.load_full().ok_or_else(|| {
        crate::Error::Construction("global dispatcher used before create_instance".to_string())
    })
}

#[must_use]
pub fn is_initialized() -> bool {
    INSTANCE.load().is_some()
}

/// Handle that logs through whatever dispatcher is currently installed.
/// Before initialization every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct Global;

impl Log for Global {
    fn log(&self, level: Severity, text: &str, meta: Meta) {
        if let Some(dispatcher) = &*INSTANCE.load() {
            dispatcher.log(level, text, meta);
        }
    }
}
