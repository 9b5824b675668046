//! Colors and line renderers, kept apart from the transports so the internal
//! diagnostics and the benches can reuse them.

mod color;
mod format;

pub use color::{AnsiColor, ParseStyleError, Style};
pub use format::{DATE_FORMAT, format_date, render_line, render_pretty};
