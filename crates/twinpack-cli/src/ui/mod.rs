//! Terminal output for status messages and summaries.
//!
//! Everything here writes to stderr; stdout is reserved for command output
//! such as the rendered configuration.
//!
//! # Examples
//!
//! ```no_run
//! use twinpack_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Configuration is valid");
//! ui::error("No backend selected");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_decision, print_plan_summary};
pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, falls back to terminal detection on
/// stderr.
pub fn should_use_color() -> bool {
    crate::logger::should_use_colors()
}

/// Decide once whether status output is colored.
///
/// `no_color` comes from `--no-color` and always wins.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
