//! Logging setup for the twinpack CLI.
//!
//! Library crates log through `tracing`; this module installs the
//! subscriber. Logs go to stderr so stdout stays clean for the rendered
//! configuration.
//!
//! # Example
//!
//! ```rust,no_run
//! use twinpack_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("resolving");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "twinpack_cli=debug,twinpack_resolver=debug,twinpack_config=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "twinpack_cli=info,twinpack_resolver=info,twinpack_config=warn";

/// Initialize the tracing subscriber with the specified options.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for twinpack crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for twinpack crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color || !should_use_colors());
}

/// Initialize logger with a custom environment filter.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one stays in place.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) -> bool {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    match tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "tracing subscriber already installed");
            false
        }
    }
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Check if colored output should be enabled.
///
/// - `NO_COLOR`: if set, disables colors
/// - `FORCE_COLOR`: if set, forces colors even in non-TTY
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}
