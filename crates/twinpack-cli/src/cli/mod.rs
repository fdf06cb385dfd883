//! Command-line interface definition for twinpack.
//!
//! # Command Structure
//!
//! - `twinpack resolve` - Render the bundler configuration for the active backend
//! - `twinpack classify` - Explain how one asset is processed
//! - `twinpack check` - Validate configuration and backend selection
//!
//! The backend is never a flag: it comes from the `WEBPACK` / `RSPACK`
//! environment variables so the same script works for both bundlers.

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{CheckArgs, ClassifyArgs, Command, ConfigArgs, OverrideArgs, ResolveArgs};
pub use enums::*;
pub use validation::parse_size;

/// twinpack - one build description for webpack and rspack
#[derive(Parser, Debug)]
#[command(
    name = "twinpack",
    version,
    about = "Resolve one build description into webpack or rspack configuration",
    long_about = "twinpack classifies assets and renders bundler configuration that yields\n\
                  the same output layout under webpack and rspack.\n\n\
                  Select the backend with exactly one of WEBPACK=1 or RSPACK=1."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows the selected backend, every classification decision and the
    /// planned output layout.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
