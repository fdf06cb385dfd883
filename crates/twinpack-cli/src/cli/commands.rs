use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_size;

/// Available twinpack subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the bundler configuration for the selected backend
    ///
    /// Loads twinpack.toml (or the "twinpack" field of package.json),
    /// applies the profile and overrides, and prints or writes the
    /// configuration document consumed by the bundler.
    Resolve(ResolveArgs),

    /// Explain how a single asset is processed
    ///
    /// Shows the winning rule, the processing class, the backend directive
    /// and the emitted filename.
    Classify(ClassifyArgs),

    /// Validate configuration and backend selection without resolving
    Check(CheckArgs),
}

/// Where the configuration comes from
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Project root (defaults to the current directory)
    ///
    /// Backend output directories are created under this root.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Explicit config file instead of discovery
    ///
    /// Relative paths are resolved against the project root.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration profile to merge over the base config
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,
}

/// Command-line overrides, applied after file and environment layers
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Module-output mode
    ///
    /// - traditional: `[name].js`, jsonp chunk loading, public path `/`
    /// - module: `[name][contenthash:10].js`, import chunk loading, public path `auto`
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// SVGs below this size are inlined (e.g. 1000, 4kb, 2KiB; 0 disables)
    #[arg(long, value_parser = parse_size, value_name = "SIZE")]
    pub svg_inline_limit: Option<u64>,

    /// Enable minification in the rendered configuration
    #[arg(short = 'm', long)]
    pub minify: bool,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// What to print
    #[arg(long, value_enum, default_value = "config")]
    pub emit: Emit,

    /// Write the output to a file instead of stdout
    ///
    /// Relative paths are resolved against the project root.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the classify command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Asset as it appears in an import, query included
    ///
    /// Examples:
    ///   twinpack classify ./src/icon.svg
    ///   twinpack classify './src/icon.svg?url'
    ///   twinpack classify './README.md?raw'
    #[arg(value_name = "ASSET")]
    pub asset: String,

    /// Asset size in bytes (read from disk when omitted)
    #[arg(long, value_parser = parse_size, value_name = "SIZE")]
    pub size: Option<u64>,

    /// The asset is referenced through `url()` / `new URL()` rather than an import
    #[arg(long)]
    pub url_dependency: bool,

    /// Local class name to look up in a CSS module (repeatable)
    ///
    /// Prints the names the class is exported under to JavaScript.
    #[arg(long = "local", value_name = "CLASS")]
    pub locals: Vec<String>,

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Skip checking that entry sources exist on disk
    #[arg(long)]
    pub no_fs: bool,
}
