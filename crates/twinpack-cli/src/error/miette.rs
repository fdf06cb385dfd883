//! Miette diagnostic conversion for CLI errors.

use ::miette::{miette, Report};

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    let code = diagnostic_code(&err);
    match err.hint() {
        Some(hint) => miette!(code = code, help = hint, "{}", err),
        None => miette!(code = code, "{}", err),
    }
}

fn diagnostic_code(err: &CliError) -> &'static str {
    use twinpack_resolver::Error as ResolveError;

    match err {
        CliError::Resolve(ResolveError::NoBackendSelected | ResolveError::ConflictingBackends) => {
            "twinpack::backend"
        }
        CliError::Resolve(ResolveError::MissingTranslation { .. }) => "twinpack::translation",
        CliError::Resolve(ResolveError::UnsupportedOutputMode { .. }) => "twinpack::output_mode",
        CliError::Resolve(ResolveError::InvalidTemplate { .. }) => "twinpack::template",
        CliError::Config(_) | CliError::Resolve(ResolveError::Config(_)) => "twinpack::config",
        CliError::InvalidArgument(_) => "twinpack::args",
        CliError::FileNotFound(_) | CliError::Io(_) => "twinpack::io",
        _ => "twinpack::error",
    }
}
