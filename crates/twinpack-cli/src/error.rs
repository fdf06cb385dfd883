//! Error handling for the twinpack CLI.
//!
//! `CliError` wraps the library errors from `twinpack-config` and
//! `twinpack-resolver` and adds the failures that only exist at the edge
//! (arguments, files, output). Every error is terminal for the run.
//!
//! # Example
//!
//! ```rust,no_run
//! use twinpack_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_asset(path: &Path) -> Result<Vec<u8>> {
//!     std::fs::read(path)
//!         .with_path(path)
//!         .with_hint("Pass --size to classify an asset that is not on disk")
//! }
//! ```

mod miette;

pub use self::miette::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(#[from] twinpack_config::ConfigError),

    /// Resolution errors (backend selection, translation, output layout)
    #[error("{0}")]
    Resolve(#[from] twinpack_resolver::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// Actionable hint for the error, if there is one
    pub fn hint(&self) -> Option<String> {
        use twinpack_resolver::Error as ResolveError;

        match self {
            Self::Config(err) => err.hint().map(str::to_string),
            Self::Resolve(ResolveError::NoBackendSelected) => {
                Some("Run with exactly one of WEBPACK=1 or RSPACK=1 set".to_string())
            }
            Self::Resolve(ResolveError::ConflictingBackends) => {
                Some("Unset WEBPACK or RSPACK so only one backend is selected".to_string())
            }
            Self::Resolve(ResolveError::Config(err)) => err.hint().map(str::to_string),
            Self::Resolve(ResolveError::UnsupportedOutputMode { .. }) => {
                Some("Use --mode traditional or switch backends".to_string())
            }
            Self::Resolve(ResolveError::InvalidTemplate { .. }) => Some(
                "Templates support [name], [ext], [contenthash] and [contenthash:N]".to_string(),
            ),
            Self::FileNotFound(_) => Some("Check the path relative to --root".to_string()),
            _ => None,
        }
    }

    /// Whether the backend selection contract was violated
    pub fn is_backend_contract(&self) -> bool {
        matches!(self, Self::Resolve(err) if err.is_backend_contract())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use std::path::Path;
    /// # use twinpack_cli::error::{Result, ResultExt};
    /// # fn run() -> Result<()> {
    /// let path = Path::new("twinpack.toml");
    /// std::fs::read_to_string(path).with_path(path)?;
    /// # Ok(())
    /// # }
    /// ```
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Add a helpful hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error with a message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
