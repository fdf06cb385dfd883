//! Resolution error types.
//!
//! Every variant is terminal for the run: a build never proceeds with a
//! configuration that could differ between backends.

use crate::classify::ProcessingClass;
use twinpack_config::OutputMode;

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for resolution operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no bundler backend selected: set exactly one of WEBPACK or RSPACK")]
    NoBackendSelected,

    #[error("conflicting bundler backends: WEBPACK and RSPACK are both set")]
    ConflictingBackends,

    #[error("backend '{backend}' has no translation for processing class '{class}'")]
    MissingTranslation {
        backend: &'static str,
        class: ProcessingClass,
    },

    #[error("backend '{backend}' does not support {mode} output")]
    UnsupportedOutputMode {
        backend: &'static str,
        mode: OutputMode,
    },

    #[error("invalid filename template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] twinpack_config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a violation of the backend selection contract
    pub fn is_backend_contract(&self) -> bool {
        matches!(self, Self::NoBackendSelected | Self::ConflictingBackends)
    }
}
