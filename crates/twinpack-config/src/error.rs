//! Error types for configuration validation and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Filesystem validation errors (for CLI use)
    #[error("entry source not found: {}", path.display())]
    EntryNotFound { entry: String, path: PathBuf },

    // Config parsing/loading errors
    #[error("config not found")]
    NotFound,

    #[error(
        "invalid config value for '{field}'{}",
        hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default()
    )]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid profile override: {message}")]
    InvalidProfileOverride { message: String },

    #[error("profile '{0}' is not defined")]
    ProfileNotFound(String),

    // Schema validation errors (no filesystem checks)
    #[error("no entries specified")]
    NoEntries,

    #[error("schema validation failed: {message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    /// Output settings that encode contradictory caching assumptions
    #[error("incompatible output settings for {mode} mode: {message}")]
    IncompatibleOutputMode { mode: String, message: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Actionable hint attached to the error, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { hint, .. } | Self::SchemaValidation { hint, .. } => {
                hint.as_deref()
            }
            Self::NoEntries => Some("Declare at least one entry under [build.entries]"),
            Self::NotFound => {
                Some("Create a twinpack.toml or add a 'twinpack' field to package.json")
            }
            _ => None,
        }
    }
}
