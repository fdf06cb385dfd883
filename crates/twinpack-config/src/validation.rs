//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::Path;

use crate::build::{BuildOptions, OutputMode};
use crate::error::{ConfigError, Result};

/// Public path that pins asset URLs to the site root
const ROOT_PUBLIC_PATH: &str = "/";

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate build options
    fn validate(&self, config: &BuildOptions) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use twinpack_config::{BuildOptions, SchemaValidator, ConfigValidator};
///
/// let config = BuildOptions::default();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &BuildOptions) -> Result<()> {
        if config.entries.is_empty() {
            return Err(ConfigError::NoEntries);
        }

        for (name, sources) in &config.entries {
            if name.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "entry names cannot be empty".to_string(),
                    hint: Some("Give every entry under [build.entries] a name".to_string()),
                });
            }
            if sources.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("entry '{}' has no sources", name),
                    hint: Some(format!("List at least one source file for '{}'", name)),
                });
            }
        }

        let templates = [
            ("assets.svg_filename", &config.assets.svg_filename),
            ("assets.filename", &config.assets.filename),
            ("css.filename", &config.css.filename),
            ("css.chunk_filename", &config.css.chunk_filename),
        ];
        for (field, template) in templates {
            if !template.contains("[name]") {
                return Err(ConfigError::SchemaValidation {
                    message: format!("{} must contain a [name] token", field),
                    hint: Some(format!("Got '{}'", template)),
                });
            }
        }

        validate_output_mode(config)
    }
}

/// Reject output settings that mix the two modes' caching assumptions
fn validate_output_mode(config: &BuildOptions) -> Result<()> {
    let output = &config.output;
    match output.mode {
        OutputMode::Traditional => {
            if let Some(filename) = &output.filename {
                if filename.contains("[contenthash") {
                    return Err(ConfigError::IncompatibleOutputMode {
                        mode: output.mode.to_string(),
                        message: format!(
                            "script filename '{}' embeds a content hash; \
                             traditional mode names scripts by entry only",
                            filename
                        ),
                    });
                }
            }
        }
        OutputMode::Module => {
            if output.public_path.as_deref() == Some(ROOT_PUBLIC_PATH) {
                return Err(ConfigError::IncompatibleOutputMode {
                    mode: output.mode.to_string(),
                    message: "module mode auto-detects the public path; \
                              a hard-coded '/' is not allowed"
                        .to_string(),
                });
            }
            if let Some(filename) = &output.filename {
                if !filename.contains("[contenthash") {
                    return Err(ConfigError::IncompatibleOutputMode {
                        mode: output.mode.to_string(),
                        message: format!(
                            "script filename '{}' has no [contenthash] token; \
                             module mode requires cache-busting names",
                            filename
                        ),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Filesystem validator (for CLI use)
///
/// Validates that every entry source exists on disk.
///
/// # Example
///
/// ```no_run
/// use twinpack_config::{BuildOptions, FsValidator, ConfigValidator};
///
/// let config = BuildOptions::default();
/// let validator = FsValidator::new(".");
/// validator.validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: std::path::PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &BuildOptions) -> Result<()> {
        SchemaValidator.validate(config)?;

        for (name, sources) in &config.entries {
            for source in sources {
                let path = self.root.join(source);
                if !path.exists() {
                    return Err(ConfigError::EntryNotFound {
                        entry: name.clone(),
                        path,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
///
/// # Example
///
/// ```
/// use twinpack_config::{BuildOptions, validate_schema};
///
/// validate_schema(&BuildOptions::default()).unwrap();
/// ```
pub fn validate_schema(config: &BuildOptions) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &BuildOptions, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
