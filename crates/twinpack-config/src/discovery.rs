//! File-based config discovery for CLI use
//!
//! Finds a twinpack configuration file and layers it with environment
//! overrides through figment. Priority: environment > file > defaults.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format as _, Serialized, Toml};
use figment::Figment;
use serde_json::Value;

use crate::config::TwinpackConfig;
use crate::error::{ConfigError, Result};

/// Prefix for environment overrides, e.g. `TWINPACK_BUILD__MINIFY=true`
pub const ENV_PREFIX: &str = "TWINPACK_";

const CONFIG_FILE: &str = "twinpack.toml";
const PACKAGE_FIELD: &str = "twinpack";

/// File-based configuration discovery
///
/// Searches for twinpack configuration files in conventional locations and loads them.
/// Library users can build a `TwinpackConfig` with `TwinpackConfig::from_value()` instead.
///
/// # Example
///
/// ```no_run
/// use twinpack_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
    read_env: bool,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            read_env: true,
        }
    }

    /// Skip `TWINPACK_*` environment overrides
    pub fn without_env(mut self) -> Self {
        self.read_env = false;
        self
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: twinpack.toml
    /// 2. package.json (twinpack field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.exists() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_FIELD).is_some_and(|v| !v.is_null()) {
                        return Some(pkg_path);
                    }
                }
            }
        }

        None
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<TwinpackConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load the discovered config, or built-in defaults when there is none
    pub fn load_or_default(&self) -> Result<TwinpackConfig> {
        match self.find() {
            Some(path) => self.load_from(&path),
            None => {
                tracing::debug!(root = %self.root.display(), "no config file, using defaults");
                self.extract(Figment::new())
            }
        }
    }

    /// Load config from a specific file path
    pub fn load_from(&self, path: &Path) -> Result<TwinpackConfig> {
        tracing::debug!(path = %path.display(), "loading config");

        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            return self.load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;
        toml::from_str::<toml::Value>(&content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: Some(format!("Invalid TOML syntax: {}", e)),
        })?;

        self.extract(Figment::new().merge(Toml::string(&content)))
    }

    fn load_from_package_json(&self, path: &Path) -> Result<TwinpackConfig> {
        let content = fs::read_to_string(path)?;

        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;

        let value = parsed
            .get(PACKAGE_FIELD)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: PACKAGE_FIELD.to_string(),
                hint: Some("Add a 'twinpack' object to your package.json".to_string()),
            })?;

        self.extract(Figment::new().merge(Serialized::defaults(value.clone())))
    }

    fn extract(&self, figment: Figment) -> Result<TwinpackConfig> {
        let figment = if self.read_env {
            figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
        } else {
            figment
        };

        figment.extract().map_err(|e| {
            let field = if e.path.is_empty() {
                "config".to_string()
            } else {
                e.path.join(".")
            };
            ConfigError::InvalidValue {
                field,
                hint: Some(e.to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path());
        assert!(discovery.find().is_none());
    }

    #[test]
    fn find_discovers_toml_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("twinpack.toml");
        fs::write(
            &config_path,
            r#"
[build.entries]
index = ["./src/index.mjs"]
"#,
        )
        .unwrap();

        let discovery = ConfigDiscovery::new(dir.path());
        assert_eq!(discovery.find().unwrap(), config_path);
    }

    #[test]
    fn find_ignores_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();

        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let discovery = ConfigDiscovery::new(dir.path()).without_env();
        let result = discovery.load();
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound));
    }

    #[test]
    fn load_or_default_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigDiscovery::new(dir.path())
            .without_env()
            .load_or_default()
            .unwrap();
        assert!(config.build.entries.contains_key("index"));
        assert_eq!(config.build.assets.svg_inline_limit, 1000);
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("twinpack.toml"), "[build\nminify = ").unwrap();

        let err = ConfigDiscovery::new(dir.path())
            .without_env()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "toml"));
    }
}
