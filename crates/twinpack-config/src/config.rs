//! High-level configuration structure for twinpack.
//!
//! This module provides the main `TwinpackConfig` struct and profile merging logic.
//! For file discovery, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::BuildOptions;
use crate::error::{ConfigError, Result as ConfigResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TwinpackConfig {
    #[serde(default)]
    pub build: BuildOptions,

    /// Named configuration variants merged over `build` on request
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub build: Value,
}

impl TwinpackConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use twinpack_config::TwinpackConfig;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "build": {
    ///         "entries": { "index": ["./src/index.mjs"] },
    ///         "minify": true
    ///     }
    /// });
    ///
    /// let config = TwinpackConfig::from_value(value).unwrap();
    /// assert!(config.build.minify);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Merge the named profile over the base build options.
    ///
    /// Objects merge key by key, arrays and scalars replace. Entry tables are
    /// objects, so a profile adding an entry keeps the base entries.
    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let profile_cfg = self
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))?;

        if !profile_cfg.build.is_null() {
            let mut base = serde_json::to_value(&self.build).map_err(|err| {
                ConfigError::InvalidProfileOverride {
                    message: err.to_string(),
                }
            })?;
            merge_values(&mut base, &profile_cfg.build);
            self.build = serde_json::from_value(base).map_err(|err| {
                ConfigError::InvalidProfileOverride {
                    message: err.to_string(),
                }
            })?;
        }

        tracing::debug!(profile = name, "applied configuration profile");
        Ok(self)
    }
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}
