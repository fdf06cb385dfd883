//! Declarative build description shared by both bundler backends.

mod css;
mod helpers;
mod html;
mod types;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

pub use css::{CssModulesOptions, CssOptions, LocalsConvention};
pub use html::HtmlOptions;
pub use types::{AssetOptions, OutputMode, OutputOptions};

use helpers::default_entries;

/// Main build configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Named entries, each an ordered list of dependency-root sources
    #[serde(default = "default_entries")]
    pub entries: IndexMap<String, Vec<PathBuf>>,

    /// Output layout and module-output mode
    #[serde(default)]
    pub output: OutputOptions,

    /// Asset classification thresholds and emission templates
    #[serde(default)]
    pub assets: AssetOptions,

    /// Stylesheet extraction and CSS modules
    #[serde(default)]
    pub css: CssOptions,

    /// HTML page generation
    #[serde(default)]
    pub html: HtmlOptions,

    /// Enable minification
    #[serde(default)]
    pub minify: bool,
}

impl BuildOptions {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use twinpack_config::BuildOptions;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "entries": { "main": ["./src/main.mjs"] },
    ///     "assets": { "svg_inline_limit": 0 }
    /// });
    ///
    /// let options = BuildOptions::from_value(value).unwrap();
    /// assert!(options.entries.contains_key("main"));
    /// assert_eq!(options.assets.svg_inline_limit, 0);
    /// ```
    pub fn from_value(value: Value) -> Result<Self, crate::error::ConfigError> {
        serde_json::from_value(value).map_err(|e| crate::error::ConfigError::InvalidValue {
            field: "build".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value, crate::error::ConfigError> {
        serde_json::to_value(self).map_err(|e| crate::error::ConfigError::InvalidValue {
            field: "build".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Add (or replace) a named entry
    ///
    /// # Example
    /// ```
    /// use twinpack_config::BuildOptions;
    ///
    /// let options = BuildOptions::default()
    ///     .with_entry("admin", ["./src/admin.mjs"]);
    /// assert_eq!(options.entries.len(), 2);
    /// ```
    pub fn with_entry<I, P>(mut self, name: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.entries
            .insert(name.into(), sources.into_iter().map(Into::into).collect());
        self
    }

    /// Switch the module-output mode
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output.mode = mode;
        self
    }

    /// Set the SVG inline threshold in bytes
    pub fn with_svg_inline_limit(mut self, bytes: u64) -> Self {
        self.assets.svg_inline_limit = bytes;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            output: OutputOptions::default(),
            assets: AssetOptions::default(),
            css: CssOptions::default(),
            html: HtmlOptions::default(),
            minify: false,
        }
    }
}
