use serde::{Deserialize, Serialize};
use std::fmt;

use crate::build::helpers::{
    default_asset_filename, default_svg_filename, default_svg_inline_limit, default_true,
};

/// Module-output mode for emitted scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// One script per entry named by entry name, runtime chunk loader,
    /// site-root-relative asset URLs
    #[default]
    Traditional,
    /// Content-hashed scripts loaded with native `import`, auto public path
    Module,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traditional => "traditional",
            Self::Module => "module",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    #[serde(default)]
    pub mode: OutputMode,

    /// Override the public base path (defaults to `/` or `auto` by mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub public_path: Option<String>,

    /// Override the script filename template (defaults by mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub filename: Option<String>,

    /// Remove stale files from the output directory before emitting
    #[serde(default = "default_true")]
    pub clean: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            mode: OutputMode::Traditional,
            public_path: None,
            filename: None,
            clean: true,
        }
    }
}

/// Asset classification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptions {
    /// SVGs strictly smaller than this many bytes are inlined as data URIs.
    /// Zero disables size-based inlining entirely.
    #[serde(default = "default_svg_inline_limit")]
    pub svg_inline_limit: u64,

    /// Filename template for SVGs emitted as files
    #[serde(default = "default_svg_filename")]
    pub svg_filename: String,

    /// Filename template for any other asset emitted as a file
    #[serde(default = "default_asset_filename")]
    pub filename: String,

    /// Public path prefix for emitted assets, relative to the output public path
    #[serde(default)]
    pub public_path: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            svg_inline_limit: default_svg_inline_limit(),
            svg_filename: default_svg_filename(),
            filename: default_asset_filename(),
            public_path: String::new(),
        }
    }
}
