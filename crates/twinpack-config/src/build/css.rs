use serde::{Deserialize, Serialize};

use crate::build::helpers::{
    default_css_chunk_filename, default_css_filename, default_import_loaders,
    default_local_ident_name, default_true,
};

/// Stylesheet extraction and CSS module configuration
///
/// One policy for both backends: the translator renders these values into
/// identical `css-loader` options regardless of which extraction plugin is
/// active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssOptions {
    /// Filename template for stylesheets extracted from entry chunks
    #[serde(default = "default_css_filename")]
    pub filename: String,

    /// Filename template for stylesheets extracted from async chunks
    #[serde(default = "default_css_chunk_filename")]
    pub chunk_filename: String,

    /// Suppress conflicting-order warnings from the extraction plugin
    #[serde(default = "default_true")]
    pub ignore_order: bool,

    /// Emit CSS source maps
    #[serde(default = "default_true")]
    pub source_map: bool,

    /// Number of loaders applied to `@import`ed stylesheets before css-loader
    #[serde(default = "default_import_loaders")]
    pub import_loaders: u32,

    /// CSS modules (scoped class names)
    #[serde(default)]
    pub modules: CssModulesOptions,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            filename: default_css_filename(),
            chunk_filename: default_css_chunk_filename(),
            ignore_order: true,
            source_map: true,
            import_loaders: default_import_loaders(),
            modules: CssModulesOptions::default(),
        }
    }
}

/// CSS modules policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssModulesOptions {
    /// Treat `*.module.<ext>` files as CSS modules, everything else as global
    #[serde(default = "default_true")]
    pub auto: bool,

    #[serde(default)]
    pub named_export: bool,

    #[serde(default)]
    pub export_globals: bool,

    /// How local class names are exposed to JavaScript
    #[serde(default)]
    pub export_locals_convention: LocalsConvention,

    /// Pattern used to build scoped class names
    #[serde(default = "default_local_ident_name")]
    pub local_ident_name: String,
}

impl Default for CssModulesOptions {
    fn default() -> Self {
        Self {
            auto: true,
            named_export: false,
            export_globals: false,
            export_locals_convention: LocalsConvention::CamelCase,
            local_ident_name: default_local_ident_name(),
        }
    }
}

/// Naming convention for exported CSS module locals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocalsConvention {
    /// Export class names as written
    AsIs,
    /// Export both the original and the camelCased name
    #[default]
    CamelCase,
    /// Export only the camelCased name
    CamelCaseOnly,
    /// Export both the original name and one with only dashes camelCased
    Dashes,
    /// Export only the dashes-camelCased name
    DashesOnly,
}

impl LocalsConvention {
    /// Value understood by css-loader
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsIs => "asIs",
            Self::CamelCase => "camelCase",
            Self::CamelCaseOnly => "camelCaseOnly",
            Self::Dashes => "dashes",
            Self::DashesOnly => "dashesOnly",
        }
    }
}
