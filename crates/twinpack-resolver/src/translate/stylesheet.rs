//! Stylesheet policy shared by every backend.
//!
//! Only the extraction primitive differs between backends. The `css-loader`
//! options and extraction plugin options rendered here are identical for
//! all of them.

use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

use twinpack_config::{CssOptions, LocalsConvention};

use crate::backend::ExtractionPrimitive;
use crate::translate::{LoaderDirective, LoaderRef};

/// Whether a stylesheet is compiled as a CSS module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CssModuleKind {
    /// Class names are scoped and exported to JavaScript
    Module,
    /// Class names stay global
    Global,
}

/// The JavaScript names one local class of a CSS module is exported under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssExport {
    pub local: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetPolicy {
    options: CssOptions,
}

impl StylesheetPolicy {
    pub fn from_options(options: &CssOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }

    pub fn options(&self) -> &CssOptions {
        &self.options
    }

    /// `css-loader` with the shared options
    pub fn css_loader(&self) -> LoaderDirective {
        let modules = &self.options.modules;
        LoaderDirective {
            loader: LoaderRef::Package("css-loader"),
            options: json!({
                "importLoaders": self.options.import_loaders,
                "sourceMap": self.options.source_map,
                "modules": {
                    "auto": modules.auto,
                    "namedExport": modules.named_export,
                    "exportGlobals": modules.export_globals,
                    "exportLocalsConvention": modules.export_locals_convention.as_str(),
                    "localIdentName": modules.local_ident_name,
                },
            }),
        }
    }

    /// The extraction loader for `primitive`
    pub fn extraction_loader(&self, primitive: &ExtractionPrimitive) -> LoaderDirective {
        let options = if primitive.requires_public_path {
            json!({ "publicPath": "auto" })
        } else {
            json!({})
        };
        LoaderDirective {
            loader: LoaderRef::Export(primitive.loader),
            options,
        }
    }

    /// Constructor options of the extraction plugin
    pub fn plugin_options(&self) -> Value {
        json!({
            "filename": self.options.filename,
            "chunkFilename": self.options.chunk_filename,
            "ignoreOrder": self.options.ignore_order,
        })
    }

    /// How the stylesheet at `path` is compiled
    ///
    /// With `auto` enabled, `*.module.<ext>` and `*.modules.<ext>` files are
    /// CSS modules. Without it nothing is.
    pub fn module_kind(&self, path: impl AsRef<Path>) -> CssModuleKind {
        if !self.options.modules.auto {
            return CssModuleKind::Global;
        }

        let stem = path
            .as_ref()
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let has_ext = path.as_ref().extension().is_some();

        if has_ext && (stem.ends_with(".module") || stem.ends_with(".modules")) {
            CssModuleKind::Module
        } else {
            CssModuleKind::Global
        }
    }

    /// Names under which a local class is exported to JavaScript
    pub fn export_names(&self, local: &str) -> Vec<String> {
        let mut names = match self.options.modules.export_locals_convention {
            LocalsConvention::AsIs => vec![local.to_string()],
            LocalsConvention::CamelCase => vec![local.to_string(), camel_case(local)],
            LocalsConvention::CamelCaseOnly => vec![camel_case(local)],
            LocalsConvention::Dashes => vec![local.to_string(), dashes_camel_case(local)],
            LocalsConvention::DashesOnly => vec![dashes_camel_case(local)],
        };
        names.dedup();
        names
    }
}

impl Default for StylesheetPolicy {
    fn default() -> Self {
        Self::from_options(&CssOptions::default())
    }
}

/// `foo-bar_baz` -> `fooBarBaz`
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, part) in name
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .enumerate()
    {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `foo-bar_baz` -> `fooBar_baz`
fn dashes_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
