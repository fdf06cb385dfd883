//! Bundler backends and the per-run backend context.
//!
//! This module defines:
//! - `Backend`: trait implemented once per bundler engine
//! - `Capabilities`: what a backend supports and what its primitives are called
//! - `BackendContext`: the immutable, resolved backend for one run

pub mod rspack;
pub mod selector;
pub mod webpack;

pub use rspack::RspackBackend;
pub use selector::{select_backend, BackendSignals};
pub use webpack::WebpackBackend;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classify::ProcessingClass;
use crate::translate::{Directive, StylesheetPolicy};

/// Built-in backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Webpack,
    Rspack,
}

impl BackendKind {
    pub const ALL: [Self; 2] = [Self::Webpack, Self::Rspack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webpack => "webpack",
            Self::Rspack => "rspack",
        }
    }

    /// Environment variable whose truthiness selects this backend
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Webpack => "WEBPACK",
            Self::Rspack => "RSPACK",
        }
    }

    /// Instantiate the backend implementation
    pub fn backend(&self) -> Arc<dyn Backend> {
        match self {
            Self::Webpack => Arc::new(WebpackBackend),
            Self::Rspack => Arc::new(RspackBackend),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a JavaScript export, resolved by the shim that loads the
/// rendered configuration (`require(from)[member]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct JsRef {
    pub from: &'static str,
    pub member: &'static str,
}

impl JsRef {
    pub const fn new(from: &'static str, member: &'static str) -> Self {
        Self { from, member }
    }
}

/// A backend's stylesheet extraction primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionPrimitive {
    /// Human-facing name of the primitive
    pub name: &'static str,
    /// Plugin constructor
    pub plugin: JsRef,
    /// Loader paired with the plugin
    pub loader: JsRef,
    /// The loader needs `publicPath` spelled out instead of inferring it
    pub requires_public_path: bool,
}

/// Capability table of a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Chunks can be emitted as native modules and loaded with `import`
    pub native_module_chunks: bool,
    pub css_extract: ExtractionPrimitive,
    /// HTML page generation plugin
    pub html_plugin: JsRef,
    /// Output directory under the project root, unique per backend
    pub output_dir: &'static str,
}

/// Trait for bundler backends that turn processing classes into directives
///
/// Adding a backend means implementing this trait; the rule table, output
/// layout, and stylesheet policy are shared.
pub trait Backend: Send + Sync {
    /// Unique identifier (e.g., "webpack", "rspack")
    fn name(&self) -> &'static str;

    /// Capability table for this backend
    fn capabilities(&self) -> Capabilities;

    /// Directive that realizes `class` under this backend.
    ///
    /// `None` means the backend cannot express the class, which aborts
    /// resolution.
    fn translate(&self, class: ProcessingClass, policy: &StylesheetPolicy) -> Option<Directive>;
}

/// The resolved backend for one run
///
/// Built once from explicit signals and passed by reference to everything
/// that needs it. Never mutated.
#[derive(Clone)]
pub struct BackendContext {
    backend: Arc<dyn Backend>,
    capabilities: Capabilities,
    output_dir: PathBuf,
}

impl BackendContext {
    /// Context for an arbitrary backend rooted at `project_root`
    pub fn new(backend: Arc<dyn Backend>, project_root: impl AsRef<Path>) -> Self {
        let capabilities = backend.capabilities();
        let output_dir = project_root.as_ref().join(capabilities.output_dir);
        Self {
            backend,
            capabilities,
            output_dir,
        }
    }

    /// Context for one of the built-in backends
    pub fn for_kind(kind: BackendKind, project_root: impl AsRef<Path>) -> Self {
        Self::new(kind.backend(), project_root)
    }

    pub fn name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Absolute output directory for this backend
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl fmt::Debug for BackendContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendContext")
            .field("backend", &self.name())
            .field("capabilities", &self.capabilities)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_dirs_are_disjoint() {
        let webpack = BackendContext::for_kind(BackendKind::Webpack, "/project");
        let rspack = BackendContext::for_kind(BackendKind::Rspack, "/project");

        assert_eq!(webpack.output_dir(), Path::new("/project/webpack-dist"));
        assert_eq!(rspack.output_dir(), Path::new("/project/rspack-dist"));
        assert_ne!(webpack.output_dir(), rspack.output_dir());
    }

    #[test]
    fn kind_names_match_backend_names() {
        for kind in BackendKind::ALL {
            assert_eq!(kind.backend().name(), kind.as_str());
        }
    }

    #[test]
    fn extraction_primitives_differ_only_in_naming_and_public_path() {
        let webpack = WebpackBackend.capabilities().css_extract;
        let rspack = RspackBackend.capabilities().css_extract;

        assert_eq!(webpack.name, "MiniCssExtractPlugin");
        assert_eq!(rspack.name, "CssExtractRspackPlugin");
        assert!(webpack.requires_public_path);
        assert!(!rspack.requires_public_path);
    }
}
