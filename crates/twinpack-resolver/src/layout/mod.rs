//! Output layout planning.
//!
//! Decides the emitted filename templates and the chunk loading strategy.
//! The plan depends on the backend only through its name, its output
//! directory and whether it can emit native-module chunks, so both backends
//! produce the same set of files for the same options.

pub mod template;

pub use template::{ContentHash, Template, Token, DEFAULT_HASH_LENGTH};

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use twinpack_config::{BuildOptions, OutputMode};

use crate::backend::BackendContext;
use crate::error::{Error, Result};

const TRADITIONAL_SCRIPT: &str = "[name].js";
const MODULE_SCRIPT: &str = "[name][contenthash:10].js";

/// How chunks are wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkFormat {
    /// Pushed onto a global array by a runtime loader
    ArrayPush,
    /// Native ES modules
    Module,
}

/// How non-initial chunks are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkLoading {
    Jsonp,
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WasmLoading {
    /// Streaming compilation from `fetch`
    Fetch,
}

/// Base URL emitted assets are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicPath {
    /// Site root (`/`)
    Root,
    /// Inferred at runtime from the loading script (`auto`)
    Auto,
    Custom(String),
}

impl PublicPath {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "/" => Self::Root,
            "auto" => Self::Auto,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "/",
            Self::Auto => "auto",
            Self::Custom(path) => path,
        }
    }
}

impl fmt::Display for PublicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PublicPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Script output of one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPlan {
    pub name: String,
    pub sources: Vec<PathBuf>,
    pub filename: Template,
    pub chunk_format: ChunkFormat,
    pub chunk_loading: ChunkLoading,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_chunk_loading: Option<ChunkLoading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wasm_loading: Option<WasmLoading>,
    pub public_path: PublicPath,
}

/// The resolved output layout for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPlan {
    pub backend: &'static str,
    pub output_dir: PathBuf,
    pub mode: OutputMode,
    /// In declaration order
    pub entries: Vec<EntryPlan>,
    /// Stylesheets extracted from entry chunks
    pub stylesheet: Template,
    /// Stylesheets extracted from async chunks
    pub async_stylesheet: Template,
    /// SVGs emitted as files
    pub svg: Template,
    /// Any other asset emitted as a file
    pub asset: Template,
    /// Prefix for asset URLs, relative to the public path
    pub asset_public_path: String,
}

impl OutputPlan {
    /// Every filename template the build can emit, backend tokens excluded
    pub fn emitted_templates(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .map(|entry| &entry.filename)
            .chain([&self.stylesheet, &self.async_stylesheet, &self.svg, &self.asset])
            .map(|template| template.as_str().to_string())
            .collect()
    }

    pub fn entry(&self, name: &str) -> Option<&EntryPlan> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

/// Plan the output layout of `options` under `ctx`
///
/// `options` is expected to have passed schema validation; this only adds
/// the backend capability check.
pub fn plan(options: &BuildOptions, ctx: &BackendContext) -> Result<OutputPlan> {
    let mode = options.output.mode;
    if mode == OutputMode::Module && !ctx.capabilities().native_module_chunks {
        return Err(Error::UnsupportedOutputMode {
            backend: ctx.name(),
            mode,
        });
    }

    let script = Template::parse(options.output.filename.as_deref().unwrap_or(match mode {
        OutputMode::Traditional => TRADITIONAL_SCRIPT,
        OutputMode::Module => MODULE_SCRIPT,
    }))?;

    let public_path = match (&options.output.public_path, mode) {
        (Some(path), _) => PublicPath::parse(path),
        (None, OutputMode::Traditional) => PublicPath::Root,
        (None, OutputMode::Module) => PublicPath::Auto,
    };

    let entries = options
        .entries
        .iter()
        .map(|(name, sources)| match mode {
            OutputMode::Traditional => EntryPlan {
                name: name.clone(),
                sources: sources.clone(),
                filename: script.clone(),
                chunk_format: ChunkFormat::ArrayPush,
                chunk_loading: ChunkLoading::Jsonp,
                worker_chunk_loading: None,
                wasm_loading: None,
                public_path: public_path.clone(),
            },
            OutputMode::Module => EntryPlan {
                name: name.clone(),
                sources: sources.clone(),
                filename: script.clone(),
                chunk_format: ChunkFormat::Module,
                chunk_loading: ChunkLoading::Import,
                worker_chunk_loading: Some(ChunkLoading::Import),
                wasm_loading: Some(WasmLoading::Fetch),
                public_path: public_path.clone(),
            },
        })
        .collect();

    let plan = OutputPlan {
        backend: ctx.name(),
        output_dir: ctx.output_dir().to_path_buf(),
        mode,
        entries,
        stylesheet: Template::parse(&options.css.filename)?,
        async_stylesheet: Template::parse(&options.css.chunk_filename)?,
        svg: Template::parse(&options.assets.svg_filename)?,
        asset: Template::parse(&options.assets.filename)?,
        asset_public_path: options.assets.public_path.clone(),
    };

    tracing::debug!(
        backend = plan.backend,
        mode = %plan.mode,
        entries = plan.entries.len(),
        "planned output layout"
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;

    fn webpack() -> BackendContext {
        BackendContext::for_kind(BackendKind::Webpack, "/app")
    }

    #[test]
    fn traditional_layout() {
        let plan = plan(&BuildOptions::default(), &webpack()).unwrap();
        let entry = plan.entry("index").unwrap();

        assert_eq!(entry.filename.as_str(), "[name].js");
        assert_eq!(entry.chunk_format, ChunkFormat::ArrayPush);
        assert_eq!(entry.chunk_loading, ChunkLoading::Jsonp);
        assert_eq!(entry.public_path, PublicPath::Root);
        assert_eq!(entry.wasm_loading, None);
        assert_eq!(plan.output_dir, PathBuf::from("/app/webpack-dist"));
    }

    #[test]
    fn module_layout() {
        let options = BuildOptions::default().with_output_mode(OutputMode::Module);
        let plan = plan(&options, &webpack()).unwrap();
        let entry = plan.entry("index").unwrap();

        assert_eq!(entry.filename.as_str(), "[name][contenthash:10].js");
        assert_eq!(entry.chunk_format, ChunkFormat::Module);
        assert_eq!(entry.chunk_loading, ChunkLoading::Import);
        assert_eq!(entry.worker_chunk_loading, Some(ChunkLoading::Import));
        assert_eq!(entry.wasm_loading, Some(WasmLoading::Fetch));
        assert_eq!(entry.public_path, PublicPath::Auto);
    }

    #[test]
    fn entries_keep_declaration_order() {
        let options = BuildOptions::default()
            .with_entry("zeta", ["./src/zeta.mjs"])
            .with_entry("alpha", ["./src/alpha.mjs"]);
        let plan = plan(&options, &webpack()).unwrap();
        let names: Vec<_> = plan.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["index", "zeta", "alpha"]);
    }

    #[test]
    fn custom_public_path() {
        let mut options = BuildOptions::default().with_output_mode(OutputMode::Module);
        options.output.public_path = Some("https://cdn.example.com/".to_string());
        let plan = plan(&options, &webpack()).unwrap();
        assert_eq!(
            plan.entries[0].public_path,
            PublicPath::Custom("https://cdn.example.com/".to_string())
        );
    }

    #[test]
    fn emitted_templates_ignore_backend() {
        let options = BuildOptions::default();
        let webpack = plan(&options, &webpack()).unwrap();
        let rspack_ctx = BackendContext::for_kind(BackendKind::Rspack, "/app");
        let rspack = plan(&options, &rspack_ctx).unwrap();

        assert_ne!(webpack.output_dir, rspack.output_dir);
        assert_eq!(webpack.emitted_templates(), rspack.emitted_templates());
        assert!(webpack.emitted_templates().contains("static/svg/[name].svg"));
    }

    #[test]
    fn invalid_asset_template() {
        let mut options = BuildOptions::default();
        options.assets.filename = "static/asset/[name].[hash]".to_string();
        assert!(matches!(
            plan(&options, &webpack()),
            Err(Error::InvalidTemplate { .. })
        ));
    }
}
