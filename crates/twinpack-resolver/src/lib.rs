//! # twinpack-resolver
//!
//! Resolves one declarative build description into a webpack or rspack
//! configuration that produces the same file layout under either backend.
//!
//! The resolver composes four steps:
//!
//! - [`backend`] selects the active backend from explicit signals and
//!   exposes its capability table
//! - [`classify`] decides a processing class per asset with a first-match
//!   rule table
//! - [`translate`] maps processing classes to backend directives
//! - [`layout`] plans script/stylesheet/asset filenames and the chunk
//!   loading strategy
//!
//! [`Resolver`] ties them together and [`render`] emits the final
//! configuration document.

pub mod backend;
pub mod classify;
pub mod error;
pub mod layout;
pub mod render;
pub mod resolver;
pub mod translate;

pub use backend::{
    select_backend, Backend, BackendContext, BackendKind, BackendSignals, Capabilities,
    ExtractionPrimitive, JsRef, RspackBackend, WebpackBackend,
};
pub use classify::{
    AssetRef, Classification, DependencyKind, Fallback, ImportQuery, Predicate,
    ProcessingClass, QueryFlag, Rule, RuleGroup, RuleMatch, RuleNode, RuleTable, Treatment,
};
pub use error::{Error, Result};
pub use layout::{
    ChunkFormat, ChunkLoading, ContentHash, EntryPlan, OutputPlan, PublicPath, Template,
    WasmLoading,
};
pub use resolver::{AssetDecision, Resolution, Resolver};
pub use translate::{
    AssetModuleType, CssExport, CssModuleKind, Directive, LoaderDirective, LoaderRef,
    PluginDirective, StylesheetPolicy,
};
