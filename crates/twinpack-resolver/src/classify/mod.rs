//! Asset classification.
//!
//! An asset is matched against an ordered [`RuleTable`]; the first rule
//! whose predicates all hold decides the [`ProcessingClass`]. Assets no rule
//! claims get an explicit [`Fallback`].

pub mod asset;
pub mod predicate;
pub mod rules;

pub use asset::{AssetRef, DependencyKind, ImportQuery};
pub use predicate::{Predicate, QueryFlag};
pub use rules::{Rule, RuleGroup, RuleNode, RuleTable, Treatment, MODULE_EXTENSIONS};

use serde::Serialize;
use std::fmt;

/// The decided treatment for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessingClass {
    /// Embedded into the referencing module as a data URI
    InlineData,
    /// Written to the output directory, referenced by URL
    EmitFile,
    /// Source text exported as a string
    RawText,
    /// Collected into an extracted stylesheet bundle
    ExtractStylesheet,
}

impl ProcessingClass {
    pub const ALL: [Self; 4] = [
        Self::InlineData,
        Self::EmitFile,
        Self::RawText,
        Self::ExtractStylesheet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InlineData => "inline-data",
            Self::EmitFile => "emit-file",
            Self::RawText => "raw-text",
            Self::ExtractStylesheet => "extract-stylesheet",
        }
    }

    /// Whether the class produces a file of its own in the output directory
    pub fn emits_file(&self) -> bool {
        matches!(self, Self::EmitFile | Self::ExtractStylesheet)
    }
}

impl fmt::Display for ProcessingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule that claimed an asset and what it decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub rule: String,
    pub class: ProcessingClass,
    /// Emission template of the winning rule, if it has one
    pub filename: Option<String>,
}

/// What happens to an asset no rule claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Fallback {
    /// Script-like source handled by the bundler's module pipeline
    Module,
    /// Emitted as a generic asset file
    EmitFile { filename: String },
}

/// Outcome of classifying one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Classification {
    Matched(RuleMatch),
    Unmatched(Fallback),
}

impl Classification {
    /// Processing class, if the asset gets one
    ///
    /// An unmatched asset emitted by the fallback counts as
    /// [`ProcessingClass::EmitFile`].
    pub fn class(&self) -> Option<ProcessingClass> {
        match self {
            Self::Matched(hit) => Some(hit.class),
            Self::Unmatched(Fallback::EmitFile { .. }) => Some(ProcessingClass::EmitFile),
            Self::Unmatched(Fallback::Module) => None,
        }
    }

    /// Name of the winning rule
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::Matched(hit) => Some(&hit.rule),
            Self::Unmatched(_) => None,
        }
    }

    /// Filename template the asset is emitted under
    ///
    /// `None` for inlined, raw and module assets.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Matched(hit) if hit.class.emits_file() => hit.filename.as_deref(),
            Self::Matched(_) => None,
            Self::Unmatched(Fallback::EmitFile { filename }) => Some(filename),
            Self::Unmatched(Fallback::Module) => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}
