//! The ordered, first-match-wins rule table.

use serde::Serialize;
use std::collections::BTreeSet;

use twinpack_config::{AssetOptions, CssOptions};

use crate::classify::asset::{AssetRef, DependencyKind};
use crate::classify::predicate::{Predicate, QueryFlag};
use crate::classify::{Classification, Fallback, ProcessingClass, RuleMatch};

/// Extensions left to the bundler's module pipeline when no rule matches
pub const MODULE_EXTENSIONS: &[&str] = &[
    "js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx", "json", "wasm",
];

/// What a matching rule does with the asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Treatment {
    Class { class: ProcessingClass },
    /// Inline below `max_inline_bytes`, emit as a file at or above it.
    /// Zero never inlines.
    BySize { max_inline_bytes: u64 },
}

impl Treatment {
    pub fn resolve(&self, size: u64) -> ProcessingClass {
        match self {
            Self::Class { class } => *class,
            Self::BySize { max_inline_bytes } => {
                if size < *max_inline_bytes {
                    ProcessingClass::InlineData
                } else {
                    ProcessingClass::EmitFile
                }
            }
        }
    }

    /// Every class this treatment can produce
    pub fn classes(&self) -> Vec<ProcessingClass> {
        match self {
            Self::Class { class } => vec![*class],
            Self::BySize { .. } => vec![ProcessingClass::InlineData, ProcessingClass::EmitFile],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub name: String,
    pub predicates: Vec<Predicate>,
    pub treatment: Treatment,
    /// Emission template when the rule emits a file
    pub filename: Option<String>,
}

impl Rule {
    pub fn new(name: impl Into<String>, treatment: Treatment) -> Self {
        Self {
            name: name.into(),
            predicates: Vec::new(),
            treatment,
            filename: None,
        }
    }

    /// Rule with a fixed processing class
    pub fn class(name: impl Into<String>, class: ProcessingClass) -> Self {
        Self::new(name, Treatment::Class { class })
    }

    /// Add a predicate (AND-ed with the existing ones)
    pub fn when(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn emit_to(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn matches(&self, asset: &AssetRef) -> bool {
        self.predicates.iter().all(|p| p.matches(asset))
    }

    fn to_match(&self, asset: &AssetRef) -> RuleMatch {
        RuleMatch {
            rule: self.name.clone(),
            class: self.treatment.resolve(asset.size),
            filename: self.filename.clone(),
        }
    }
}

/// Sub-rules sharing a group predicate, tried in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleGroup {
    pub name: String,
    pub predicates: Vec<Predicate>,
    pub rules: Vec<Rule>,
}

impl RuleGroup {
    pub fn new(name: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            name: name.into(),
            predicates: vec![predicate],
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn matches(&self, asset: &AssetRef) -> bool {
        self.predicates.iter().all(|p| p.matches(asset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleNode {
    Rule(Rule),
    Group(RuleGroup),
}

impl RuleNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Rule(rule) => &rule.name,
            Self::Group(group) => &group.name,
        }
    }

    /// Leaf rules in priority order
    pub fn rules(&self) -> Vec<&Rule> {
        match self {
            Self::Rule(rule) => vec![rule],
            Self::Group(group) => group.rules.iter().collect(),
        }
    }
}

/// Ordered rule table with an explicit no-match fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTable {
    nodes: Vec<RuleNode>,
    fallback_filename: String,
}

impl RuleTable {
    pub fn new(nodes: Vec<RuleNode>, fallback_filename: impl Into<String>) -> Self {
        Self {
            nodes,
            fallback_filename: fallback_filename.into(),
        }
    }

    /// The standard table:
    ///
    /// 1. `raw`: `?raw` on any asset exposes its source text
    /// 2. `svg`: `?url`/`?__inline=false` emit a file, `?inline` inlines,
    ///    otherwise the size threshold decides
    /// 3. `css`: stylesheets not reached through `url()` are extracted
    pub fn from_options(assets: &AssetOptions, css: &CssOptions) -> Self {
        let raw =
            Rule::class("raw", ProcessingClass::RawText).when(Predicate::Query(QueryFlag::Raw));

        let svg = RuleGroup::new("svg", Predicate::extension(["svg"]))
            .rule(
                Rule::class("svg-asset-url", ProcessingClass::EmitFile)
                    .when(Predicate::Query(QueryFlag::Url))
                    .emit_to(&assets.svg_filename),
            )
            .rule(
                Rule::class("svg-asset-inline", ProcessingClass::InlineData)
                    .when(Predicate::Query(QueryFlag::Inline)),
            )
            .rule(
                Rule::new(
                    "svg-asset",
                    Treatment::BySize {
                        max_inline_bytes: assets.svg_inline_limit,
                    },
                )
                .emit_to(&assets.svg_filename),
            );

        let stylesheet = Rule::class("css", ProcessingClass::ExtractStylesheet)
            .when(Predicate::extension(["css"]))
            .when(Predicate::NotDependency(DependencyKind::Url))
            .emit_to(&css.filename);

        Self::new(
            vec![
                RuleNode::Rule(raw),
                RuleNode::Group(svg),
                RuleNode::Rule(stylesheet),
            ],
            &assets.filename,
        )
    }

    pub fn nodes(&self) -> &[RuleNode] {
        &self.nodes
    }

    /// Template for assets no rule claims
    pub fn fallback_filename(&self) -> &str {
        &self.fallback_filename
    }

    /// Every processing class some rule can produce
    pub fn classes(&self) -> BTreeSet<ProcessingClass> {
        self.nodes
            .iter()
            .flat_map(|node| node.rules())
            .flat_map(|rule| rule.treatment.classes())
            .collect()
    }

    /// First matching rule wins. A group whose sub-rules all miss falls
    /// through to the next node.
    pub fn classify(&self, asset: &AssetRef) -> Classification {
        for node in &self.nodes {
            let hit = match node {
                RuleNode::Rule(rule) => rule.matches(asset).then(|| rule.to_match(asset)),
                RuleNode::Group(group) if group.matches(asset) => group
                    .rules
                    .iter()
                    .find(|rule| rule.matches(asset))
                    .map(|rule| rule.to_match(asset)),
                RuleNode::Group(_) => None,
            };

            if let Some(hit) = hit {
                tracing::debug!(
                    asset = %asset,
                    rule = %hit.rule,
                    class = %hit.class,
                    "classified asset"
                );
                return Classification::Matched(hit);
            }
        }

        let fallback = match asset.extension() {
            Some(ext) if MODULE_EXTENSIONS.contains(&ext.as_str()) => Fallback::Module,
            _ => Fallback::EmitFile {
                filename: self.fallback_filename.clone(),
            },
        };
        tracing::debug!(asset = %asset, ?fallback, "no rule matched");
        Classification::Unmatched(fallback)
    }
}
