//! Structured match predicates.

use serde::Serialize;

use crate::classify::asset::{AssetRef, DependencyKind, ImportQuery};

/// Query annotations with a defined meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryFlag {
    /// `?raw`
    Raw,
    /// `?url` or `?__inline=false`
    Url,
    /// `?inline`
    Inline,
}

impl QueryFlag {
    pub fn matches(&self, query: &ImportQuery) -> bool {
        match self {
            Self::Raw => query.has("raw"),
            Self::Url => query.has("url") || query.value("__inline") == Some("false"),
            Self::Inline => query.has("inline"),
        }
    }

    /// `resourceQuery` pattern with the same meaning, for the rendered config.
    /// The bundler matches it against the query including its leading `?`.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::Raw => r"/[?&]raw(?:[=&]|$)/",
            Self::Url => r"/[?&](?:url(?:[=&]|$)|__inline=false(?:&|$))/",
            Self::Inline => r"/[?&]inline(?:[=&]|$)/",
        }
    }
}

/// One condition of a rule; all predicates of a rule must hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Predicate {
    /// Extension is one of these (lowercase, no dot)
    Extension(Vec<String>),
    /// Import query carries this flag
    Query(QueryFlag),
    /// Asset was not referenced through this dependency kind
    NotDependency(DependencyKind),
}

impl Predicate {
    /// Case-insensitive extension predicate
    pub fn extension<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Extension(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        )
    }

    pub fn matches(&self, asset: &AssetRef) -> bool {
        match self {
            Self::Extension(extensions) => asset
                .extension()
                .is_some_and(|ext| extensions.iter().any(|e| *e == ext)),
            Self::Query(flag) => flag.matches(&asset.query),
            Self::NotDependency(kind) => asset.dependency != *kind,
        }
    }
}
