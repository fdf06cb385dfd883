//! Asset references as seen at an import site.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// How the asset was referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// `import` / `require` from a module
    #[default]
    Import,
    /// `url()` in a stylesheet or `new URL(...)`
    Url,
}

/// Parsed query string attached to an import specifier
///
/// `?raw&name=value` becomes `[("raw", None), ("name", Some("value"))]`.
/// Order and duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportQuery {
    params: Vec<(String, Option<String>)>,
}

impl ImportQuery {
    /// Parse a query string with or without the leading `?`
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let params = raw
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (part.to_string(), None),
            })
            .collect();
        Self { params }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Whether `key` appears, with or without a value
    pub fn has(&self, key: &str) -> bool {
        self.params.iter().any(|(k, _)| k == key)
    }

    /// First value given for `key`
    pub fn value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }
}

impl fmt::Display for ImportQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            f.write_str(if i == 0 { "?" } else { "&" })?;
            f.write_str(key)?;
            if let Some(value) = value {
                write!(f, "={}", value)?;
            }
        }
        Ok(())
    }
}

/// Metadata the classifier needs about one asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Path of the asset without its query
    pub path: String,
    pub query: ImportQuery,
    /// Size in bytes
    pub size: u64,
    pub dependency: DependencyKind,
}

impl AssetRef {
    /// Asset with no query, referenced by a module import
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            query: ImportQuery::default(),
            size,
            dependency: DependencyKind::Import,
        }
    }

    /// Split an import specifier such as `./icon.svg?url` into path and query
    pub fn parse(specifier: &str, size: u64) -> Self {
        let (path, query) = match specifier.split_once('?') {
            Some((path, query)) => (path, ImportQuery::parse(query)),
            None => (specifier, ImportQuery::default()),
        };
        Self {
            path: path.to_string(),
            query,
            size,
            dependency: DependencyKind::Import,
        }
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = ImportQuery::parse(query);
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyKind) -> Self {
        self.dependency = dependency;
        self
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// File name without directories
    pub fn file_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
    }

    /// File name without its final extension (the `[name]` token)
    pub fn stem(&self) -> &str {
        Path::new(&self.path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.path)
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_pairs() {
        let query = ImportQuery::parse("?raw&__inline=false&size");
        assert!(query.has("raw"));
        assert!(query.has("size"));
        assert_eq!(query.value("__inline"), Some("false"));
        assert_eq!(query.value("raw"), None);
        assert!(!query.has("inline"));
    }

    #[test]
    fn empty_query() {
        assert!(ImportQuery::parse("").is_empty());
        assert!(ImportQuery::parse("?").is_empty());
        assert!(ImportQuery::parse("?&&").is_empty());
    }

    #[test]
    fn query_display_round_trips_order() {
        let query = ImportQuery::parse("url&v=2");
        assert_eq!(query.to_string(), "?url&v=2");
    }

    #[test]
    fn parse_splits_specifier() {
        let asset = AssetRef::parse("./assets/Logo.SVG?inline", 10);
        assert_eq!(asset.path, "./assets/Logo.SVG");
        assert!(asset.query.has("inline"));
        assert_eq!(asset.extension().as_deref(), Some("svg"));
        assert_eq!(asset.stem(), "Logo");
        assert_eq!(asset.file_name(), "Logo.SVG");
        assert_eq!(asset.to_string(), "./assets/Logo.SVG?inline");
    }

    #[test]
    fn extensionless_asset() {
        let asset = AssetRef::new("LICENSE", 0);
        assert_eq!(asset.extension(), None);
        assert_eq!(asset.stem(), "LICENSE");
    }
}
