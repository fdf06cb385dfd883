//! Filename templates.
//!
//! A template is literal text interleaved with `[name]`, `[ext]`,
//! `[contenthash]` and `[contenthash:N]` tokens. Both backends substitute
//! them the same way; previews here use a blake3 digest in place of the
//! bundler's own hash.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{Error, Result};

/// Hex digits used for `[contenthash]` without an explicit length
pub const DEFAULT_HASH_LENGTH: usize = 20;

const MAX_HASH_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    /// `[name]`: entry, chunk or file name without extension
    Name,
    /// `[ext]`: extension without the leading dot
    Ext,
    /// `[contenthash]` or `[contenthash:N]`
    ContentHash { length: Option<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    raw: String,
    tokens: Vec<Token>,
}

impl Template {
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidTemplate {
            template: raw.to_string(),
            message,
        };

        let mut tokens = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find('[') {
            if open > 0 {
                tokens.push(Token::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find(']')
                .ok_or_else(|| invalid("unclosed '['".to_string()))?;
            tokens.push(parse_token(&after[..close]).map_err(invalid)?);
            rest = &after[close + 1..];
        }
        if rest.contains(']') {
            return Err(invalid("unmatched ']'".to_string()));
        }
        if !rest.is_empty() {
            tokens.push(Token::Literal(rest.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn has_content_hash(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| matches!(token, Token::ContentHash { .. }))
    }

    /// Render with concrete values
    pub fn render(&self, name: &str, ext: &str, hash: &ContentHash) -> String {
        let mut out = String::with_capacity(self.raw.len());
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Name => out.push_str(name),
                Token::Ext => out.push_str(ext),
                Token::ContentHash { length } => {
                    out.push_str(hash.truncated(length.unwrap_or(DEFAULT_HASH_LENGTH)))
                }
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn parse_token(inner: &str) -> std::result::Result<Token, String> {
    match inner.split_once(':') {
        None => match inner {
            "name" => Ok(Token::Name),
            "ext" => Ok(Token::Ext),
            "contenthash" => Ok(Token::ContentHash { length: None }),
            other => Err(format!("unknown token '[{}]'", other)),
        },
        Some(("contenthash", length)) => {
            let length: usize = length
                .parse()
                .map_err(|_| format!("invalid hash length '{}'", length))?;
            if length == 0 || length > MAX_HASH_LENGTH {
                return Err(format!("hash length must be between 1 and {}", MAX_HASH_LENGTH));
            }
            Ok(Token::ContentHash {
                length: Some(length),
            })
        }
        Some(_) => Err(format!("unknown token '[{}]'", inner)),
    }
}

/// Hex blake3 digest of emitted content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of(content: &[u8]) -> Self {
        Self(blake3::hash(content).to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `length` hex digits
    pub fn truncated(&self, length: usize) -> &str {
        &self.0[..length.min(self.0.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens() {
        let template = Template::parse("static/css/[name].[contenthash:8].css").unwrap();
        assert_eq!(
            template.tokens(),
            &[
                Token::Literal("static/css/".to_string()),
                Token::Name,
                Token::Literal(".".to_string()),
                Token::ContentHash { length: Some(8) },
                Token::Literal(".css".to_string()),
            ]
        );
        assert!(template.has_content_hash());
    }

    #[test]
    fn plain_template_has_no_hash() {
        let template = Template::parse("[name].js").unwrap();
        assert!(!template.has_content_hash());
        assert_eq!(template.to_string(), "[name].js");
    }

    #[test]
    fn rejects_unknown_tokens() {
        let invalid = [
            "[hash].js",
            "[name",
            "name].js",
            "[contenthash:x].js",
            "[contenthash:0]",
            "[name:2]",
        ];
        for raw in invalid {
            let err = Template::parse(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidTemplate { .. }), "{raw} should be rejected");
        }
    }

    #[test]
    fn renders_with_truncated_hash() {
        let hash = ContentHash::of(b"console.log(1)");
        let rendered = Template::parse("[name][contenthash:10].js")
            .unwrap()
            .render("index", "js", &hash);

        assert_eq!(rendered.len(), "index".len() + 10 + ".js".len());
        assert!(rendered.starts_with("index"));
        assert!(rendered.contains(hash.truncated(10)));
    }

    #[test]
    fn default_hash_length() {
        let hash = ContentHash::of(b"");
        let rendered = Template::parse("[contenthash]").unwrap().render("a", "b", &hash);
        assert_eq!(rendered.len(), DEFAULT_HASH_LENGTH);
    }

    #[test]
    fn ext_has_no_dot() {
        let rendered = Template::parse("static/asset/[name].[ext]")
            .unwrap()
            .render("font", "woff2", &ContentHash::of(b""));
        assert_eq!(rendered, "static/asset/font.woff2");
    }
}
