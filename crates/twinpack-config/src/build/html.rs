use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::build::helpers::{default_html_filename, default_true};

/// HTML page generation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlOptions {
    /// Emit an HTML page that loads the entry chunks
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Output filename (relative to the output directory)
    #[serde(default = "default_html_filename")]
    pub filename: String,

    /// Page title
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub title: Option<String>,

    /// Path to a custom HTML template
    /// If not provided, the backend's built-in template is used
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: default_html_filename(),
            title: None,
            template: None,
        }
    }
}
