use indexmap::IndexMap;
use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_entries() -> IndexMap<String, Vec<PathBuf>> {
    let mut entries = IndexMap::new();
    entries.insert("index".to_string(), vec![PathBuf::from("./src/index.mjs")]);
    entries
}

pub(crate) fn default_svg_inline_limit() -> u64 {
    1000
}

pub(crate) fn default_svg_filename() -> String {
    "static/svg/[name].svg".to_string()
}

pub(crate) fn default_asset_filename() -> String {
    "static/asset/[name].[ext]".to_string()
}

pub(crate) fn default_css_filename() -> String {
    "static/css/[name].[contenthash:8].css".to_string()
}

pub(crate) fn default_css_chunk_filename() -> String {
    "static/css/async/[name].[contenthash:8].css".to_string()
}

pub(crate) fn default_import_loaders() -> u32 {
    1
}

pub(crate) fn default_local_ident_name() -> String {
    "[local]-[hash:base64:6]".to_string()
}

pub(crate) fn default_html_filename() -> String {
    "index.html".to_string()
}
