//! rspack backend.

use crate::backend::{Backend, Capabilities, ExtractionPrimitive, JsRef};
use crate::classify::ProcessingClass;
use crate::translate::{AssetModuleType, Directive, StylesheetPolicy};

const CAPABILITIES: Capabilities = Capabilities {
    native_module_chunks: true,
    css_extract: ExtractionPrimitive {
        name: "CssExtractRspackPlugin",
        plugin: JsRef::new("@rspack/core", "CssExtractRspackPlugin"),
        loader: JsRef::new("@rspack/core", "CssExtractRspackPlugin.loader"),
        requires_public_path: false,
    },
    html_plugin: JsRef::new("@rspack/core", "HtmlRspackPlugin"),
    output_dir: "rspack-dist",
};

/// rspack backend
///
/// - Asset modules (`asset/*`), same semantics as webpack 5
/// - Built-in `CssExtractRspackPlugin` for stylesheet extraction
/// - Built-in `HtmlRspackPlugin` for the HTML page
pub struct RspackBackend;

impl Backend for RspackBackend {
    fn name(&self) -> &'static str {
        "rspack"
    }

    fn capabilities(&self) -> Capabilities {
        CAPABILITIES
    }

    fn translate(&self, class: ProcessingClass, policy: &StylesheetPolicy) -> Option<Directive> {
        let directive = match class {
            ProcessingClass::InlineData => Directive::asset(AssetModuleType::Inline),
            ProcessingClass::EmitFile => Directive::asset(AssetModuleType::Resource),
            ProcessingClass::RawText => Directive::asset(AssetModuleType::Source),
            ProcessingClass::ExtractStylesheet => Directive::stylesheet(vec![
                policy.extraction_loader(&CAPABILITIES.css_extract),
                policy.css_loader(),
            ]),
        };
        Some(directive)
    }
}
