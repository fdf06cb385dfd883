//! webpack backend.

use crate::backend::{Backend, Capabilities, ExtractionPrimitive, JsRef};
use crate::classify::ProcessingClass;
use crate::translate::{AssetModuleType, Directive, StylesheetPolicy};

const CAPABILITIES: Capabilities = Capabilities {
    native_module_chunks: true,
    css_extract: ExtractionPrimitive {
        name: "MiniCssExtractPlugin",
        plugin: JsRef::new("mini-css-extract-plugin", "default"),
        loader: JsRef::new("mini-css-extract-plugin", "default.loader"),
        // mini-css-extract-plugin does not infer the public path from output
        requires_public_path: true,
    },
    html_plugin: JsRef::new("html-webpack-plugin", "default"),
    output_dir: "webpack-dist",
};

/// webpack 5 backend
///
/// - Asset modules (`asset/*`) for SVG and raw imports
/// - `mini-css-extract-plugin` for stylesheet extraction
/// - `html-webpack-plugin` for the HTML page
pub struct WebpackBackend;

impl Backend for WebpackBackend {
    fn name(&self) -> &'static str {
        "webpack"
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
