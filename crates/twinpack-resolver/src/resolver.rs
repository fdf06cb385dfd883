//! The configuration resolver.

use serde::Serialize;
use serde_json::Value;

use twinpack_config::{validate_schema, BuildOptions};

use crate::backend::BackendContext;
use crate::classify::{AssetRef, Classification, ProcessingClass, RuleTable};
use crate::error::Result;
use crate::layout::{self, ContentHash, OutputPlan, Template};
use crate::render::{render_config, RenderInput};
use crate::translate::{self, CssExport, CssModuleKind, Directive, StylesheetPolicy};

/// What happens to one asset under the active backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetDecision {
    /// The asset as referenced, query included
    pub specifier: String,
    pub size: u64,
    pub classification: Classification,
    /// `None` when the asset is left to the module pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<Directive>,
    /// Filename template of the emitted file, if one is emitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_module: Option<CssModuleKind>,
    #[serde(skip)]
    asset: AssetRef,
}

impl AssetDecision {
    pub fn class(&self) -> Option<ProcessingClass> {
        self.classification.class()
    }

    pub fn asset(&self) -> &AssetRef {
        &self.asset
    }

    /// Name the emitted file would get for `content`
    pub fn preview(&self, content: &[u8]) -> Result<Option<String>> {
        let Some(filename) = &self.filename else {
            return Ok(None);
        };
        let template = Template::parse(filename)?;
        let ext = self.asset.extension().unwrap_or_default();
        Ok(Some(template.render(
            self.asset.stem(),
            &ext,
            &ContentHash::of(content),
        )))
    }
}

/// Output of a full resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub plan: OutputPlan,
    /// The bundler configuration document
    pub config: Value,
}

/// Resolves a build description for one backend
///
/// Construction does all the checking: schema validation, translation
/// coverage of the backend, template syntax and the output mode capability.
/// A constructed resolver cannot fail on a particular asset.
///
/// # Example
///
/// ```
/// use twinpack_config::BuildOptions;
/// use twinpack_resolver::{AssetRef, BackendContext, BackendKind, ProcessingClass, Resolver};
///
/// let ctx = BackendContext::for_kind(BackendKind::Rspack, "/app");
/// let resolver = Resolver::new(&BuildOptions::default(), &ctx).unwrap();
///
/// let decision = resolver.classify(&AssetRef::parse("./logo.svg?url", 10)).unwrap();
/// assert_eq!(decision.class(), Some(ProcessingClass::EmitFile));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    options: BuildOptions,
    ctx: BackendContext,
    table: RuleTable,
    policy: StylesheetPolicy,
    plan: OutputPlan,
}

impl Resolver {
    pub fn new(options: &BuildOptions, ctx: &BackendContext) -> Result<Self> {
        validate_schema(options)?;

        let policy = StylesheetPolicy::from_options(&options.css);
        translate::verify_translations(ctx.backend(), &policy)?;

        let plan = layout::plan(options, ctx)?;
        let table = RuleTable::from_options(&options.assets, &options.css);

        tracing::debug!(
            backend = ctx.name(),
            rules = table.nodes().len(),
            "resolver ready"
        );

        Ok(Self {
            options: options.clone(),
            ctx: ctx.clone(),
            table,
            policy,
            plan,
        })
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn policy(&self) -> &StylesheetPolicy {
        &self.policy
    }

    pub fn plan(&self) -> &OutputPlan {
        &self.plan
    }

    /// Classify one asset and translate the outcome for the active backend
    pub fn classify(&self, asset: &AssetRef) -> Result<AssetDecision> {
        let classification = self.table.classify(asset);

        let directive = classification
            .class()
            .map(|class| translate::translate_class(self.ctx.backend(), class, &self.policy))
            .transpose()?;

        let css_module = (classification.class() == Some(ProcessingClass::ExtractStylesheet))
            .then(|| self.policy.module_kind(&asset.path));

        Ok(AssetDecision {
            specifier: asset.to_string(),
            size: asset.size,
            filename: classification.filename().map(str::to_string),
            classification,
            directive,
            css_module,
            asset: asset.clone(),
        })
    }

    /// JavaScript names of `locals` as imported from a CSS module
    ///
    /// Empty unless `decision` is a CSS module; global stylesheets export
    /// nothing.
    pub fn css_exports(&self, decision: &AssetDecision, locals: &[String]) -> Vec<CssExport> {
        if decision.css_module != Some(CssModuleKind::Module) {
            return Vec::new();
        }
        locals
            .iter()
            .map(|local| CssExport {
                local: local.clone(),
                names: self.policy.export_names(local),
            })
            .collect()
    }

    /// Render the bundler configuration document
    pub fn render(&self) -> Result<Value> {
        render_config(&RenderInput {
            options: &self.options,
            ctx: &self.ctx,
            plan: &self.plan,
            table: &self.table,
            policy: &self.policy,
        })
    }

    /// Plan and render in one go
    pub fn resolve(&self) -> Result<Resolution> {
        let config = self.render()?;
        tracing::info!(
            backend = self.ctx.name(),
            mode = %self.plan.mode,
            entries = self.plan.entries.len(),
            output_dir = %self.plan.output_dir.display(),
            "resolved build configuration"
        );
        Ok(Resolution {
            plan: self.plan.clone(),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::classify::{DependencyKind, Fallback};
    use crate::error::Error;
    use twinpack_config::{ConfigError, OutputMode};

    fn resolver(kind: BackendKind) -> Resolver {
        Resolver::new(&BuildOptions::default(), &BackendContext::for_kind(kind, "/app")).unwrap()
    }

    #[test]
    fn classify_translates_concrete_class() {
        let decision = resolver(BackendKind::Webpack)
            .classify(&AssetRef::new("./icon.svg", 1500))
            .unwrap();

        assert_eq!(decision.class(), Some(ProcessingClass::EmitFile));
        assert_eq!(decision.filename.as_deref(), Some("static/svg/[name].svg"));
        assert_eq!(
            decision.directive,
            Some(Directive::asset(translate::AssetModuleType::Resource))
        );
    }

    #[test]
    fn stylesheet_decisions_carry_module_kind() {
        let resolver = resolver(BackendKind::Rspack);
        let decision = resolver.classify(&AssetRef::new("./button.module.css", 10)).unwrap();
        assert_eq!(decision.css_module, Some(CssModuleKind::Module));

        let via_url = resolver
            .classify(&AssetRef::new("./theme.css", 10).with_dependency(DependencyKind::Url))
            .unwrap();
        assert_eq!(via_url.css_module, None);
        assert!(matches!(
            via_url.classification,
            Classification::Unmatched(Fallback::EmitFile { .. })
        ));
    }

    #[test]
    fn css_module_exports_follow_locals_convention() {
        let resolver = resolver(BackendKind::Webpack);
        let locals = vec!["primary-button".to_string(), "icon".to_string()];

        let module = resolver.classify(&AssetRef::new("./button.module.css", 10)).unwrap();
        let exports = resolver.css_exports(&module, &locals);
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].local, "primary-button");
        assert_eq!(exports[0].names, ["primary-button", "primaryButton"]);
        assert_eq!(exports[1].names, ["icon"]);

        let global = resolver.classify(&AssetRef::new("./theme.css", 10)).unwrap();
        assert_eq!(global.css_module, Some(CssModuleKind::Global));
        assert!(resolver.css_exports(&global, &locals).is_empty());
    }

    #[test]
    fn module_fallback_has_no_directive() {
        let decision = resolver(BackendKind::Webpack)
            .classify(&AssetRef::new("./src/app.tsx", 10))
            .unwrap();
        assert_eq!(decision.directive, None);
        assert_eq!(decision.preview(b"x").unwrap(), None);
    }

    #[test]
    fn preview_renders_emitted_name() {
        let decision = resolver(BackendKind::Webpack)
            .classify(&AssetRef::new("./fonts/Inter.woff2", 10))
            .unwrap();
        assert_eq!(
            decision.preview(b"font").unwrap().as_deref(),
            Some("static/asset/Inter.woff2")
        );
    }

    #[test]
    fn invalid_options_fail_construction() {
        let mut options = BuildOptions::default();
        options.output.filename = Some("[name].[contenthash:8].js".to_string());

        let err = Resolver::new(&options, &BackendContext::for_kind(BackendKind::Rspack, "/app"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::IncompatibleOutputMode { .. })
        ));
    }

    #[test]
    fn resolve_reports_module_mode() {
        let options = BuildOptions::default().with_output_mode(OutputMode::Module);
        let ctx = BackendContext::for_kind(BackendKind::Webpack, "/app");
        let resolution = Resolver::new(&options, &ctx)
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(resolution.plan.mode, OutputMode::Module);
        assert_eq!(resolution.config["experiments"]["outputModule"], true);
        assert_eq!(resolution.config["output"]["chunkFormat"], "module");
    }
}
