//! Directive translation.
//!
//! Turns processing classes and rule tables into backend directives: module
//! types, loaders, parser/generator options and plugins. Everything here is
//! expressed as JSON fragments of the bundler configuration.

pub mod stylesheet;

pub use stylesheet::{CssExport, CssModuleKind, StylesheetPolicy};

use serde::Serialize;
use serde_json::{json, Map, Value};

use twinpack_config::HtmlOptions;

use crate::backend::{Backend, BackendContext, JsRef};
use crate::classify::{
    DependencyKind, Predicate, ProcessingClass, Rule, RuleNode, RuleTable, Treatment,
    MODULE_EXTENSIONS,
};
use crate::error::{Error, Result};

/// Asset module types understood by both backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetModuleType {
    #[serde(rename = "asset/inline")]
    Inline,
    #[serde(rename = "asset/resource")]
    Resource,
    #[serde(rename = "asset/source")]
    Source,
    /// Size-decided: inline below the data URL condition, resource otherwise
    #[serde(rename = "asset")]
    Auto,
}

impl AssetModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inline => "asset/inline",
            Self::Resource => "asset/resource",
            Self::Source => "asset/source",
            Self::Auto => "asset",
        }
    }
}

/// A loader reference: a package name or an export of one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoaderRef {
    Package(&'static str),
    Export(JsRef),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderDirective {
    pub loader: LoaderRef,
    pub options: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginDirective {
    #[serde(flatten)]
    pub plugin: JsRef,
    pub options: Value,
}

/// Backend-specific processing of a matched asset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Directive {
    Asset { module_type: AssetModuleType },
    /// Inline below `max_inline_bytes`, emit a file otherwise
    AssetBySize { max_inline_bytes: u64 },
    Stylesheet { loaders: Vec<LoaderDirective> },
}

impl Directive {
    pub fn asset(module_type: AssetModuleType) -> Self {
        Self::Asset { module_type }
    }

    pub fn stylesheet(loaders: Vec<LoaderDirective>) -> Self {
        Self::Stylesheet { loaders }
    }

    /// Module type the directive assigns
    pub fn module_type(&self) -> &'static str {
        match self {
            Self::Asset { module_type } => module_type.as_str(),
            Self::AssetBySize { .. } => AssetModuleType::Auto.as_str(),
            Self::Stylesheet { .. } => "javascript/auto",
        }
    }

    /// Rule fields realizing this directive, `filename` being the emission
    /// template of the rule
    pub fn rule_fields(&self, filename: Option<&str>) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("type".into(), json!(self.module_type()));

        match self {
            Self::Asset { module_type } => {
                if let (AssetModuleType::Resource, Some(filename)) = (module_type, filename) {
                    fields.insert("generator".into(), json!({ "filename": filename }));
                }
            }
            Self::AssetBySize { max_inline_bytes } => {
                fields.insert(
                    "parser".into(),
                    json!({ "dataUrlCondition": { "maxSize": max_inline_bytes } }),
                );
                if let Some(filename) = filename {
                    fields.insert("generator".into(), json!({ "filename": filename }));
                }
            }
            Self::Stylesheet { loaders } => {
                fields.insert("sideEffects".into(), json!(true));
                fields.insert("use".into(), json!(loaders));
            }
        }

        fields
    }
}

/// Check that the backend can express every processing class
///
/// Runs before any asset is looked at, so a gap in a backend fails the
/// whole run instead of surfacing on the first unlucky asset.
pub fn verify_translations(backend: &dyn Backend, policy: &StylesheetPolicy) -> Result<()> {
    for class in ProcessingClass::ALL {
        translate_class(backend, class, policy)?;
    }
    Ok(())
}

/// Directive for a single processing class
pub fn translate_class(
    backend: &dyn Backend,
    class: ProcessingClass,
    policy: &StylesheetPolicy,
) -> Result<Directive> {
    backend
        .translate(class, policy)
        .ok_or(Error::MissingTranslation {
            backend: backend.name(),
            class,
        })
}

/// Directive for a rule treatment
///
/// A size-decided treatment needs both the inline and the emit-file
/// translation to exist.
pub fn directive_for(
    backend: &dyn Backend,
    treatment: &Treatment,
    policy: &StylesheetPolicy,
) -> Result<Directive> {
    match treatment {
        Treatment::Class { class } => translate_class(backend, *class, policy),
        Treatment::BySize { max_inline_bytes } => {
            for class in treatment.classes() {
                translate_class(backend, class, policy)?;
            }
            Ok(Directive::AssetBySize {
                max_inline_bytes: *max_inline_bytes,
            })
        }
    }
}

/// Regex literal matching any of `extensions` at the end of a path
pub fn extension_pattern(extensions: &[String]) -> String {
    let alternatives: Vec<String> = extensions.iter().map(|ext| escape_regex(ext)).collect();
    format!(r"/\.({})$/i", alternatives.join("|"))
}

fn escape_regex(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if "\\^$.|?*+()[]{}/".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Rule conditions for a list of predicates
///
/// Two predicates on the same field are combined with `and`.
pub fn conditions<'a>(predicates: impl IntoIterator<Item = &'a Predicate>) -> Map<String, Value> {
    let mut fields = Map::new();
    for predicate in predicates {
        let (key, value) = match predicate {
            Predicate::Extension(extensions) => ("test", json!(extension_pattern(extensions))),
            Predicate::Query(flag) => ("resourceQuery", json!(flag.pattern())),
            Predicate::NotDependency(kind) => {
                ("dependency", json!({ "not": dependency_name(*kind) }))
            }
        };

        match fields.remove(key) {
            Some(Value::Object(mut existing)) if existing.contains_key("and") => {
                if let Some(Value::Array(items)) = existing.get_mut("and") {
                    items.push(value);
                }
                fields.insert(key.into(), Value::Object(existing));
            }
            Some(previous) => {
                fields.insert(key.into(), json!({ "and": [previous, value] }));
            }
            None => {
                fields.insert(key.into(), value);
            }
        }
    }
    fields
}

fn dependency_name(kind: DependencyKind) -> &'static str {
    match kind {
        DependencyKind::Import => "esm",
        DependencyKind::Url => "url",
    }
}

/// Render one leaf rule, with the predicates of its enclosing group
/// AND-ed in front of its own
fn render_rule(
    rule: &Rule,
    group: &[Predicate],
    backend: &dyn Backend,
    policy: &StylesheetPolicy,
) -> Result<Value> {
    let directive = directive_for(backend, &rule.treatment, policy)?;
    let mut fields = conditions(group.iter().chain(&rule.predicates));
    fields.extend(directive.rule_fields(rule.filename.as_deref()));
    Ok(Value::Object(fields))
}

/// Catch-all for assets no rule claims
///
/// Everything but module-pipeline sources is emitted under the table's
/// fallback template, matching [`crate::classify::Fallback`].
fn render_fallback(
    table: &RuleTable,
    backend: &dyn Backend,
    policy: &StylesheetPolicy,
) -> Result<Value> {
    let directive = translate_class(backend, ProcessingClass::EmitFile, policy)?;
    let modules: Vec<String> = MODULE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect();

    let mut fields = Map::new();
    fields.insert("exclude".into(), json!(extension_pattern(&modules)));
    fields.extend(directive.rule_fields(Some(table.fallback_filename())));
    Ok(Value::Object(fields))
}

/// Render the rule table as a flat `oneOf` list
///
/// Groups are flattened so a group whose sub-rules all miss lets the next
/// rule try, same as [`RuleTable::classify`]. The last entry is the
/// no-match fallback.
pub fn render_rules(
    table: &RuleTable,
    backend: &dyn Backend,
    policy: &StylesheetPolicy,
) -> Result<Vec<Value>> {
    let mut rules = Vec::new();
    for node in table.nodes() {
        match node {
            RuleNode::Rule(rule) => rules.push(render_rule(rule, &[], backend, policy)?),
            RuleNode::Group(group) => {
                for rule in &group.rules {
                    rules.push(render_rule(rule, &group.predicates, backend, policy)?);
                }
            }
        }
    }
    rules.push(render_fallback(table, backend, policy)?);
    Ok(rules)
}

/// Plugins for the active backend: stylesheet extraction, then the HTML page
pub fn plugins(
    ctx: &BackendContext,
    policy: &StylesheetPolicy,
    html: &HtmlOptions,
) -> Vec<PluginDirective> {
    let capabilities = ctx.capabilities();
    let mut plugins = vec![PluginDirective {
        plugin: capabilities.css_extract.plugin,
        options: policy.plugin_options(),
    }];

    if html.enabled {
        let mut options = Map::new();
        options.insert("filename".into(), json!(html.filename));
        if let Some(title) = &html.title {
            options.insert("title".into(), json!(title));
        }
        if let Some(template) = &html.template {
            options.insert("template".into(), json!(template.to_string_lossy()));
        }
        plugins.push(PluginDirective {
            plugin: capabilities.html_plugin,
            options: Value::Object(options),
        });
    }

    plugins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendKind, Capabilities, WebpackBackend};
    use crate::classify::QueryFlag;
    use twinpack_config::{AssetOptions, CssOptions};

    struct NoStylesheets;

    impl Backend for NoStylesheets {
        fn name(&self) -> &'static str {
            "no-stylesheets"
        }

        fn capabilities(&self) -> Capabilities {
            WebpackBackend.capabilities()
        }

        fn translate(
            &self,
            class: ProcessingClass,
            policy: &StylesheetPolicy,
        ) -> Option<Directive> {
            match class {
                ProcessingClass::ExtractStylesheet => None,
                other => WebpackBackend.translate(other, policy),
            }
        }
    }

    #[test]
    fn missing_translation_is_reported() {
        let err = verify_translations(&NoStylesheets, &StylesheetPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTranslation {
                backend: "no-stylesheets",
                class: ProcessingClass::ExtractStylesheet
            }
        ));
    }

    #[test]
    fn extension_patterns() {
        assert_eq!(extension_pattern(&["svg".to_string()]), r"/\.(svg)$/i");
        assert_eq!(
            extension_pattern(&["png".to_string(), "c++".to_string()]),
            r"/\.(png|c\+\+)$/i"
        );
    }

    #[test]
    fn conditions_combine_same_field() {
        let predicates = [
            Predicate::extension(["svg"]),
            Predicate::Query(QueryFlag::Url),
            Predicate::Query(QueryFlag::Inline),
            Predicate::Query(QueryFlag::Raw),
        ];
        let fields = conditions(&predicates);
        assert_eq!(fields["test"], json!(r"/\.(svg)$/i"));
        assert_eq!(
            fields["resourceQuery"],
            json!({
                "and": [
                    QueryFlag::Url.pattern(),
                    QueryFlag::Inline.pattern(),
                    QueryFlag::Raw.pattern(),
                ]
            })
        );
    }

    #[test]
    fn by_size_rule_fields() {
        let fields = Directive::AssetBySize {
            max_inline_bytes: 1000,
        }
        .rule_fields(Some("static/svg/[name].svg"));
        assert_eq!(
            Value::Object(fields),
            json!({
                "type": "asset",
                "parser": { "dataUrlCondition": { "maxSize": 1000 } },
                "generator": { "filename": "static/svg/[name].svg" },
            })
        );
    }

    #[test]
    fn inline_rule_fields_have_no_generator() {
        let fields = Directive::asset(AssetModuleType::Inline).rule_fields(Some("ignored"));
        assert_eq!(Value::Object(fields), json!({ "type": "asset/inline" }));
    }

    #[test]
    fn rendered_rules_are_flat_and_ordered() {
        let table = RuleTable::from_options(&AssetOptions::default(), &CssOptions::default());
        let rules = render_rules(&table, &WebpackBackend, &StylesheetPolicy::default()).unwrap();

        assert_eq!(rules.len(), 6);
        assert_eq!(rules[0]["type"], "asset/source");
        assert_eq!(rules[1]["type"], "asset/resource");
        assert_eq!(rules[1]["test"], r"/\.(svg)$/i");
        assert_eq!(rules[2]["type"], "asset/inline");
        assert_eq!(rules[3]["type"], "asset");
        assert_eq!(rules[4]["type"], "javascript/auto");
        assert_eq!(rules[4]["dependency"], json!({ "not": "url" }));
        assert_eq!(rules[4]["sideEffects"], json!(true));
        assert_eq!(rules[5]["type"], "asset/resource");
    }

    #[test]
    fn fallback_rule_emits_everything_but_modules() {
        let table = RuleTable::from_options(&AssetOptions::default(), &CssOptions::default());
        let rules = render_rules(&table, &WebpackBackend, &StylesheetPolicy::default()).unwrap();

        assert_eq!(
            rules.last(),
            Some(&json!({
                "exclude": r"/\.(js|mjs|cjs|jsx|ts|mts|cts|tsx|json|wasm)$/i",
                "type": "asset/resource",
                "generator": { "filename": "static/asset/[name].[ext]" },
            }))
        );
    }

    #[test]
    fn fallback_needs_emit_file_translation() {
        struct NoFiles;

        impl Backend for NoFiles {
            fn name(&self) -> &'static str {
                "no-files"
            }

            fn capabilities(&self) -> Capabilities {
                WebpackBackend.capabilities()
            }

            fn translate(
                &self,
                class: ProcessingClass,
                policy: &StylesheetPolicy,
            ) -> Option<Directive> {
                match class {
                    ProcessingClass::EmitFile => None,
                    other => WebpackBackend.translate(other, policy),
                }
            }
        }

        let table = RuleTable::new(Vec::new(), "static/asset/[name].[ext]");
        let err = render_rules(&table, &NoFiles, &StylesheetPolicy::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTranslation {
                class: ProcessingClass::EmitFile,
                ..
            }
        ));
    }

    #[test]
    fn loader_refs_serialize_untagged() {
        let css = serde_json::to_value(LoaderRef::Package("css-loader")).unwrap();
        assert_eq!(css, json!("css-loader"));

        let loader = JsRef::new("@rspack/core", "CssExtractRspackPlugin.loader");
        let extract = serde_json::to_value(LoaderRef::Export(loader)).unwrap();
        assert_eq!(
            extract,
            json!({ "from": "@rspack/core", "member": "CssExtractRspackPlugin.loader" })
        );
    }

    #[test]
    fn html_plugin_can_be_disabled() {
        let ctx = BackendContext::for_kind(BackendKind::Rspack, "/app");
        let policy = StylesheetPolicy::default();

        let enabled = plugins(&ctx, &policy, &HtmlOptions::default());
        assert_eq!(enabled.len(), 2);
        assert_eq!(enabled[1].plugin.member, "HtmlRspackPlugin");
        assert_eq!(enabled[1].options, json!({ "filename": "index.html" }));

        let disabled = plugins(
            &ctx,
            &policy,
            &HtmlOptions {
                enabled: false,
                ..HtmlOptions::default()
            },
        );
        assert_eq!(disabled.len(), 1);
        assert_eq!(disabled[0].plugin.member, "CssExtractRspackPlugin");
    }
}
