//! Classify command implementation.
//!
//! Runs one asset through the rule table of the active backend and reports
//! the rule, processing class, directive and emitted filename.

use std::path::Path;

use twinpack_resolver::{
    select_backend, AssetRef, BackendSignals, CssModuleKind, DependencyKind, Resolver,
};

use crate::cli::ClassifyArgs;
use crate::commands::utils;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the classify command.
///
/// The size comes from `--size` when given, otherwise from the file on
/// disk. When the file is readable its content also feeds the
/// `[contenthash]` preview of the emitted filename.
pub async fn execute(args: ClassifyArgs, signals: BackendSignals) -> Result<()> {
    let root = utils::project_root(&args.config)?;
    let ctx = select_backend(signals, &root)?;

    let options = utils::load_options(&args.config, &args.overrides, &root)?;
    let resolver = Resolver::new(&options, &ctx)?;

    let mut asset = AssetRef::parse(&args.asset, 0);
    if args.url_dependency {
        asset = asset.with_dependency(DependencyKind::Url);
    }

    let disk_path = utils::resolve_path(Path::new(&asset.path), &root);
    let content = match tokio::fs::read(&disk_path).await {
        Ok(bytes) => Some(bytes),
        Err(err) if args.size.is_some() => {
            tracing::debug!(
                path = %disk_path.display(),
                error = %err,
                "asset not readable, using --size"
            );
            None
        }
        Err(err) => {
            return Err(err)
                .with_path(&disk_path)
                .with_hint("Pass --size to classify an asset that is not on disk");
        }
    };

    asset.size = match (args.size, &content) {
        (Some(size), _) => size,
        (None, Some(bytes)) => bytes.len() as u64,
        (None, None) => 0,
    };

    let decision = resolver.classify(&asset)?;
    let preview = match &content {
        Some(bytes) => decision.preview(bytes)?,
        None => None,
    };

    if !args.locals.is_empty() && decision.css_module != Some(CssModuleKind::Module) {
        ui::warning(&format!(
            "{} is not a CSS module, --local names are ignored",
            decision.specifier
        ));
    }
    let exports = resolver.css_exports(&decision, &args.locals);

    if args.json {
        let mut value = serde_json::to_value(&decision)?;
        if let Some(map) = value.as_object_mut() {
            if let Some(preview) = &preview {
                map.insert("preview".to_string(), preview.clone().into());
            }
            if !exports.is_empty() {
                map.insert("exports".to_string(), serde_json::to_value(&exports)?);
            }
        }
        print!("{}", utils::to_json(&value, false)?);
    } else {
        ui::print_decision(&decision, preview.as_deref(), &exports);
    }

    Ok(())
}
