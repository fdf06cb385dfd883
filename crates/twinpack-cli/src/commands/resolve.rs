//! Resolve command implementation.
//!
//! Selects the backend, loads the build description and renders the
//! bundler configuration document.

use std::time::Instant;

use serde_json::{json, Value};
use twinpack_resolver::{select_backend, BackendSignals, Resolution, Resolver};

use crate::cli::{Emit, ResolveArgs};
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the resolve command.
///
/// # Steps
///
/// 1. Select the backend from `signals` (fails before any config is read)
/// 2. Load config, profile and overrides
/// 3. Build the resolver and render
/// 4. Print to stdout, or write to `--out`
///
/// # Errors
///
/// Backend selection errors, configuration errors, translation gaps and
/// write failures.
pub async fn execute(args: ResolveArgs, signals: BackendSignals) -> Result<()> {
    let root = utils::project_root(&args.config)?;
    let ctx = select_backend(signals, &root)?;

    let start = Instant::now();
    let options = utils::load_options(&args.config, &args.overrides, &root)?;
    let resolver = Resolver::new(&options, &ctx)?;
    let resolution = resolver.resolve()?;

    let document = emitted(&resolution, args.emit)?;
    let text = utils::to_json(&document, args.compact)?;

    match &args.out {
        Some(out) => {
            let path = utils::resolve_path(out, &root);
            utils::write_output(&path, &text).await?;
            ui::print_plan_summary(&resolution.plan);
            ui::success(&format!(
                "Wrote {} configuration to {} in {}",
                ctx.name(),
                path.display(),
                ui::format_duration(start.elapsed())
            ));
        }
        None => print!("{}", text),
    }

    Ok(())
}

/// Select the part of the resolution to print
fn emitted(resolution: &Resolution, emit: Emit) -> Result<Value> {
    Ok(match emit {
        Emit::Config => resolution.config.clone(),
        Emit::Plan => serde_json::to_value(&resolution.plan)?,
        Emit::All => json!({
            "plan": serde_json::to_value(&resolution.plan)?,
            "config": resolution.config,
        }),
    })
}
