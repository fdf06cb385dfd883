//! Rendering of the bundler configuration document.
//!
//! The document is plain JSON. Conditions are regex literals written as
//! strings (`"/\\.(svg)$/i"`) and constructors are `{ from, member }`
//! references; the loader shim that hands the document to the bundler
//! turns both back into JavaScript values.

use serde_json::{json, Map, Value};

use twinpack_config::{BuildOptions, OutputMode};

use crate::backend::BackendContext;
use crate::classify::RuleTable;
use crate::error::Result;
use crate::layout::{EntryPlan, OutputPlan};
use crate::translate::{self, StylesheetPolicy};

/// Everything the renderer reads
pub struct RenderInput<'a> {
    pub options: &'a BuildOptions,
    pub ctx: &'a BackendContext,
    pub plan: &'a OutputPlan,
    pub table: &'a RuleTable,
    pub policy: &'a StylesheetPolicy,
}

/// Render the full configuration for the active backend
pub fn render_config(input: &RenderInput<'_>) -> Result<Value> {
    let RenderInput {
        options,
        ctx,
        plan,
        table,
        policy,
    } = input;

    let rules = translate::render_rules(table, ctx.backend(), policy)?;
    let plugins = serde_json::to_value(translate::plugins(ctx, policy, &options.html))?;

    let config = json!({
        "mode": "production",
        "devtool": false,
        "entry": entry(plan),
        "output": output(plan, options.output.clean),
        "module": {
            "generator": {
                "asset": { "publicPath": plan.asset_public_path },
            },
            "rules": [{ "oneOf": rules }],
        },
        "plugins": plugins,
        "optimization": { "minimize": options.minify },
        "experiments": {
            "css": true,
            "outputModule": plan.mode == OutputMode::Module,
        },
        "stats": { "children": true },
    });

    tracing::debug!(backend = ctx.name(), "rendered bundler configuration");
    Ok(config)
}

fn entry(plan: &OutputPlan) -> Value {
    let entries: Map<String, Value> = plan
        .entries
        .iter()
        .map(|entry| {
            let sources: Vec<Value> = entry
                .sources
                .iter()
                .map(|source| json!(source.to_string_lossy()))
                .collect();
            (entry.name.clone(), Value::Array(sources))
        })
        .collect();
    Value::Object(entries)
}

fn output(plan: &OutputPlan, clean: bool) -> Value {
    let mut output = Map::new();
    output.insert("clean".into(), json!(clean));
    output.insert("path".into(), json!(plan.output_dir.to_string_lossy()));
    output.insert("assetModuleFilename".into(), json!(plan.asset));
    output.insert("cssFilename".into(), json!(plan.stylesheet));
    output.insert("cssChunkFilename".into(), json!(plan.async_stylesheet));

    // All entries share one script layout
    if let Some(first) = plan.entries.first() {
        output.extend(script_fields(first));
    }
    if plan.mode == OutputMode::Module {
        output.insert("module".into(), json!(true));
    }

    Value::Object(output)
}

fn script_fields(entry: &EntryPlan) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("filename".into(), json!(entry.filename));
    fields.insert("publicPath".into(), json!(entry.public_path));
    fields.insert("chunkFormat".into(), json!(entry.chunk_format));
    fields.insert("chunkLoading".into(), json!(entry.chunk_loading));
    if let Some(worker) = entry.worker_chunk_loading {
        fields.insert("workerChunkLoading".into(), json!(worker));
    }
    if let Some(wasm) = entry.wasm_loading {
        fields.insert("wasmLoading".into(), json!(wasm));
    }
    fields
}
