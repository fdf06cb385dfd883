//! Shared utilities for command implementations.
//!
//! - Project root and path resolution
//! - Configuration loading with profile and command-line overrides
//! - Output writing

use std::path::{Path, PathBuf};

use twinpack_config::{BuildOptions, ConfigDiscovery};

use crate::cli::{ConfigArgs, OverrideArgs};
use crate::error::{CliError, Result, ResultExt};

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Project root from `--root`, or the current directory
pub fn project_root(args: &ConfigArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &args.root {
        Some(root) => resolve_path(root, &cwd),
        None => cwd,
    })
}

/// Load build options for `root`
///
/// Layers: defaults < config file < `TWINPACK_*` environment < profile <
/// command-line overrides.
pub fn load_options(
    args: &ConfigArgs,
    overrides: &OverrideArgs,
    root: &Path,
) -> Result<BuildOptions> {
    let discovery = ConfigDiscovery::new(root);

    let config = match &args.config {
        Some(path) => {
            let path = resolve_path(path, root);
            if !path.is_file() {
                return Err(CliError::FileNotFound(path));
            }
            discovery
                .load_from(&path)
                .context(format!("Failed to load {}", path.display()))?
        }
        None => discovery.load_or_default()?,
    };

    let config = config.materialize_profile(args.profile.as_deref())?;
    Ok(apply_overrides(config.build, overrides))
}

/// Apply command-line overrides, the highest-priority layer
pub fn apply_overrides(mut options: BuildOptions, overrides: &OverrideArgs) -> BuildOptions {
    if let Some(mode) = overrides.mode {
        options = options.with_output_mode(mode.into());
    }
    if let Some(limit) = overrides.svg_inline_limit {
        options = options.with_svg_inline_limit(limit);
    }
    if overrides.minify {
        options.minify = true;
    }
    options
}

/// Write `content` to `path`, creating parent directories
pub async fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.with_path(parent)?;
        }
    }
    tokio::fs::write(path, content).await.with_path(path)?;
    Ok(())
}

/// Serialize JSON for output
pub fn to_json(value: &serde_json::Value, compact: bool) -> Result<String> {
    let mut text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    text.push('\n');
    Ok(text)
}
