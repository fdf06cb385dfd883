//! Check command implementation.
//!
//! Validates backend selection and configuration without rendering.

use twinpack_config::{validate_fs, validate_schema};
use twinpack_resolver::{select_backend, BackendSignals, Resolver};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Exactly one backend signal is set
/// 2. Config loads and the profile applies
/// 3. Schema validation (entries, templates, output mode)
/// 4. Entry sources exist on disk, unless `--no-fs`
/// 5. The backend translates every processing class and supports the mode
pub async fn execute(args: CheckArgs, signals: BackendSignals) -> Result<()> {
    let root = utils::project_root(&args.config)?;

    ui::info("Checking backend selection...");
    let ctx = select_backend(signals, &root)?;
    ui::success(&format!(
        "Backend: {} (output {})",
        ctx.name(),
        ctx.output_dir().display()
    ));

    ui::info("Checking configuration...");
    let options = utils::load_options(&args.config, &args.overrides, &root)?;
    validate_schema(&options)?;
    ui::success("Configuration is valid!");

    if args.no_fs {
        ui::warning("Skipping entry source check (--no-fs)");
    } else {
        ui::info("Checking entry sources...");
        if let Err(err) = validate_fs(&options, &root) {
            ui::error(&err.to_string());
            return Err(err.into());
        }
        let sources: usize = options.entries.values().map(Vec::len).sum();
        ui::success(&format!("{} entry sources exist", sources));
    }

    let resolver = Resolver::new(&options, &ctx)?;
    ui::success(&format!(
        "{} rules translate for {} in {} mode",
        resolver.table().nodes().len(),
        ctx.name(),
        options.output.mode
    ));

    ui::success("All checks passed!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ConfigArgs, OverrideArgs};
    use crate::error::CliError;
    use std::fs;
    use tempfile::TempDir;
    use twinpack_config::ConfigError;
    use twinpack_resolver::BackendKind;

    fn args(root: &std::path::Path, no_fs: bool) -> CheckArgs {
        CheckArgs {
            config: ConfigArgs {
                root: Some(root.to_path_buf()),
                ..ConfigArgs::default()
            },
            overrides: OverrideArgs::default(),
            no_fs,
        }
    }

    #[tokio::test]
    async fn test_check_passes_with_entry() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/index.mjs"), "export {}").unwrap();

        execute(args(temp.path(), false), BackendSignals::only(BackendKind::Rspack))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_missing_entry() {
        let temp = TempDir::new().unwrap();
        let err = execute(args(temp.path(), false), BackendSignals::only(BackendKind::Webpack))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::EntryNotFound { .. })));
    }

    #[tokio::test]
    async fn test_check_no_fs_skips_entries() {
        let temp = TempDir::new().unwrap();
        execute(args(temp.path(), true), BackendSignals::only(BackendKind::Webpack))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_check_conflicting_backends() {
        let temp = TempDir::new().unwrap();
        let signals = BackendSignals {
            webpack: true,
            rspack: true,
        };
        let err = execute(args(temp.path(), true), signals).await.unwrap_err();
        assert!(err.is_backend_contract());
    }
}
