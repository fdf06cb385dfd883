//! Tests for configuration validation.

use twinpack_config::{
    validate_fs, BuildOptions, ConfigError, ConfigValidator, FsValidator, OutputMode,
    TwinpackConfig,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn validate_catches_missing_entry_source() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = TwinpackConfig::default();

    let result = FsValidator::new(dir.path()).validate(&cfg.build);
    match result.unwrap_err() {
        ConfigError::EntryNotFound { entry, path } => {
            assert_eq!(entry, "index");
            assert!(path.ends_with("src/index.mjs"));
        }
        other => panic!("expected EntryNotFound error, got {other:?}"),
    }
}

#[test]
fn validate_succeeds_when_entry_exists() {
    let dir = TempDir::new().expect("tempdir");
    let src_dir = dir.path().join("src");
    fs::create_dir(&src_dir).expect("create src dir");
    fs::write(src_dir.join("index.mjs"), "export {};").expect("write entry");

    let cfg = TwinpackConfig::default();
    assert!(FsValidator::new(dir.path()).validate(&cfg.build).is_ok());
}

#[test]
fn validate_checks_every_source_of_an_entry() {
    let dir = TempDir::new().expect("tempdir");
    let src_dir = dir.path().join("src");
    fs::create_dir(&src_dir).expect("create src dir");
    fs::write(src_dir.join("index.mjs"), "").expect("write entry");

    let cfg = BuildOptions::default()
        .with_entry("index", ["./src/index.mjs", "./src/polyfills.mjs"]);

    let err = validate_fs(&cfg, dir.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EntryNotFound { ref path, .. } if path.ends_with("src/polyfills.mjs")
    ));
}

#[test]
fn fs_validation_runs_schema_validation_first() {
    let dir = TempDir::new().expect("tempdir");
    let mut cfg = BuildOptions::default().with_output_mode(OutputMode::Module);
    cfg.output.public_path = Some("/".to_string());

    // Schema error wins over the missing entry file
    let err = validate_fs(&cfg, dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::IncompatibleOutputMode { .. }));
}

#[test]
fn zero_inline_limit_is_valid() {
    let cfg = BuildOptions::default().with_svg_inline_limit(0);
    assert!(twinpack_config::validate_schema(&cfg).is_ok());
}

#[test]
fn incompatible_output_error_names_the_mode() {
    let mut cfg = BuildOptions::default();
    cfg.output.filename = Some("[name][contenthash:10].js".to_string());

    let err = twinpack_config::validate_schema(&cfg).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("traditional"));
    assert!(msg.contains("content hash"));
}
