//! End-to-end tests for the `twinpack` binary.
//!
//! Each test runs the compiled binary in a scratch project with the backend
//! selection variables set explicitly.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("index.mjs"), "import './app.css';\n").unwrap();
    fs::write(src.join("logo.svg"), "<svg xmlns=\"http://www.w3.org/2000/svg\"/>").unwrap();
    fs::write(
        temp.path().join("twinpack.toml"),
        r#"
[build.entries]
index = ["./src/index.mjs"]

[build.assets]
svg_inline_limit = 1000

[profiles.esm.build.output]
mode = "module"
"#,
    )
    .unwrap();
    temp
}

fn twinpack(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("twinpack").unwrap();
    cmd.current_dir(root)
        .env("NO_COLOR", "1")
        .env_remove("WEBPACK")
        .env_remove("RSPACK")
        .env_remove("RUST_LOG");
    cmd
}

fn json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn resolve_without_backend_fails() {
    let temp = project();
    twinpack(temp.path())
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WEBPACK"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn resolve_with_both_backends_fails() {
    let temp = project();
    twinpack(temp.path())
        .env("WEBPACK", "1")
        .env("RSPACK", "1")
        .arg("resolve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unset"));
}

#[test]
fn empty_signal_does_not_select() {
    let temp = project();
    twinpack(temp.path())
        .env("WEBPACK", "")
        .arg("resolve")
        .assert()
        .failure();
}

#[test]
fn resolve_rspack_config() {
    let temp = project();
    let output = twinpack(temp.path())
        .env("RSPACK", "1")
        .arg("resolve")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config = json(&output);
    let out_path = config["output"]["path"].as_str().unwrap();
    assert!(out_path.ends_with("rspack-dist"));
    assert_eq!(config["output"]["filename"], "[name].js");
    assert_eq!(config["output"]["publicPath"], "/");
    assert_eq!(config["entry"]["index"][0], "./src/index.mjs");
}

#[test]
fn resolve_webpack_uses_own_output_dir() {
    let temp = project();
    let output = twinpack(temp.path())
        .env("WEBPACK", "1")
        .args(["resolve", "--compact"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config = json(&output);
    assert!(config["output"]["path"].as_str().unwrap().ends_with("webpack-dist"));
}

#[test]
fn resolve_profile_switches_to_module_output() {
    let temp = project();
    let output = twinpack(temp.path())
        .env("WEBPACK", "1")
        .args(["resolve", "--profile", "esm", "--emit", "plan"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan = json(&output);
    assert_eq!(plan["mode"], "module");
    assert_eq!(plan["entries"][0]["filename"], "[name][contenthash:10].js");
    assert_eq!(plan["entries"][0]["public_path"], "auto");
}

#[test]
fn resolve_unknown_profile_fails() {
    let temp = project();
    twinpack(temp.path())
        .env("RSPACK", "1")
        .args(["resolve", "--profile", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn resolve_writes_out_file() {
    let temp = project();
    twinpack(temp.path())
        .env("RSPACK", "1")
        .args(["resolve", "--emit", "all", "--out", "build/rspack.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote rspack configuration"));

    let written = fs::read(temp.path().join("build/rspack.json")).unwrap();
    let doc = json(&written);
    assert_eq!(doc["plan"]["backend"], "rspack");
    assert!(doc["config"]["module"]["rules"].is_array());
}

#[test]
fn classify_small_svg_inlines() {
    let temp = project();
    twinpack(temp.path())
        .env("WEBPACK", "1")
        .args(["classify", "./src/logo.svg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inline-data"))
        .stdout(predicate::str::contains("asset/inline"));
}

#[test]
fn classify_size_override_emits_file() {
    let temp = project();
    let output = twinpack(temp.path())
        .env("RSPACK", "1")
        .args(["classify", "./src/logo.svg", "--size", "4kb", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let decision = json(&output);
    assert_eq!(decision["classification"]["class"], "emit-file");
    assert_eq!(decision["filename"], "static/svg/[name].svg");
    assert_eq!(decision["preview"], "static/svg/logo.svg");
}

#[test]
fn classify_raw_query() {
    let temp = project();
    twinpack(temp.path())
        .env("WEBPACK", "1")
        .args(["classify", "./notes.md?raw", "--size", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("raw-text"));
}

#[test]
fn classify_missing_file_needs_size() {
    let temp = project();
    twinpack(temp.path())
        .env("WEBPACK", "1")
        .args(["classify", "./missing.svg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--size"));
}

#[test]
fn classify_css_module_reports_exports() {
    let temp = project();
    fs::write(temp.path().join("src/card.module.css"), ".card-title {}").unwrap();
    let output = twinpack(temp.path())
        .env("WEBPACK", "1")
        .args(["classify", "./src/card.module.css", "--local", "card-title", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let decision = json(&output);
    assert_eq!(decision["css_module"], "module");
    assert_eq!(decision["exports"][0]["local"], "card-title");
    assert_eq!(decision["exports"][0]["names"][1], "cardTitle");
}

#[test]
fn classify_locals_on_global_stylesheet_warns() {
    let temp = project();
    fs::write(temp.path().join("src/app.css"), "body {}").unwrap();
    twinpack(temp.path())
        .env("RSPACK", "1")
        .args(["classify", "./src/app.css", "--local", "body", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exports").not())
        .stderr(predicate::str::contains("not a CSS module"));
}

#[test]
fn check_passes() {
    let temp = project();
    twinpack(temp.path())
        .env("RSPACK", "1")
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("All checks passed"));
}

#[test]
fn check_reports_missing_entry() {
    let temp = project();
    fs::remove_file(temp.path().join("src/index.mjs")).unwrap();
    twinpack(temp.path())
        .env("WEBPACK", "1")
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("index.mjs"));
}

#[test]
fn root_flag_resolves_elsewhere() {
    let temp = project();
    let cwd = TempDir::new().unwrap();
    twinpack(cwd.path())
        .env("RSPACK", "1")
        .arg("check")
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success();
}
