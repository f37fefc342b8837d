//! Tests of the `carve` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn carve(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("carve").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("CARVE_OUT_DIR")
        .env_remove("CARVE_MINIFY")
        .env_remove("CARVE_EXPORTS")
        .env_remove("CARVE_NAMES")
        .env_remove("FORCE_COLOR")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_stdout_build() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .args(["include=identity", "exports=none", "-c"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/*!\n * Lo-Dash 1.0.0-rc.3 (Custom Build)"))
        .stdout(predicate::str::contains("lodash.identity = identity;"))
        .stdout(predicate::str::contains("define(").not());
}

#[test]
fn test_empty_stdout_build() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .args(["-c", "include=", "exports="])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_file_build() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .args(["include=each,filter,map", "-o", "dist/lodash.custom.js"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("dist/lodash.custom.js"));

    let written = std::fs::read_to_string(dir.path().join("dist/lodash.custom.js")).unwrap();
    assert!(written.contains("lodash.each = forEach;"));
    assert!(written.contains("Build: `lodash include=each,filter,map`"));
}

#[test]
fn test_default_file_name() {
    let dir = TempDir::new().unwrap();
    carve(&dir).args(["backbone", "-s"]).assert().success().stderr(predicate::str::is_empty());
    assert!(dir.path().join("lodash.backbone.js").is_file());
}

#[test]
fn test_unknown_keyword_fails() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .args(["include=map", "turbo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("turbo"));
}

#[test]
fn test_build_failure_summary() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .args(["include=map", "turbo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("✗ build failed: unknown keyword 'turbo'"));
}

#[test]
fn test_colored_run() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .env_remove("NO_COLOR")
        .env("FORCE_COLOR", "1")
        .args(["include=identity", "-o", "id.js", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("panicked").not())
        .stderr(predicate::str::contains("\u{1b}["));
    assert!(dir.path().join("id.js").is_file());
}

#[test]
fn test_no_color_env_disables_ansi() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .env_remove("FORCE_COLOR")
        .args(["include=identity", "-o", "id.js", "-v"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_silent_failure_prints_nothing() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .args(["turbo", "-s"])
        .assert()
        .failure()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_settings_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("carve.toml"),
        "out_dir = \"build\"\nexports = [\"global\"]\n",
    )
    .unwrap();

    carve(&dir).args(["include=identity", "-s"]).assert().success();
    let written = std::fs::read_to_string(dir.path().join("build/lodash.custom.js")).unwrap();
    assert!(written.contains("window._ = lodash;"));
    assert!(!written.contains("define("));
}

#[test]
fn test_env_overrides_settings() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .env("CARVE_MINIFY", "true")
        .args(["include=identity", "-s"])
        .assert()
        .success();
    assert!(dir.path().join("lodash.custom.min.js").is_file());
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .args(["--config", "nope.toml", "include=map", "-c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_strict_names_from_env() {
    let dir = TempDir::new().unwrap();
    carve(&dir)
        .env("CARVE_NAMES", "strict")
        .args(["include=mapp", "-c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mapp"));
}
