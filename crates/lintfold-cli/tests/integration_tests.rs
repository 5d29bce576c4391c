//! Integration tests for the lintfold CLI
//!
//! These tests verify the CLI behavior end-to-end

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("lintfold").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

/// Helper function to create a temporary project with a flat config
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    let config_content = r#"[
  { "extends": ["recommended", "prettier"] },
  {
    "name": "project",
    "plugins": ["import"],
    "rules": {
      "import/order": ["error", { "newlines-between": "always" }],
      "no-unused-vars": "warn",
      "no-console": "warn"
    },
    "ignores": ["node_modules/", "dist/", "src/output.css"]
  }
]
"#;

    fs::write(temp_dir.path().join(".lintfoldrc.json"), config_content).unwrap();
    temp_dir
}

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("lintfold.json");
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lintfold folds layered lint configuration"))
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(VERSION));
}

#[test]
fn test_version_detailed() {
    cli()
        .args(["version", "--detailed"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("lintfold {VERSION}")))
        .stdout(predicate::str::contains("Build information:"));
}

#[test]
fn test_resolve_human_discovers_config() {
    let temp_dir = create_test_project();
    cli()
        .current_dir(temp_dir.path())
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("preset:recommended"))
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("import/order"))
        .stdout(predicate::str::contains("[1 option]"))
        .stdout(predicate::str::contains("src/output.css"));
}

#[test]
fn test_resolve_json() {
    let temp_dir = create_test_project();
    let output = cli()
        .current_dir(temp_dir.path())
        .args(["resolve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rules"]["import/order"]["severity"], "error");
    assert_eq!(
        json["rules"]["import/order"]["options"][0]["newlines-between"],
        "always"
    );
    assert_eq!(json["rules"]["no-console"]["severity"], "warn");
    assert_eq!(json["rules"]["semi"]["severity"], "off");
    assert_eq!(json["plugins"][0], "import");
}

#[test]
fn test_severity_command() {
    let temp_dir = create_test_project();
    cli()
        .current_dir(temp_dir.path())
        .args(["severity", "no-console", "import/order", "eqeqeq"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no-console: warn"))
        .stdout(predicate::str::contains("import/order: error"))
        .stdout(predicate::str::contains("eqeqeq: off"));
}

#[test]
fn test_severity_json() {
    let temp_dir = create_test_project();
    cli()
        .current_dir(temp_dir.path())
        .args(["severity", "no-undef", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""no-undef": "error""#));
}

#[test]
fn test_check_paths() {
    let temp_dir = create_test_project();
    cli()
        .current_dir(temp_dir.path())
        .args(["check", "dist/app.js", "src/app.js", "src/output.css"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored  dist/app.js  (dist/)"))
        .stdout(predicate::str::contains("linted   src/app.js"))
        .stdout(predicate::str::contains("(src/output.css)"));
}

#[test]
fn test_check_fail_on_ignored() {
    let temp_dir = create_test_project();
    cli()
        .current_dir(temp_dir.path())
        .args(["check", "--fail-on-ignored", "node_modules/a/index.js"])
        .assert()
        .failure()
        .code(1);

    cli()
        .current_dir(temp_dir.path())
        .args(["check", "--fail-on-ignored", "src/index.js"])
        .assert()
        .success();
}

#[test]
fn test_unknown_plugin_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(
        &temp_dir,
        r#"{"name": "user", "rules": {"unregistered/ruleX": "error"}}"#,
    );

    cli()
        .args(["--config", &config, "resolve"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unregistered/ruleX"))
        .stderr(predicate::str::contains("layer 0"))
        .stderr(predicate::str::contains("#0 (user)"));
}

#[test]
fn test_malformed_severity_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir, r#"{"rules": {"no-console": "loud"}}"#);

    cli()
        .args(["--config", &config, "severity", "no-console"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed severity"))
        .stderr(predicate::str::contains("\"loud\""));
}

#[test]
fn test_strict_flag_rejects_unknown_plugin_rule() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(
        &temp_dir,
        r#"{"plugins": ["import"], "rules": {"import/sorting": "error"}}"#,
    );

    cli()
        .args(["--config", &config, "resolve"])
        .assert()
        .success();

    cli()
        .args(["--config", &config, "--strict", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("import/sorting"));
}

#[test]
fn test_missing_config_file() {
    cli()
        .args(["--config", "does-not-exist.json", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_rules_for_plugin() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["rules", "--plugin", "import"])
        .assert()
        .success()
        .stdout(predicate::str::contains("import/order"))
        .stdout(predicate::str::contains("import/no-cycle"))
        .stdout(predicate::str::contains("no-console").not());
}

#[test]
fn test_rules_enabled_with_config() {
    let temp_dir = create_test_project();
    cli()
        .current_dir(temp_dir.path())
        .args(["rules", "--enabled"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no-console"))
        .stdout(predicate::str::contains("import/order"))
        .stdout(predicate::str::contains("semi").not());
}

#[test]
fn test_presets_command() {
    cli()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("recommended"))
        .stdout(predicate::str::contains("prettier"))
        .stdout(predicate::str::contains("import/recommended"));
}

#[test]
fn test_config_init_and_validate() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(temp_dir.path().join(".lintfoldrc.json").exists());

    // Refuses to overwrite without --force
    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init"])
        .assert()
        .failure();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_init_toml() {
    let temp_dir = TempDir::new().unwrap();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--format", "toml"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join(".lintfoldrc.toml")).unwrap();
    assert!(content.contains("[[layers]]"));

    cli()
        .current_dir(temp_dir.path())
        .args(["severity", "import/order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("import/order: error"));
}

#[test]
fn test_config_show_raw_and_resolved() {
    let temp_dir = create_test_project();

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"extends\""));

    cli()
        .current_dir(temp_dir.path())
        .args(["config", "show", "--resolved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"no-undef\""))
        .stdout(predicate::str::contains("\"extends\"").not());
}

#[test]
fn test_config_schema() {
    cli()
        .args(["config", "schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ignores\""))
        .stdout(predicate::str::contains("\"plugins\""));
}
