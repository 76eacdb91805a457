//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with config and home isolated in a temp dir
fn pantryctl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pantryctl").unwrap();
    cmd.env("PANTRYCTL_CONFIG", dir.path().join("config.toml"))
        .env("HOME", dir.path())
        .env_remove("PANTRYCTL_DELAY_MS")
        .env_remove("PANTRYCTL_LOG")
        .env_remove("RUST_LOG")
        .current_dir(dir.path());
    cmd
}

// === Help ===

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    pantryctl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("tui"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_demo_help() {
    let dir = TempDir::new().unwrap();
    pantryctl(&dir)
        .args(["demo", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--delay-ms"))
        .stdout(predicate::str::contains("--seed"));
}

// === Demo ===

#[test]
fn test_demo_text_output() {
    let dir = TempDir::new().unwrap();
    pantryctl(&dir)
        .args(["demo", "--delay-ms", "0", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Purchase History (3)"))
        .stdout(predicate::str::contains("organic eggs (x12)"))
        .stdout(predicate::str::contains("Expires in 1d"))
        .stdout(predicate::str::contains("HEALTHIER ALTERNATIVES FOR 'white bread'"))
        .stdout(predicate::str::contains("• organic eggs: 1 day(s) left"))
        .stdout(predicate::str::contains("🥬 PRODUCE:\n• apples"))
        .stdout(predicate::str::contains("Total Spent: $78.36"));
}

#[test]
fn test_demo_json_output() {
    let dir = TempDir::new().unwrap();
    let output = pantryctl(&dir)
        .args(["demo", "--delay-ms", "0", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["purchases"].as_array().unwrap().len(), 3);
    assert_eq!(report["stats"]["total_quantity"], 14);

    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 6);
    assert!(results.iter().all(|r| r["type"] == "ai_response"));
    assert_eq!(results[5]["action"], "spending-analysis");
}

#[test]
fn test_bad_delay_env_is_reported() {
    let dir = TempDir::new().unwrap();
    pantryctl(&dir)
        .env("PANTRYCTL_DELAY_MS", "soon")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PANTRYCTL_DELAY_MS is not a number"));
}

// === Config ===

#[test]
fn test_config_path_honors_env() {
    let dir = TempDir::new().unwrap();
    pantryctl(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_show_and_force() {
    let dir = TempDir::new().unwrap();

    pantryctl(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config"));
    assert!(dir.path().join("config.toml").exists());

    pantryctl(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    pantryctl(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    pantryctl(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("response_delay_ms = 2000"))
        .stdout(predicate::str::contains("expiring_threshold_days = 3"));
}

#[test]
fn test_config_show_applies_env_overrides() {
    let dir = TempDir::new().unwrap();
    pantryctl(&dir)
        .env("PANTRYCTL_DELAY_MS", "250")
        .env("PANTRYCTL_LOG", "debug")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("response_delay_ms = 250"))
        .stdout(predicate::str::contains("level = \"debug\""));
}

// === Completions ===

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    pantryctl(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pantryctl"));
}
