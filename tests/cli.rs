//! End-to-end tests of the axiom binary. None of these reach AWS.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn axiom() -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("axiom");
    cmd.env_remove("AXIOM_ENV")
        .env_remove("AXIOM_CONFIG")
        .env_remove("AXIOM_DEBUG");
    cmd
}

fn init_project(dir: &TempDir) {
    axiom()
        .args(["init", "--name", "shop", "--account", "123456789012"])
        .args(["--region", "eu-west-1", "--profile", "shop-admin"])
        .arg("--config")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".axiom.dev.json"));
}

#[test]
fn test_init_then_config_for_dev() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let output = axiom()
        .args(["config", "--env", "dev"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["name"], "shop");
    assert_eq!(config["env"], "dev");
    assert_eq!(config["prodEnvName"], "prod");
    assert_eq!(config["aws"]["region"], "eu-west-1");
    assert_eq!(config["aws"]["baseParameterPath"], "/shop/dev");
}

#[test]
fn test_env_variable_selects_environment() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    axiom()
        .arg("config")
        .env("AXIOM_ENV", "dev")
        .env("AXIOM_CONFIG", dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"env\": \"dev\""));
}

#[test]
fn test_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    axiom()
        .args(["init", "--name", "other", "--account", "123456789012"])
        .args(["--region", "us-east-1", "--profile", "default"])
        .arg("--config")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    let base = fs::read_to_string(dir.path().join(".axiom.json")).unwrap();
    assert!(base.contains("shop"));
}

#[test]
fn test_missing_config_exits_with_error() {
    let dir = TempDir::new().unwrap();

    axiom()
        .arg("config")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Axiom config files not found"));
}

#[test]
fn test_params_delete_refuses_base_path() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    axiom()
        .args(["params", "delete", "/shop/prod", "--force"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("prohibited"));
}
