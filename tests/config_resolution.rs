//! Integration tests for layered config resolution through the public API.

use axiom::config::{LoadConfigInput, load_config, merge_deep};
use axiom::AxiomError;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, value: Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        ".axiom.json",
        json!({
            "name": "app",
            "env": "prod",
            "aws": {"region": "us-east-1", "baseParameterPath": "/app/prod"}
        }),
    );
    write(
        dir.path(),
        ".axiom.dev.json",
        json!({"env": "dev", "aws": {"region": "us-north-1"}}),
    );
    dir
}

#[test]
fn test_dev_environment_layers_over_base() {
    let dir = project();
    let config = load_config(&LoadConfigInput::new().env("dev").cwd(dir.path())).unwrap();

    assert_eq!(config.name(), "app");
    assert_eq!(config.env(), "dev");
    assert_eq!(config.aws().region, "us-north-1");
    assert_eq!(config.aws().base_parameter_path, "/app/prod");
    assert!(!config.is_prod());
}

#[test]
fn test_overrides_win_over_environment_file() {
    let dir = project();
    let input = LoadConfigInput::new()
        .env("dev")
        .cwd(dir.path())
        .overrides(json!({"aws": {"region": "eu-west-1"}}));
    let config = load_config(&input).unwrap();

    assert_eq!(config.env(), "dev");
    assert_eq!(config.aws().region, "eu-west-1");
    assert_eq!(config.as_parameter_path("db/url"), "/app/prod/db/url");
}

#[test]
fn test_discovery_walks_up_from_nested_directory() {
    let dir = project();
    let nested = dir.path().join("services/api/src");
    fs::create_dir_all(&nested).unwrap();

    let config = load_config(&LoadConfigInput::new().cwd(&nested)).unwrap();
    assert_eq!(config.env(), "prod");
    assert!(config.is_prod());
}

#[test]
fn test_missing_environment_file_is_fatal() {
    let dir = project();
    let err = load_config(&LoadConfigInput::new().env("staging").cwd(dir.path())).unwrap_err();

    assert!(matches!(err, AxiomError::ConfigNotFound { .. }));
    assert!(err.to_string().contains(".axiom.staging.json"));
}

#[test]
fn test_merging_resolved_config_with_empty_overrides_is_identity() {
    let dir = project();
    let resolved = load_config(&LoadConfigInput::new().env("dev").cwd(dir.path()))
        .unwrap()
        .as_value();

    let mut merged = resolved.clone();
    merge_deep(&mut merged, json!({}));
    assert_eq!(merged, resolved);
}
