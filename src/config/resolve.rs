//! Layered resolution: base file < environment file < explicit overrides.

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use super::discovery::config_path;
use super::loader::import_config_from_path;
use super::merge::merge_layers;
use super::types::Config;
use crate::error::Result;

/// Inputs to [`load_config`].
#[derive(Debug, Clone, Default)]
pub struct LoadConfigInput {
    /// Environment whose `.axiom.<env>.*` file is layered over the base.
    pub env: Option<String>,
    /// Highest-precedence layer, usually built from CLI flags.
    pub overrides: Option<Value>,
    /// Directory to start the upward search from. Defaults to the process
    /// working directory.
    pub cwd: Option<PathBuf>,
}

impl LoadConfigInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn overrides(mut self, overrides: Value) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Resolve the active configuration.
///
/// The base file is always required. When `env` is set its file is
/// required too. Any discovery or load failure aborts the whole resolution.
pub fn load_config(input: &LoadConfigInput) -> Result<Config> {
    let cwd = input.cwd.as_deref();

    let base_path = config_path(None, cwd)?;
    let base = import_config_from_path(&base_path)?;

    let mut layers = Vec::with_capacity(2);
    if let Some(env) = input.env.as_deref() {
        let env_path = config_path(Some(env), cwd)?;
        debug!(env, path = %env_path.display(), "layering environment config");
        layers.push(import_config_from_path(&env_path)?);
    }
    if let Some(overrides) = &input.overrides {
        layers.push(overrides.clone());
    }

    Config::from_value(merge_layers(base, layers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AxiomError;
    use serde_json::json;
    use std::fs;
    use std::path::Path;

    fn write(dir: &Path, name: &str, value: Value) {
        fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            ".axiom.json",
            json!({
                "name": "app",
                "env": "prod",
                "aws": { "region": "us-east-1", "baseParameterPath": "/app/prod" }
            }),
        );
        write(
            tmp.path(),
            ".axiom.dev.json",
            json!({ "env": "dev", "aws": { "region": "us-north-1" } }),
        );
        tmp
    }

    #[test]
    fn test_base_only() {
        let tmp = fixture();
        let config = load_config(&LoadConfigInput::new().cwd(tmp.path())).unwrap();
        assert_eq!(config.env(), "prod");
        assert!(config.is_prod());
    }

    #[test]
    fn test_env_layer_inherits_base() {
        let tmp = fixture();
        let config = load_config(&LoadConfigInput::new().env("dev").cwd(tmp.path())).unwrap();

        let mut expected = json!({
            "name": "app",
            "env": "dev",
            "aws": { "region": "us-north-1", "baseParameterPath": "/app/prod" }
        });
        expected["prodEnvName"] = json!("prod");
        assert_eq!(config.as_value(), expected);
        assert!(!config.is_prod());
    }

    #[test]
    fn test_overrides_beat_env_file() {
        let tmp = fixture();
        let input = LoadConfigInput::new()
            .env("dev")
            .cwd(tmp.path())
            .overrides(json!({ "aws": { "region": "eu-west-1" }, "extra": [1] }));
        let config = load_config(&input).unwrap();

        assert_eq!(config.aws().region, "eu-west-1");
        assert_eq!(config.env(), "dev");
        assert_eq!(config.aws().base_parameter_path, "/app/prod");
        assert_eq!(config.extension("extra"), Some(&json!([1])));
    }

    #[test]
    fn test_overrides_without_env() {
        let tmp = fixture();
        let input = LoadConfigInput::new()
            .cwd(tmp.path())
            .overrides(json!({ "env": "staging" }));
        assert_eq!(load_config(&input).unwrap().env(), "staging");
    }

    #[test]
    fn test_missing_env_file_is_fatal() {
        let tmp = fixture();
        let err = load_config(&LoadConfigInput::new().env("qa-missing").cwd(tmp.path()))
            .unwrap_err();
        assert!(matches!(err, AxiomError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_env_file_found_in_ancestor() {
        let tmp = fixture();
        let nested = tmp.path().join("pkg/sub");
        fs::create_dir_all(&nested).unwrap();
        write(&nested, ".axiom.json", json!({
            "name": "pkg",
            "env": "prod",
            "aws": { "region": "us-west-2", "baseParameterPath": "/pkg/prod/" }
        }));

        let config = load_config(&LoadConfigInput::new().env("dev").cwd(&nested)).unwrap();
        assert_eq!(config.name(), "pkg");
        assert_eq!(config.aws().region, "us-north-1");
        assert_eq!(config.as_parameter_path("db"), "/pkg/prod/db");
    }
}
