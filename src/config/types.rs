//! The resolved configuration and its typed core.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{AxiomError, Result};

/// Environment name treated as production when `prodEnvName` is unset.
pub const DEFAULT_PROD_ENV_NAME: &str = "prod";

/// The `aws` block of a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsConfig {
    /// Account ID. A JSON number is accepted and kept as its digits.
    #[serde(
        default,
        deserialize_with = "account_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub account: Option<String>,

    pub region: String,

    /// Named profile from the AWS shared config. `None` leaves the choice to
    /// `AWS_PROFILE`, then `default`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// SSM path prefix the application's parameters live under.
    pub base_parameter_path: String,
}

fn account_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "invalid type: {}, expected an account ID string or number",
            other
        ))),
    }
}

/// Typed view over the keys every config must carry.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreFields {
    name: String,
    env: String,
    aws: AwsConfig,
    #[serde(default)]
    prod_env_name: Option<String>,
}

/// A fully merged configuration.
///
/// Built fresh by every call to [`super::load_config`]. Callers only get
/// read access; extension keys beyond the core fields are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    name: String,
    env: String,
    aws: AwsConfig,
    prod_env_name: String,
    tree: Map<String, Value>,
}

impl Config {
    /// Wrap a merged tree, filling in `prodEnvName` when it is missing.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut tree) = value else {
            return Err(AxiomError::invalid_config(
                "top level of the configuration must be an object",
            ));
        };

        let core: CoreFields = serde_json::from_value(Value::Object(tree.clone()))
            .map_err(|e| AxiomError::invalid_config(e.to_string()))?;

        let prod_env_name = core
            .prod_env_name
            .unwrap_or_else(|| DEFAULT_PROD_ENV_NAME.to_string());
        tree.insert("prodEnvName".to_string(), Value::String(prod_env_name.clone()));

        Ok(Self {
            name: core.name,
            env: core.env,
            aws: core.aws,
            prod_env_name,
            tree,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn aws(&self) -> &AwsConfig {
        &self.aws
    }

    pub fn prod_env_name(&self) -> &str {
        &self.prod_env_name
    }

    /// True iff `env` equals `prodEnvName`.
    pub fn is_prod(&self) -> bool {
        self.env == self.prod_env_name
    }

    /// `baseParameterPath` without trailing slashes, joined with `/<name>`.
    ///
    /// ```
    /// # use axiom::config::Config;
    /// let config = Config::from_value(serde_json::json!({
    ///     "name": "app",
    ///     "env": "prod",
    ///     "aws": { "region": "us-east-1", "baseParameterPath": "/prod-path///" }
    /// })).unwrap();
    /// assert_eq!(config.as_parameter_path("my-secret"), "/prod-path/my-secret");
    /// ```
    pub fn as_parameter_path(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.aws.base_parameter_path.trim_end_matches('/'),
            name
        )
    }

    /// Any top-level key, including extension fields.
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.tree.get(key)
    }

    /// Deserialize a top-level key into `T`. `Ok(None)` when the key is absent.
    pub fn extension_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.tree
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| {
                    AxiomError::invalid_config(format!("field '{}': {}", key, e))
                })
            })
            .transpose()
    }

    /// The merged tree, with `prodEnvName` filled in.
    pub fn as_value(&self) -> Value {
        Value::Object(self.tree.clone())
    }
}
