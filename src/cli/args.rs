//! CLI argument parsing structures.

use clap::{Args, Parser};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

use super::commands::Commands;

/// Main CLI structure for axiom.
#[derive(Parser, Debug)]
#[command(name = "axiom", version)]
#[command(about = "Axiom - an AWS focused config cli", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options available to all commands.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Directory to start searching for config files from
    #[arg(short, long, global = true, env = "AXIOM_CONFIG", value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Environment name like prod, staging or dev
    #[arg(long, global = true, env = "AXIOM_ENV")]
    pub env: Option<String>,

    /// Print diagnostic logging to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,
}

/// AWS settings that override the resolved config for one invocation.
#[derive(Debug, Default, Clone, Args)]
pub struct AwsOverrides {
    /// AWS account number like 123456789012
    #[arg(long)]
    pub account: Option<String>,

    /// AWS region like us-east-1
    #[arg(long)]
    pub region: Option<String>,

    /// AWS configured profile
    #[arg(long)]
    pub profile: Option<String>,

    /// SSM parameter path base where secrets and managed values are set
    #[arg(long)]
    pub base_parameter_path: Option<String>,
}

impl AwsOverrides {
    /// The explicit `overrides` layer for config resolution, or `None` when
    /// no flag was given.
    pub fn to_overrides(&self) -> Option<Value> {
        let mut aws = Map::new();
        let fields = [
            ("account", &self.account),
            ("region", &self.region),
            ("profile", &self.profile),
            ("baseParameterPath", &self.base_parameter_path),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                aws.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        (!aws.is_empty()).then(|| json!({ "aws": aws }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ParamsCommands;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_only_include_given_flags() {
        assert_eq!(AwsOverrides::default().to_overrides(), None);

        let overrides = AwsOverrides {
            region: Some("eu-west-1".into()),
            base_parameter_path: Some("/app/test".into()),
            ..Default::default()
        };
        assert_eq!(
            overrides.to_overrides(),
            Some(json!({"aws": {"region": "eu-west-1", "baseParameterPath": "/app/test"}}))
        );
    }

    #[test]
    fn test_parse_params_set() {
        let cli = Cli::try_parse_from([
            "axiom", "--env", "dev", "params", "set", "db/url", "postgres://db", "--secure=false",
            "--region", "eu-west-1",
        ])
        .unwrap();

        assert_eq!(cli.global.env.as_deref(), Some("dev"));
        match cli.command {
            Commands::Params {
                command:
                    ParamsCommands::Set {
                        path,
                        value,
                        force,
                        secure,
                        overwrite,
                        aws,
                    },
            } => {
                assert_eq!(path, "db/url");
                assert_eq!(value, "postgres://db");
                assert!(!force);
                assert!(!secure);
                assert!(overwrite);
                assert_eq!(aws.region.as_deref(), Some("eu-west-1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["axiom", "config", "-d", "-c", "/tmp/project"]).unwrap();
        assert!(cli.global.debug);
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/project")));
    }
}
