//! Command and subcommand definitions.

use clap::{ArgAction, Subcommand};

use super::args::AwsOverrides;

/// Top-level commands available in axiom.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved configuration
    Config,
    /// Manage SSM parameters
    Params {
        #[command(subcommand)]
        command: ParamsCommands,
    },
    /// Initialize axiom configuration files in the current directory
    Init {
        /// Overwrite existing config files
        #[arg(short, long)]
        force: bool,

        /// Project name
        #[arg(long)]
        name: Option<String>,

        /// AWS account ID
        #[arg(long)]
        account: Option<String>,

        /// AWS region
        #[arg(long)]
        region: Option<String>,

        /// AWS profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

/// Parameter Store subcommands. Paths starting with `/` are absolute;
/// anything else is relative to the configured base parameter path.
#[derive(Subcommand, Debug)]
pub enum ParamsCommands {
    /// List every parameter under a path (default: the base path)
    Get {
        path: Option<String>,

        #[command(flatten)]
        aws: AwsOverrides,
    },
    /// Create or update a parameter
    Set {
        path: String,

        value: String,

        /// Set the parameter without prompting
        #[arg(short, long)]
        force: bool,

        /// Store the value as a SecureString
        #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
        secure: bool,

        /// Replace an existing value
        #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
        overwrite: bool,

        #[command(flatten)]
        aws: AwsOverrides,
    },
    /// Delete a parameter
    Delete {
        path: String,

        /// Delete the parameter without prompting
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        aws: AwsOverrides,
    },
}
