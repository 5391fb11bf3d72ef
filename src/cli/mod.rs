//! Command-line interface definitions.

mod args;
mod commands;

pub use args::{AwsOverrides, Cli, GlobalArgs};
pub use commands::{Commands, ParamsCommands};
