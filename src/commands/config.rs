//! Config command handler - printing the resolved configuration.

use super::load_input;
use crate::cli::GlobalArgs;
use crate::config::load_config;
use crate::error::Result;

/// Resolve the configuration and print it as pretty JSON.
pub fn handle_config(global: &GlobalArgs) -> Result<()> {
    let config = load_config(&load_input(global, None))?;
    println!("{}", serde_json::to_string_pretty(&config.as_value())?);
    Ok(())
}
