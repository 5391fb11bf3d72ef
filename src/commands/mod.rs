//! Command handlers for the axiom CLI.

mod config;
mod init;
mod params;

pub use config::handle_config;
pub use init::{InitOptions, handle_init, init_config_files};
pub use params::{delete_target, handle_params_delete, handle_params_get, handle_params_set};

use serde_json::Value;

use crate::cli::GlobalArgs;
use crate::config::LoadConfigInput;

/// Config resolution inputs from the global flags plus an optional
/// overrides layer.
fn load_input(global: &GlobalArgs, overrides: Option<Value>) -> LoadConfigInput {
    LoadConfigInput {
        env: global.env.clone(),
        overrides,
        cwd: global.config.clone(),
    }
}
