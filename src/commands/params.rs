//! Params command handlers - reading and writing SSM parameters.

use tracing::debug;

use super::load_input;
use crate::cli::{AwsOverrides, GlobalArgs};
use crate::config::{Config, load_config};
use crate::credentials::CredentialProvider;
use crate::error::{AxiomError, Result};
use crate::ssm::{Parameter, ParameterCollection, ParameterStore, SsmParameterStore, build_path};
use crate::utils::confirm;

fn resolve_config(global: &GlobalArgs, aws: &AwsOverrides) -> Result<Config> {
    load_config(&load_input(global, aws.to_overrides()))
}

/// Parameter Store client for the config's region, signed with the
/// (possibly cached) credentials of its profile.
async fn connect(config: &Config) -> Result<SsmParameterStore> {
    let provider = CredentialProvider::from_env()?;
    let creds = provider.resolve_for(config.aws()).await?;
    debug!(region = %config.aws().region, "connecting to parameter store");
    Ok(SsmParameterStore::connect(&config.aws().region, creds).await)
}

/// Handle `params get`: print `name value` for every parameter under the path.
pub async fn handle_params_get(
    global: &GlobalArgs,
    path: Option<String>,
    aws: &AwsOverrides,
) -> Result<()> {
    let config = resolve_config(global, aws)?;
    let store = connect(&config).await?;

    for param in list_params(&config, &store, path.as_deref()).await? {
        println!("{} {}", param.name, param.value);
    }
    Ok(())
}

async fn list_params(
    config: &Config,
    store: &dyn ParameterStore,
    path: Option<&str>,
) -> Result<Vec<Parameter>> {
    let collection = ParameterCollection::new(build_path(config, path), store);
    Ok(collection.all().await?.values().cloned().collect())
}

/// Handle `params set`: write one parameter and print its new version.
pub async fn handle_params_set(
    global: &GlobalArgs,
    path: &str,
    value: &str,
    force: bool,
    secure: bool,
    overwrite: bool,
    aws: &AwsOverrides,
) -> Result<()> {
    let config = resolve_config(global, aws)?;
    let name = build_path(&config, Some(path));

    if !force && !confirm(&format!("Are you sure you want to set '{}'?", name))? {
        println!("Doing nothing.");
        return Ok(());
    }

    let store = connect(&config).await?;
    let version = store.put_parameter(&name, value, secure, overwrite).await?;
    println!("Version: {}", version);
    Ok(())
}

/// The full parameter name `params delete` would remove.
///
/// Deleting the base parameter path itself is refused.
pub fn delete_target(config: &Config, path: &str) -> Result<String> {
    let name = build_path(config, Some(path));
    let base = &config.aws().base_parameter_path;

    if name.trim_end_matches('/') == base.trim_end_matches('/') {
        return Err(AxiomError::validation(format!(
            "Deleting the path '{}' that matches the base parameter path '{}' is prohibited.",
            name, base
        )));
    }
    Ok(name)
}

/// Handle `params delete`: remove one parameter.
pub async fn handle_params_delete(
    global: &GlobalArgs,
    path: &str,
    force: bool,
    aws: &AwsOverrides,
) -> Result<()> {
    let config = resolve_config(global, aws)?;
    let name = delete_target(&config, path)?;

    if !force && !confirm(&format!("Are you sure you want to delete '{}'?", name))? {
        println!("Doing nothing.");
        return Ok(());
    }

    let store = connect(&config).await?;
    store.delete_parameter(&name).await?;
    println!("Deleted {}", name);
    Ok(())
}
