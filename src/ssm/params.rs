use crate::config::Config;
use crate::error::{AxiomError, Result};

use super::store::Parameter;

/// Resolve a user-supplied parameter path against the config's base path.
///
/// No path yields the base path itself, a leading `/` is taken as absolute,
/// and anything else is appended to the base path.
pub fn build_path(config: &Config, path: Option<&str>) -> String {
    match path {
        None => config.aws().base_parameter_path.clone(),
        Some(p) if p.starts_with('/') => p.to_string(),
        Some(p) => format!("{}/{}", strip_trailing_slash(&config.aws().base_parameter_path), p),
    }
}

/// Value of `<path>/<name>` within `params`.
///
/// Fails when the parameter is missing or has an empty value.
pub fn extract_param_value<'a>(path: &str, name: &str, params: &'a [Parameter]) -> Result<&'a str> {
    let full_name = format!("{}/{}", strip_trailing_slash(path), name);

    params
        .iter()
        .find(|p| p.name == full_name)
        .map(|p| p.value.as_str())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AxiomError::not_found(format!("Parameter '{}' is not set.", full_name)))
}

fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}
