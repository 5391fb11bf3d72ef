//! Upward search for `.axiom[.<env>].<ext>` files.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::loader::CONFIG_FORMATS;
use crate::error::{AxiomError, Result};

/// Stem shared by every config file name.
pub const CONFIG_FILE_STEM: &str = ".axiom";

/// Candidate file names for `env`, in priority order.
pub fn config_file_names(env: Option<&str>) -> Vec<String> {
    let env_indicator = env.map(|e| format!(".{}", e)).unwrap_or_default();
    CONFIG_FORMATS
        .iter()
        .map(|(ext, _)| format!("{}{}.{}", CONFIG_FILE_STEM, env_indicator, ext))
        .collect()
}

/// Find the nearest config file for `env`, starting at `cwd` (or the
/// process working directory) and walking up to the filesystem root.
///
/// Within one directory the first name from [`config_file_names`] wins.
pub fn config_path(env: Option<&str>, cwd: Option<&Path>) -> Result<PathBuf> {
    let names = config_file_names(env);
    let start = match cwd {
        Some(dir) => absolute(dir)?,
        None => std::env::current_dir()?,
    };

    for dir in start.ancestors() {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found config file");
                return Ok(candidate);
            }
        }
    }

    Err(AxiomError::ConfigNotFound { patterns: names })
}

fn absolute(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}
