//! Config file loaders, selected by file extension.
//!
//! | extension | loader         |
//! |-----------|----------------|
//! | `json`    | [`JsonLoader`]   |
//! | `js`      | [`ScriptLoader`] |
//! | `mjs`     | [`ScriptLoader`] |
//! | `ts`      | [`ScriptLoader`] |
//! | `mts`     | [`ScriptLoader`] |
//!
//! The order of [`CONFIG_FORMATS`] is also the discovery priority when
//! several candidates sit in the same directory. Adding a format means
//! adding a row here.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tracing::debug;

use crate::error::{AxiomError, Result};

/// Overrides the JavaScript runtime used for script configs.
pub const NODE_ENV: &str = "AXIOM_NODE";

/// Module preloaded with `--import` to evaluate TypeScript configs, e.g.
/// `tsx`. Resolved from the config file's directory.
pub const TS_LOADER_ENV: &str = "AXIOM_TS_LOADER";

const STRIP_TYPES_FLAG: &str = "--experimental-strip-types";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Script { typescript: bool },
}

/// Extension table, in discovery priority order.
pub const CONFIG_FORMATS: &[(&str, ConfigFormat)] = &[
    ("json", ConfigFormat::Json),
    ("js", ConfigFormat::Script { typescript: false }),
    ("mjs", ConfigFormat::Script { typescript: false }),
    ("ts", ConfigFormat::Script { typescript: true }),
    ("mts", ConfigFormat::Script { typescript: true }),
];

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        CONFIG_FORMATS
            .iter()
            .find(|(candidate, _)| *candidate == ext)
            .map(|(_, format)| *format)
            .ok_or_else(|| AxiomError::UnsupportedConfigFormat(path.to_path_buf()))
    }

    pub fn loader(self) -> Box<dyn ConfigLoader> {
        match self {
            ConfigFormat::Json => Box::new(JsonLoader),
            ConfigFormat::Script { typescript } => Box::new(ScriptLoader::from_env(typescript)),
        }
    }
}

/// Turns a config file into a JSON tree.
pub trait ConfigLoader {
    fn load(&self, path: &Path) -> Result<Value>;
}

pub struct JsonLoader;

impl ConfigLoader for JsonLoader {
    fn load(&self, path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| AxiomError::config_load(path, e))
    }
}

/// Evaluate a JS/TS module in an external runtime and read back its
/// default export (or the whole namespace when there is none) as JSON.
///
/// TypeScript goes through the configured loader module when there is one,
/// otherwise through the runtime's own type stripping (Node 22.6+). Type
/// stripping only erases `import type`; a plain `import` of a type-only
/// export needs a loader such as `tsx`.
pub struct ScriptLoader {
    runtime: String,
    typescript: bool,
    ts_loader: Option<String>,
}

// Receives the module path as argv[1]. CommonJS modules surface
// `module.exports` as the namespace default.
const EXPORT_SCRIPT: &str = r#"
const { pathToFileURL } = await import("node:url");
const mod = await import(pathToFileURL(process.argv[1]).href);
let config = mod.default ?? mod;
if (config && config.__esModule && config.default !== undefined) config = config.default;
process.stdout.write(JSON.stringify(config));
"#;

/// True when `runtime` accepts `--experimental-strip-types`.
pub fn supports_strip_types(runtime: &str) -> bool {
    Command::new(runtime)
        .args(["--no-warnings", STRIP_TYPES_FLAG, "-e", ""])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

impl ScriptLoader {
    pub fn new(runtime: impl Into<String>, typescript: bool) -> Self {
        Self {
            runtime: runtime.into(),
            typescript,
            ts_loader: None,
        }
    }

    pub fn with_ts_loader(mut self, loader: impl Into<String>) -> Self {
        self.ts_loader = Some(loader.into());
        self
    }

    /// Runtime from `$AXIOM_NODE` (default `node`), TypeScript loader from
    /// `$AXIOM_TS_LOADER`.
    pub fn from_env(typescript: bool) -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        let runtime = non_empty(NODE_ENV).unwrap_or_else(|| "node".to_string());
        Self {
            ts_loader: non_empty(TS_LOADER_ENV),
            ..Self::new(runtime, typescript)
        }
    }

    /// Runtime flags needed before the module can be imported.
    fn typescript_args(&self, path: &Path) -> Result<Vec<String>> {
        if !self.typescript {
            return Ok(Vec::new());
        }
        if let Some(loader) = &self.ts_loader {
            return Ok(vec!["--import".to_string(), loader.clone()]);
        }
        if supports_strip_types(&self.runtime) {
            return Ok(vec![STRIP_TYPES_FLAG.to_string()]);
        }
        Err(AxiomError::config_load(
            path,
            format!(
                "'{}' cannot run TypeScript; use Node 22.6 or newer or set {} to a loader such as tsx",
                self.runtime, TS_LOADER_ENV
            ),
        ))
    }
}

impl ConfigLoader for ScriptLoader {
    fn load(&self, path: &Path) -> Result<Value> {
        let path = path.canonicalize()?;
        let mut command = Command::new(&self.runtime);
        command.arg("--no-warnings").args(self.typescript_args(&path)?);
        if let Some(dir) = path.parent() {
            command.current_dir(dir);
        }
        command
            .arg("--input-type=module")
            .arg("-e")
            .arg(EXPORT_SCRIPT)
            .arg(&path);

        debug!(runtime = %self.runtime, path = %path.display(), "evaluating script config");
        let output = command.output().map_err(|e| {
            AxiomError::config_load(&path, format!("could not run '{}': {}", self.runtime, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AxiomError::config_load(&path, stderr.trim()));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| AxiomError::config_load(&path, e))
    }
}

/// Load a single config file with the loader its extension selects.
pub fn import_config_from_path(path: &Path) -> Result<Value> {
    let format = ConfigFormat::from_path(path)?;
    debug!(path = %path.display(), ?format, "loading config file");
    let value = format.loader().load(path)?;

    if !value.is_object() {
        return Err(AxiomError::invalid_config(format!(
            "{} must contain an object at the top level",
            path.display()
        )));
    }
    Ok(value)
}
