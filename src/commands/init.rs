//! Init command handler - scaffolding base and dev config files.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::{Value, json};
use tracing::debug;

use crate::config::CONFIG_FILE_STEM;
use crate::credentials::DEFAULT_PROFILE;
use crate::error::{AxiomError, Result};
use crate::utils::prompt;

const DEFAULT_NAME: &str = "my-app";
const DEFAULT_ACCOUNT: &str = "123456789012";
const DEFAULT_REGION: &str = "us-east-1";

/// Values for `init`; anything left `None` is prompted for.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub force: bool,
    pub name: Option<String>,
    pub account: Option<String>,
    pub region: Option<String>,
    pub profile: Option<String>,
}

struct Answers {
    name: String,
    account: String,
    region: String,
    profile: String,
}

fn account_pattern() -> Result<Regex> {
    Regex::new(r"^\d{12}$").map_err(|e| AxiomError::Other(e.to_string()))
}

fn ask(value: Option<String>, message: &str, default: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(message, default),
    }
}

fn gather_answers(opts: InitOptions) -> Result<Answers> {
    let pattern = account_pattern()?;

    let name = ask(opts.name, "Project name", DEFAULT_NAME)?;
    let account = match opts.account {
        Some(account) if pattern.is_match(&account) => account,
        Some(account) => {
            return Err(AxiomError::validation(format!(
                "AWS account ID must be 12 digits, got '{}'",
                account
            )));
        }
        None => loop {
            let answer = prompt("AWS account ID", DEFAULT_ACCOUNT)?;
            if pattern.is_match(&answer) {
                break answer;
            }
            eprintln!("AWS account ID must be 12 digits");
        },
    };
    let region = ask(opts.region, "AWS region", DEFAULT_REGION)?;
    let profile = ask(opts.profile, "AWS profile name", DEFAULT_PROFILE)?;

    Ok(Answers {
        name,
        account,
        region,
        profile,
    })
}

fn base_config(answers: &Answers) -> Value {
    json!({
        "name": answers.name,
        "env": "prod",
        "aws": {
            "account": answers.account,
            "region": answers.region,
            "profile": answers.profile,
            "baseParameterPath": format!("/{}/prod", answers.name),
        }
    })
}

fn dev_config(answers: &Answers) -> Value {
    json!({
        "env": "dev",
        "aws": {
            "baseParameterPath": format!("/{}/dev", answers.name),
        }
    })
}

/// Write `.axiom.json` and `.axiom.dev.json` into `dir`, prompting for any
/// value not given in `opts`. Returns the paths written.
///
/// Existing files are left alone unless `opts.force` is set.
pub fn init_config_files(dir: &Path, opts: InitOptions) -> Result<Vec<PathBuf>> {
    let base_path = dir.join(format!("{}.json", CONFIG_FILE_STEM));
    let dev_path = dir.join(format!("{}.dev.json", CONFIG_FILE_STEM));

    if !opts.force {
        let existing: Vec<String> = [&base_path, &dev_path]
            .iter()
            .filter(|p| p.exists())
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        if !existing.is_empty() {
            return Err(AxiomError::validation(format!(
                "Config files already exist: {}. Use --force to overwrite them.",
                existing.join(", ")
            )));
        }
    }

    let answers = gather_answers(opts)?;
    fs::create_dir_all(dir)?;

    let files = [(base_path, base_config(&answers)), (dev_path, dev_config(&answers))];
    let mut written = Vec::with_capacity(files.len());
    for (path, value) in files {
        fs::write(&path, format!("{}\n", serde_json::to_string_pretty(&value)?))?;
        debug!(path = %path.display(), "wrote config file");
        written.push(path);
    }
    Ok(written)
}

/// Handle `init`: scaffold config files in `dir` and report what was written.
pub fn handle_init(dir: &Path, opts: InitOptions) -> Result<()> {
    for path in init_config_files(dir, opts)? {
        println!("Created {}", path.display());
    }
    println!();
    println!("Axiom configuration initialized. Run 'axiom config' to verify it.");
    Ok(())
}
