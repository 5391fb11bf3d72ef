//! Role settings of a named profile in the AWS shared config and
//! credentials files.

use std::collections::HashMap;
use std::path::PathBuf;

/// Selects the profile when the config names none.
pub const PROFILE_ENV: &str = "AWS_PROFILE";

/// Profile used when neither the config nor `AWS_PROFILE` names one.
pub const DEFAULT_PROFILE: &str = "default";

/// The profile credentials are resolved for: the configured one, else
/// `env_profile` (normally `$AWS_PROFILE`), else `default`.
pub fn active_profile(profile: Option<&str>, env_profile: Option<&str>) -> String {
    let non_empty = |p: &&str| !p.is_empty();
    profile
        .filter(non_empty)
        .or(env_profile.filter(non_empty))
        .unwrap_or(DEFAULT_PROFILE)
        .to_string()
}

/// The keys of a profile section that drive role assumption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSettings {
    pub role_arn: Option<String>,
    pub source_profile: Option<String>,
    pub credential_source: Option<String>,
    pub mfa_serial: Option<String>,
    pub role_session_name: Option<String>,
    pub duration_seconds: Option<i32>,
    pub external_id: Option<String>,
    pub region: Option<String>,
}

impl ProfileSettings {
    fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let get = |key: &str| pairs.get(key).cloned().filter(|v| !v.is_empty());
        Self {
            role_arn: get("role_arn"),
            source_profile: get("source_profile"),
            credential_source: get("credential_source"),
            mfa_serial: get("mfa_serial"),
            role_session_name: get("role_session_name"),
            duration_seconds: get("duration_seconds").and_then(|v| v.parse().ok()),
            external_id: get("external_id"),
            region: get("region"),
        }
    }

    /// Keys set in `other` win; the rest come from `self`.
    pub fn overlay(self, other: ProfileSettings) -> Self {
        Self {
            role_arn: other.role_arn.or(self.role_arn),
            source_profile: other.source_profile.or(self.source_profile),
            credential_source: other.credential_source.or(self.credential_source),
            mfa_serial: other.mfa_serial.or(self.mfa_serial),
            role_session_name: other.role_session_name.or(self.role_session_name),
            duration_seconds: other.duration_seconds.or(self.duration_seconds),
            external_id: other.external_id.or(self.external_id),
            region: other.region.or(self.region),
        }
    }
}

/// `$AWS_SHARED_CREDENTIALS_FILE`, falling back to `~/.aws/credentials`.
pub fn aws_credentials_file() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("AWS_SHARED_CREDENTIALS_FILE").filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".aws/credentials"))
}

/// `$AWS_CONFIG_FILE`, falling back to `~/.aws/config`.
pub fn aws_config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("AWS_CONFIG_FILE").filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".aws/config"))
}

/// Parse one profile out of INI-style config text.
///
/// `default` lives under `[default]`; every other profile under
/// `[profile <name>]`.
pub fn parse_profile(content: &str, profile: &str) -> Option<ProfileSettings> {
    let header = if profile == DEFAULT_PROFILE {
        "[default]".to_string()
    } else {
        format!("[profile {}]", profile)
    };
    parse_section(content, &header)
}

/// Parse one profile out of the shared credentials file, where every
/// section is the bare profile name.
pub fn parse_credentials_profile(content: &str, profile: &str) -> Option<ProfileSettings> {
    parse_section(content, &format!("[{}]", profile))
}

fn parse_section(content: &str, profile_header: &str) -> Option<ProfileSettings> {
    let mut in_profile_section = false;
    let mut found = false;
    let mut pairs = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if line.starts_with('[') {
            let header = line.split_whitespace().collect::<Vec<_>>().join(" ");
            in_profile_section = header == profile_header;
            found |= in_profile_section;
        } else if in_profile_section && let Some((key, value)) = line.split_once('=') {
            pairs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    found.then(|| ProfileSettings::from_pairs(&pairs))
}
