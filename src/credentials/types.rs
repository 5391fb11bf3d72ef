use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AxiomError, Result};

/// Credentials handed to AWS clients.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSet")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

impl From<CredentialSet> for aws_credential_types::Credentials {
    fn from(creds: CredentialSet) -> Self {
        aws_credential_types::Credentials::new(
            creds.access_key_id,
            creds.secret_access_key,
            creds.session_token,
            None,
            "axiom",
        )
    }
}

impl From<&aws_credential_types::Credentials> for CredentialSet {
    fn from(creds: &aws_credential_types::Credentials) -> Self {
        Self {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().map(str::to_string),
        }
    }
}

/// The `Credentials` block of an STS AssumeRole response.
///
/// This is also the form persisted in the cache, so field names follow the
/// STS wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StsCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl StsCredentials {
    /// Convert to the normalized shape, failing if any of the three
    /// credential strings is missing.
    pub fn to_credential_set(&self) -> Result<CredentialSet> {
        let missing: Vec<&str> = [
            ("AccessKeyId", &self.access_key_id),
            ("SecretAccessKey", &self.secret_access_key),
            ("SessionToken", &self.session_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(AxiomError::credentials(format!(
                "Unable to fetch credentials: AssumeRole response is missing {}",
                missing.join(", ")
            )));
        }

        Ok(CredentialSet {
            access_key_id: self.access_key_id.clone().unwrap_or_default(),
            secret_access_key: self.secret_access_key.clone().unwrap_or_default(),
            session_token: self.session_token.clone(),
        })
    }
}

/// Parameters of one AssumeRole exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssumeRoleParams {
    pub role_arn: String,
    pub role_session_name: String,
    pub serial_number: Option<String>,
    pub token_code: Option<String>,
    pub duration_seconds: Option<i32>,
    pub external_id: Option<String>,
}

impl AssumeRoleParams {
    pub fn new(role_arn: impl Into<String>, role_session_name: impl Into<String>) -> Self {
        Self {
            role_arn: role_arn.into(),
            role_session_name: role_session_name.into(),
            serial_number: None,
            token_code: None,
            duration_seconds: None,
            external_id: None,
        }
    }
}
