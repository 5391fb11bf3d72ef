//! Profile-driven credential chain.
//!
//! The chain decides *whether* a role must be assumed and collects what the
//! exchange needs; the actual exchange and the MFA prompt are capabilities
//! handed in by the caller.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::ecs::EcsCredentialsProvider;
use aws_config::environment::credentials::EnvironmentVariableCredentialsProvider;
use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_credential_types::provider::ProvideCredentials;
use chrono::Utc;
use tracing::debug;

use super::assumer::RoleAssumer;
use super::mfa::MfaCodeProvider;
use super::profile::{
    PROFILE_ENV, ProfileSettings, active_profile, aws_config_file, aws_credentials_file,
    parse_credentials_profile, parse_profile,
};
use super::types::{AssumeRoleParams, CredentialSet};
use crate::error::{AxiomError, Result};

/// Resolves credentials for a profile, calling back into the role assumer
/// and MFA provider when the profile asks for them.
///
/// `None` means no profile was configured and the chain picks its own.
#[async_trait]
pub trait ProviderChain: Send + Sync {
    /// The profile name `profile` resolves to. Also names the cache entry.
    fn profile_name(&self, profile: Option<&str>) -> String {
        active_profile(profile, std::env::var(PROFILE_ENV).ok().as_deref())
    }

    async fn resolve(
        &self,
        profile: Option<&str>,
        assumer: &dyn RoleAssumer,
        mfa: &dyn MfaCodeProvider,
    ) -> Result<CredentialSet>;
}

/// Credentials that need no role assumption: environment variables, static
/// profile keys, SSO, instance metadata and so on.
#[async_trait]
pub trait BaseCredentials: Send + Sync {
    /// Credentials for `profile`, or for whatever the default chain selects
    /// when `None`.
    async fn credentials(&self, profile: Option<&str>) -> Result<CredentialSet>;

    /// Credentials from a `credential_source` value: `Environment`,
    /// `Ec2InstanceMetadata` or `EcsContainer`.
    async fn from_source(&self, source: &str) -> Result<CredentialSet>;
}

/// [`BaseCredentials`] backed by aws-config's providers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdkBaseCredentials;

fn provider_error(what: &str, e: impl std::fmt::Display) -> AxiomError {
    AxiomError::credentials(format!("could not load credentials for {}: {}", what, e))
}

#[async_trait]
impl BaseCredentials for SdkBaseCredentials {
    async fn credentials(&self, profile: Option<&str>) -> Result<CredentialSet> {
        let mut builder = DefaultCredentialsChain::builder();
        if let Some(profile_name) = profile {
            builder = builder.profile_name(profile_name);
        }
        let chain = builder.build().await;

        let creds = chain.provide_credentials().await.map_err(|e| {
            provider_error(&format!("profile '{}'", profile.unwrap_or("(default chain)")), e)
        })?;
        Ok(CredentialSet::from(&creds))
    }

    async fn from_source(&self, source: &str) -> Result<CredentialSet> {
        let creds = match source {
            "Environment" => EnvironmentVariableCredentialsProvider::new()
                .provide_credentials()
                .await,
            "Ec2InstanceMetadata" => ImdsCredentialsProvider::builder()
                .build()
                .provide_credentials()
                .await,
            "EcsContainer" => EcsCredentialsProvider::builder()
                .build()
                .provide_credentials()
                .await,
            other => {
                return Err(AxiomError::credentials(format!(
                    "unsupported credential_source '{}'",
                    other
                )));
            }
        }
        .map_err(|e| provider_error(&format!("credential_source {}", source), e))?;
        Ok(CredentialSet::from(&creds))
    }
}

/// The default [`ProviderChain`]: reads role settings for the profile from
/// the AWS shared config and credentials files and assumes the role when
/// `role_arn` is set.
///
/// Source credentials come from `source_profile` through the default chain
/// or from `credential_source`. A source profile that itself assumes a role
/// is handed to aws-config as is, so MFA is only prompted for on the
/// outermost role.
pub struct ProfileProviderChain {
    config_file: Option<PathBuf>,
    credentials_file: Option<PathBuf>,
    env_profile: Option<String>,
    base: Box<dyn BaseCredentials>,
}

impl ProfileProviderChain {
    pub fn new(config_file: Option<PathBuf>, base: Box<dyn BaseCredentials>) -> Self {
        Self {
            config_file,
            credentials_file: None,
            env_profile: None,
            base,
        }
    }

    pub fn with_credentials_file(mut self, path: Option<PathBuf>) -> Self {
        self.credentials_file = path;
        self
    }

    /// Profile used when none is configured, normally `$AWS_PROFILE`.
    pub fn with_env_profile(mut self, profile: Option<String>) -> Self {
        self.env_profile = profile;
        self
    }

    /// Shared config and credentials files and `AWS_PROFILE` from the
    /// environment, base credentials from aws-config.
    pub fn from_env() -> Self {
        Self::new(aws_config_file(), Box::new(SdkBaseCredentials))
            .with_credentials_file(aws_credentials_file())
            .with_env_profile(std::env::var(PROFILE_ENV).ok())
    }

    fn settings(&self, profile: &str) -> Result<ProfileSettings> {
        let config = read_section(self.config_file.as_deref(), |c| parse_profile(c, profile))?;
        let credentials = read_section(self.credentials_file.as_deref(), |c| {
            parse_credentials_profile(c, profile)
        })?;
        Ok(config.overlay(credentials))
    }

    async fn source_credentials(
        &self,
        profile: &str,
        settings: &ProfileSettings,
    ) -> Result<CredentialSet> {
        match (&settings.source_profile, &settings.credential_source) {
            (Some(source_profile), _) => self.base.credentials(Some(source_profile.as_str())).await,
            (None, Some(source)) => self.base.from_source(source).await,
            (None, None) => Err(AxiomError::credentials(format!(
                "profile '{}' sets role_arn without source_profile or credential_source",
                profile
            ))),
        }
    }
}

fn read_section(
    path: Option<&Path>,
    parse: impl FnOnce(&str) -> Option<ProfileSettings>,
) -> Result<ProfileSettings> {
    match path {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(path)?;
            Ok(parse(&content).unwrap_or_default())
        }
        _ => Ok(ProfileSettings::default()),
    }
}

fn default_session_name() -> String {
    format!("axiom-{}", Utc::now().timestamp_millis())
}

#[async_trait]
impl ProviderChain for ProfileProviderChain {
    fn profile_name(&self, profile: Option<&str>) -> String {
        active_profile(profile, self.env_profile.as_deref())
    }

    async fn resolve(
        &self,
        profile: Option<&str>,
        assumer: &dyn RoleAssumer,
        mfa: &dyn MfaCodeProvider,
    ) -> Result<CredentialSet> {
        let name = self.profile_name(profile);
        let settings = self.settings(&name)?;

        let Some(role_arn) = settings.role_arn.clone() else {
            debug!(profile = %name, "profile has no role_arn; using base credentials");
            return self.base.credentials(profile).await;
        };

        let source = self.source_credentials(&name, &settings).await?;

        let mut params = AssumeRoleParams::new(
            role_arn,
            settings
                .role_session_name
                .unwrap_or_else(default_session_name),
        );
        params.duration_seconds = settings.duration_seconds;
        params.external_id = settings.external_id;
        if let Some(serial) = settings.mfa_serial {
            params.token_code = Some(mfa.mfa_code(&serial)?);
            params.serial_number = Some(serial);
        }

        assumer.assume_role(source, params).await
    }
}
