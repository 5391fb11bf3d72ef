//! AWS credential resolution with cached role assumption.
//!
//! Resolution for a profile first looks in the cache. On a miss the
//! [`ProviderChain`] runs with two capabilities handed in by the
//! [`CredentialProvider`]: a [`RoleAssumer`] that calls STS and caches the
//! result until it expires, and an [`MfaCodeProvider`] for profiles that
//! declare `mfa_serial`.

mod assumer;
mod chain;
mod mfa;
mod profile;
mod provider;
mod sts;
mod types;

pub use assumer::{CachingRoleAssumer, DEFAULT_STS_REGION, RoleAssumer, StsApi};
pub use chain::{BaseCredentials, ProfileProviderChain, ProviderChain, SdkBaseCredentials};
pub use mfa::{MfaCodeProvider, PromptMfaCodeProvider, StaticMfaCodeProvider};
pub use profile::{
    DEFAULT_PROFILE, PROFILE_ENV, ProfileSettings, active_profile, aws_config_file,
    aws_credentials_file, parse_credentials_profile, parse_profile,
};
pub use provider::{CACHE_KEY_PREFIX, CredentialProvider, cache_key};
pub use sts::SdkStsApi;
pub use types::{AssumeRoleParams, CredentialSet, StsCredentials};
