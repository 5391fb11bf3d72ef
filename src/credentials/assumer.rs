//! Role assumption through STS, writing results to the credential cache.

use async_trait::async_trait;
use tracing::debug;

use super::types::{AssumeRoleParams, CredentialSet, StsCredentials};
use crate::cache::CacheStore;
use crate::error::Result;

/// Region used for STS when the config does not name one.
pub const DEFAULT_STS_REGION: &str = "us-east-1";

/// The STS AssumeRole call, as seen by the credential provider.
#[async_trait]
pub trait StsApi: Send + Sync {
    async fn assume_role(
        &self,
        region: &str,
        source: &CredentialSet,
        params: &AssumeRoleParams,
    ) -> Result<StsCredentials>;
}

/// Exchanges source credentials for a role's temporary credentials.
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    async fn assume_role(
        &self,
        source: CredentialSet,
        params: AssumeRoleParams,
    ) -> Result<CredentialSet>;
}

/// A [`RoleAssumer`] that stores every successful exchange in the cache
/// under `cache_key`, expiring when the credentials do.
pub struct CachingRoleAssumer<'a, C> {
    cache: &'a C,
    sts: &'a dyn StsApi,
    cache_key: String,
    region: String,
}

impl<'a, C: CacheStore> CachingRoleAssumer<'a, C> {
    pub fn new(
        cache: &'a C,
        sts: &'a dyn StsApi,
        cache_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            sts,
            cache_key: cache_key.into(),
            region: region.into(),
        }
    }
}

#[async_trait]
impl<'a, C: CacheStore> RoleAssumer for CachingRoleAssumer<'a, C> {
    async fn assume_role(
        &self,
        source: CredentialSet,
        params: AssumeRoleParams,
    ) -> Result<CredentialSet> {
        debug!(
            role_arn = %params.role_arn,
            region = %self.region,
            mfa = params.serial_number.is_some(),
            "assuming role"
        );
        let response = self.sts.assume_role(&self.region, &source, &params).await?;
        let creds = response.to_credential_set()?;

        self.cache
            .set(&self.cache_key, &response, response.expiration)?;
        debug!(key = %self.cache_key, expires = ?response.expiration, "cached assumed-role credentials");

        Ok(creds)
    }
}
