//! Cache-or-assume credential resolution.

use std::sync::Arc;

use tracing::debug;

use super::assumer::{CachingRoleAssumer, DEFAULT_STS_REGION, StsApi};
use super::chain::{ProfileProviderChain, ProviderChain};
use super::mfa::{MfaCodeProvider, PromptMfaCodeProvider};
use super::sts::SdkStsApi;
use super::types::{CredentialSet, StsCredentials};
use crate::cache::{CacheStore, FileCache};
use crate::config::AwsConfig;
use crate::error::Result;

/// Prefix of every credential cache key.
pub const CACHE_KEY_PREFIX: &str = "axiom#aws-credentials";

/// Cache key for `profile`. Keys are per profile only, so the same profile
/// used from two regions shares one entry.
pub fn cache_key(profile: &str) -> String {
    format!("{}#{}", CACHE_KEY_PREFIX, profile)
}

/// Resolves AWS credentials for a profile, reusing cached assumed-role
/// credentials until they expire.
pub struct CredentialProvider<C> {
    cache: C,
    chain: Arc<dyn ProviderChain>,
    sts: Arc<dyn StsApi>,
    mfa: Arc<dyn MfaCodeProvider>,
}

impl CredentialProvider<FileCache> {
    /// Disk cache at the default location, profile chain from the AWS
    /// shared config, STS through the SDK and an interactive MFA prompt.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            FileCache::default_location()?,
            Arc::new(ProfileProviderChain::from_env()),
            Arc::new(SdkStsApi),
            Arc::new(PromptMfaCodeProvider),
        ))
    }
}

impl<C: CacheStore> CredentialProvider<C> {
    pub fn new(
        cache: C,
        chain: Arc<dyn ProviderChain>,
        sts: Arc<dyn StsApi>,
        mfa: Arc<dyn MfaCodeProvider>,
    ) -> Self {
        Self {
            cache,
            chain,
            sts,
            mfa,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Credentials for the profile and region named in an `aws` config block.
    pub async fn resolve_for(&self, aws: &AwsConfig) -> Result<CredentialSet> {
        self.resolve(aws.profile.as_deref(), Some(&aws.region)).await
    }

    /// Check the cache; on a miss run the provider chain with a caching
    /// role assumer scoped to `region` (default `us-east-1`).
    ///
    /// With no `profile` the chain picks one (`AWS_PROFILE`, else
    /// `default`), and that name keys the cache.
    pub async fn resolve(
        &self,
        profile: Option<&str>,
        region: Option<&str>,
    ) -> Result<CredentialSet> {
        let name = self.chain.profile_name(profile);
        let key = cache_key(&name);

        if let Some(cached) = self.cache.get::<StsCredentials>(&key)? {
            match cached.to_credential_set() {
                Ok(creds) => {
                    debug!(profile = %name, "using cached credentials");
                    return Ok(creds);
                }
                Err(e) => debug!(profile = %name, error = %e, "ignoring incomplete cached credentials"),
            }
        }

        debug!(profile = %name, "no cached credentials; resolving through provider chain");
        let assumer = CachingRoleAssumer::new(
            &self.cache,
            self.sts.as_ref(),
            key,
            region.unwrap_or(DEFAULT_STS_REGION),
        );
        self.chain
            .resolve(profile, &assumer, self.mfa.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::credentials::assumer::RoleAssumer;
    use crate::credentials::mfa::StaticMfaCodeProvider;
    use crate::credentials::types::AssumeRoleParams;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Always assumes a role, like a profile with `role_arn` set. Stands in
    /// for `AWS_PROFILE=env-profile`.
    struct RoleChain;

    #[async_trait]
    impl ProviderChain for RoleChain {
        fn profile_name(&self, profile: Option<&str>) -> String {
            crate::credentials::active_profile(profile, Some("env-profile"))
        }

        async fn resolve(
            &self,
            _profile: Option<&str>,
            assumer: &dyn RoleAssumer,
            mfa: &dyn MfaCodeProvider,
        ) -> Result<CredentialSet> {
            let mut params = AssumeRoleParams::new("ROLE_ARN", "ROLE_SESSION_NAME");
            params.serial_number = Some("SERIAL".into());
            params.token_code = Some(mfa.mfa_code("SERIAL")?);
            let source = CredentialSet {
                access_key_id: "SOURCE".into(),
                secret_access_key: "SOURCE_SECRET".into(),
                session_token: None,
            };
            assumer.assume_role(source, params).await
        }
    }

    #[derive(Default)]
    struct CountingSts {
        calls: AtomicUsize,
        region: std::sync::Mutex<Option<String>>,
    }

    #[async_trait]
    impl StsApi for CountingSts {
        async fn assume_role(
            &self,
            region: &str,
            _source: &CredentialSet,
            params: &AssumeRoleParams,
        ) -> Result<StsCredentials> {
            assert_eq!(params.token_code.as_deref(), Some("1234"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.region.lock().unwrap() = Some(region.to_string());
            Ok(StsCredentials {
                access_key_id: Some("KEY_ID".into()),
                secret_access_key: Some("SECRET_KEY".into()),
                session_token: Some("TOKEN".into()),
                expiration: Some(Utc::now() + Duration::hours(1)),
            })
        }
    }

    fn provider(sts: Arc<CountingSts>) -> CredentialProvider<MemoryCache> {
        CredentialProvider::new(
            MemoryCache::new(),
            Arc::new(RoleChain),
            sts,
            Arc::new(StaticMfaCodeProvider("1234".into())),
        )
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("p"), "axiom#aws-credentials#p");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_role_assumer() {
        let sts = Arc::new(CountingSts::default());
        let provider = provider(sts.clone());
        provider
            .cache()
            .set(
                &cache_key("p"),
                &StsCredentials {
                    access_key_id: Some("CACHED_KEY".into()),
                    secret_access_key: Some("CACHED_SECRET".into()),
                    session_token: Some("CACHED_TOKEN".into()),
                    expiration: None,
                },
                Some(Utc::now() + Duration::minutes(30)),
            )
            .unwrap();

        let creds = provider.resolve(Some("p"), Some("eu-west-1")).await.unwrap();
        assert_eq!(creds.access_key_id, "CACHED_KEY");
        assert_eq!(creds.session_token.as_deref(), Some("CACHED_TOKEN"));
        assert_eq!(sts.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_assumes_and_populates_cache() {
        let sts = Arc::new(CountingSts::default());
        let provider = provider(sts.clone());

        let creds = provider.resolve(Some("p"), Some("eu-west-1")).await.unwrap();
        assert_eq!(creds.access_key_id, "KEY_ID");
        assert_eq!(creds.secret_access_key, "SECRET_KEY");
        assert_eq!(creds.session_token.as_deref(), Some("TOKEN"));
        assert_eq!(sts.region.lock().unwrap().as_deref(), Some("eu-west-1"));

        let entry = provider.cache().read_entry(&cache_key("p")).unwrap().unwrap();
        let cached: StsCredentials = serde_json::from_value(entry.data).unwrap();
        assert_eq!(entry.expires, cached.expiration);

        // Second resolution is served from the cache.
        provider.resolve(Some("p"), Some("eu-west-1")).await.unwrap();
        assert_eq!(sts.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_cache_entry_triggers_assumption() {
        let sts = Arc::new(CountingSts::default());
        let provider = provider(sts.clone());
        provider
            .cache()
            .set(
                &cache_key("p"),
                &StsCredentials {
                    access_key_id: Some("OLD".into()),
                    secret_access_key: Some("OLD".into()),
                    session_token: Some("OLD".into()),
                    expiration: None,
                },
                Some(Utc::now() - Duration::minutes(1)),
            )
            .unwrap();

        let creds = provider.resolve(Some("p"), None).await.unwrap();
        assert_eq!(creds.access_key_id, "KEY_ID");
        assert_eq!(sts.calls.load(Ordering::SeqCst), 1);
        assert_eq!(sts.region.lock().unwrap().as_deref(), Some("us-east-1"));
    }

    #[tokio::test]
    async fn test_incomplete_cache_entry_is_a_miss() {
        let sts = Arc::new(CountingSts::default());
        let provider = provider(sts.clone());
        provider
            .cache()
            .set(
                &cache_key("p"),
                &StsCredentials {
                    access_key_id: Some("ONLY_KEY".into()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();

        let creds = provider.resolve(Some("p"), None).await.unwrap();
        assert_eq!(creds.access_key_id, "KEY_ID");
    }

    #[tokio::test]
    async fn test_unconfigured_profile_is_cached_under_chain_choice() {
        let sts = Arc::new(CountingSts::default());
        let provider = provider(sts.clone());

        let aws: AwsConfig = serde_json::from_value(serde_json::json!({
            "region": "eu-west-1",
            "baseParameterPath": "/app/dev"
        }))
        .unwrap();
        provider.resolve_for(&aws).await.unwrap();

        assert!(provider.cache().read_entry(&cache_key("env-profile")).unwrap().is_some());
        assert!(provider.cache().read_entry(&cache_key("default")).unwrap().is_none());

        provider.resolve(None, Some("eu-west-1")).await.unwrap();
        assert_eq!(sts.calls.load(Ordering::SeqCst), 1);
    }
}
