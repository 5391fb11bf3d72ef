use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sts::config::Region;
use chrono::{DateTime, Utc};

use super::assumer::StsApi;
use super::types::{AssumeRoleParams, CredentialSet, StsCredentials};
use crate::error::{AxiomError, Result};

/// [`StsApi`] over `aws-sdk-sts`. A client is built per call, scoped to the
/// requested region and signed with the source credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdkStsApi;

#[async_trait]
impl StsApi for SdkStsApi {
    async fn assume_role(
        &self,
        region: &str,
        source: &CredentialSet,
        params: &AssumeRoleParams,
    ) -> Result<StsCredentials> {
        let config = aws_sdk_sts::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(aws_credential_types::Credentials::from(source.clone()))
            .build();
        let client = aws_sdk_sts::Client::from_conf(config);

        let output = client
            .assume_role()
            .role_arn(&params.role_arn)
            .role_session_name(&params.role_session_name)
            .set_serial_number(params.serial_number.clone())
            .set_token_code(params.token_code.clone())
            .set_duration_seconds(params.duration_seconds)
            .set_external_id(params.external_id.clone())
            .send()
            .await
            .map_err(|e| AxiomError::sts(aws_sdk_sts::error::DisplayErrorContext(e)))?;

        let Some(creds) = output.credentials() else {
            return Ok(StsCredentials::default());
        };

        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let expiration = creds.expiration();
        Ok(StsCredentials {
            access_key_id: non_empty(creds.access_key_id()),
            secret_access_key: non_empty(creds.secret_access_key()),
            session_token: non_empty(creds.session_token()),
            expiration: DateTime::<Utc>::from_timestamp(expiration.secs(), expiration.subsec_nanos()),
        })
    }
}
