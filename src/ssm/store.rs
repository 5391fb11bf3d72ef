use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::config::Region;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterType;

use crate::credentials::CredentialSet;
use crate::error::{AxiomError, Result};

/// A single Parameter Store value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
    pub version: i64,
}

/// The Parameter Store operations axiom uses.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Every parameter under `path`, recursively, decrypted. All pages are
    /// accumulated in the order the service returns them.
    async fn get_parameters_by_path(&self, path: &str) -> Result<Vec<Parameter>>;

    /// The named parameters that exist, decrypted.
    async fn get_parameters(&self, names: &[String]) -> Result<Vec<Parameter>>;

    /// Write a parameter and return its new version.
    async fn put_parameter(
        &self,
        name: &str,
        value: &str,
        secure: bool,
        overwrite: bool,
    ) -> Result<i64>;

    async fn delete_parameter(&self, name: &str) -> Result<()>;
}

pub struct SsmParameterStore {
    client: Client,
}

impl SsmParameterStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client for `region` signed with `creds`.
    pub async fn connect(region: &str, creds: CredentialSet) -> Self {
        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .credentials_provider(aws_credential_types::Credentials::from(creds))
            .load()
            .await;
        Self::new(Client::new(&shared_config))
    }
}

fn to_parameter(param: &aws_sdk_ssm::types::Parameter) -> Option<Parameter> {
    Some(Parameter {
        name: param.name()?.to_string(),
        value: param.value()?.to_string(),
        version: param.version(),
    })
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameters_by_path(&self, path: &str) -> Result<Vec<Parameter>> {
        let mut stream = self
            .client
            .get_parameters_by_path()
            .path(path)
            .recursive(true)
            .with_decryption(true)
            .into_paginator()
            .send();
        let mut parameters = Vec::new();

        while let Some(page) = stream.next().await {
            let page = page.map_err(|e| AxiomError::ssm(DisplayErrorContext(e)))?;
            parameters.extend(page.parameters().iter().filter_map(to_parameter));
        }

        Ok(parameters)
    }

    async fn get_parameters(&self, names: &[String]) -> Result<Vec<Parameter>> {
        let resp = self
            .client
            .get_parameters()
            .set_names(Some(names.to_vec()))
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| AxiomError::ssm(DisplayErrorContext(e)))?;

        Ok(resp.parameters().iter().filter_map(to_parameter).collect())
    }

    async fn put_parameter(
        &self,
        name: &str,
        value: &str,
        secure: bool,
        overwrite: bool,
    ) -> Result<i64> {
        let param_type = if secure {
            ParameterType::SecureString
        } else {
            ParameterType::String
        };

        let resp = self
            .client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(param_type)
            .overwrite(overwrite)
            .send()
            .await
            .map_err(|e| AxiomError::ssm(DisplayErrorContext(e)))?;

        Ok(resp.version())
    }

    async fn delete_parameter(&self, name: &str) -> Result<()> {
        self.client
            .delete_parameter()
            .name(name)
            .send()
            .await
            .map_err(|e| AxiomError::ssm(DisplayErrorContext(e)))?;
        Ok(())
    }
}
