use std::collections::BTreeMap;

use tokio::sync::OnceCell;
use tracing::debug;

use super::store::{Parameter, ParameterStore};
use crate::error::{AxiomError, Result};

/// All parameters under one path, fetched on first access and keyed by
/// their name relative to that path.
pub struct ParameterCollection<'a> {
    path: String,
    store: &'a dyn ParameterStore,
    params: OnceCell<BTreeMap<String, Parameter>>,
}

impl<'a> ParameterCollection<'a> {
    pub fn new(path: impl Into<String>, store: &'a dyn ParameterStore) -> Self {
        Self {
            path: path.into(),
            store,
            params: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn has_param(&self, name: &str) -> Result<bool> {
        Ok(self.load().await?.contains_key(name))
    }

    pub async fn find_param(&self, name: &str) -> Result<Option<&Parameter>> {
        Ok(self.load().await?.get(name))
    }

    pub async fn get_param(&self, name: &str) -> Result<&Parameter> {
        self.find_param(name)
            .await?
            .ok_or_else(|| AxiomError::not_found(format!("Parameter '{}' does not exist", name)))
    }

    pub async fn all(&self) -> Result<&BTreeMap<String, Parameter>> {
        self.load().await
    }

    async fn load(&self) -> Result<&BTreeMap<String, Parameter>> {
        self.params.get_or_try_init(|| self.fetch()).await
    }

    async fn fetch(&self) -> Result<BTreeMap<String, Parameter>> {
        if self.path.is_empty() {
            return Err(AxiomError::validation("Parameter path is not set"));
        }

        let prefix = format!("{}/", self.path.trim_end_matches('/'));
        let params = self.store.get_parameters_by_path(&self.path).await?;
        debug!(path = %self.path, count = params.len(), "loaded parameters");

        Ok(params
            .into_iter()
            .map(|p| {
                let key = p.name.strip_prefix(&prefix).unwrap_or(&p.name).to_string();
                (key, p)
            })
            .collect())
    }
}
