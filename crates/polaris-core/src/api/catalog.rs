//! Iceberg REST catalog API, scoped to one catalog prefix.

use std::collections::BTreeMap;

use reqwest::Url;

use super::ApiClient;
use crate::error::Result;
use crate::models::{
    CreateNamespaceRequest, CreateNamespaceResponse, ListNamespacesResponse, ListTablesResponse,
    TableIdentifier,
};
use crate::utils::namespace_path;

const BASE_PATH: [&str; 3] = ["api", "catalog", "v1"];

#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
    prefix: String,
}

impl CatalogClient {
    pub fn new(api: ApiClient, prefix: impl Into<String>) -> Self {
        Self {
            api,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        self.api.url(
            BASE_PATH
                .iter()
                .copied()
                .chain(std::iter::once(self.prefix.as_str()))
                .chain(segments.iter().copied()),
        )
    }

    pub async fn list_namespaces(&self) -> Result<Vec<Vec<String>>> {
        let response: ListNamespacesResponse = self.api.get(self.url(&["namespaces"])?).await?;
        Ok(response.namespaces.unwrap_or_default())
    }

    pub async fn create_namespace(
        &self,
        namespace: Vec<String>,
        properties: BTreeMap<String, String>,
    ) -> Result<CreateNamespaceResponse> {
        let request = CreateNamespaceRequest {
            namespace,
            properties: (!properties.is_empty()).then_some(properties),
        };
        self.api.post(self.url(&["namespaces"])?, &request).await
    }

    pub async fn list_tables(&self, namespace: &[String]) -> Result<Vec<TableIdentifier>> {
        let ns = namespace_path(namespace);
        let url = self.url(&["namespaces", &ns, "tables"])?;
        let response: ListTablesResponse = self.api.get(url).await?;
        Ok(response.identifiers.unwrap_or_default())
    }
}
