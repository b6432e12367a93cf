//! Polaris management API: catalogs, catalog roles, grants and principals.

use reqwest::{Method, Url};

use super::ApiClient;
use crate::error::{Error, Result};
use crate::models::{
    Catalog, CatalogRole, CatalogRoles, CatalogSummary, Catalogs, CreateCatalogRequest,
    CreateCatalogRoleRequest, CreatePrincipalRequest, Grant, GrantEntry, GrantPrincipalRoleRequest,
    GrantRequest, Grants, Principal, PrincipalRole, PrincipalRoles, PrincipalWithCredentials,
    Principals, ResetPrincipalRequest, UpdateEntityRequest,
};

const BASE_PATH: [&str; 3] = ["api", "management", "v1"];

#[derive(Clone)]
pub struct ManagementClient {
    api: ApiClient,
}

impl ManagementClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        self.api
            .url(BASE_PATH.iter().copied().chain(segments.iter().copied()))
    }

    // ===== Catalogs =====

    pub async fn list_catalogs(&self) -> Result<Vec<CatalogSummary>> {
        let response: Catalogs = self.api.get(self.url(&["catalogs"])?).await?;
        Ok(response.catalogs)
    }

    pub async fn get_catalog(&self, name: &str) -> Result<Catalog> {
        self.api.get(self.url(&["catalogs", name])?).await
    }

    pub async fn create_catalog(&self, catalog: Catalog) -> Result<Catalog> {
        let request = CreateCatalogRequest { catalog };
        self.api.post(self.url(&["catalogs"])?, &request).await
    }

    pub async fn delete_catalog(&self, name: &str) -> Result<()> {
        self.api.delete(self.url(&["catalogs", name])?).await
    }

    // ===== Catalog roles =====

    pub async fn list_catalog_roles(&self, catalog: &str) -> Result<Vec<CatalogRole>> {
        let url = self.url(&["catalogs", catalog, "catalog-roles"])?;
        let response: CatalogRoles = self.api.get(url).await?;
        Ok(response.roles)
    }

    pub async fn create_catalog_role(&self, catalog: &str, role: CatalogRole) -> Result<CatalogRole> {
        let url = self.url(&["catalogs", catalog, "catalog-roles"])?;
        let request = CreateCatalogRoleRequest { catalog_role: role };
        self.api.post(url, &request).await
    }

    pub async fn get_catalog_role(&self, catalog: &str, role: &str) -> Result<CatalogRole> {
        let url = self.url(&["catalogs", catalog, "catalog-roles", role])?;
        self.api.get(url).await
    }

    pub async fn update_catalog_role(
        &self,
        catalog: &str,
        role: &str,
        update: &UpdateEntityRequest,
    ) -> Result<CatalogRole> {
        let url = self.url(&["catalogs", catalog, "catalog-roles", role])?;
        self.api.put(url, update).await
    }

    pub async fn delete_catalog_role(&self, catalog: &str, role: &str) -> Result<()> {
        let url = self.url(&["catalogs", catalog, "catalog-roles", role])?;
        self.api.delete(url).await
    }

    // ===== Grants =====

    pub async fn list_grants(&self, catalog: &str, role: &str) -> Result<Vec<GrantEntry>> {
        let url = self.url(&["catalogs", catalog, "catalog-roles", role, "grants"])?;
        let response: Grants = self.api.get(url).await?;
        Ok(response.grants)
    }

    pub async fn add_grant(&self, catalog: &str, role: &str, grant: Grant) -> Result<()> {
        let url = self.url(&["catalogs", catalog, "catalog-roles", role, "grants"])?;
        let request = GrantRequest { grant };
        self.api.execute(Method::PUT, url, Some(&request)).await
    }

    pub async fn revoke_grant(
        &self,
        catalog: &str,
        role: &str,
        grant: Grant,
        cascade: bool,
    ) -> Result<()> {
        let mut url = self.url(&["catalogs", catalog, "catalog-roles", role, "grants"])?;
        url.query_pairs_mut()
            .append_pair("cascade", if cascade { "true" } else { "false" });
        let request = GrantRequest { grant };
        self.api.execute(Method::POST, url, Some(&request)).await
    }

    /// Principal roles the catalog role has been assigned to.
    pub async fn list_assignee_principal_roles(
        &self,
        catalog: &str,
        role: &str,
    ) -> Result<Vec<PrincipalRole>> {
        let url = self.url(&["catalogs", catalog, "catalog-roles", role, "principal-roles"])?;
        let response: PrincipalRoles = self.api.get(url).await?;
        Ok(response.roles)
    }

    // ===== Principals =====

    pub async fn list_principals(&self) -> Result<Vec<Principal>> {
        let response: Principals = self.api.get(self.url(&["principals"])?).await?;
        Ok(response.principals)
    }

    pub async fn create_principal(&self, principal: Principal) -> Result<PrincipalWithCredentials> {
        let request = CreatePrincipalRequest { principal };
        self.api.post(self.url(&["principals"])?, &request).await
    }

    pub async fn get_principal(&self, name: &str) -> Result<Principal> {
        self.api.get(self.url(&["principals", name])?).await
    }

    pub async fn update_principal(
        &self,
        name: &str,
        update: &UpdateEntityRequest,
    ) -> Result<Principal> {
        self.api.put(self.url(&["principals", name])?, update).await
    }

    pub async fn delete_principal(&self, name: &str) -> Result<()> {
        self.api.delete(self.url(&["principals", name])?).await
    }

    pub async fn rotate_credentials(&self, name: &str) -> Result<PrincipalWithCredentials> {
        let url = self.url(&["principals", name, "rotate"])?;
        self.api.fetch::<(), _>(Method::POST, url, None).await
    }

    pub async fn reset_credentials(&self, name: &str) -> Result<PrincipalWithCredentials> {
        let url = self.url(&["principals", name, "reset"])?;
        self.api.post(url, &ResetPrincipalRequest::default()).await
    }

    pub async fn list_principal_roles(&self, name: &str) -> Result<Vec<PrincipalRole>> {
        let url = self.url(&["principals", name, "principal-roles"])?;
        let response: PrincipalRoles = self.api.get(url).await?;
        Ok(response.roles)
    }

    pub async fn assign_principal_role(&self, name: &str, role: &str) -> Result<()> {
        let url = self.url(&["principals", name, "principal-roles"])?;
        let request = GrantPrincipalRoleRequest {
            principal_role: PrincipalRole {
                name: role.to_string(),
                ..PrincipalRole::default()
            },
        };
        self.api.execute(Method::PUT, url, Some(&request)).await
    }

    pub async fn revoke_principal_role(&self, name: &str, role: &str) -> Result<()> {
        let url = self.url(&["principals", name, "principal-roles", role])?;
        self.api.delete(url).await
    }
}

/// Entity version required by the update endpoints.
pub fn require_entity_version(version: Option<i64>, what: &str) -> Result<i64> {
    version.ok_or_else(|| Error::InvalidServerResponse(format!("{} has no entity version", what)))
}
