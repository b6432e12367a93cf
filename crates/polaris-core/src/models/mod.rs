//! Data models for the Polaris management and Iceberg REST APIs.
//!
//! This module contains the request and response bodies used by the CLI:
//!
//! - `Catalog`, `StorageConfigInfo`: catalog definitions
//! - `CatalogRole`, `Grant`: catalog roles and their privileges
//! - `Principal`, `PrincipalRole`: identities and their role assignments
//! - Iceberg types: namespace and table listings

pub mod catalog;
pub mod grant;
pub mod iceberg;
pub mod principal;
pub mod role;

pub use catalog::{
    Catalog, CatalogProperties, CatalogSummary, CatalogType, Catalogs, CreateCatalogRequest,
    StorageConfigInfo, StorageType,
};
pub use grant::{Grant, GrantEntry, GrantRequest, Grants};
pub use iceberg::{
    CreateNamespaceRequest, CreateNamespaceResponse, ListNamespacesResponse, ListTablesResponse,
    TableIdentifier,
};
pub use principal::{
    CreatePrincipalRequest, GrantPrincipalRoleRequest, Principal, PrincipalCredentials,
    PrincipalRole, PrincipalRoles, PrincipalWithCredentials, Principals, ResetPrincipalRequest,
};
pub use role::{CatalogRole, CatalogRoles, CreateCatalogRoleRequest, UpdateEntityRequest};
