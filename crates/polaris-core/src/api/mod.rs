//! REST API clients for the Polaris server.
//!
//! `ApiClient` attaches the bearer token and realm header to every request.
//! `ManagementClient` and `CatalogClient` are thin typed wrappers over it for
//! the management API (`/api/management/v1`) and the Iceberg REST catalog API
//! (`/api/catalog/v1/{prefix}`).

pub mod catalog;
pub mod client;
pub mod management;

pub use catalog::CatalogClient;
pub use client::ApiClient;
pub use management::{require_entity_version, ManagementClient};

/// Header carrying the realm in multi-tenant deployments
pub const REALM_HEADER: &str = "Polaris-Realm";
