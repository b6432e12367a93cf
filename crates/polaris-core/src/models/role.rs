use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRole {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_version: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRoles {
    #[serde(default)]
    pub roles: Vec<CatalogRole>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogRoleRequest {
    pub catalog_role: CatalogRole,
}

/// Update body shared by catalog roles and principals. The server rejects
/// the update when `current_entity_version` is stale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntityRequest {
    pub current_entity_version: i64,
    pub properties: BTreeMap<String, String>,
}
