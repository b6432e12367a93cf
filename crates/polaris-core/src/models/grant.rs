//! Catalog-role grants.
//!
//! A grant attaches one privilege to one securable: the catalog itself, a
//! namespace, a table or a view. The wire format is a JSON object keyed by a
//! `type` discriminant, which maps directly onto the [`Grant`] enum.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::args::{format_namespace, parse_namespace};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Grant {
    Catalog {
        privilege: String,
    },
    Namespace {
        namespace: Vec<String>,
        privilege: String,
    },
    Table {
        namespace: Vec<String>,
        #[serde(rename = "tableName")]
        table_name: String,
        privilege: String,
    },
    View {
        namespace: Vec<String>,
        #[serde(rename = "viewName")]
        view_name: String,
        privilege: String,
    },
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Grant {
    /// Build a grant from command-line input.
    ///
    /// `kind` is matched case-insensitively and the privilege is upper-cased.
    /// Namespace grants need a namespace; table and view grants also need
    /// the table or view name.
    pub fn build(
        kind: &str,
        privilege: &str,
        namespace: Option<&str>,
        table: Option<&str>,
        view: Option<&str>,
    ) -> Result<Self> {
        let kind = kind.trim().to_lowercase();
        let privilege = privilege.trim().to_uppercase();
        if privilege.is_empty() {
            return Err(Error::validation("privilege is required"));
        }

        let namespace = match present(namespace) {
            Some(ns) => Some(parse_namespace(ns)?),
            None => None,
        };
        let require_namespace = |namespace: Option<Vec<String>>| {
            namespace.ok_or_else(|| {
                Error::validation(format!("namespace is required for {} grant", kind))
            })
        };

        match kind.as_str() {
            "catalog" => Ok(Grant::Catalog { privilege }),
            "namespace" => Ok(Grant::Namespace {
                namespace: require_namespace(namespace)?,
                privilege,
            }),
            "table" => {
                let namespace = require_namespace(namespace)?;
                let table_name = present(table)
                    .ok_or_else(|| Error::validation("table is required for table grant"))?;
                Ok(Grant::Table {
                    namespace,
                    table_name: table_name.to_string(),
                    privilege,
                })
            }
            "view" => {
                let namespace = require_namespace(namespace)?;
                let view_name = present(view)
                    .ok_or_else(|| Error::validation("view is required for view grant"))?;
                Ok(Grant::View {
                    namespace,
                    view_name: view_name.to_string(),
                    privilege,
                })
            }
            other => Err(Error::validation(format!(
                "invalid grant type: {} (expected catalog, namespace, table, view)",
                other
            ))),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Grant::Catalog { .. } => "catalog",
            Grant::Namespace { .. } => "namespace",
            Grant::Table { .. } => "table",
            Grant::View { .. } => "view",
        }
    }

    pub fn privilege(&self) -> &str {
        match self {
            Grant::Catalog { privilege }
            | Grant::Namespace { privilege, .. }
            | Grant::Table { privilege, .. }
            | Grant::View { privilege, .. } => privilege,
        }
    }
}

/// Body of both the add-grant and revoke-grant calls.
#[derive(Debug, Clone, Serialize)]
pub struct GrantRequest {
    pub grant: Grant,
}

/// One entry of a grant listing.
///
/// Decoded loosely so grant types this client does not model still print.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantEntry {
    #[serde(rename = "type", default)]
    pub grant_type: String,
    #[serde(default)]
    pub privilege: String,
    #[serde(default)]
    pub namespace: Option<Vec<String>>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub view_name: Option<String>,
}

impl GrantEntry {
    pub fn describe(&self) -> String {
        let mut line = format!("Type: {}, Privilege: {}", self.grant_type, self.privilege);
        if let Some(ref ns) = self.namespace {
            line.push_str(&format!(", Namespace: {}", format_namespace(ns)));
        }
        if let Some(ref table) = self.table_name {
            line.push_str(&format!(", Table: {}", table));
        }
        if let Some(ref view) = self.view_name {
            line.push_str(&format!(", View: {}", view));
        }
        line
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Grants {
    #[serde(default)]
    pub grants: Vec<GrantEntry>,
}
