use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CatalogType {
    Internal,
    External,
}

impl FromStr for CatalogType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INTERNAL" => Ok(CatalogType::Internal),
            "EXTERNAL" => Ok(CatalogType::External),
            _ => Err(Error::validation(format!(
                "invalid catalog type \"{}\" (expected INTERNAL or EXTERNAL)",
                s
            ))),
        }
    }
}

impl fmt::Display for CatalogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogType::Internal => write!(f, "INTERNAL"),
            CatalogType::External => write!(f, "EXTERNAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageType {
    S3,
    Gcs,
    Azure,
    File,
}

impl FromStr for StorageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S3" => Ok(StorageType::S3),
            "GCS" => Ok(StorageType::Gcs),
            "AZURE" => Ok(StorageType::Azure),
            "FILE" => Ok(StorageType::File),
            _ => Err(Error::validation(format!(
                "invalid storage type \"{}\" (expected S3, GCS, AZURE, FILE)",
                s
            ))),
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageType::S3 => "S3",
            StorageType::Gcs => "GCS",
            StorageType::Azure => "AZURE",
            StorageType::File => "FILE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogProperties {
    #[serde(rename = "default-base-location", default)]
    pub default_base_location: String,
    #[serde(flatten)]
    pub additional: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfigInfo {
    pub storage_type: StorageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_locations: Option<Vec<String>>,
    /// Provider specific settings (role ARNs, tenant ids, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(rename = "type")]
    pub catalog_type: CatalogType,
    pub name: String,
    #[serde(default)]
    pub properties: CatalogProperties,
    pub storage_config_info: StorageConfigInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_version: Option<i64>,
}

/// Listing entry. Decoded loosely so one catalog with a type or storage
/// configuration this client does not know still lists by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CatalogSummary {
    pub name: String,
    #[serde(rename = "type", default)]
    pub catalog_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalogs {
    #[serde(default)]
    pub catalogs: Vec<CatalogSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCatalogRequest {
    pub catalog: Catalog,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_type() {
        assert_eq!(" internal ".parse::<CatalogType>().unwrap(), CatalogType::Internal);
        assert_eq!("EXTERNAL".parse::<CatalogType>().unwrap(), CatalogType::External);
        assert!(matches!("managed".parse::<CatalogType>(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_storage_type() {
        assert_eq!("s3".parse::<StorageType>().unwrap(), StorageType::S3);
        assert_eq!("Azure".parse::<StorageType>().unwrap(), StorageType::Azure);
        assert_eq!(StorageType::Gcs.to_string(), "GCS");
        assert!("hdfs".parse::<StorageType>().is_err());
    }

    #[test]
    fn test_parse_catalog_response() {
        let json = r#"{
            "type": "INTERNAL",
            "name": "quickstart",
            "properties": {"default-base-location": "s3://bucket/wh", "owner": "data"},
            "storageConfigInfo": {
                "storageType": "S3",
                "allowedLocations": ["s3://bucket/wh"],
                "roleArn": "arn:aws:iam::123:role/polaris"
            },
            "createTimestamp": 1700000000000,
            "entityVersion": 3
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.name, "quickstart");
        assert_eq!(catalog.catalog_type, CatalogType::Internal);
        assert_eq!(catalog.properties.default_base_location, "s3://bucket/wh");
        assert_eq!(catalog.properties.additional["owner"], "data");
        assert_eq!(catalog.storage_config_info.storage_type, StorageType::S3);
        assert_eq!(
            catalog.storage_config_info.extra["roleArn"],
            "arn:aws:iam::123:role/polaris"
        );
        assert_eq!(catalog.entity_version, Some(3));
    }

    #[test]
    fn test_serialize_create_request() {
        let request = CreateCatalogRequest {
            catalog: Catalog {
                catalog_type: CatalogType::Internal,
                name: "c1".to_string(),
                properties: CatalogProperties {
                    default_base_location: "file:///tmp/wh".to_string(),
                    additional: BTreeMap::from([("k".to_string(), "v".to_string())]),
                },
                storage_config_info: StorageConfigInfo {
                    storage_type: StorageType::File,
                    allowed_locations: None,
                    extra: BTreeMap::new(),
                },
                create_timestamp: None,
                last_update_timestamp: None,
                entity_version: None,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "catalog": {
                    "type": "INTERNAL",
                    "name": "c1",
                    "properties": {"default-base-location": "file:///tmp/wh", "k": "v"},
                    "storageConfigInfo": {"storageType": "FILE"}
                }
            })
        );
    }

    #[test]
    fn test_listing_tolerates_unknown_storage() {
        let json = r#"{"catalogs": [
            {"type": "INTERNAL", "name": "a", "storageConfigInfo": {"storageType": "HDFS"}},
            {"type": "FEDERATED", "name": "b"}
        ]}"#;
        let listing: Catalogs = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = listing.catalogs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(listing.catalogs[1].catalog_type, "FEDERATED");
    }
}
