//! Integration tests for the management and catalog API clients

use mockito::{Matcher, Server};
use polaris_core::api::{ApiClient, CatalogClient, ManagementClient};
use polaris_core::models::{CatalogRole, Grant, UpdateEntityRequest};
use polaris_core::{Config, Error};
use serde_json::json;

fn api_for(server: &Server, realm: Option<&str>) -> ApiClient {
    let config = Config {
        host: format!("{}/", server.url()),
        realm: realm.map(str::to_string),
        catalog_prefix: None,
    };
    ApiClient::new(&config, "test-token").expect("api client")
}

#[tokio::test]
async fn list_catalogs_sends_bearer_and_realm() {
    //* Given
    let mut server = Server::new_async().await;
    let catalogs_mock = server
        .mock("GET", "/api/management/v1/catalogs")
        .match_header("authorization", "Bearer test-token")
        .match_header("polaris-realm", "acme")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "catalogs": [{
                    "type": "INTERNAL",
                    "name": "quickstart",
                    "properties": {"default-base-location": "file:///tmp/wh"},
                    "storageConfigInfo": {"storageType": "FILE"}
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, Some("acme")));
    let catalogs = client.list_catalogs().await.expect("list catalogs");

    //* Then
    catalogs_mock.assert_async().await;
    assert_eq!(catalogs.len(), 1);
    assert_eq!(catalogs[0].name, "quickstart");
    assert_eq!(catalogs[0].catalog_type, "INTERNAL");
}

#[tokio::test]
async fn unauthorized_maps_to_session_expired() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/management/v1/principals")
        .with_status(401)
        .with_body(r#"{"error":{"message":"expired"}}"#)
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    let err = client.list_principals().await.unwrap_err();

    //* Then
    assert!(matches!(err, Error::SessionExpired));
    assert!(err.to_string().contains("polaris auth login"));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("DELETE", "/api/management/v1/catalogs/missing")
        .with_status(404)
        .with_body(r#"{"error":{"message":"Catalog missing not found"}}"#)
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    let err = client.delete_catalog("missing").await.unwrap_err();

    //* Then
    match err {
        Error::Server { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Catalog missing not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn add_grant_sends_tagged_body() {
    //* Given
    let mut server = Server::new_async().await;
    let grant_mock = server
        .mock("PUT", "/api/management/v1/catalogs/wh/catalog-roles/reader/grants")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "grant": {
                "type": "table",
                "namespace": ["a", "b"],
                "tableName": "events",
                "privilege": "TABLE_READ_DATA"
            }
        })))
        .with_status(201)
        .expect(1)
        .create_async()
        .await;
    let grant = Grant::build("table", "table_read_data", Some("a.b"), Some("events"), None)
        .expect("grant");

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    client
        .add_grant("wh", "reader", grant)
        .await
        .expect("add grant");

    //* Then
    grant_mock.assert_async().await;
}

#[tokio::test]
async fn revoke_grant_passes_cascade() {
    //* Given
    let mut server = Server::new_async().await;
    let revoke_mock = server
        .mock("POST", "/api/management/v1/catalogs/wh/catalog-roles/reader/grants")
        .match_query(Matcher::UrlEncoded("cascade".into(), "true".into()))
        .match_body(Matcher::Json(json!({
            "grant": {"type": "catalog", "privilege": "CATALOG_MANAGE_CONTENT"}
        })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let grant = Grant::build("catalog", "catalog_manage_content", None, None, None).expect("grant");

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    client
        .revoke_grant("wh", "reader", grant, true)
        .await
        .expect("revoke grant");

    //* Then
    revoke_mock.assert_async().await;
}

#[tokio::test]
async fn list_grants_decodes_entries() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/management/v1/catalogs/wh/catalog-roles/reader/grants")
        .with_status(200)
        .with_body(
            json!({"grants": [
                {"type": "namespace", "namespace": ["db"], "privilege": "NAMESPACE_FULL_METADATA"}
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    let grants = client.list_grants("wh", "reader").await.expect("list grants");

    //* Then
    assert_eq!(grants.len(), 1);
    assert_eq!(
        grants[0].describe(),
        "Type: namespace, Privilege: NAMESPACE_FULL_METADATA, Namespace: db"
    );
}

#[tokio::test]
async fn update_catalog_role_puts_entity_version() {
    //* Given
    let mut server = Server::new_async().await;
    let update_mock = server
        .mock("PUT", "/api/management/v1/catalogs/wh/catalog-roles/reader")
        .match_body(Matcher::Json(json!({
            "currentEntityVersion": 2,
            "properties": {"team": "data"}
        })))
        .with_status(200)
        .with_body(r#"{"name":"reader","properties":{"team":"data"},"entityVersion":3}"#)
        .expect(1)
        .create_async()
        .await;
    let update = UpdateEntityRequest {
        current_entity_version: 2,
        properties: [("team".to_string(), "data".to_string())].into_iter().collect(),
    };

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    let role = client
        .update_catalog_role("wh", "reader", &update)
        .await
        .expect("update role");

    //* Then
    update_mock.assert_async().await;
    assert_eq!(role.entity_version, Some(3));
}

#[tokio::test]
async fn create_catalog_role_wraps_body() {
    //* Given
    let mut server = Server::new_async().await;
    let create_mock = server
        .mock("POST", "/api/management/v1/catalogs/wh/catalog-roles")
        .match_body(Matcher::Json(json!({"catalogRole": {"name": "reader"}})))
        .with_status(201)
        .with_body(r#"{"name":"reader","entityVersion":1}"#)
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    let role = client
        .create_catalog_role(
            "wh",
            CatalogRole {
                name: "reader".to_string(),
                ..CatalogRole::default()
            },
        )
        .await
        .expect("create role");

    //* Then
    create_mock.assert_async().await;
    assert_eq!(role.name, "reader");
}

#[tokio::test]
async fn assign_and_revoke_principal_role() {
    //* Given
    let mut server = Server::new_async().await;
    let assign_mock = server
        .mock("PUT", "/api/management/v1/principals/svc/principal-roles")
        .match_body(Matcher::Json(json!({"principalRole": {"name": "analyst"}})))
        .with_status(201)
        .expect(1)
        .create_async()
        .await;
    let revoke_mock = server
        .mock("DELETE", "/api/management/v1/principals/svc/principal-roles/analyst")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    client.assign_principal_role("svc", "analyst").await.expect("assign");
    client.revoke_principal_role("svc", "analyst").await.expect("revoke");

    //* Then
    assign_mock.assert_async().await;
    revoke_mock.assert_async().await;
}

#[tokio::test]
async fn reset_credentials_posts_empty_object() {
    //* Given
    let mut server = Server::new_async().await;
    let reset_mock = server
        .mock("POST", "/api/management/v1/principals/svc/reset")
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_body(
            json!({
                "principal": {"name": "svc", "clientId": "cid"},
                "credentials": {"clientId": "cid", "clientSecret": "fresh"}
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    let result = client.reset_credentials("svc").await.expect("reset");

    //* Then
    reset_mock.assert_async().await;
    assert_eq!(result.credentials.client_secret, "fresh");
}

#[tokio::test]
async fn list_tables_encodes_namespace_separator() {
    //* Given
    let mut server = Server::new_async().await;
    let tables_mock = server
        .mock("GET", "/api/catalog/v1/wh/namespaces/a%1Fb/tables")
        .with_status(200)
        .with_body(r#"{"identifiers":[{"namespace":["a","b"],"name":"events"}]}"#)
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = CatalogClient::new(api_for(&server, None), "wh");
    let tables = client
        .list_tables(&["a".to_string(), "b".to_string()])
        .await
        .expect("list tables");

    //* Then
    tables_mock.assert_async().await;
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "events");
}

#[tokio::test]
async fn list_namespaces_handles_missing_field() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/catalog/v1/wh/namespaces")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    //* When
    let client = CatalogClient::new(api_for(&server, None), "wh");
    let namespaces = client.list_namespaces().await.expect("list namespaces");

    //* Then
    assert!(namespaces.is_empty());
}

#[tokio::test]
async fn create_namespace_sends_properties() {
    //* Given
    let mut server = Server::new_async().await;
    let create_mock = server
        .mock("POST", "/api/catalog/v1/wh/namespaces")
        .match_body(Matcher::Json(json!({
            "namespace": ["sales", "eu"],
            "properties": {"owner": "emea"}
        })))
        .with_status(200)
        .with_body(r#"{"namespace":["sales","eu"],"properties":{"owner":"emea"}}"#)
        .expect(1)
        .create_async()
        .await;

    //* When
    let client = CatalogClient::new(api_for(&server, None), "wh");
    let created = client
        .create_namespace(
            vec!["sales".to_string(), "eu".to_string()],
            [("owner".to_string(), "emea".to_string())].into_iter().collect(),
        )
        .await
        .expect("create namespace");

    //* Then
    create_mock.assert_async().await;
    assert_eq!(created.namespace, vec!["sales", "eu"]);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    //* Given
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/management/v1/catalogs/wh")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    //* When
    let client = ManagementClient::new(api_for(&server, None));
    let err = client.get_catalog("wh").await.unwrap_err();

    //* Then
    assert!(matches!(err, Error::InvalidServerResponse(_)));
}

#[tokio::test]
async fn connection_failure_is_network_error() {
    //* Given
    let config = Config {
        host: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let client = ManagementClient::new(ApiClient::new(&config, "tok").expect("api client"));

    //* When
    let err = client.list_catalogs().await.unwrap_err();

    //* Then
    assert!(matches!(err, Error::Network(_)));
}
