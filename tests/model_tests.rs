#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::io::Write;

use ramltree::{load_document, load_model, RamlModel, ANONYMOUS_SCHEME};
use serde_json::json;

fn example_model() -> RamlModel {
    RamlModel::from_value(json!({
        "title": "Example API",
        "version": "1.0",
        "baseUri": "http://{version}.example.com/",
        "mediaType": "application/json",
        "protocols": ["HTTP", "HTTPS"],
        "documentation": [{ "title": "Home", "content": "Welcome." }],
        "resourceTypes": { "collection": { "get": {} } },
        "traits": { "paged": { "queryParameters": { "page": {} } } },
        "securitySchemes": {
            "oauth_2_0": {
                "type": "OAuth 2.0",
                "settings": {
                    "authorizationUri": "https://auth.example.com/authorize",
                    "accessTokenUri": "https://auth.example.com/token",
                    "clientId": "abc"
                }
            }
        },
        "securedBy": [null, "oauth_2_0"],
        "resources": {
            "/users": {
                "get": {},
                "post": { "body": { "application/json": {} } },
                "/{userId}": {
                    "uriParameters": { "userId": { "type": "integer" } },
                    "get": { "queryParameters": { "fields": {} } }
                }
            }
        }
    }))
    .expect("fixture should deserialize")
}

#[test]
fn test_simple_properties() {
    let model = example_model();
    assert_eq!(model.title(), Some("Example API"));
    assert_eq!(model.version(), Some("1.0"));
    assert_eq!(model.media_type(), Some("application/json"));
    assert_eq!(model.protocols(), ["HTTP", "HTTPS"]);
    assert_eq!(model.documentation().len(), 1);
    assert!(model.resource_types().contains_key("collection"));
    assert!(model.traits().contains_key("paged"));
}

#[test]
fn test_base_uri_trailing_slash_stripped() {
    let model = example_model();
    assert_eq!(model.base_uri(), "http://{version}.example.com");
}

#[test]
fn test_base_uri_version_parameter_defaults_to_document_version() {
    let model = example_model();
    let params = model.base_uri_parameters();
    assert_eq!(params["version"], json!({ "type": "string", "default": "1.0" }));
}

#[test]
fn test_declared_version_parameter_wins_over_injected_default() {
    let model = RamlModel::from_value(json!({
        "version": "2.0",
        "baseUri": "http://{version}.example.com",
        "baseUriParameters": {
            "version": { "type": "string", "enum": ["v1"] }
        }
    }))
    .unwrap();

    let version = &model.base_uri_parameters()["version"];
    assert_eq!(version["enum"], json!(["v1"]));
    // injected default survives underneath the declared keys
    assert_eq!(version["default"], json!("2.0"));
}

#[test]
fn test_resource_navigation() {
    let model = example_model();
    assert_eq!(model.resources(), vec!["/", "/users", "/users/{userId}"]);
    assert_eq!(model.resource_children("/users"), vec!["/users/{userId}"]);
    assert_eq!(model.resource_children("/missing"), Vec::<&str>::new());
    assert_eq!(model.resource_parent("/users/{userId}"), Some("/users"));
    assert_eq!(model.resource_parent("/"), None);
    assert_eq!(model.relative_uri("/users/{userId}"), Some("/{userId}"));
}

#[test]
fn test_resource_names() {
    let model = example_model();
    assert_eq!(model.resource_name("/users").as_deref(), Some("users"));
    assert_eq!(model.resource_name("/users/{userId}").as_deref(), Some("userId"));
    assert_eq!(model.resource_name("/missing"), None);
}

#[test]
fn test_method_accessors() {
    let model = example_model();
    assert_eq!(
        model.resource_methods("/users"),
        Some(vec!["get", "post"])
    );
    assert!(model.method("/users", "get").is_some());
    assert!(model.method("/users", "delete").is_none());
    assert!(model.method_body("/users", "post").is_some());
    assert!(model.method_query_parameters("/users/{userId}", "get").is_some());
    assert!(model.method_headers("/users", "get").is_none());
}

#[test]
fn test_parameter_scopes() {
    let model = example_model();
    let absolute = model.resource_parameters("/users/{userId}").unwrap();
    assert_eq!(absolute["userId"], json!({ "type": "integer" }));
    assert!(model.relative_parameters("/users").unwrap().is_empty());
    assert!(model.resource_parameters("/missing").is_none());
}

#[test]
fn test_secured_by_resolution_and_authentication() {
    let model = example_model();

    let policy = model.secured_by();
    assert_eq!(policy.len(), 2);
    assert_eq!(policy[ANONYMOUS_SCHEME], None);
    assert!(policy["oauth_2_0"].is_some());

    let client = model.security_authentication("oauth_2_0").unwrap();
    assert_eq!(client.client_id.as_deref(), Some("abc"));
    assert!(model.security_authentication("missing").is_none());
}

#[test]
fn test_load_document_json() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        file,
        r#"{{ "title": "From Disk", "resources": {{ "/ping": {{ "get": {{}} }} }} }}"#
    )
    .unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let doc = load_document(&path).unwrap();
    assert_eq!(doc.title.as_deref(), Some("From Disk"));

    let model = load_model(&path).unwrap();
    assert_eq!(model.resources(), vec!["/", "/ping"]);
}

#[test]
fn test_load_document_yaml() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    write!(
        file,
        "title: From Yaml\nresources:\n  /ping:\n    get: {{}}\n"
    )
    .unwrap();

    let doc = load_document(file.path().to_str().unwrap()).unwrap();
    assert_eq!(doc.title.as_deref(), Some("From Yaml"));
}

#[test]
fn test_load_document_missing_file_is_an_error() {
    let err = load_document("/nonexistent/api.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/api.json"));
}
