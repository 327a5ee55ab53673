#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use ramltree::{
    ModelConfig, RamlModel, RequestOptions, RequestSigner, Transport, TransportRequest,
    TransportResponse,
};
use serde_json::json;

/// Records every dispatched request and answers with a canned response.
struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
        })
    }

    fn last(&self) -> TransportRequest {
        self.requests
            .lock()
            .expect("recording lock poisoned")
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: TransportRequest) -> anyhow::Result<TransportResponse> {
        self.requests
            .lock()
            .expect("recording lock poisoned")
            .push(request);
        Ok(TransportResponse {
            status: 200,
            headers: IndexMap::new(),
            body: json!({ "ok": true }),
        })
    }
}

fn model_with_recorder() -> (RamlModel, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let doc = serde_json::from_value(json!({
        "title": "Example API",
        "version": "1.0",
        "baseUri": "http://{version}.example.com",
        "resources": {
            "/users": {
                "get": {},
                "post": {},
                "/{userId}": {
                    "uriParameters": { "userId": { "default": "me" } },
                    "get": {}
                }
            }
        }
    }))
    .unwrap();
    let model = RamlModel::with_config(
        doc,
        ModelConfig {
            transport: transport.clone(),
        },
    );
    (model, transport)
}

#[test]
fn test_url_fills_base_and_path_templates() {
    let (model, transport) = model_with_recorder();

    let response = model
        .request(
            "/users/{userId}",
            "get",
            RequestOptions::new().uri_parameter("userId", "123"),
        )
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({ "ok": true }));

    let sent = transport.last();
    assert_eq!(sent.method, "get");
    // {version} fills from the injected base-URI default
    assert_eq!(sent.url, "http://1.0.example.com/users/123");
}

#[test]
fn test_uri_parameter_falls_back_to_stored_default() {
    let (model, transport) = model_with_recorder();

    model
        .request("/users/{userId}", "get", RequestOptions::new())
        .unwrap();

    assert_eq!(transport.last().url, "http://1.0.example.com/users/me");
}

#[test]
fn test_unresolved_parameter_collapses_to_empty_string() {
    let transport = RecordingTransport::new();
    let doc = serde_json::from_value(json!({
        "baseUri": "http://example.com",
        "resources": {
            "/files/{fileId}": { "get": {} }
        }
    }))
    .unwrap();
    let model = RamlModel::with_config(
        doc,
        ModelConfig {
            transport: transport.clone(),
        },
    );

    model
        .request("/files/{fileId}", "get", RequestOptions::new())
        .unwrap();

    // no override, no default: the token vanishes rather than erroring
    assert_eq!(transport.last().url, "http://example.com/files/");
}

#[test]
fn test_base_uri_parameter_override_wins() {
    let (model, transport) = model_with_recorder();

    model
        .request(
            "/users",
            "get",
            RequestOptions::new().base_uri_parameter("version", "v2"),
        )
        .unwrap();

    assert_eq!(transport.last().url, "http://v2.example.com/users");
}

#[test]
fn test_headers_query_and_body_pass_through() {
    let (model, transport) = model_with_recorder();

    model
        .request(
            "/users",
            "post",
            RequestOptions::new()
                .header("X-Request-Id", "42")
                .query_parameter("dry_run", "true")
                .body(json!({ "name": "Alice" })),
        )
        .unwrap();

    let sent = transport.last();
    assert_eq!(sent.headers.get("X-Request-Id").map(String::as_str), Some("42"));
    assert_eq!(sent.query.get("dry_run").map(String::as_str), Some("true"));
    assert_eq!(sent.body, Some(json!({ "name": "Alice" })));
}

#[test]
fn test_signer_mutates_request_before_dispatch() {
    struct StaticToken;

    impl RequestSigner for StaticToken {
        fn sign(&self, request: &mut TransportRequest) {
            request
                .headers
                .insert("Authorization".to_string(), "Bearer t0k3n".to_string());
        }
    }

    let (model, transport) = model_with_recorder();

    model
        .request(
            "/users",
            "get",
            RequestOptions::new().signer(Arc::new(StaticToken)),
        )
        .unwrap();

    assert_eq!(
        transport.last().headers.get("Authorization").map(String::as_str),
        Some("Bearer t0k3n")
    );
}

#[test]
fn test_unknown_path_still_dispatches_with_empty_scope() {
    let (model, transport) = model_with_recorder();

    model
        .request("/unknown/{x}", "get", RequestOptions::new())
        .unwrap();

    assert_eq!(transport.last().url, "http://1.0.example.com/unknown/");
}
