//! Outgoing request plumbing.
//!
//! The model never talks to the network itself. [`RamlModel::request`]
//! builds a [`TransportRequest`] and hands it to whatever [`Transport`] was
//! injected at construction; the transport's result is returned unmodified.
//!
//! [`RamlModel::request`]: crate::model::RamlModel::request

mod client;

pub use client::ReqwestTransport;

use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

use crate::auth::RequestSigner;

/// A fully resolved outgoing request description.
///
/// Signers receive this mutably before dispatch and may add or rewrite any
/// part of it (typically the `Authorization` header).
#[derive(Debug, Clone, Default)]
pub struct TransportRequest {
    pub method: String,
    pub url: String,
    pub headers: IndexMap<String, String>,
    pub query: IndexMap<String, String>,
    pub body: Option<Value>,
}

/// Response handed back by a transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: IndexMap<String, String>,
    /// Decoded JSON body when the payload parses, the raw text otherwise.
    pub body: Value,
}

/// Strategy for dispatching an outgoing request.
///
/// Injected via [`ModelConfig`](crate::model::ModelConfig); the default is
/// [`ReqwestTransport`]. Implementations own their own timeout and
/// cancellation behavior.
pub trait Transport: Send + Sync {
    fn send(&self, request: TransportRequest) -> anyhow::Result<TransportResponse>;
}

/// Caller-supplied overrides for a single request.
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub headers: IndexMap<String, String>,
    pub query_parameters: IndexMap<String, String>,
    pub uri_parameters: IndexMap<String, String>,
    pub base_uri_parameters: IndexMap<String, String>,
    pub body: Option<Value>,
    /// Optional signing capability, e.g. an
    /// [`OAuth2Token`](crate::auth::OAuth2Token).
    pub signer: Option<Arc<dyn RequestSigner>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    pub fn uri_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.uri_parameters.insert(name.into(), value.into());
        self
    }

    pub fn base_uri_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.base_uri_parameters.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }
}
