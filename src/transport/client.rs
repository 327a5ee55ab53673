//! Default transport backed by a blocking `reqwest` client.

use anyhow::Context;
use indexmap::IndexMap;
use serde_json::Value;

use super::{Transport, TransportRequest, TransportResponse};

/// [`Transport`] implementation over [`reqwest::blocking::Client`].
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Wrap an existing client, keeping whatever timeouts and TLS settings
    /// the caller configured on it.
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::blocking::Client::new())
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> anyhow::Result<TransportResponse> {
        let method = reqwest::Method::from_bytes(request.method.to_uppercase().as_bytes())
            .with_context(|| format!("invalid HTTP method {:?}", request.method))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            let pairs: Vec<(&str, &str)> = request
                .query
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            builder = builder.query(&pairs);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .with_context(|| format!("request to {} failed", request.url))?;

        let status = response.status().as_u16();
        let mut headers = IndexMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.to_string(), value.to_string());
            }
        }
        let text = response.text().unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
