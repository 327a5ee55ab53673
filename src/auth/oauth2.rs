//! OAuth 2.0 client capability built from scheme settings.

use anyhow::Context;
use serde_json::{Map, Value};
use url::Url;

use super::RequestSigner;
use crate::transport::TransportRequest;

/// OAuth2 endpoints and client credentials read from a security scheme's
/// `settings` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuth2Client {
    pub authorization_uri: Option<String>,
    pub access_token_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scopes: Vec<String>,
}

impl OAuth2Client {
    /// Read the RAML OAuth2 settings keys (`authorizationUri`,
    /// `accessTokenUri`, `clientId`, `clientSecret`, `scopes`). Missing or
    /// mistyped keys are simply absent.
    pub fn from_settings(settings: &Map<String, Value>) -> Self {
        let string = |key: &str| {
            settings
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        let scopes = settings
            .get("scopes")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            authorization_uri: string("authorizationUri"),
            access_token_uri: string("accessTokenUri"),
            client_id: string("clientId"),
            client_secret: string("clientSecret"),
            scopes,
        }
    }

    /// Authorization-code redirect URL for this client.
    pub fn authorization_url(
        &self,
        redirect_uri: &str,
        state: Option<&str>,
    ) -> anyhow::Result<Url> {
        let base = self
            .authorization_uri
            .as_deref()
            .context("scheme settings declare no authorizationUri")?;
        let mut url =
            Url::parse(base).with_context(|| format!("invalid authorizationUri {base:?}"))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("response_type", "code");
            if let Some(client_id) = &self.client_id {
                query.append_pair("client_id", client_id);
            }
            query.append_pair("redirect_uri", redirect_uri);
            if !self.scopes.is_empty() {
                query.append_pair("scope", &self.scopes.join(" "));
            }
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url)
    }

    /// Wrap an access token obtained out of band into a signing capability.
    pub fn token(&self, access_token: impl Into<String>) -> OAuth2Token {
        OAuth2Token {
            access_token: access_token.into(),
        }
    }
}

/// Bearer-token signer for requests built by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth2Token {
    pub access_token: String,
}

impl RequestSigner for OAuth2Token {
    fn sign(&self, request: &mut TransportRequest) {
        request.headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.access_token),
        );
    }
}
