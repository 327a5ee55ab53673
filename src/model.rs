//! Queryable object model over a parsed RAML description.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::auth::{build_authentication, OAuth2Client};
use crate::raml::{
    base_uri_parameters, fill_template, resolve_secured_by, resource_name, MethodDefinition,
    RamlDocument, ResourceNode, ResourceTree, SecuredBy, SecurityScheme, UriParameters,
};
use crate::transport::{
    RequestOptions, ReqwestTransport, Transport, TransportRequest, TransportResponse,
};

/// Construction-time configuration.
///
/// The transport is an explicit strategy injected here; there is no
/// process-wide default to override.
#[derive(Clone)]
pub struct ModelConfig {
    pub transport: Arc<dyn Transport>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::default()),
        }
    }
}

/// The queryable model: simple named properties, the resource tree, resolved
/// security, and a convenience request builder.
///
/// Everything is computed eagerly at construction and immutable afterwards;
/// all query operations are pure lookups, safe from any thread. Unknown
/// paths, verbs, and scheme names answer with `None` or an empty collection,
/// never an error.
pub struct RamlModel {
    title: Option<String>,
    version: Option<String>,
    base_uri: String,
    media_type: Option<String>,
    protocols: Vec<String>,
    documentation: Vec<Value>,
    resource_types: IndexMap<String, Value>,
    traits: IndexMap<String, Value>,
    security_schemes: IndexMap<String, SecurityScheme>,
    secured_by: SecuredBy,
    authentication: IndexMap<String, OAuth2Client>,
    base_uri_parameters: UriParameters,
    tree: ResourceTree,
    transport: Arc<dyn Transport>,
}

impl RamlModel {
    /// Build the model with the default transport.
    pub fn new(doc: RamlDocument) -> Self {
        Self::with_config(doc, ModelConfig::default())
    }

    /// Build the model, injecting the transport.
    pub fn with_config(doc: RamlDocument, config: ModelConfig) -> Self {
        let tree = ResourceTree::build(&doc);
        let base_uri_parameters = base_uri_parameters(&doc);
        let secured_by = resolve_secured_by(doc.secured_by.as_deref(), &doc.security_schemes);
        let authentication = build_authentication(&doc.security_schemes);

        let base_uri = doc.base_uri.unwrap_or_default();
        let base_uri = match base_uri.strip_suffix('/') {
            Some(stripped) => stripped.to_string(),
            None => base_uri,
        };

        debug!(
            title = doc.title.as_deref().unwrap_or(""),
            resources = tree.len(),
            "model built"
        );

        Self {
            title: doc.title,
            version: doc.version,
            base_uri,
            media_type: doc.media_type,
            protocols: doc.protocols,
            documentation: doc.documentation,
            resource_types: doc.resource_types,
            traits: doc.traits,
            security_schemes: doc.security_schemes,
            secured_by,
            authentication,
            base_uri_parameters,
            tree,
            transport: config.transport,
        }
    }

    /// Build the model straight from an already-parsed description value.
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        Ok(Self::new(RamlDocument::from_value(value)?))
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Base URI with a single trailing `/` stripped.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    pub fn documentation(&self) -> &[Value] {
        &self.documentation
    }

    /// Stored resource-type declarations; never applied to methods.
    pub fn resource_types(&self) -> &IndexMap<String, Value> {
        &self.resource_types
    }

    /// Stored trait declarations; never applied to methods.
    pub fn traits(&self) -> &IndexMap<String, Value> {
        &self.traits
    }

    pub fn security_schemes(&self) -> &IndexMap<String, SecurityScheme> {
        &self.security_schemes
    }

    /// Resolved top-level `securedBy` policy.
    pub fn secured_by(&self) -> &SecuredBy {
        &self.secured_by
    }

    /// Base-URI template parameters, with the document version injected as
    /// the default of a `version` parameter that declares none.
    pub fn base_uri_parameters(&self) -> &UriParameters {
        &self.base_uri_parameters
    }

    /// OAuth2 client for a scheme of type `"OAuth 2.0"`, by scheme name.
    pub fn security_authentication(&self, name: &str) -> Option<&OAuth2Client> {
        self.authentication.get(name)
    }

    /// All absolute resource paths, in discovery order. The root `/` is
    /// always present.
    pub fn resources(&self) -> Vec<&str> {
        self.tree.paths()
    }

    pub fn resource(&self, path: &str) -> Option<&ResourceNode> {
        self.tree.get(path)
    }

    /// Absolute paths of a resource's children; empty for unknown paths.
    pub fn resource_children(&self, path: &str) -> Vec<&str> {
        self.tree
            .get(path)
            .map(|node| node.children.values().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Absolute path of the parent; `None` for the root or unknown paths.
    pub fn resource_parent(&self, path: &str) -> Option<&str> {
        self.tree.get(path)?.parent.as_deref()
    }

    pub fn relative_uri(&self, path: &str) -> Option<&str> {
        self.tree.get(path).map(|node| node.relative_uri.as_str())
    }

    /// Verbs declared on a resource, in declaration order.
    pub fn resource_methods(&self, path: &str) -> Option<Vec<&str>> {
        self.tree
            .get(path)
            .map(|node| node.methods.keys().map(String::as_str).collect())
    }

    /// Human-readable name derived from the last path segment.
    pub fn resource_name(&self, path: &str) -> Option<String> {
        self.tree
            .get(path)
            .map(|node| resource_name(&node.relative_uri))
    }

    /// Merged parameter scope: everything inherited from the root down to
    /// this node.
    pub fn resource_parameters(&self, path: &str) -> Option<&UriParameters> {
        self.tree.get(path).map(|node| &node.absolute_uri_parameters)
    }

    /// Parameters declared on this node's own segment only.
    pub fn relative_parameters(&self, path: &str) -> Option<&UriParameters> {
        self.tree.get(path).map(|node| &node.relative_uri_parameters)
    }

    pub fn method(&self, path: &str, verb: &str) -> Option<&MethodDefinition> {
        self.tree.method(path, verb)
    }

    pub fn method_headers(&self, path: &str, verb: &str) -> Option<&Value> {
        self.tree.method(path, verb)?.headers.as_ref()
    }

    pub fn method_query_parameters(&self, path: &str, verb: &str) -> Option<&Value> {
        self.tree.method(path, verb)?.query_parameters.as_ref()
    }

    pub fn method_body(&self, path: &str, verb: &str) -> Option<&Value> {
        self.tree.method(path, verb)?.body.as_ref()
    }

    pub fn method_responses(&self, path: &str, verb: &str) -> Option<&Value> {
        self.tree.method(path, verb)?.responses.as_ref()
    }

    /// Build and dispatch a request for `path` and `verb`.
    ///
    /// The URL is the filled base-URI template followed by the filled path
    /// template. Each `{name}` token resolves from the caller's override,
    /// else the stored parameter's `default`, else the empty string — the
    /// empty-string fallback is deliberate and documented at the crate root.
    /// An optional signer mutates the outgoing request before it is handed
    /// to the injected transport, whose result is returned unmodified.
    pub fn request(
        &self,
        path: &str,
        verb: &str,
        options: RequestOptions,
    ) -> anyhow::Result<TransportResponse> {
        let empty = UriParameters::new();
        let resource_params = self.resource_parameters(path).unwrap_or(&empty);

        let url = format!(
            "{}{}",
            fill_template(
                &self.base_uri,
                &options.base_uri_parameters,
                &self.base_uri_parameters,
            ),
            fill_template(path, &options.uri_parameters, resource_params),
        );

        let mut request = TransportRequest {
            method: verb.to_string(),
            url,
            headers: options.headers,
            query: options.query_parameters,
            body: options.body,
        };

        if let Some(signer) = &options.signer {
            signer.sign(&mut request);
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");
        self.transport.send(request)
    }
}
