//! # ramltree
//!
//! **ramltree** turns an already-parsed [RAML](https://raml.org/) API
//! description into a queryable object model with a convenience request
//! builder.
//!
//! ## Overview
//!
//! The heart of the crate is the resource-tree builder: the nested,
//! string-keyed resource declarations of a description become a
//! flat-addressable tree of nodes, one per distinct absolute path, with
//! parent/child links, merged URI-parameter scopes, per-method resolved
//! `securedBy` policies, and `{mediaTypeExtension}` placeholders expanded
//! into concrete alternative resources. The tree is built once, eagerly, at
//! construction; every query afterwards is a pure lookup.
//!
//! Parsing the textual RAML format is out of scope — callers hand over the
//! deserialized structure (any `serde_json::Value`, or a JSON/YAML file of
//! it via [`load_document`]).
//!
//! ## Architecture
//!
//! - **[`raml`]** — description types, path/template helpers, media-type
//!   expansion, `securedBy` resolution, and the resource tree builder
//! - **[`model`]** — [`RamlModel`], the query surface and request builder
//! - **[`transport`]** — the outgoing-request description and the injected
//!   [`Transport`] strategy (default: blocking `reqwest`)
//! - **[`auth`]** — OAuth2 client capabilities built from security schemes
//!
//! ## Quick start
//!
//! ```
//! use ramltree::{RamlDocument, RamlModel};
//! use serde_json::json;
//!
//! let doc = RamlDocument::from_value(json!({
//!     "title": "Example API",
//!     "version": "1.0",
//!     "baseUri": "http://{version}.example.com",
//!     "resources": {
//!         "/users": {
//!             "/{userId}": { "get": {} }
//!         }
//!     }
//! }))?;
//!
//! let model = RamlModel::new(doc);
//! assert_eq!(model.resources(), vec!["/", "/users", "/users/{userId}"]);
//! assert_eq!(model.resource_parent("/users/{userId}"), Some("/users"));
//! assert_eq!(model.resource_name("/users/{userId}").as_deref(), Some("userId"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Dispatching requests
//!
//! ```no_run
//! use ramltree::{load_model, RequestOptions};
//!
//! let model = load_model("api.json")?;
//! let response = model.request(
//!     "/users/{userId}",
//!     "get",
//!     RequestOptions::new().uri_parameter("userId", "123"),
//! )?;
//! println!("{}", response.status);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Known sharp edge: empty-string template fallback
//!
//! When a URL template parameter has neither a caller override nor a stored
//! `default`, it silently collapses to the **empty string** rather than
//! failing. This matches the RAML ecosystem's behavior and is relied on by
//! existing descriptions, but it can mask a forgotten `uri_parameter` —
//! double-check the final URL when a request 404s unexpectedly.
//!
//! ## Intentionally unapplied: resource types and traits
//!
//! `resourceTypes`, `traits`, and the per-resource `type`/`is` keys are
//! stored and queryable, but they are **not** merged into compiled methods.

pub mod auth;
pub mod model;
pub mod raml;
pub mod transport;

pub use auth::{OAuth2Client, OAuth2Token, RequestSigner};
pub use model::{ModelConfig, RamlModel};
pub use raml::{
    load_document, load_model, MethodDefinition, RamlDocument, ResourceNode, ResourceTree,
    SecuredBy, SecurityScheme, UriParameters, ANONYMOUS_SCHEME, ROOT_PATH,
};
pub use transport::{
    RequestOptions, ReqwestTransport, Transport, TransportRequest, TransportResponse,
};
