use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameter definitions keyed by parameter name, in order of first
/// appearance. Each definition is an opaque schema blob; the core only
/// reads `default` and `enum` where the algorithms need them.
pub type UriParameters = IndexMap<String, Value>;

/// A resolved `securedBy` declaration: scheme identifier to resolved scheme.
/// The reserved key `"null"` maps to `None` and marks an explicit
/// anonymous/no-auth option.
pub type SecuredBy = IndexMap<String, Option<SecurityScheme>>;

/// An already-parsed RAML description.
///
/// Parsing the textual RAML format is out of scope; callers hand over the
/// deserialized structure (see [`RamlDocument::from_value`]) and the model
/// takes it from there. Every field is optional — absent fields degrade to
/// empty values rather than errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RamlDocument {
    pub title: Option<String>,
    pub version: Option<String>,
    pub base_uri: Option<String>,
    pub media_type: Option<String>,
    pub protocols: Vec<String>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
    /// Top-level default policy, applied to methods without their own
    /// `securedBy`. Entries are null, a scheme name, or a name → settings
    /// override map.
    pub secured_by: Option<Vec<Value>>,
    pub documentation: Vec<Value>,
    /// Stored for querying but never merged into compiled methods.
    pub resource_types: IndexMap<String, Value>,
    /// Stored for querying but never merged into compiled methods.
    pub traits: IndexMap<String, Value>,
    pub base_uri_parameters: serde_json::Map<String, Value>,
    /// Nested resource declarations: keys are `/`-prefixed sub-paths or HTTP
    /// verb names. Left as a raw value; the tree builder walks it.
    pub resources: Option<Value>,
}

impl RamlDocument {
    /// Deserialize a document from an already-parsed description value.
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        serde_json::from_value(value).context("malformed RAML description")
    }
}

/// A named authentication mechanism definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub scheme_type: Option<String>,
    pub description: Option<String>,
    pub settings: serde_json::Map<String, Value>,
    pub described_by: Option<Value>,
}

/// One node in the resource tree, representing a distinct absolute path.
///
/// Nodes live in an arena keyed by absolute path; `parent` and `children`
/// hold arena keys rather than owning pointers.
#[derive(Debug, Clone, Default)]
pub struct ResourceNode {
    /// Absolute path, unique across the tree. The root is `/`.
    pub absolute_uri: String,
    /// The path segment this node was declared with, empty for the root.
    pub relative_uri: String,
    /// Absolute path of the parent node, `None` for the root.
    pub parent: Option<String>,
    /// Local segment string → child absolute path, in discovery order.
    pub children: IndexMap<String, String>,
    /// HTTP verb → compiled method definition.
    pub methods: IndexMap<String, MethodDefinition>,
    /// Parameters declared on this segment only.
    pub relative_uri_parameters: UriParameters,
    /// Union of all ancestor parameters plus this node's own; entries on
    /// this node override ancestor entries of the same name.
    pub absolute_uri_parameters: UriParameters,
}

/// A compiled method declaration attached to a resource node.
///
/// The schema-shaped fields are passed through uninterpreted.
#[derive(Debug, Clone, Default)]
pub struct MethodDefinition {
    pub verb: String,
    /// Absolute path of the owning resource node.
    pub resource: String,
    pub description: Option<String>,
    pub headers: Option<Value>,
    pub query_parameters: Option<Value>,
    pub body: Option<Value>,
    pub responses: Option<Value>,
    /// Resolved policy for this method: its own `securedBy` when declared,
    /// otherwise the document's top-level default.
    pub secured_by: SecuredBy,
}
