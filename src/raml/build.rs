//! Resource tree construction.
//!
//! The tree is built once, eagerly, from the nested resource declarations of
//! a [`RamlDocument`]. Nodes live in an arena keyed by absolute path;
//! parent/child links are arena keys, so the tree has no owning pointers and
//! is trivially shareable across threads once built. Construction is a
//! single recursive traversal: segment the declared path, descend or create
//! a node per segment (expanding `{mediaTypeExtension}` segments into their
//! concrete variants), then compile the declaration's verbs against the
//! final node.
//!
//! The builder raises no errors. Malformed or absent fields degrade to
//! empty maps, and an input with no `resources` yields a tree containing
//! only the root.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::media_type::{expand_segment, media_type_extensions, MEDIA_TYPE_SUFFIX};
use super::path::{extract_parameters, split_path};
use super::security::resolve_secured_by;
use super::types::{MethodDefinition, RamlDocument, ResourceNode, UriParameters};

/// Absolute path of the root resource node, present in every tree.
pub const ROOT_PATH: &str = "/";

/// Declaration keys that apply resource types and traits. They are stored on
/// the document but intentionally never merged into compiled methods.
const UNAPPLIED_KEYS: [&str; 2] = ["type", "is"];

/// Flat-addressable tree of resource nodes, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ResourceTree {
    nodes: IndexMap<String, ResourceNode>,
}

impl ResourceTree {
    /// Build the tree from a parsed document.
    pub fn build(doc: &RamlDocument) -> Self {
        let mut builder = TreeBuilder {
            doc,
            nodes: IndexMap::new(),
        };
        builder.nodes.insert(
            ROOT_PATH.to_string(),
            ResourceNode {
                absolute_uri: ROOT_PATH.to_string(),
                ..ResourceNode::default()
            },
        );

        if let Some(resources) = doc.resources.as_ref().and_then(Value::as_object) {
            builder.compile(ROOT_PATH, resources);
        }

        debug!(nodes = builder.nodes.len(), "resource tree built");
        ResourceTree {
            nodes: builder.nodes,
        }
    }

    /// Look up a node by absolute path.
    pub fn get(&self, path: &str) -> Option<&ResourceNode> {
        self.nodes.get(path)
    }

    /// All absolute paths, in discovery order.
    pub fn paths(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    /// Look up a compiled method by absolute path and verb.
    pub fn method(&self, path: &str, verb: &str) -> Option<&MethodDefinition> {
        self.nodes.get(path).and_then(|node| node.methods.get(verb))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate `(absolute path, node)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceNode)> {
        self.nodes.iter().map(|(path, node)| (path.as_str(), node))
    }
}

struct TreeBuilder<'a> {
    doc: &'a RamlDocument,
    nodes: IndexMap<String, ResourceNode>,
}

impl TreeBuilder<'_> {
    /// Attach one `/`-prefixed declaration below `node_path`.
    fn attach_resource(&mut self, node_path: &str, path: &str, resource: &Value) {
        let segments = split_path(path);
        self.extract_paths(node_path, &segments, resource);
    }

    /// Walk the remaining segments of a declared path, one node per level.
    fn extract_paths(&mut self, node_path: &str, segments: &[&str], resource: &Value) {
        let Some((&segment, rest)) = segments.split_first() else {
            self.compile_value(node_path, resource);
            return;
        };

        if segment.ends_with(MEDIA_TYPE_SUFFIX) {
            let declared = resource.get("uriParameters").and_then(Value::as_object);
            let extensions = media_type_extensions(declared, self.doc.media_type.as_deref());
            if !extensions.is_empty() {
                // Only the expanded variants become nodes; the unexpanded
                // branch is abandoned here.
                for extension in &extensions {
                    let expanded = expand_segment(segment, extension);
                    trace!(segment, expanded = %expanded, "media type extension expanded");
                    self.extract_segment(node_path, &expanded, rest, resource);
                }
                return;
            }
        }

        self.extract_segment(node_path, segment, rest, resource);
    }

    fn extract_segment(&mut self, node_path: &str, segment: &str, rest: &[&str], resource: &Value) {
        // A bare `/` is the root itself, never a new node.
        let next_path = if segment == "/" {
            node_path.to_string()
        } else {
            self.descend(node_path, segment, resource)
        };

        if rest.is_empty() {
            self.compile_value(&next_path, resource);
        } else {
            self.extract_paths(&next_path, rest, resource);
        }
    }

    /// Descend into the child node for `segment`, creating it on first
    /// reference. A second declaration of the same absolute path reuses the
    /// existing node unchanged.
    fn descend(&mut self, parent_path: &str, segment: &str, resource: &Value) -> String {
        let Some(parent) = self.nodes.get(parent_path) else {
            // Unreachable by construction: parents are created before their
            // children are walked.
            return parent_path.to_string();
        };
        if let Some(existing) = parent.children.get(segment) {
            return existing.clone();
        }

        let absolute_uri = join_paths(&parent.absolute_uri, segment);
        let declared = resource.get("uriParameters").and_then(Value::as_object);
        let relative_params = extract_parameters(segment, declared);

        let mut absolute_params = parent.absolute_uri_parameters.clone();
        for (name, schema) in &relative_params {
            absolute_params.insert(name.clone(), schema.clone());
        }

        trace!(path = %absolute_uri, "resource node created");

        let node = ResourceNode {
            absolute_uri: absolute_uri.clone(),
            relative_uri: segment.to_string(),
            parent: Some(parent_path.to_string()),
            children: IndexMap::new(),
            methods: IndexMap::new(),
            relative_uri_parameters: relative_params,
            absolute_uri_parameters: absolute_params,
        };
        if let Some(parent) = self.nodes.get_mut(parent_path) {
            parent
                .children
                .insert(segment.to_string(), absolute_uri.clone());
        }
        self.nodes.insert(absolute_uri.clone(), node);
        absolute_uri
    }

    fn compile_value(&mut self, node_path: &str, resource: &Value) {
        // `get: null` style declarations carry nothing to compile.
        if let Some(object) = resource.as_object() {
            self.compile(node_path, object);
        }
    }

    /// Compile a resource declaration against its resolved node: sub-paths
    /// recurse, reserved keys are skipped, everything else is a verb.
    fn compile(&mut self, node_path: &str, resource: &Map<String, Value>) {
        for (key, value) in resource {
            if key.starts_with('/') {
                self.attach_resource(node_path, key, value);
            } else if UNAPPLIED_KEYS.contains(&key.as_str()) || key == "uriParameters" {
                // type/is are unapplied; uriParameters was consumed during
                // parameter extraction
                continue;
            } else {
                self.attach_method(node_path, key, value);
            }
        }
    }

    fn attach_method(&mut self, node_path: &str, verb: &str, method: &Value) {
        let secured_by = method
            .get("securedBy")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .or(self.doc.secured_by.as_deref());
        let secured_by = resolve_secured_by(secured_by, &self.doc.security_schemes);

        let definition = MethodDefinition {
            verb: verb.to_string(),
            resource: node_path.to_string(),
            description: method
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            headers: field(method, "headers"),
            query_parameters: field(method, "queryParameters"),
            body: field(method, "body"),
            responses: field(method, "responses"),
            secured_by,
        };

        if let Some(node) = self.nodes.get_mut(node_path) {
            node.methods.insert(verb.to_string(), definition);
        }
    }
}

fn field(method: &Value, name: &str) -> Option<Value> {
    method.get(name).filter(|value| !value.is_null()).cloned()
}

/// The root's key is `/` but it contributes nothing to child paths; every
/// other segment concatenates directly onto its parent's absolute path.
fn join_paths(parent: &str, segment: &str) -> String {
    if parent == ROOT_PATH {
        segment.to_string()
    } else {
        format!("{parent}{segment}")
    }
}

/// Base-URI template parameters, computed once outside the resource tree.
///
/// A parameter named `version` is merged over `{"type": "string",
/// "default": <document version>}`, so a declaration without an explicit
/// default picks up the document's version string.
pub fn base_uri_parameters(doc: &RamlDocument) -> UriParameters {
    let base_uri = doc.base_uri.as_deref().unwrap_or("");
    let mut params = extract_parameters(base_uri, Some(&doc.base_uri_parameters));

    if let Some(declared) = params.get_mut("version") {
        let mut merged = Map::new();
        merged.insert("type".to_string(), Value::String("string".to_string()));
        if let Some(version) = &doc.version {
            merged.insert("default".to_string(), Value::String(version.clone()));
        }
        if let Some(existing) = declared.as_object() {
            for (key, value) in existing {
                merged.insert(key.clone(), value.clone());
            }
        }
        *declared = Value::Object(merged);
    }

    params
}
