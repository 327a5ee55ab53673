//! Path segmentation and URI template helpers.
//!
//! Resource paths are split immediately *before* each `/`, so segments keep
//! their leading slash and concatenating them reproduces the original path.
//! Template parameters are the non-nested `{name}` tokens inside a segment
//! or base URI.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};

use super::types::UriParameters;

/// Matches a single non-nested `{name}` template token.
static TEMPLATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^{}]+\}").expect("template token regex should be valid"));

/// Matches a trailing `{...}` suffix when deriving resource names.
static TRAILING_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{.+\}$").expect("trailing parameter regex should be valid"));

/// Split a resource path into segments, each beginning with `/`.
///
/// A bare `/` produces a single `/` segment, which the tree builder treats
/// as "no new node". No segment is ever empty.
pub fn split_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (idx, _) in path.match_indices('/') {
        if idx > start {
            segments.push(&path[start..idx]);
            start = idx;
        }
    }
    if start < path.len() {
        segments.push(&path[start..]);
    }
    segments
}

/// Extract the template parameters of `path` into a definition map.
///
/// Each `{name}` token resolves to the caller-declared schema for `name`
/// when one is present and non-null, and to `{"type": "string"}` otherwise.
/// Order of first appearance is kept; duplicate names collapse.
pub fn extract_parameters(path: &str, declared: Option<&Map<String, Value>>) -> UriParameters {
    let mut params = UriParameters::new();
    for token in TEMPLATE_RE.find_iter(path) {
        let name = param_name(token.as_str());
        if params.contains_key(name) {
            continue;
        }
        let schema = declared
            .and_then(|map| map.get(name))
            .filter(|schema| !schema.is_null())
            .cloned()
            .unwrap_or_else(|| json!({ "type": "string" }));
        params.insert(name.to_string(), schema);
    }
    params
}

/// Fill a URI template from caller values, falling back to declared defaults.
///
/// Each `{name}` token resolves to `values[name]`, else the `default` of the
/// declared parameter, else the empty string. The empty-string fallback is a
/// deliberate, documented sharp edge — unresolved parameters never fail.
pub fn fill_template(
    path: &str,
    values: &IndexMap<String, String>,
    declared: &UriParameters,
) -> String {
    TEMPLATE_RE
        .replace_all(path, |caps: &regex::Captures<'_>| {
            let name = param_name(&caps[0]);
            if let Some(value) = values.get(name) {
                return value.clone();
            }
            declared
                .get(name)
                .and_then(|schema| schema.get("default"))
                .filter(|default| !default.is_null())
                .map(stringify_default)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Derive a human-readable name from a relative URI.
///
/// Strips one leading `/` or `.`; a segment that is exactly one `{param}`
/// yields the parameter name; otherwise a trailing `{...}` suffix is
/// stripped from the static text.
pub fn resource_name(relative_uri: &str) -> String {
    let name = relative_uri
        .strip_prefix('/')
        .or_else(|| relative_uri.strip_prefix('.'))
        .unwrap_or(relative_uri);

    if let Some(token) = TEMPLATE_RE.find(name) {
        if token.start() == 0 && token.end() == name.len() {
            return param_name(token.as_str()).to_string();
        }
    }

    TRAILING_PARAM_RE.replace(name, "").into_owned()
}

fn param_name(token: &str) -> &str {
    &token[1..token.len() - 1]
}

fn stringify_default(default: &Value) -> String {
    match default {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
