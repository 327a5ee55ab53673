//! Load already-parsed descriptions from JSON or YAML files.

use anyhow::Context;
use serde_json::Value;

use super::types::RamlDocument;
use crate::model::RamlModel;

/// Read a description from a file. `.yaml`/`.yml` paths are parsed as YAML,
/// anything else as JSON. This is a convenience over handing a value to
/// [`RamlDocument::from_value`] directly; the textual RAML format itself is
/// not parsed here.
pub fn load_document(file_path: &str) -> anyhow::Result<RamlDocument> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read {file_path}"))?;
    let value: Value = if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    RamlDocument::from_value(value)
}

/// Load a description file and build the queryable model in one step.
pub fn load_model(file_path: &str) -> anyhow::Result<RamlModel> {
    Ok(RamlModel::new(load_document(file_path)?))
}
