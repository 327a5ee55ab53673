//! `{mediaTypeExtension}` placeholder expansion.
//!
//! A path segment ending in the literal `{mediaTypeExtension}` token expands
//! into one concrete segment per declared extension (`/api.json`,
//! `/api.xml`, ...). When expansion applies, only the expanded variants are
//! registered in the tree — the unexpanded path never becomes a node.

use serde_json::{Map, Value};

/// Reserved placeholder suffix that triggers expansion.
pub(crate) const MEDIA_TYPE_SUFFIX: &str = "{mediaTypeExtension}";

/// Media types with a well-known file extension.
const MEDIA_TYPE_TO_EXT: [(&str, &str); 2] = [("application/json", "json"), ("text/xml", "xml")];

/// Concrete extensions for a segment ending in the placeholder.
///
/// Prefers the declared `mediaTypeExtension.enum` entries (one leading `.`
/// stripped, first occurrence wins, order preserved), falling back to the
/// top-level media type when it maps to a known extension. An empty result
/// means no expansion: the placeholder stays and behaves like an ordinary
/// template parameter.
pub fn media_type_extensions(
    declared: Option<&Map<String, Value>>,
    media_type: Option<&str>,
) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();

    let declared_enum = declared
        .and_then(|params| params.get("mediaTypeExtension"))
        .and_then(|schema| schema.get("enum"))
        .and_then(Value::as_array);

    if let Some(entries) = declared_enum {
        for entry in entries.iter().filter_map(Value::as_str) {
            let extension = entry.strip_prefix('.').unwrap_or(entry);
            if !extensions.iter().any(|e| e == extension) {
                extensions.push(extension.to_string());
            }
        }
    }

    if extensions.is_empty() {
        if let Some(media_type) = media_type {
            if let Some((_, ext)) = MEDIA_TYPE_TO_EXT.iter().find(|(mt, _)| *mt == media_type) {
                extensions.push((*ext).to_string());
            }
        }
    }

    extensions
}

/// Replace the trailing placeholder of `segment` with `.{extension}`.
pub(crate) fn expand_segment(segment: &str, extension: &str) -> String {
    let base = segment.strip_suffix(MEDIA_TYPE_SUFFIX).unwrap_or(segment);
    format!("{base}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_wins_over_media_type() {
        let declared = json!({ "mediaTypeExtension": { "enum": [".json", ".xml"] } });
        let extensions =
            media_type_extensions(declared.as_object(), Some("application/json"));
        assert_eq!(extensions, vec!["json", "xml"]);
    }

    #[test]
    fn test_enum_deduplicates_after_dot_strip() {
        let declared = json!({ "mediaTypeExtension": { "enum": [".json", "json", ".xml"] } });
        let extensions = media_type_extensions(declared.as_object(), None);
        assert_eq!(extensions, vec!["json", "xml"]);
    }

    #[test]
    fn test_media_type_fallback() {
        assert_eq!(media_type_extensions(None, Some("application/json")), vec!["json"]);
        assert_eq!(media_type_extensions(None, Some("text/xml")), vec!["xml"]);
    }

    #[test]
    fn test_unknown_media_type_yields_nothing() {
        assert!(media_type_extensions(None, Some("text/plain")).is_empty());
        assert!(media_type_extensions(None, None).is_empty());
    }

    #[test]
    fn test_expand_segment_replaces_suffix() {
        assert_eq!(expand_segment("/api{mediaTypeExtension}", "json"), "/api.json");
    }
}
