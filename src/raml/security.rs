//! `securedBy` policy resolution.

use indexmap::IndexMap;
use serde_json::Value;

use super::types::{SecuredBy, SecurityScheme};

/// Reserved key for an explicit anonymous entry in a `securedBy`
/// declaration: authentication is optional and "none" is a valid choice.
pub const ANONYMOUS_SCHEME: &str = "null";

/// Normalize a `securedBy` declaration against the scheme registry.
///
/// Entries are either `null` (mapped to the [`ANONYMOUS_SCHEME`] key), a
/// plain scheme name (mapped to a copy of the registry scheme; unknown names
/// are simply absent from the result), or a single-key map of scheme name to
/// settings overrides (mapped to a copy of the registry scheme with its
/// settings shallow-merged, overrides winning on collision).
///
/// Resolved entries are always copies — the caller's registry is never
/// mutated and never aliased.
pub fn resolve_secured_by(
    secured_by: Option<&[Value]>,
    schemes: &IndexMap<String, SecurityScheme>,
) -> SecuredBy {
    let mut resolved = SecuredBy::new();
    let Some(entries) = secured_by else {
        return resolved;
    };

    for entry in entries {
        match entry {
            Value::Null => {
                resolved.insert(ANONYMOUS_SCHEME.to_string(), None);
            }
            Value::String(name) => {
                if let Some(scheme) = schemes.get(name) {
                    resolved.insert(name.clone(), Some(scheme.clone()));
                }
            }
            Value::Object(overrides) => {
                for (name, settings) in overrides {
                    let mut scheme = schemes.get(name).cloned().unwrap_or_default();
                    if let Value::Object(settings) = settings {
                        for (key, value) in settings {
                            scheme.settings.insert(key.clone(), value.clone());
                        }
                    }
                    resolved.insert(name.clone(), Some(scheme));
                }
            }
            _ => {}
        }
    }

    resolved
}
