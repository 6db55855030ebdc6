//! Nested translation maps as loaded from `languages/<code>.json`.

use serde_json::{Map, Value};
use thiserror::Error;

/// Tree of translation keys: every node is either a string leaf or a sub-map.
///
/// The tree is kept as loaded and walked by dotted key at lookup time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationMap {
    root: Map<String, Value>,
}

/// Why a translation payload could not be turned into a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the root, found {0}")]
    NotAnObject(&'static str),
}

/// Why a dotted key did not resolve to a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("translation key not found: {key} (missing segment '{segment}')")]
    Missing { key: String, segment: String },

    #[error("translation key does not name a string: {key}")]
    NotALeaf { key: String },
}

impl TranslationMap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON document whose root is an object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, MapError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, MapError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(MapError::NotAnObject(json_kind(&other))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Resolve a dotted key such as `hero.title_main`.
    pub fn lookup(&self, key: &str) -> Result<&str, LookupError> {
        let mut segments = key.split('.');
        // split always yields at least one segment
        let first = segments.next().unwrap_or_default();
        let mut current = self.root.get(first).ok_or_else(|| LookupError::Missing {
            key: key.to_string(),
            segment: first.to_string(),
        })?;

        for segment in segments {
            current = current
                .as_object()
                .and_then(|map| map.get(segment))
                .ok_or_else(|| LookupError::Missing {
                    key: key.to_string(),
                    segment: segment.to_string(),
                })?;
        }

        current.as_str().ok_or_else(|| LookupError::NotALeaf {
            key: key.to_string(),
        })
    }

    /// Dotted keys of every string leaf, sorted.
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(&self.root, "", &mut keys);
        keys.sort();
        keys
    }
}

fn collect_leaf_keys(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (name, value) in map {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            Value::String(_) => out.push(key),
            Value::Object(child) => collect_leaf_keys(child, &key, out),
            _ => {}
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> TranslationMap {
        TranslationMap::from_value(json!({
            "hero": { "title_main": "Your Cocoa Source", "stats": { "years": "Years" } },
            "footer": "Kakao Balkan",
            "count": 3
        }))
        .unwrap()
    }

    #[test]
    fn test_lookup_leaf() {
        let map = sample();
        assert_eq!(map.lookup("hero.title_main").unwrap(), "Your Cocoa Source");
        assert_eq!(map.lookup("hero.stats.years").unwrap(), "Years");
        assert_eq!(map.lookup("footer").unwrap(), "Kakao Balkan");
    }

    #[test]
    fn test_lookup_missing_segment() {
        let err = sample().lookup("hero.missing").unwrap_err();
        assert_eq!(
            err,
            LookupError::Missing {
                key: "hero.missing".to_string(),
                segment: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_lookup_through_leaf_is_missing() {
        let err = sample().lookup("footer.text").unwrap_err();
        assert!(matches!(err, LookupError::Missing { .. }));
    }

    #[test]
    fn test_lookup_sub_map_is_not_a_leaf() {
        let err = sample().lookup("hero").unwrap_err();
        assert!(matches!(err, LookupError::NotALeaf { .. }));
        assert!(matches!(
            sample().lookup("count").unwrap_err(),
            LookupError::NotALeaf { .. }
        ));
    }

    #[test]
    fn test_empty_map_misses_everything() {
        let map = TranslationMap::empty();
        assert!(map.is_empty());
        assert!(map.lookup("hero.title_main").is_err());
        assert!(map.lookup("").is_err());
    }

    #[test]
    fn test_from_slice_rejects_non_objects() {
        assert!(matches!(
            TranslationMap::from_slice(b"[1, 2]").unwrap_err(),
            MapError::NotAnObject("an array")
        ));
        assert!(matches!(
            TranslationMap::from_slice(b"{ not json").unwrap_err(),
            MapError::Json(_)
        ));
    }

    #[test]
    fn test_leaf_keys_are_flattened_and_sorted() {
        assert_eq!(
            sample().leaf_keys(),
            vec!["footer", "hero.stats.years", "hero.title_main"]
        );
    }
}
