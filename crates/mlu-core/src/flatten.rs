//! Flattening of nested JSON objects into single-level keys.
//!
//! Used to turn nested experiment configs into the flat parameter maps
//! experiment trackers accept.

use serde_json::{Map, Value};

/// Separator used when none is given.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Flatten nested objects, joining keys with `sep`.
///
/// `{"opt": {"lr": 0.1}}` becomes `{"opt_lr": 0.1}`. Arrays and scalars are
/// leaves. A nested empty object contributes no keys.
pub fn flatten(map: &Map<String, Value>, sep: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(map, None, sep, &mut out);
    out
}

fn flatten_into(map: &Map<String, Value>, parent: Option<&str>, sep: &str, out: &mut Map<String, Value>) {
    for (key, value) in map {
        let full_key = match parent {
            Some(parent) => format!("{parent}{sep}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => flatten_into(nested, Some(&full_key), sep, out),
            leaf => {
                out.insert(full_key, leaf.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_flatten_nested() {
        let config = object(json!({
            "model": {"depth": 18, "head": {"dropout": 0.1}},
            "seed": 42,
            "tags": ["a", "b"]
        }));

        let flat = flatten(&config, DEFAULT_SEPARATOR);
        assert_eq!(flat.get("model_depth"), Some(&json!(18)));
        assert_eq!(flat.get("model_head_dropout"), Some(&json!(0.1)));
        assert_eq!(flat.get("seed"), Some(&json!(42)));
        assert_eq!(flat.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn test_flatten_custom_separator() {
        let config = object(json!({"optimizer": {"lr": 0.001}}));
        let flat = flatten(&config, ".");
        assert_eq!(flat.get("optimizer.lr"), Some(&json!(0.001)));
    }

    #[test]
    fn test_empty_nested_object_contributes_nothing() {
        let config = object(json!({"callbacks": {}, "epochs": 10}));
        let flat = flatten(&config, DEFAULT_SEPARATOR);
        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key("epochs"));
    }

    #[test]
    fn test_flat_input_is_unchanged() {
        let config = object(json!({"a": 1, "b": null}));
        assert_eq!(flatten(&config, DEFAULT_SEPARATOR), config);
    }
}
