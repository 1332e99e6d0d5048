//! Structural merge of nested JSON trees.
//!
//! Override layers are combined with [`merge_value`], and `bin` fields use the
//! same function to lay caller-supplied bins over the schema's default set.

use serde_json::{Map, Value};

/// Merge `overlay` onto `base`, returning a new tree.
///
/// Behaviour:
/// - When both sides are objects, the result holds every key of `base` in its
///   original order, keys present on both sides are merged recursively, and
///   keys only present in `overlay` are appended.
/// - Otherwise `overlay` replaces `base` wholesale. This covers scalars,
///   arrays, and a mapping meeting a non-mapping in either direction.
///
/// Neither input is modified.
///
/// # Examples
///
/// ```rust
/// use paramdef::merge_value;
/// use serde_json::json;
///
/// let base = json!({"a": 1, "b": {"x": 1}});
/// let merged = merge_value(&base, &json!({"b": {"y": 2}, "c": 3}));
/// assert_eq!(merged, json!({"a": 1, "b": {"x": 1, "y": 2}, "c": 3}));
///
/// // Arrays replace existing values.
/// let replaced = merge_value(&merged, &json!({"b": [1, 2, 3]}));
/// assert_eq!(replaced["b"], json!([1, 2, 3]));
/// ```
#[must_use]
pub fn merge_value(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }
        _ => overlay.clone(),
    }
}

/// Merge two objects with the same rules as [`merge_value`].
#[must_use]
pub fn merge_maps(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        let entry = base
            .get(key)
            .map_or_else(|| value.clone(), |existing| merge_value(existing, value));
        merged.insert(key.clone(), entry);
    }
    merged
}

/// Fold `layers` left to right onto an empty object; later layers win.
///
/// # Examples
///
/// ```rust
/// use paramdef::merge_layers;
/// use serde_json::json;
///
/// let layers = [json!({"port": 1, "host": "a"}), json!({"port": 2})];
/// assert_eq!(merge_layers(&layers), json!({"port": 2, "host": "a"}));
/// ```
#[must_use]
pub fn merge_layers<'a, I>(layers: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    layers
        .into_iter()
        .fold(Value::Object(Map::new()), |acc, layer| {
            merge_value(&acc, layer)
        })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::{merge_layers, merge_value};

    #[rstest]
    #[case::scalar_conflict(json!({"k": 1}), json!({"k": 2}), json!({"k": 2}))]
    #[case::nested(
        json!({"a": {"x": 1, "y": 1}}),
        json!({"a": {"y": 2}}),
        json!({"a": {"x": 1, "y": 2}})
    )]
    #[case::scalar_replaced_by_mapping(json!({"a": 1}), json!({"a": {"b": 2}}), json!({"a": {"b": 2}}))]
    #[case::mapping_replaced_by_scalar(json!({"a": {"b": 2}}), json!({"a": 1}), json!({"a": 1}))]
    #[case::non_mapping_base(json!(5), json!({"a": 1}), json!({"a": 1}))]
    #[case::non_mapping_overlay(json!({"a": 1}), json!([1, 2]), json!([1, 2]))]
    fn overlay_wins_on_conflict(#[case] base: Value, #[case] overlay: Value, #[case] expected: Value) {
        assert_eq!(merge_value(&base, &overlay), expected);
    }

    #[test]
    fn merge_leaves_inputs_untouched() {
        let base = json!({"a": {"x": 1}});
        let overlay = json!({"a": {"y": 2}});
        let _merged = merge_value(&base, &overlay);
        assert_eq!(base, json!({"a": {"x": 1}}));
        assert_eq!(overlay, json!({"a": {"y": 2}}));
    }

    #[test]
    fn merge_keeps_base_order_then_appends() {
        let merged = merge_value(&json!({"b": 1, "a": 1}), &json!({"c": 1, "b": 2}));
        let keys: Vec<&str> = merged
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn later_layers_win() {
        let layers = [
            json!({"cat": {"num": 1, "color": "brown"}}),
            json!({"cat": {"num": 2}}),
            json!({"cat": {"color": "indigo"}, "dog": {"num": 3}}),
        ];
        assert_eq!(
            merge_layers(&layers),
            json!({"cat": {"num": 2, "color": "indigo"}, "dog": {"num": 3}})
        );
    }

    #[test]
    fn no_layers_yield_empty_object() {
        assert_eq!(merge_layers(&[] as &[Value]), json!({}));
    }
}
