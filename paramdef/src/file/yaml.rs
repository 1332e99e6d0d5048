//! Conversion of parsed YAML into the JSON value tree.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;

/// Convert a YAML value, stringifying scalar mapping keys.
///
/// Bin ids are commonly written as bare integers (`0: {age: 1}`), so numeric
/// and boolean keys become their textual form. Tags are dropped.
pub(super) fn yaml_to_json(value: YamlValue) -> Result<Value, String> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(flag) => Value::Bool(flag),
        YamlValue::Number(number) => Value::Number(convert_number(&number)?),
        YamlValue::String(text) => Value::String(text),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, item) in entries {
                map.insert(key_string(key)?, yaml_to_json(item)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn convert_number(number: &serde_yaml::Number) -> Result<Number, String> {
    if let Some(int) = number.as_i64() {
        return Ok(Number::from(int));
    }
    if let Some(uint) = number.as_u64() {
        return Ok(Number::from(uint));
    }
    number
        .as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| format!("{number} cannot be represented as a finite number"))
}

fn key_string(key: YamlValue) -> Result<String, String> {
    match key {
        YamlValue::String(text) => Ok(text),
        YamlValue::Number(number) => Ok(number.to_string()),
        YamlValue::Bool(flag) => Ok(flag.to_string()),
        YamlValue::Null => Ok("null".to_owned()),
        YamlValue::Tagged(tagged) => key_string(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            Err("mapping keys must be scalars".to_owned())
        }
    }
}
