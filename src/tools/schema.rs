//! Input validation against the JSON Schema derived for each tool's parameters

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Validate `input` against the schema of `T`, then deserialize it.
///
/// A `null` input is treated as an empty object so tools without required
/// fields can be called with no body.
pub fn parse_input<T: DeserializeOwned + JsonSchema>(input: Value) -> Result<T> {
    let schema = serde_json::to_value(schemars::schema_for!(T))?;
    let input = match input {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    validate_input(&schema, &input)?;

    serde_json::from_value(input).map_err(|e| Error::validation("input", e.to_string()))
}

/// Check required fields, unknown fields, JSON types and lower bounds
pub fn validate_input(schema: &Value, input: &Value) -> Result<()> {
    let fields = input
        .as_object()
        .ok_or_else(|| Error::validation("input", "expected a JSON object"))?;

    let properties = schema.get("properties").and_then(Value::as_object);

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if fields.get(name).map_or(true, Value::is_null) {
                return Err(Error::validation(name, "missing required field"));
            }
        }
    }

    for (name, value) in fields {
        let property = properties
            .and_then(|p| p.get(name))
            .ok_or_else(|| Error::validation(name, "unknown field"))?;
        check_value(name, property, value)?;
    }

    Ok(())
}

fn check_value(field: &str, property: &Value, value: &Value) -> Result<()> {
    let allowed = allowed_types(property);
    if allowed.is_empty() {
        return Ok(());
    }

    let actual = json_type(value);
    let accepted = allowed.contains(&actual) || (actual == "integer" && allowed.contains(&"number"));
    if !accepted {
        return Err(Error::validation(
            field,
            format!("expected {}, got {}", allowed.join(" or "), actual),
        ));
    }

    if let (Some(min), Some(n)) = (property.get("minimum").and_then(Value::as_f64), value.as_f64()) {
        if n < min {
            return Err(Error::validation(field, format!("must be at least {}", min)));
        }
    }

    if let (Some(max), Some(n)) = (upper_bound(property), value.as_f64()) {
        if n > max {
            return Err(Error::validation(field, format!("must be at most {}", max)));
        }
    }

    if let (Some(items), Some(elements)) = (property.get("items"), value.as_array()) {
        for (i, element) in elements.iter().enumerate() {
            check_value(&format!("{}[{}]", field, i), items, element)?;
        }
    }

    Ok(())
}

/// Explicit `maximum`, else the range implied by an integer `format`
fn upper_bound(property: &Value) -> Option<f64> {
    if let Some(max) = property.get("maximum").and_then(Value::as_f64) {
        return Some(max);
    }

    match property.get("format").and_then(Value::as_str)? {
        "uint8" => Some(u8::MAX as f64),
        "uint16" => Some(u16::MAX as f64),
        "uint32" => Some(u32::MAX as f64),
        "int8" => Some(i8::MAX as f64),
        "int16" => Some(i16::MAX as f64),
        "int32" => Some(i32::MAX as f64),
        _ => None,
    }
}

fn allowed_types(property: &Value) -> Vec<&str> {
    match property.get("type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct Sample {
        name: String,
        count: Option<u32>,
        tags: Option<Vec<String>>,
    }

    #[test]
    fn test_accepts_valid_input() {
        let sample: Sample = parse_input(json!({"name": "x", "count": 3, "tags": ["a"]})).unwrap();
        assert_eq!(sample.name, "x");
        assert_eq!(sample.count, Some(3));
        assert_eq!(sample.tags.unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_names_offending_field() {
        let cases = [
            (json!({}), "name"),
            (json!({"name": null}), "name"),
            (json!({"name": 5}), "name"),
            (json!({"name": "x", "count": -1}), "count"),
            (json!({"name": "x", "count": 1.5}), "count"),
            (json!({"name": "x", "count": 4_294_967_296u64}), "count"),
            (json!({"name": "x", "tags": ["a", 2]}), "tags[1]"),
            (json!({"name": "x", "colour": "red"}), "colour"),
        ];

        for (input, field) in cases {
            let err = parse_input::<Sample>(input.clone()).unwrap_err();
            assert_eq!(err.field(), Some(field), "input {}", input);
        }
    }

    #[test]
    fn test_integer_format_bounds() {
        let sample: Sample = parse_input(json!({"name": "x", "count": u32::MAX})).unwrap();
        assert_eq!(sample.count, Some(u32::MAX));

        let err = parse_input::<Sample>(json!({"name": "x", "count": 5_000_000_000u64})).unwrap_err();
        assert_eq!(err.field(), Some("count"));
        assert!(err.to_string().contains("at most"));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = parse_input::<Sample>(json!([1, 2])).unwrap_err();
        assert_eq!(err.field(), Some("input"));
    }
}
