//! Value formatting and type-preserving coercion.

use serde_yaml::{Number, Value};

use crate::error::{StoreError, StoreResult};

/// Human readable type name of a value.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "section",
        Value::Tagged(_) => "tagged value",
    }
}

/// Format a value the way the command line tools print it.
///
/// Lists are comma separated, booleans use Fortran literals.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => ".true.".to_string(),
        Value::Bool(false) => ".false.".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(map) => map
            .iter()
            .map(|(k, v)| format!("{} = {}", format_value(k), format_value(v)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Tagged(tagged) => format_value(&tagged.value),
    }
}

/// Parse `text` into a value of the same type as `existing`.
///
/// Lists are given comma separated and typed by their first element;
/// trailing empty items (from a trailing comma) are dropped.
pub fn coerce_like(key: &str, existing: &Value, text: &str) -> StoreResult<Value> {
    match existing {
        Value::Sequence(items) => {
            let mut parts: Vec<&str> = text.split(',').map(str::trim).collect();
            while parts.last().is_some_and(|p| p.is_empty()) {
                parts.pop();
            }

            let template = items.first().cloned().unwrap_or(Value::String(String::new()));
            let values = parts
                .into_iter()
                .map(|part| coerce_scalar(key, &template, part))
                .collect::<StoreResult<Vec<_>>>()?;
            Ok(Value::Sequence(values))
        }
        other => coerce_scalar(key, other, text.trim()),
    }
}

fn coerce_scalar(key: &str, existing: &Value, text: &str) -> StoreResult<Value> {
    match existing {
        Value::Number(n) if n.is_f64() => text
            .parse::<f64>()
            .map(|v| Value::Number(Number::from(v)))
            .map_err(|_| StoreError::invalid_value(key, text, "expected a float")),
        Value::Number(_) => text
            .parse::<i64>()
            .map(|v| Value::Number(Number::from(v)))
            .map_err(|_| StoreError::invalid_value(key, text, "expected an integer")),
        Value::String(_) => Ok(Value::String(text.to_string())),
        Value::Bool(_) => parse_bool(text)
            .map(Value::Bool)
            .ok_or_else(|| StoreError::invalid_value(key, text, "use .true. or .false.")),
        other => Err(StoreError::invalid_value(
            key,
            text,
            format!("unsupported type {}", type_name(other)),
        )),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        ".true." | "true" | "t" => Some(true),
        ".false." | "false" | "f" => Some(false),
        _ => None,
    }
}

/// Read an integer, accepting floats with no fractional part.
pub fn expect_i64(key: &str, value: &Value) -> StoreResult<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| StoreError::type_mismatch(key, "an integer", value)),
        _ => Err(StoreError::type_mismatch(key, "an integer", value)),
    }
}

/// Read a number as f64.
pub fn expect_f64(key: &str, value: &Value) -> StoreResult<f64> {
    value
        .as_f64()
        .ok_or_else(|| StoreError::type_mismatch(key, "a number", value))
}

/// Read a string.
pub fn expect_string(key: &str, value: &Value) -> StoreResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| StoreError::type_mismatch(key, "a string", value))
}
