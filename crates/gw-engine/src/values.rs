//! Conversions between JSON values and engine parameter/result values.
//!
//! Result coercion probes typed getters in order (i64 -> f64 -> bool ->
//! String) because the engine driver reports `Ok(None)` rather than an error
//! for mismatched nullable reads.

use duckdb::types::Value as DuckValue;
use serde_json::Value as JsonValue;

/// Convert a JSON scalar to an engine parameter value.
///
/// Arrays and objects have no parameter representation; they are bound as
/// their JSON text, which only matters for error paths (filter validation
/// rejects them earlier).
pub fn json_to_param(value: &JsonValue) -> DuckValue {
    match value {
        JsonValue::Null => DuckValue::Null,
        JsonValue::Bool(b) => DuckValue::Boolean(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DuckValue::BigInt(i)
            } else {
                DuckValue::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => DuckValue::Text(s.clone()),
        other => DuckValue::Text(other.to_string()),
    }
}

/// Read one result cell as a JSON value.
pub fn cell_to_json(row: &duckdb::Row<'_>, idx: usize) -> JsonValue {
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return JsonValue::from(n);
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        if f.is_nan() {
            return JsonValue::Null;
        }
        return serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null);
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return JsonValue::Bool(b);
    }
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return JsonValue::String(s);
    }
    JsonValue::Null
}

#[cfg(test)]
#[path = "values_test.rs"]
mod tests;
