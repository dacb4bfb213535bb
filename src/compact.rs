use serde_json::{Map, Value};

/// Builds a mapping from candidate fields, dropping every entry whose value is vacant.
///
/// Insertion order is preserved. Only the top level is inspected: nested mappings must be
/// compacted by the caller before they are passed in. Falsy scalars (`0`, `""`, `false`) are
/// kept.
pub fn compact<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter(|(_, value)| !is_vacant(value))
        .map(|(key, value)| (key.into(), value))
        .collect()
}

/// `null`, `[]` and `{}` carry no information in reduced output.
pub fn is_vacant(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}
