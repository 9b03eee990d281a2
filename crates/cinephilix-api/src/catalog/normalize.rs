//! Backend identifier normalization.

use serde_json::Value;

/// Identifier field name used by the backend storage layer.
pub const BACKEND_ID_FIELD: &str = "_id";

/// Identifier field name exposed to callers.
pub const PUBLIC_ID_FIELD: &str = "id";

/// Rewrites every `_id` field into `id`, depth-first across arrays and
/// nested objects.
///
/// When an object carries both fields, the `_id` value wins and the
/// previous `id` is overwritten. Scalars are left untouched.
pub fn normalize_ids(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(normalize_ids),
        Value::Object(map) => {
            if let Some(id) = map.remove(BACKEND_ID_FIELD) {
                map.insert(String::from(PUBLIC_ID_FIELD), id);
            }
            map.values_mut().for_each(normalize_ids);
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
