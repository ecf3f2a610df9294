//! Field lookup inside a record's trigger payload.
//!
//! Paths are not a query language.  Only two shapes are special:
//! - `email.<key>` → `trigger.data[<key>]` (anything after the second segment is ignored)
//! - `trigger[.…]` → the whole `trigger.data` mapping
//!
//! Every other path is used verbatim as a single payload key, dots included.

use serde_json::Value;

use crate::record::WorkflowRecord;

/// Resolve `field_path` against `record`.  Missing keys yield `None`.
pub fn resolve(field_path: &str, record: &WorkflowRecord) -> Option<Value> {
    let mut segments = field_path.split('.');
    let data = &record.trigger.data;

    match segments.next() {
        Some("email") => segments.next().and_then(|key| data.get(key)).cloned(),
        Some("trigger") => Some(Value::Object(data.clone())),
        _ => data.get(field_path).cloned(),
    }
}

/// Textual form of a payload value used for comparisons and templates.
///
/// `null` has no textual form.  Objects and arrays render as compact JSON.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}
