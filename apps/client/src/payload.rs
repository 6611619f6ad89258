use serde_json::{Map, Value};

/// Strips blank form fields from a JSON payload before it is sent.
///
/// Removes `null` and `""` members, drops those values from arrays, and
/// removes arrays and nested objects that end up empty. `false` and `0` are
/// kept. Non-object input is returned unchanged.
pub fn clean_empty_values(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(clean_object(map)),
        other => other,
    }
}

fn clean_object(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(key, value)| clean_member(value).map(|v| (key, v)))
        .collect()
}

fn clean_member(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Object(map) => {
            let cleaned = clean_object(map);
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter(|v| !is_blank(v)).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        other => Some(other),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
