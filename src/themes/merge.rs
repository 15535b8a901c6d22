use serde_json::Value;

/// Deep merges `source` onto `target`, returning a new value.
///
/// Objects merge key-wise and recursively, keeping the position of keys `target` already
/// has. Arrays are not merged: the array of `source` replaces the one of `target`. Any other
/// combination takes the value of `source`.
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            let mut out = target.clone();
            for (key, value) in source {
                let merged = match out.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }
        (_, source) => source.clone(),
    }
}
