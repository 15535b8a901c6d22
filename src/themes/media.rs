//! Conversion of breakpoint descriptors into media query text.
use serde_json::{Map, Number, Value};

use crate::error::{CurlsResult, Error};

fn min_width_px(width: &str) -> String {
    format!("only screen and (min-width: {width}px)")
}

fn is_numeric(s: &str) -> bool {
    let s = s.trim();
    !s.is_empty() && s.parse::<f64>().is_ok()
}

fn format_number(n: &Number) -> String {
    // 35.0 coming from a float parse still prints as `35`
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && n.is_f64() && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

/// `minWidth` -> `min-width`
fn camel_to_kebab(feature: &str) -> String {
    let mut out = String::with_capacity(feature.len() + 4);
    for c in feature.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn is_dimension(feature: &str) -> bool {
    feature.ends_with("width") || feature.ends_with("height")
}

fn object_to_query(name: &str, conditions: &Map<String, Value>) -> CurlsResult<String> {
    let mut parts = Vec::with_capacity(conditions.len());

    for (feature, value) in conditions {
        let feature = camel_to_kebab(feature);
        let part = match value {
            Value::Bool(true) => feature,
            Value::Bool(false) => format!("not {feature}"),
            Value::Number(n) if is_dimension(&feature) => {
                format!("({feature}: {}px)", format_number(n))
            }
            Value::Number(n) => format!("({feature}: {})", format_number(n)),
            Value::String(s) => format!("({feature}: {s})"),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(Error::InvalidBreakpoint {
                    name: name.to_string(),
                    reason: format!("unsupported value for media feature '{feature}'"),
                });
            }
        };
        parts.push(part);
    }

    Ok(parts.join(" and "))
}

/// Turns a breakpoint descriptor into the predicate text of its conditional block.
///
/// - a number (or numeric string) is a minimum width in pixels
/// - any other string is used as is
/// - an object describes media features: `{"screen": true, "minWidth": 1280}` becomes
///   `screen and (min-width: 1280px)`
/// - an array of those is joined into a query list
pub fn media_query(name: &str, descriptor: &Value) -> CurlsResult<String> {
    match descriptor {
        Value::Number(n) => Ok(min_width_px(&format_number(n))),
        Value::String(s) if is_numeric(s) => Ok(min_width_px(s.trim())),
        Value::String(s) => Ok(s.clone()),
        Value::Object(conditions) => object_to_query(name, conditions),
        Value::Array(queries) => {
            let mut parts = Vec::with_capacity(queries.len());
            for query in queries {
                match query {
                    Value::Object(conditions) => parts.push(object_to_query(name, conditions)?),
                    Value::String(s) => parts.push(s.clone()),
                    _ => {
                        return Err(Error::InvalidBreakpoint {
                            name: name.to_string(),
                            reason: "query lists can only hold objects and strings".to_string(),
                        });
                    }
                }
            }
            Ok(parts.join(", "))
        }
        Value::Null | Value::Bool(_) => Err(Error::InvalidBreakpoint {
            name: name.to_string(),
            reason: "expected a number, a string, an object or an array".to_string(),
        }),
    }
}
