use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CurlsResult, Error};
use crate::fragment::Fragment;
use crate::props::{CSS_PROP, PropValue, Props};
use crate::themes::ComponentTheme;

/// A component entry of a JSON theme, eg the `box` in `{"box": {"defaultProps": {...}}}`.
///
/// Any other key of the entry is left alone: functional style props can read them from the
/// theme values.
#[derive(Debug, Clone, Deserialize, Default)]
pub(crate) struct RawComponentTheme {
    #[serde(rename = "defaultProps", default)]
    pub default_props: Option<Map<String, Value>>,
    #[serde(default)]
    pub kinds: Option<Map<String, Value>>,
}

fn css_from_json(component: &str, value: &Value) -> CurlsResult<PropValue> {
    match value {
        Value::String(s) => Ok(PropValue::Style(Fragment::css(s.as_str()))),
        Value::Array(items) => {
            let mut fragments = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => fragments.push(Fragment::css(s.as_str())),
                    _ => {
                        return Err(Error::InvalidTheme(format!(
                            "'{component}' css entries must be strings"
                        )));
                    }
                }
            }
            Ok(PropValue::Styles(fragments))
        }
        _ => Err(Error::InvalidTheme(format!(
            "'{component}' css must be a string or an array of strings"
        ))),
    }
}

fn prop_from_json(component: &str, key: &str, value: &Value) -> CurlsResult<PropValue> {
    if key == CSS_PROP {
        return css_from_json(component, value);
    }

    match value {
        Value::Null => Ok(PropValue::Null),
        Value::Bool(b) => Ok(PropValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(PropValue::Number).ok_or_else(|| {
            Error::InvalidTheme(format!("'{component}.{key}' is not a finite number"))
        }),
        Value::String(s) => Ok(PropValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Ok(PropValue::Json(value.clone())),
    }
}

fn props_from_json(component: &str, values: &Map<String, Value>) -> CurlsResult<Props> {
    let mut props = Props::with_capacity(values.len());
    for (key, value) in values {
        props.insert(key.as_str(), prop_from_json(component, key, value)?);
    }
    Ok(props)
}

impl RawComponentTheme {
    pub(crate) fn is_empty(&self) -> bool {
        self.default_props.is_none() && self.kinds.is_none()
    }

    pub(crate) fn compile(self, component: &str) -> CurlsResult<ComponentTheme> {
        let default_props = self
            .default_props
            .as_ref()
            .map(|values| props_from_json(component, values))
            .transpose()?;

        let kinds = match &self.kinds {
            Some(kinds) => {
                let mut out = HashMap::with_capacity(kinds.len());
                for (kind, value) in kinds {
                    let Value::Object(values) = value else {
                        return Err(Error::InvalidTheme(format!(
                            "kind '{kind}' of '{component}' must be an object"
                        )));
                    };
                    out.insert(kind.clone(), props_from_json(component, values)?);
                }
                Some(out)
            }
            None => None,
        };

        Ok(ComponentTheme {
            default_props,
            kinds,
        })
    }
}
