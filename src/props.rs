use std::borrow::Cow;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::element::Node;
use crate::fragment::Fragment;

/// The prop holding style fragments, both as input and as output of style resolution
pub const CSS_PROP: &str = "css";
/// The prop selecting a theme variant
pub const KIND_PROP: &str = "kind";

/// A single prop value.
///
/// An absent key in [`Props`] is the "undefined" value: it never reaches a style producer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// A single fragment in the `css` prop
    Style(Fragment),
    /// Several fragments in the `css` prop
    Styles(Vec<Fragment>),
    Children(Vec<Node>),
    /// Structured data, eg an object or array coming from a JSON theme. Passed through as is.
    Json(Value),
}

impl PropValue {
    /// `false` and `null` turn boolean style props off and are never an unknown enum value.
    #[inline]
    pub fn is_false_or_null(&self) -> bool {
        matches!(self, PropValue::Null | PropValue::Bool(false))
    }

    /// The text of a [`PropValue::Text`]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The key used to look this value up in an enum style producer.
    /// Scalars use their textual form, fragments and children have none.
    pub fn key(&self) -> Option<Cow<'_, str>> {
        match self {
            PropValue::Null => Some(Cow::Borrowed("null")),
            PropValue::Bool(true) => Some(Cow::Borrowed("true")),
            PropValue::Bool(false) => Some(Cow::Borrowed("false")),
            PropValue::Number(n) => Some(Cow::Owned(format_number(*n))),
            PropValue::Text(s) => Some(Cow::Borrowed(s)),
            PropValue::Style(_)
            | PropValue::Styles(_)
            | PropValue::Children(_)
            | PropValue::Json(_) => None,
        }
    }

    /// The fragments held by a `css` prop value, if it is one.
    pub fn fragments(&self) -> Option<&[Fragment]> {
        match self {
            PropValue::Style(f) => Some(std::slice::from_ref(f)),
            PropValue::Styles(f) => Some(f),
            _ => None,
        }
    }
}

/// Integers print without a fractional part, `1.5` stays `1.5`.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(f64::from(n))
    }
}

impl From<Fragment> for PropValue {
    fn from(f: Fragment) -> Self {
        PropValue::Style(f)
    }
}

impl From<Vec<Fragment>> for PropValue {
    fn from(f: Vec<Fragment>) -> Self {
        PropValue::Styles(f)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}

/// Props of a component, in insertion order.
///
/// Inserting an existing key replaces its value in place, like assigning to an existing
/// object property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Props {
    entries: Vec<(String, PropValue)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builder version of [`Props::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the previous value if the key was already set.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes a key, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// A copy of these props without the keys for which `exclude` returns true.
    pub fn without(&self, exclude: impl Fn(&str) -> bool) -> Props {
        self.entries
            .iter()
            .filter(|(k, _)| !exclude(k))
            .cloned()
            .collect()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

impl<K: Into<String>, V: Into<PropValue>, const N: usize> From<[(K, V); N]> for Props {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = std::vec::IntoIter<(String, PropValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Props {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut props = Props::from([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(props.insert("b", "two"), Some(PropValue::Number(2.0)));
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(props.get("b"), Some(&PropValue::from("two")));

        assert_eq!(props.remove("a"), Some(PropValue::Number(1.0)));
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(props.remove("a"), None);
    }

    #[test]
    fn enum_keys_use_textual_form() {
        assert_eq!(PropValue::from(true).key().as_deref(), Some("true"));
        assert_eq!(PropValue::from(4).key().as_deref(), Some("4"));
        assert_eq!(PropValue::from(1.5).key().as_deref(), Some("1.5"));
        assert_eq!(PropValue::Null.key().as_deref(), Some("null"));
        assert_eq!(PropValue::from(Fragment::css("a: b;")).key(), None);
        assert_eq!(PropValue::Json(serde_json::json!({"color": "red"})).key(), None);
    }

    #[test]
    fn serializes_in_insertion_order() {
        let props = Props::new()
            .with("z", "last")
            .with("a", Option::<bool>::None)
            .with("css", vec![Fragment::css("display: none;")]);
        insta::assert_yaml_snapshot!(props, @r#"
        z: last
        a: ~
        css:
          - "display: none;"
        "#);
    }
}
