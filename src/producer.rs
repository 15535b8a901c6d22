use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{CurlsResult, Error};
use crate::fragment::Fragment;
use crate::props::{PropValue, Props};
use crate::themes::Theme;

/// Signature of a function style producer: `(value, theme, effective props)`.
pub type StyleFn = dyn Fn(&PropValue, &Theme, &Props) -> Option<Vec<Fragment>> + Send + Sync;

/// How a single prop turns into style fragments.
#[derive(Clone)]
pub enum StyleProducer {
    /// Fixed fragments applied whenever the prop is set to anything but `false`/`null`
    Literal(Vec<Fragment>),
    /// Fragments per allowed value. Keys are kept sorted for error messages.
    Enum(BTreeMap<String, Vec<Fragment>>),
    /// Arbitrary function of the value, the theme and the effective props
    Function(Arc<StyleFn>),
}

impl fmt::Debug for StyleProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleProducer::Literal(fragments) => f.debug_tuple("Literal").field(fragments).finish(),
            StyleProducer::Enum(values) => f.debug_tuple("Enum").field(values).finish(),
            StyleProducer::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl StyleProducer {
    /// Resolves a value of `prop` to its fragments.
    ///
    /// `Ok(None)` means the prop contributes nothing. Literal and enum producers hand out
    /// borrowed fragments: callers copy them into their own output.
    pub fn resolve<'s>(
        &'s self,
        prop: &str,
        value: &PropValue,
        theme: &Theme,
        props: &Props,
    ) -> CurlsResult<Option<Cow<'s, [Fragment]>>> {
        match self {
            StyleProducer::Literal(fragments) => {
                if value.is_false_or_null() {
                    Ok(None)
                } else {
                    Ok(Some(Cow::Borrowed(fragments.as_slice())))
                }
            }
            StyleProducer::Function(f) => Ok(f(value, theme, props).map(Cow::Owned)),
            StyleProducer::Enum(values) => {
                let found = value.key().and_then(|key| values.get(key.as_ref()));
                match found {
                    Some(fragments) => Ok(Some(Cow::Borrowed(fragments.as_slice()))),
                    None if value.is_false_or_null() => Ok(None),
                    None => Err(Error::UnknownEnumValue {
                        prop: prop.to_string(),
                        value: value
                            .key()
                            .map(Cow::into_owned)
                            .unwrap_or_else(|| format!("{value:?}")),
                        valid: values.keys().cloned().collect(),
                    }),
                }
            }
        }
    }
}

/// The style map of a component: which props affect styles and how, in declaration order.
///
/// Declaration order is the order derived fragments end up in.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    producers: Vec<(String, StyleProducer)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the producer of `prop`. A replaced producer keeps its position.
    pub fn insert(&mut self, prop: impl Into<String>, producer: StyleProducer) {
        let prop = prop.into();
        match self.producers.iter_mut().find(|(p, _)| *p == prop) {
            Some((_, existing)) => *existing = producer,
            None => self.producers.push((prop, producer)),
        }
    }

    /// A boolean prop applying `fragments` when set
    pub fn literal(mut self, prop: impl Into<String>, fragments: impl IntoIterator<Item = Fragment>) -> Self {
        self.insert(prop, StyleProducer::Literal(fragments.into_iter().collect()));
        self
    }

    /// A prop only accepting the given values
    pub fn enumeration<K, F>(mut self, prop: impl Into<String>, values: impl IntoIterator<Item = (K, F)>) -> Self
    where
        K: Into<String>,
        F: IntoIterator<Item = Fragment>,
    {
        let values = values
            .into_iter()
            .map(|(k, f)| (k.into(), f.into_iter().collect()))
            .collect();
        self.insert(prop, StyleProducer::Enum(values));
        self
    }

    /// A prop whose fragments are computed by `f`
    pub fn function<F>(mut self, prop: impl Into<String>, f: F) -> Self
    where
        F: Fn(&PropValue, &Theme, &Props) -> Option<Vec<Fragment>> + Send + Sync + 'static,
    {
        self.insert(prop, StyleProducer::Function(Arc::new(f)));
        self
    }

    pub fn get(&self, prop: &str) -> Option<&StyleProducer> {
        self.producers.iter().find(|(p, _)| p == prop).map(|(_, s)| s)
    }

    pub fn contains_key(&self, prop: &str) -> bool {
        self.get(prop).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleProducer)> {
        self.producers.iter().map(|(p, s)| (p.as_str(), s))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }
}
