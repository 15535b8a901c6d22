use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

#[derive(Debug, PartialEq, Eq, Hash)]
enum FragmentKind {
    Css(String),
    Conditional {
        predicate: String,
        fragments: Vec<Fragment>,
    },
}

/// An opaque unit of style.
///
/// The resolution engine never looks inside a fragment: it only collects, flattens and orders
/// them. Cloning is a reference count bump, so fragments stored in a theme or a style map can
/// be handed out freely without the stored copy ever being touched.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    inner: Arc<FragmentKind>,
}

impl Fragment {
    /// A fragment holding some CSS declarations, eg `display: block;`.
    pub fn css(declarations: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(FragmentKind::Css(declarations.into())),
        }
    }

    /// Wraps `fragments` in a conditional block that only applies when `predicate` holds,
    /// eg a media query.
    pub fn conditional(predicate: impl Into<String>, fragments: Vec<Fragment>) -> Self {
        Self {
            inner: Arc::new(FragmentKind::Conditional {
                predicate: predicate.into(),
                fragments,
            }),
        }
    }

    /// Whether both values point to the very same fragment allocation.
    #[inline]
    pub fn ptr_eq(a: &Fragment, b: &Fragment) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Renders the fragment to its style text.
    ///
    /// Conditional blocks render as `@media <predicate>{<inner styles>}`.
    pub fn styles(&self) -> String {
        let mut out = String::new();
        self.write_styles(&mut out);
        out
    }

    fn write_styles(&self, out: &mut String) {
        match &*self.inner {
            FragmentKind::Css(declarations) => out.push_str(declarations.trim()),
            FragmentKind::Conditional {
                predicate,
                fragments,
            } => {
                out.push_str("@media ");
                out.push_str(predicate);
                out.push('{');
                for fragment in fragments {
                    fragment.write_styles(out);
                }
                out.push('}');
            }
        }
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fragment({:?})", self.styles())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.styles())
    }
}

impl Serialize for Fragment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.styles())
    }
}

impl From<&str> for Fragment {
    fn from(declarations: &str) -> Self {
        Fragment::css(declarations)
    }
}
