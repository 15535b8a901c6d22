use serde::Serialize;

use crate::fragment::Fragment;
use crate::props::{CSS_PROP, PropValue, Props};

/// The prop overriding the tag of an element
pub const AS_PROP: &str = "as";
/// The prop holding the children of an element when none are passed explicitly
pub const CHILDREN_PROP: &str = "children";

/// A child of an [`Element`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

/// A constructed element: a tag, its props and its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    pub props: Props,
    pub children: Vec<Node>,
}

impl Element {
    /// The style fragments attached to this element
    pub fn css(&self) -> &[Fragment] {
        self.props
            .get(CSS_PROP)
            .and_then(PropValue::fragments)
            .unwrap_or(&[])
    }
}

/// Builds an element.
///
/// The tag is the `as` prop if it is a string, `default_tag` otherwise, and `as` never ends
/// up in the element props. Non-empty `children` take precedence over the `children` prop.
pub fn create_element(default_tag: &str, mut props: Props, children: Vec<Node>) -> Element {
    let tag = match props.remove(AS_PROP) {
        Some(PropValue::Text(tag)) => tag,
        _ => default_tag.to_string(),
    };

    let children_prop = props.remove(CHILDREN_PROP);
    let children = if !children.is_empty() {
        children
    } else {
        match children_prop {
            Some(PropValue::Children(children)) => children,
            Some(PropValue::Text(text)) => vec![Node::Text(text)],
            _ => Vec::new(),
        }
    };

    Element {
        tag,
        props,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_the_default_tag() {
        let element = create_element("div", Props::new(), Vec::new());
        assert_eq!(element.tag, "div");
        assert!(element.children.is_empty());
    }

    #[test]
    fn as_prop_overrides_the_tag() {
        let element = create_element("div", Props::from([("as", "span")]), Vec::new());
        assert_eq!(element.tag, "span");
        assert!(!element.props.contains_key(AS_PROP));

        // not a tag name, still stripped
        let element = create_element("div", Props::from([("as", true)]), Vec::new());
        assert_eq!(element.tag, "div");
        assert!(!element.props.contains_key(AS_PROP));
    }

    #[test]
    fn children_argument_overrides_children_prop() {
        let child = create_element("div", Props::new(), Vec::new());
        let props = Props::new().with(
            CHILDREN_PROP,
            PropValue::Children(vec![Node::Text("ignored".to_string())]),
        );

        let element = create_element("div", props.clone(), vec![child.clone().into()]);
        assert_eq!(element.tag, "div");
        assert_eq!(element.children, vec![Node::Element(child.clone())]);
        assert!(!element.props.contains_key(CHILDREN_PROP));

        let element = create_element("div", props.clone().with("as", "span"), vec![child.clone().into()]);
        assert_eq!(element.tag, "span");
        assert_eq!(element.children, vec![Node::Element(child)]);

        let element = create_element("div", props, Vec::new());
        assert_eq!(element.children, vec![Node::from("ignored")]);
    }
}
