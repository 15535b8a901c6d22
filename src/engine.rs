use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::breakpoints::{BreakpointBuckets, aggregate};
use crate::compose::compose;
use crate::element::{Element, Node, create_element};
use crate::error::CurlsResult;
use crate::fragment::Fragment;
use crate::producer::StyleMap;
use crate::props::{CSS_PROP, KIND_PROP, PropValue, Props};
use crate::themes::{ComponentTheme, Theme, ThemeId};
use crate::value::{parse_value, split_value};

/// Options of a [`StyleEngine`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub(crate) check_breakpoints: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            check_breakpoints: cfg!(debug_assertions),
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether breakpoints used in prop values are checked against the theme.
    ///
    /// Unknown breakpoints are otherwise silently dropped. Defaults to on in debug builds
    /// only.
    pub fn check_breakpoints(mut self, value: bool) -> Self {
        self.check_breakpoints = value;
        self
    }
}

/// A default props or kind entry split into its `css` fragments and the rest of its props
#[derive(Debug, Default)]
struct Layer {
    props: Props,
    css: Vec<Fragment>,
}

/// The fragments of a theme `css` entry. CSS text is turned into fragments.
fn css_fragments(value: &PropValue) -> Option<Vec<Fragment>> {
    match value {
        PropValue::Style(_) | PropValue::Styles(_) => value.fragments().map(<[Fragment]>::to_vec),
        PropValue::Text(css) => Some(vec![Fragment::css(css.as_str())]),
        PropValue::Json(Value::Array(items)) if items.iter().all(Value::is_string) => {
            Some(items.iter().filter_map(Value::as_str).map(Fragment::css).collect())
        }
        PropValue::Null | PropValue::Bool(false) => Some(Vec::new()),
        _ => None,
    }
}

impl Layer {
    fn new(props: &Props) -> Self {
        match props.get(CSS_PROP).map(css_fragments) {
            Some(Some(css)) => Self {
                props: props.without(|k| k == CSS_PROP),
                css,
            },
            // not style fragments: passed through like any other prop
            Some(None) => {
                #[cfg(feature = "debug")]
                log::debug!("[Layer::new] `css` entry is not made of fragments");
                Self {
                    props: props.clone(),
                    css: Vec::new(),
                }
            }
            None => Self {
                props: props.clone(),
                css: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Default)]
struct ComponentLayers {
    defaults: Option<Layer>,
    kinds: HashMap<String, Layer>,
}

impl ComponentLayers {
    fn new(component: &ComponentTheme) -> Self {
        Self {
            defaults: component.default_props.as_ref().map(Layer::new),
            kinds: component
                .kinds
                .iter()
                .flatten()
                .map(|(name, props)| (name.clone(), Layer::new(props)))
                .collect(),
        }
    }
}

type ThemeLayers = HashMap<String, ComponentLayers>;

/// Resolves component props into style fragments.
///
/// The engine keeps, per theme snapshot, the `css`/props split of every default props and
/// kind entry. Entries are never evicted: the cache grows with the number of distinct theme
/// snapshots the engine sees.
pub struct StyleEngine {
    options: EngineOptions,
    layers: papaya::HashMap<ThemeId, Arc<ThemeLayers>>,
}

impl fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleEngine")
            .field("options", &self.options)
            .field("cached_themes", &self.layers.len())
            .finish()
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl StyleEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            layers: papaya::HashMap::new(),
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    fn theme_layers(&self, theme: &Theme) -> Arc<ThemeLayers> {
        let pinned = self.layers.pin();
        pinned
            .get_or_insert_with(theme.id(), || {
                #[cfg(feature = "debug")]
                log::debug!("[StyleEngine::theme_layers] splitting theme {:?}", theme.id());
                let layers = theme
                    .components()
                    .map(|(name, component)| (name.to_string(), ComponentLayers::new(component)))
                    .collect::<ThemeLayers>();
                Arc::new(layers)
            })
            .clone()
    }

    /// Resolves the styles of a component.
    ///
    /// `name` selects the component entry of the theme providing default props and kinds.
    /// The returned props are `props` layered over the theme defaults and the active kind,
    /// without the style props of `styles` (nor `kind` if it matched a theme kind), and with
    /// the resolved fragments appended to the `css` prop.
    ///
    /// Fragments are ordered: default props `css`, kind `css`, props in `styles` order, then
    /// one conditional block per breakpoint in theme order.
    pub fn use_styles(
        &self,
        name: Option<&str>,
        styles: &StyleMap,
        theme: &Theme,
        props: &Props,
    ) -> CurlsResult<Props> {
        let component_layers = name.and_then(|n| {
            theme.component(n)?;
            Some(self.theme_layers(theme))
        });
        let component = name
            .zip(component_layers.as_deref())
            .and_then(|(n, layers)| layers.get(n));

        let defaults = component.and_then(|c| c.defaults.as_ref());
        let kind = component.and_then(|c| {
            let kind = props.get(KIND_PROP)?.key()?;
            let layer = c.kinds.get(kind.as_ref());
            #[cfg(feature = "debug")]
            if layer.is_none() {
                log::debug!("[StyleEngine::use_styles] unknown kind {kind:?} for {name:?}");
            }
            layer
        });

        let effective = compose(
            defaults.map(|l| &l.props),
            kind.map(|l| &l.props),
            props,
        );
        let derived = self.derive_styles(styles, theme, &effective)?;

        let kind_matched = kind.is_some();
        let mut next =
            effective.without(|k| styles.contains_key(k) || (kind_matched && k == KIND_PROP));

        let defaults_css = defaults.map_or(&[][..], |l| l.css.as_slice());
        let kind_css = kind.map_or(&[][..], |l| l.css.as_slice());
        if defaults_css.is_empty() && kind_css.is_empty() && derived.is_empty() {
            return Ok(next);
        }

        let mut css = match next.remove(CSS_PROP) {
            Some(PropValue::Styles(fragments)) => fragments,
            Some(PropValue::Style(fragment)) => vec![fragment],
            _ => Vec::new(),
        };
        css.reserve(defaults_css.len() + kind_css.len() + derived.len());
        css.extend_from_slice(defaults_css);
        css.extend_from_slice(kind_css);
        css.extend(derived);
        next.insert(CSS_PROP, PropValue::Styles(css));

        Ok(next)
    }

    /// Fragments of the props of `styles`, in `styles` order, followed by the breakpoint
    /// blocks.
    fn derive_styles(
        &self,
        styles: &StyleMap,
        theme: &Theme,
        props: &Props,
    ) -> CurlsResult<Vec<Fragment>> {
        let delimiter = theme.breakpoints_delimiter();
        let mut css = Vec::new();
        let mut buckets = BreakpointBuckets::new();

        for (prop, producer) in styles.iter() {
            let Some(value) = props.get(prop) else {
                continue;
            };

            let raw = match value {
                PropValue::Text(raw) if !delimiter.is_empty() && raw.contains(delimiter) => raw,
                _ => {
                    if let Some(fragments) = producer.resolve(prop, value, theme, props)? {
                        css.extend_from_slice(&fragments);
                    }
                    continue;
                }
            };

            for segment in split_value(raw) {
                let parsed = parse_value(segment, delimiter);
                let value = parsed.value.to_prop_value();
                let Some(fragments) = producer.resolve(prop, &value, theme, props)? else {
                    continue;
                };

                match parsed.breakpoint {
                    Some(breakpoint) if !breakpoint.is_empty() => {
                        if self.options.check_breakpoints {
                            theme.breakpoints().check(breakpoint)?;
                        }
                        buckets.push(breakpoint, &fragments);
                    }
                    _ => css.extend_from_slice(&fragments),
                }
            }
        }

        css.extend(aggregate(buckets, theme.breakpoints()));
        Ok(css)
    }
}

/// A style map bound to a component name.
#[derive(Debug, Clone)]
pub struct StyleHook {
    name: Option<String>,
    styles: Arc<StyleMap>,
}

impl StyleHook {
    /// `name` is the theme entry of the component, if any
    pub fn new(name: Option<&str>, styles: StyleMap) -> Self {
        Self {
            name: name.map(str::to_string),
            styles: Arc::new(styles),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// `useBox` for a `box` component
    pub fn display_name(&self) -> String {
        let mut out = String::from("use");
        let Some(name) = self.name.as_deref() else {
            out.push_str("Styles");
            return out;
        };
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
        out
    }

    /// See [`StyleEngine::use_styles`]
    pub fn apply(&self, engine: &StyleEngine, theme: &Theme, props: &Props) -> CurlsResult<Props> {
        engine.use_styles(self.name.as_deref(), &self.styles, theme, props)
    }

    /// Resolves the styles of `props` and builds the element with them.
    pub fn create_element(
        &self,
        engine: &StyleEngine,
        theme: &Theme,
        default_tag: &str,
        props: &Props,
        children: Vec<Node>,
    ) -> CurlsResult<Element> {
        let props = self.apply(engine, theme, props)?;
        Ok(create_element(default_tag, props, children))
    }
}
