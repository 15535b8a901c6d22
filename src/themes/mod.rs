use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::breakpoints::Breakpoints;
use crate::error::{CurlsResult, Error};
use crate::props::Props;

mod media;
mod merge;
mod provider;
mod raw;

pub use media::media_query;
pub use merge::deep_merge;
pub use provider::ThemeProvider;
use raw::RawComponentTheme;

/// Keys every theme must have
pub const REQUIRED_KEYS: &[&str] = &[BREAKPOINTS_KEY, DELIMITER_KEY];
const BREAKPOINTS_KEY: &str = "breakpoints";
const DELIMITER_KEY: &str = "breakpointsDelimiter";

/// The default delimiter between a value and its breakpoint: `block:tablet`
pub const DEFAULT_DELIMITER: &str = ":";

static NEXT_THEME_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a theme snapshot. Every constructed or merged theme gets a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThemeId(u64);

impl ThemeId {
    fn next() -> Self {
        ThemeId(NEXT_THEME_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Theme values of a single component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentTheme {
    /// Props applied when the call-site doesn't set them.
    /// A `css` entry holds fragments prepended to the component's styles.
    pub default_props: Option<Props>,
    /// Variants selected with the `kind` prop, each a partial set of props with an optional
    /// `css` entry.
    pub kinds: Option<HashMap<String, Props>>,
}

impl ComponentTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_props(mut self, props: Props) -> Self {
        self.default_props = Some(props);
        self
    }

    pub fn kind(mut self, name: impl Into<String>, props: Props) -> Self {
        self.kinds
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), props);
        self
    }
}

fn default_values() -> Map<String, Value> {
    let Value::Object(values) = json!({
        BREAKPOINTS_KEY: {
            // 0px
            "phone": "only screen and (min-width: 0em)",
            // 560px
            "tablet": "only screen and (min-width: 35em)",
            // 1280px
            "desktop": "only screen and (min-width: 80em)",
        },
        DELIMITER_KEY: DEFAULT_DELIMITER,
    }) else {
        unreachable!()
    };
    values
}

/// An immutable theme snapshot.
///
/// Themes are never mutated once built: [`Theme::merge`] and [`Theme::with_component`]
/// return a new snapshot with a new [`ThemeId`].
#[derive(Debug, Clone)]
pub struct Theme {
    id: ThemeId,
    breakpoints: Breakpoints,
    breakpoints_delimiter: String,
    components: HashMap<String, ComponentTheme>,
    /// All the theme values, with breakpoints already turned into predicates
    values: Map<String, Value>,
}

impl Default for Theme {
    fn default() -> Self {
        // The base values are always valid
        Self::from_values(default_values()).unwrap_or_else(|_| unreachable!())
    }
}

impl Theme {
    /// Creates a theme from user values laid over the base theme.
    ///
    /// Top-level keys of `user` replace the base ones wholesale, so a theme declaring
    /// `breakpoints` only has the breakpoints it declares.
    pub fn create(user: Value) -> CurlsResult<Self> {
        let mut values = default_values();
        match user {
            Value::Object(user) => values.extend(user),
            Value::Null => {}
            _ => return Err(Error::InvalidTheme("a theme must be an object".to_string())),
        }
        Self::from_values(values)
    }

    /// Parses a theme from a JSON string, see [`Theme::create`].
    pub fn from_json(json: &str) -> CurlsResult<Self> {
        Self::create(serde_json::from_str(json)?)
    }

    /// Reads a JSON theme file, see [`Theme::create`].
    pub fn load_from_file(path: impl AsRef<Path>) -> CurlsResult<Self> {
        let file = File::open(path)?;
        let user: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::create(user)
    }

    /// Deep merges `user` onto this theme, returning the merged theme.
    ///
    /// Objects merge recursively and arrays are replaced. Components added with
    /// [`Theme::with_component`] are kept unless the merged values define the same
    /// component.
    pub fn merge(&self, user: Value) -> CurlsResult<Self> {
        let Value::Object(values) = deep_merge(&Value::Object(self.values.clone()), &user) else {
            return Err(Error::InvalidTheme("a theme must be an object".to_string()));
        };
        let mut theme = Self::from_values(values)?;
        for (name, component) in &self.components {
            if !theme.components.contains_key(name) {
                theme.components.insert(name.clone(), component.clone());
            }
        }
        Ok(theme)
    }

    /// Returns a new snapshot with the given component entry, replacing any existing one.
    pub fn with_component(mut self, name: impl Into<String>, component: ComponentTheme) -> Self {
        self.components.insert(name.into(), component);
        self.id = ThemeId::next();
        self
    }

    /// Returns a new snapshot with `breakpoints` replacing the current ones.
    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        let values = breakpoints
            .iter()
            .map(|(name, predicate)| (name.to_string(), Value::String(predicate.to_string())))
            .collect();
        self.values
            .insert(BREAKPOINTS_KEY.to_string(), Value::Object(values));
        self.breakpoints = breakpoints;
        self.id = ThemeId::next();
        self
    }

    fn from_values(mut values: Map<String, Value>) -> CurlsResult<Self> {
        for key in REQUIRED_KEYS {
            match values.get(*key) {
                None | Some(Value::Null) | Some(Value::Bool(false)) => {
                    return Err(Error::MissingRequiredThemeKey(key.to_string()));
                }
                Some(_) => {}
            }
        }

        let mut breakpoints = Breakpoints::new();
        match values.get_mut(BREAKPOINTS_KEY) {
            Some(Value::Object(descriptors)) => {
                for (name, descriptor) in descriptors.iter_mut() {
                    let predicate = media_query(name, descriptor)?;
                    *descriptor = Value::String(predicate.clone());
                    breakpoints.insert(name.as_str(), predicate);
                }
            }
            _ => {
                return Err(Error::InvalidTheme(format!(
                    "'{BREAKPOINTS_KEY}' must be an object"
                )));
            }
        }

        let breakpoints_delimiter = match values.get(DELIMITER_KEY) {
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(Error::InvalidTheme(format!(
                    "'{DELIMITER_KEY}' must be a string"
                )));
            }
        };

        let mut components = HashMap::new();
        for (name, value) in &values {
            if REQUIRED_KEYS.contains(&name.as_str()) || !value.is_object() {
                continue;
            }
            // plain data namespaces can hold `kinds`/`defaultProps` keys of their own
            let Ok(raw) = RawComponentTheme::deserialize(value) else {
                #[cfg(feature = "debug")]
                log::debug!("[Theme::from_values] '{name}' is not a component entry");
                continue;
            };
            if !raw.is_empty() {
                components.insert(name.clone(), raw.compile(name)?);
            }
        }

        #[cfg(feature = "debug")]
        log::debug!(
            "[Theme::from_values] {} breakpoints, {} components",
            breakpoints.len(),
            components.len()
        );

        Ok(Self {
            id: ThemeId::next(),
            breakpoints,
            breakpoints_delimiter,
            components,
            values,
        })
    }

    #[inline]
    pub fn id(&self) -> ThemeId {
        self.id
    }

    #[inline]
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    #[inline]
    pub fn breakpoints_delimiter(&self) -> &str {
        &self.breakpoints_delimiter
    }

    pub fn component(&self, name: &str) -> Option<&ComponentTheme> {
        self.components.get(name)
    }

    /// All the component entries, in no particular order
    pub fn components(&self) -> impl Iterator<Item = (&str, &ComponentTheme)> {
        self.components.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// The raw theme value under `key`, eg the `colors` object of a theme
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// All the raw theme values
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}
