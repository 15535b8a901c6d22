use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::error::CurlsResult;
use crate::themes::Theme;

/// Holds the current theme of a provider scope.
///
/// Readers get an `Arc` of the snapshot current at the time of the call. Updates build a new
/// snapshot and swap it in whole, so a snapshot that was handed out never changes.
#[derive(Debug)]
pub struct ThemeProvider {
    current: RwLock<Arc<Theme>>,
}

impl Default for ThemeProvider {
    fn default() -> Self {
        Self::from_theme(Theme::default())
    }
}

impl ThemeProvider {
    /// Creates a provider from user theme values, see [`Theme::create`].
    pub fn new(user: Value) -> CurlsResult<Self> {
        Ok(Self::from_theme(Theme::create(user)?))
    }

    pub fn from_theme(theme: Theme) -> Self {
        Self {
            current: RwLock::new(Arc::new(theme)),
        }
    }

    /// The current theme snapshot
    pub fn theme(&self) -> Arc<Theme> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The raw theme value of a single component, eg `theme_entry("box")`
    pub fn theme_entry(&self, name: &str) -> Option<Value> {
        self.theme().get(name).cloned()
    }

    /// Deep merges `user` onto the current theme and makes the result current.
    ///
    /// On error the current theme is left as is.
    pub fn set_theme(&self, user: Value) -> CurlsResult<Arc<Theme>> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = Arc::new(current.merge(user)?);
        *current = next.clone();
        Ok(next)
    }

    /// Replaces the current theme with a theme created from `user`.
    ///
    /// On error the current theme is left as is.
    pub fn replace_theme(&self, user: Value) -> CurlsResult<Arc<Theme>> {
        let next = Arc::new(Theme::create(user)?);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn set_theme_merges_and_replace_theme_recreates() {
        let provider = ThemeProvider::default();
        let before = provider.theme();

        provider
            .set_theme(json!({"breakpoints": {"large": 100}}))
            .unwrap();
        let merged = provider.theme();
        assert_eq!(
            merged.breakpoints().names().collect::<Vec<_>>(),
            vec!["phone", "tablet", "desktop", "large"]
        );
        assert_eq!(
            merged.breakpoints().get("large"),
            Some("only screen and (min-width: 100px)")
        );
        // snapshots handed out before the update are untouched
        assert_eq!(before.breakpoints().len(), 3);

        provider
            .replace_theme(json!({"breakpoints": {"large": 100}}))
            .unwrap();
        assert_eq!(
            provider.theme().breakpoints().iter().collect::<Vec<_>>(),
            vec![("large", "only screen and (min-width: 100px)")]
        );
    }

    #[test]
    fn failed_updates_keep_the_current_theme() {
        let provider = ThemeProvider::new(json!({"colors": {"blue": "#1d40ab"}})).unwrap();
        let id = provider.theme().id();
        assert!(provider.set_theme(json!({"breakpoints": null})).is_err());
        assert!(provider.replace_theme(json!({"breakpointsDelimiter": false})).is_err());
        assert_eq!(provider.theme().id(), id);
    }

    #[test]
    fn theme_entry() {
        let provider =
            ThemeProvider::new(json!({"box": {"kinds": {"foo": {"display": "block"}}}})).unwrap();
        assert_eq!(
            provider.theme_entry("box"),
            Some(json!({"kinds": {"foo": {"display": "block"}}}))
        );
        assert_eq!(provider.theme_entry("missing"), None);
    }
}
