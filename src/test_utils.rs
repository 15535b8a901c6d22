use crate::breakpoints::Breakpoints;
use crate::engine::{EngineOptions, StyleEngine};
use crate::fragment::Fragment;
use crate::props::{CSS_PROP, PropValue, Props};

pub(crate) fn default_breakpoints() -> Breakpoints {
    Breakpoints::new()
        .with("phone", "only screen and (min-width: 0em)")
        .with("tablet", "only screen and (min-width: 35em)")
        .with("desktop", "only screen and (min-width: 80em)")
}

/// An engine checking breakpoints whatever the build profile
pub(crate) fn engine() -> StyleEngine {
    StyleEngine::new(EngineOptions::new().check_breakpoints(true))
}

pub(crate) fn css(declarations: impl Into<String>) -> Fragment {
    Fragment::css(declarations)
}

pub(crate) fn css_of(props: &Props) -> &[Fragment] {
    props
        .get(CSS_PROP)
        .and_then(PropValue::fragments)
        .unwrap_or(&[])
}

/// One fragment per line
pub(crate) fn render(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(Fragment::styles)
        .collect::<Vec<_>>()
        .join("\n")
}
