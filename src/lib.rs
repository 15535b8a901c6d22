mod breakpoints;
mod compose;
mod element;
mod engine;
mod error;
mod fragment;
mod producer;
mod props;
mod themes;
mod value;

#[cfg(test)]
mod test_utils;

pub use breakpoints::{BreakpointBuckets, Breakpoints, aggregate};
pub use compose::compose;
pub use element::{AS_PROP, CHILDREN_PROP, Element, Node, create_element};
pub use engine::{EngineOptions, StyleEngine, StyleHook};
pub use error::Error;
pub use fragment::Fragment;
pub use producer::{StyleFn, StyleMap, StyleProducer};
pub use props::{CSS_PROP, KIND_PROP, PropValue, Props};
pub use themes::{
    ComponentTheme, DEFAULT_DELIMITER, REQUIRED_KEYS, Theme, ThemeId, ThemeProvider, deep_merge,
    media_query,
};
pub use value::{ParsedValue, SegmentValue, parse_value, split_value};
