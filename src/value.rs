//! Parsing of responsive prop values.
//!
//! A responsive value is a whitespace separated list of segments, each segment optionally
//! qualified by a breakpoint: `"block:tablet none:phone"`. Values made of several words are
//! grouped with brackets so they stay a single segment: `"[10px 20px]:desktop 16px"`.

use crate::props::PropValue;

/// The value part of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentValue<'a> {
    /// The segment had nothing before the breakpoint delimiter, eg `":tablet"`.
    /// This is how boolean props are turned on for a given breakpoint.
    Flag,
    /// The text of the segment, with grouping brackets removed
    Text(&'a str),
}

impl SegmentValue<'_> {
    /// The prop value a style producer sees for this segment
    pub fn to_prop_value(self) -> PropValue {
        match self {
            SegmentValue::Flag => PropValue::Bool(true),
            SegmentValue::Text(s) => PropValue::Text(s.to_string()),
        }
    }
}

/// A single segment of a responsive value split into its value and breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedValue<'a> {
    pub value: SegmentValue<'a>,
    /// `None` if the segment had no delimiter. Can be `Some("")` for a trailing delimiter,
    /// which is treated the same as no breakpoint when resolving styles.
    pub breakpoint: Option<&'a str>,
}

/// Splits a raw prop value into its segments.
///
/// Leading/trailing whitespace is ignored and runs of whitespace are separators, except when
/// they appear inside a `[...]` group. An unclosed `[` extends its group to the end of the
/// value.
pub fn split_value(raw: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (idx, c) in raw.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    segments.push(&raw[s..idx]);
                }
                continue;
            }
            _ => {}
        }
        if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(s) = start {
        segments.push(raw[s..].trim_end());
    }

    segments
}

/// Byte index of the first `delimiter` that is not inside a bracket group.
fn find_delimiter(segment: &str, delimiter: &str) -> Option<usize> {
    if delimiter.is_empty() {
        return None;
    }

    let mut depth = 0usize;
    for (idx, c) in segment.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && segment[idx..].starts_with(delimiter) => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Parses a single segment as returned by [`split_value`].
///
/// The first delimiter found outside of brackets separates the value from the breakpoint
/// name. A value wrapped in a single pair of brackets gets them removed and an empty value is
/// a [`SegmentValue::Flag`].
pub fn parse_value<'a>(segment: &'a str, delimiter: &str) -> ParsedValue<'a> {
    let (mut value, breakpoint) = match find_delimiter(segment, delimiter) {
        Some(idx) => (&segment[..idx], Some(&segment[idx + delimiter.len()..])),
        None => (segment, None),
    };

    if value.starts_with('[') && value.find(']') == Some(value.len() - 1) {
        value = &value[1..value.len() - 1];
    }

    let value = if value.is_empty() {
        SegmentValue::Flag
    } else {
        SegmentValue::Text(value)
    };

    ParsedValue { value, breakpoint }
}
