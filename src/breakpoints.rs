use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{CurlsResult, Error};
use crate::fragment::Fragment;

/// Named responsive conditions, in the order their blocks are emitted.
///
/// Each name maps to the predicate text of its conditional block, eg
/// `only screen and (min-width: 35em)`. Later blocks win the cascade so the narrowest
/// breakpoint should be declared first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Breakpoints {
    entries: Vec<(String, String)>,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a breakpoint at the end, or replaces the predicate of an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, predicate: impl Into<String>) {
        let name = name.into();
        let predicate = predicate.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = predicate,
            None => self.entries.push((name, predicate)),
        }
    }

    /// Builder version of [`Breakpoints::insert`]
    pub fn with(mut self, name: impl Into<String>, predicate: impl Into<String>) -> Self {
        self.insert(name, predicate);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Breakpoint names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Errors if `name` is not a declared breakpoint.
    pub fn check(&self, name: &str) -> CurlsResult<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(Error::UnknownBreakpoint {
                breakpoint: name.to_string(),
                valid: self.names().map(str::to_string).collect(),
            })
        }
    }
}

impl Serialize for Breakpoints {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, predicate) in &self.entries {
            map.serialize_entry(name, predicate)?;
        }
        map.end()
    }
}

/// Fragments collected per breakpoint while resolving a component's props.
#[derive(Debug, Default)]
pub struct BreakpointBuckets<'a> {
    buckets: Vec<(&'a str, Vec<Fragment>)>,
}

impl<'a> BreakpointBuckets<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends fragments to the bucket of `breakpoint`, creating it if needed.
    pub fn push(&mut self, breakpoint: &'a str, fragments: &[Fragment]) {
        match self.buckets.iter_mut().find(|(b, _)| *b == breakpoint) {
            Some((_, bucket)) => bucket.extend_from_slice(fragments),
            None => {
                #[cfg(feature = "debug")]
                log::trace!("[BreakpointBuckets::push] new bucket for {breakpoint:?}");
                self.buckets.push((breakpoint, fragments.to_vec()));
            }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn take(&mut self, breakpoint: &str) -> Option<Vec<Fragment>> {
        let idx = self.buckets.iter().position(|(b, _)| *b == breakpoint)?;
        Some(self.buckets.swap_remove(idx).1)
    }
}

/// Turns the buckets into one conditional block per breakpoint, in the order of
/// `breakpoints`, regardless of the order the buckets were filled in.
///
/// Buckets for names `breakpoints` doesn't know are dropped: use [`Breakpoints::check`]
/// beforehand to turn those into errors.
pub fn aggregate(mut buckets: BreakpointBuckets<'_>, breakpoints: &Breakpoints) -> Vec<Fragment> {
    let mut out = Vec::new();
    if buckets.is_empty() {
        return out;
    }

    for (name, predicate) in breakpoints.iter() {
        if let Some(fragments) = buckets.take(name) {
            if !fragments.is_empty() {
                out.push(Fragment::conditional(predicate, fragments));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{default_breakpoints, render};

    #[test]
    fn emits_blocks_in_theme_order() {
        let mut buckets = BreakpointBuckets::new();
        buckets.push("desktop", &[Fragment::css("display: block;")]);
        buckets.push("phone", &[Fragment::css("display: none;")]);
        buckets.push("tablet", &[Fragment::css("display: block;")]);
        buckets.push("phone", &[Fragment::css("padding: 0;")]);

        let out = aggregate(buckets, &default_breakpoints());
        insta::assert_snapshot!(render(&out), @r"
        @media only screen and (min-width: 0em){display: none;padding: 0;}
        @media only screen and (min-width: 35em){display: block;}
        @media only screen and (min-width: 80em){display: block;}
        ");
    }

    #[test]
    fn skips_breakpoints_without_fragments() {
        let mut buckets = BreakpointBuckets::new();
        buckets.push("tablet", &[]);
        buckets.push("unknown", &[Fragment::css("display: none;")]);
        assert!(aggregate(buckets, &default_breakpoints()).is_empty());
    }

    #[test]
    fn check_lists_valid_breakpoints() {
        let breakpoints = default_breakpoints();
        assert!(breakpoints.check("tablet").is_ok());
        let err = breakpoints.check("does-not-exist").unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"A breakpoint for 'does-not-exist' was not found in: phone, tablet, desktop");
    }

    #[test]
    fn insert_keeps_declaration_order() {
        let breakpoints = Breakpoints::new()
            .with("b", "1")
            .with("a", "2")
            .with("b", "3");
        assert_eq!(
            breakpoints.iter().collect::<Vec<_>>(),
            vec![("b", "3"), ("a", "2")]
        );
    }
}
