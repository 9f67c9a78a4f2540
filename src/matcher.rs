//! Pattern matching capability.
//!
//! Extractors and parsers never call the regex engine directly: they go
//! through [`PatternMatcher`], which exposes the three operations the
//! recognizers need (all matches, a whole-text match, and named groups).
//! `regex::Regex` is the only implementation today.

use regex::Regex;

/// One match of a pattern, with byte offsets relative to the searched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    pub start: usize,
    pub end: usize,
    pub text: &'t str,
    groups: Vec<(String, usize, &'t str)>,
}

impl<'t> PatternMatch<'t> {
    /// Text of the named group, when it participated in the match.
    pub fn group(&self, name: &str) -> Option<&'t str> {
        self.groups.iter().find(|(n, _, _)| *n == name).map(|(_, _, v)| *v).filter(|v| !v.is_empty())
    }

    /// Byte span `[start, end)` of the named group, relative to the searched text.
    pub fn group_span(&self, name: &str) -> Option<(usize, usize)> {
        self.groups
            .iter()
            .find(|(n, _, v)| *n == name && !v.is_empty())
            .map(|(_, start, v)| (*start, *start + v.len()))
    }

    /// Lowercased text of the named group.
    pub fn group_lower(&self, name: &str) -> Option<String> {
        self.group(name).map(str::to_lowercase)
    }

    pub fn has(&self, name: &str) -> bool {
        self.group(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

pub trait PatternMatcher {
    /// All non-overlapping, non-empty matches in `text`.
    fn find_all<'t>(&self, text: &'t str) -> Vec<PatternMatch<'t>>;

    /// A match spanning the whole of `text`, if any.
    fn exact<'t>(&self, text: &'t str) -> Option<PatternMatch<'t>> {
        self.find_all(text).into_iter().find(|m| m.start == 0 && m.end == text.len())
    }

    /// A match that ends exactly at the end of `text` (used on prefixes).
    fn at_end<'t>(&self, text: &'t str) -> Option<PatternMatch<'t>> {
        self.find_all(text).into_iter().find(|m| m.end == text.len())
    }

    /// A match that starts at the beginning of `text` (used on suffixes).
    fn at_start<'t>(&self, text: &'t str) -> Option<PatternMatch<'t>> {
        self.find_all(text).into_iter().find(|m| m.start == 0)
    }

    fn is_match(&self, text: &str) -> bool {
        !self.find_all(text).is_empty()
    }
}

impl PatternMatcher for Regex {
    fn find_all<'t>(&self, text: &'t str) -> Vec<PatternMatch<'t>> {
        let names: Vec<(usize, &str)> =
            self.capture_names().enumerate().filter_map(|(i, n)| n.map(|n| (i, n))).collect();

        self.captures_iter(text)
            .filter_map(|caps| {
                let m = caps.get(0)?;
                if m.start() == m.end() {
                    return None;
                }
                let groups = names
                    .iter()
                    .filter_map(|(i, name)| {
                        let g = caps.get(*i)?;
                        Some((name.to_string(), g.start(), g.as_str()))
                    })
                    .collect();
                Some(PatternMatch { start: m.start(), end: m.end(), text: m.as_str(), groups })
            })
            .collect()
    }
}
