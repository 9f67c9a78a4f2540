//! Spans and the covering merge.
//!
//! Every extractor runs several independent candidate generators over the
//! input and ends up with an unordered pile of intervals. [`merge_all_tokens`]
//! turns that pile into the extractor's output: sorted, non-overlapping
//! [`ExtractResult`]s.
//!
//! ```text
//! candidates:  [next Friday)  [Friday)  [Friday at 8)
//!                   │            │            │
//!  sort by start ───┴────────────┴────────────┘
//!  contained?  drop     replaced-by-wider?  replace     partial overlap?  first wins
//! ```

use crate::Dimension;
use crate::resolution::Modifier;

/// A half-open byte interval `[start, end)` over the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub tag: Option<ExtractAux>,
}

impl Token {
    pub fn new(start: usize, end: usize) -> Self {
        Token { start, end, tag: None }
    }

    pub fn with_tag(start: usize, end: usize, tag: ExtractAux) -> Self {
        Token { start, end, tag: Some(tag) }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when `other` lies entirely inside `self`.
    pub fn covers(&self, other: &Token) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    pub fn overlaps(&self, other: &Token) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Extra data an extractor attaches to a span for its parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractAux {
    /// "more than" / "less than" style qualifier on a duration.
    Modifier(Modifier),
    /// A bare number folded in after a time entity ("move the 3pm meeting to 4").
    NumberEnding,
}

/// A classified span of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractResult {
    /// Start byte index (inclusive).
    pub start: usize,
    /// Length in bytes.
    pub length: usize,
    /// Slice of the source text covered by the span.
    pub text: String,
    pub dim: Dimension,
    pub aux: Option<ExtractAux>,
}

impl ExtractResult {
    pub fn new(text: &str, start: usize, end: usize, dim: Dimension) -> Self {
        ExtractResult { start, length: end - start, text: text[start..end].to_string(), dim, aux: None }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn as_token(&self) -> Token {
        Token { start: self.start, end: self.end(), tag: self.aux }
    }

    /// Same span re-tagged to another dimension.
    pub fn with_dim(&self, dim: Dimension) -> Self {
        ExtractResult { dim, ..self.clone() }
    }

    /// Build a child span from offsets relative to this span's text.
    pub fn sub_span(&self, start: usize, end: usize, dim: Dimension) -> Self {
        ExtractResult {
            start: self.start + start,
            length: end - start,
            text: self.text[start..end].to_string(),
            dim,
            aux: None,
        }
    }
}

/// Merge raw candidate intervals into ordered, non-overlapping spans.
///
/// Sorting is by `(start, longest first)`; a token contained in a kept token
/// is dropped, a token that covers kept tokens replaces all of them, and a
/// partially overlapping token loses to the one seen first.
pub fn merge_all_tokens(mut tokens: Vec<Token>, text: &str, dim: Dimension) -> Vec<ExtractResult> {
    tokens.retain(|t| !t.is_empty() && t.end <= text.len());
    tokens.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut merged: Vec<Token> = Vec::new();
    for token in tokens {
        if merged.iter().any(|kept| kept.covers(&token)) {
            continue;
        }
        let covered: Vec<usize> =
            merged.iter().enumerate().filter(|(_, kept)| token.covers(kept)).map(|(i, _)| i).collect();
        let partial = merged.iter().any(|kept| kept.overlaps(&token) && !token.covers(kept));
        if partial {
            continue;
        }
        for i in covered.into_iter().rev() {
            merged.remove(i);
        }
        merged.push(token);
    }

    merged.sort_by_key(|t| t.start);
    merged
        .into_iter()
        .map(|t| ExtractResult { aux: t.tag, ..ExtractResult::new(text, t.start, t.end, dim) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEXT: &str = "I'll go back next Friday at 8pm sharp";

    #[test]
    fn contained_tokens_are_dropped() {
        let out = merge_all_tokens(vec![Token::new(13, 24), Token::new(18, 24)], TEXT, Dimension::Date);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "next Friday");
    }

    #[test]
    fn wider_token_replaces_every_covered_token() {
        let out = merge_all_tokens(
            vec![Token::new(13, 17), Token::new(18, 24), Token::new(13, 31)],
            TEXT,
            Dimension::DateTime,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "next Friday at 8pm");
        assert_eq!(out[0].dim, Dimension::DateTime);
    }

    #[test]
    fn partial_overlap_keeps_first_seen() {
        let out = merge_all_tokens(vec![Token::new(13, 24), Token::new(18, 31)], TEXT, Dimension::Date);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start, 13);
    }

    #[test]
    fn siblings_are_kept_in_order() {
        let out = merge_all_tokens(vec![Token::new(28, 31), Token::new(13, 24)], TEXT, Dimension::Date);
        assert_eq!(out.iter().map(|e| e.text.as_str()).collect::<Vec<_>>(), vec!["next Friday", "8pm"]);
    }

    #[test]
    fn tags_survive_the_merge() {
        let tag = ExtractAux::Modifier(Modifier::More);
        let out = merge_all_tokens(vec![Token::with_tag(0, 4, tag)], TEXT, Dimension::Duration);
        assert_eq!(out[0].aux, Some(tag));
    }

    proptest! {
        #[test]
        fn merge_is_idempotent_and_non_overlapping(spans in prop::collection::vec((0usize..30, 1usize..8), 0..12)) {
            let tokens: Vec<Token> = spans.iter().map(|(s, l)| Token::new(*s, (*s + *l).min(TEXT.len()))).collect();
            let once = merge_all_tokens(tokens, TEXT, Dimension::Date);
            for pair in once.windows(2) {
                prop_assert!(pair[0].end() <= pair[1].start);
            }
            let again = merge_all_tokens(once.iter().map(ExtractResult::as_token).collect(), TEXT, Dimension::Date);
            prop_assert_eq!(once, again);
        }
    }
}
