//! Number collaborator.
//!
//! The date/time recognizers only need to find number expressions and read
//! their value; the [`NumberModel`] trait is that seam. [`EnglishNumbers`]
//! covers digits, digit ordinals ("21st") and spelled-out numbers up to the
//! thousands ("twenty one", "thirty-first", "two thousand sixteen").

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConfigError;
use crate::matcher::PatternMatcher;

/// Map of words for numbers 0..19 to their integer values.
pub(crate) static ZERO_NINETEEN_MAP: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("zero", 0),
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
    ])
});

pub(crate) static TENS_MAP: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ])
});

pub(crate) static ORDINAL_MAP: Lazy<HashMap<&'static str, i64>> = Lazy::new(|| {
    HashMap::from([
        ("first", 1),
        ("second", 2),
        ("third", 3),
        ("fourth", 4),
        ("fifth", 5),
        ("sixth", 6),
        ("seventh", 7),
        ("eighth", 8),
        ("ninth", 9),
        ("tenth", 10),
        ("eleventh", 11),
        ("twelfth", 12),
        ("thirteenth", 13),
        ("fourteenth", 14),
        ("fifteenth", 15),
        ("sixteenth", 16),
        ("seventeenth", 17),
        ("eighteenth", 18),
        ("nineteenth", 19),
        ("twentieth", 20),
        ("thirtieth", 30),
        ("fortieth", 40),
        ("fiftieth", 50),
    ])
});

static SCALE_MAP: Lazy<HashMap<&'static str, i64>> =
    Lazy::new(|| HashMap::from([("hundred", 100), ("thousand", 1_000)]));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Cardinal,
    Ordinal,
}

/// A number found in text, with byte offsets relative to the searched text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberSpan {
    pub start: usize,
    pub end: usize,
    pub value: f64,
    pub kind: NumberKind,
}

impl NumberSpan {
    /// Integral value, if the number has no fractional part.
    pub fn as_integer(&self) -> Option<i64> {
        (self.value.fract() == 0.0).then_some(self.value as i64)
    }
}

pub trait NumberModel: Send + Sync {
    /// Every number expression in `text`.
    fn extract(&self, text: &str) -> Vec<NumberSpan>;

    /// Value of `text` when the whole of it is one number expression.
    fn parse(&self, text: &str) -> Option<NumberSpan>;
}

fn longest_first(mut words: Vec<&'static str>) -> String {
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words.join("|")
}

/// Regex fragment (no capture groups) matching one spelled-out number word.
pub(crate) fn word_alternation() -> String {
    longest_first(
        ZERO_NINETEEN_MAP
            .keys()
            .chain(TENS_MAP.keys())
            .chain(ORDINAL_MAP.keys())
            .chain(SCALE_MAP.keys())
            .copied()
            .collect(),
    )
}

/// Same as [`word_alternation`] without the ordinal words.
pub(crate) fn cardinal_alternation() -> String {
    longest_first(ZERO_NINETEEN_MAP.keys().chain(TENS_MAP.keys()).chain(SCALE_MAP.keys()).copied().collect())
}

/// Ordinal words up to "thirty first", for day-of-month positions.
pub(crate) fn day_ordinal_alternation() -> String {
    let units = longest_first(ORDINAL_MAP.iter().filter(|(_, v)| **v < 10).map(|(k, _)| *k).collect());
    let plain = longest_first(ORDINAL_MAP.iter().filter(|(_, v)| **v <= 30).map(|(k, _)| *k).collect());
    format!(r"(?:twenty|thirty)[\s-]?(?:{units})|{plain}")
}

pub struct EnglishNumbers {
    pattern: Regex,
}

impl EnglishNumbers {
    pub fn new() -> Result<Self, ConfigError> {
        let words = word_alternation();
        let src = format!(r"(?i)\b(?:\d+(?:\.\d+)?(?:st|nd|rd|th)?|(?:{words})(?:(?:\s+|-)(?:{words}))*)\b");
        let pattern =
            Regex::new(&src).map_err(|e| ConfigError::InvalidPattern { name: "numbers", source: Box::new(e) })?;
        Ok(EnglishNumbers { pattern })
    }

    /// `None` for malformed sequences ("hundred hundred") and for values that
    /// overflow.
    fn parse_words(text: &str) -> Option<(f64, NumberKind)> {
        let mut total = 0i64;
        let mut current = 0i64;
        let mut kind = NumberKind::Cardinal;
        let mut seen = false;
        let mut prev_scale: Option<i64> = None;

        for word in text.split(|c: char| c.is_whitespace() || c == '-').filter(|w| !w.is_empty() && *w != "and") {
            if kind == NumberKind::Ordinal {
                // an ordinal word must be the last one
                return None;
            }
            if let Some(v) = ZERO_NINETEEN_MAP.get(word).or_else(|| TENS_MAP.get(word)) {
                current = current.checked_add(*v)?;
                prev_scale = None;
            } else if let Some(v) = ORDINAL_MAP.get(word) {
                current = current.checked_add(*v)?;
                kind = NumberKind::Ordinal;
                prev_scale = None;
            } else if let Some(&scale) = SCALE_MAP.get(word) {
                if prev_scale.is_some_and(|prev| prev >= scale) {
                    return None;
                }
                let base = if current == 0 { 1 } else { current };
                if scale >= 1_000 {
                    total = total.checked_add(base.checked_mul(scale)?)?;
                    current = 0;
                } else {
                    current = base.checked_mul(scale)?;
                }
                prev_scale = Some(scale);
            } else {
                return None;
            }
            seen = true;
        }

        seen.then_some((total.checked_add(current)? as f64, kind))
    }
}

impl NumberModel for EnglishNumbers {
    fn extract(&self, text: &str) -> Vec<NumberSpan> {
        self.pattern
            .find_all(text)
            .into_iter()
            .filter_map(|m| {
                let parsed = self.parse(m.text)?;
                Some(NumberSpan { start: m.start, end: m.end, ..parsed })
            })
            .collect()
    }

    fn parse(&self, text: &str) -> Option<NumberSpan> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        let span = |value, kind| NumberSpan { start: 0, end: text.len(), value, kind };

        let ordinal_digits = ["st", "nd", "rd", "th"]
            .iter()
            .find_map(|s| lowered.strip_suffix(s))
            .filter(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()));
        if let Some(digits) = ordinal_digits {
            return digits.parse::<f64>().ok().map(|v| span(v, NumberKind::Ordinal));
        }
        if lowered.starts_with(|c: char| c.is_ascii_digit()) {
            return lowered.parse::<f64>().ok().map(|v| span(v, NumberKind::Cardinal));
        }
        Self::parse_words(&lowered).map(|(v, kind)| span(v, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers() -> EnglishNumbers {
        EnglishNumbers::new().unwrap()
    }

    #[test]
    fn parses_digits_and_ordinals() {
        let n = numbers();
        assert_eq!(n.parse("15").map(|s| s.value), Some(15.0));
        assert_eq!(n.parse("2.5").map(|s| s.value), Some(2.5));
        let ord = n.parse("21st").unwrap();
        assert_eq!((ord.value, ord.kind), (21.0, NumberKind::Ordinal));
    }

    #[test]
    fn parses_spelled_out_numbers() {
        let n = numbers();
        assert_eq!(n.parse("twenty one").map(|s| s.value), Some(21.0));
        assert_eq!(n.parse("thirty-first").map(|s| (s.value, s.kind)), Some((31.0, NumberKind::Ordinal)));
        assert_eq!(n.parse("two thousand sixteen").map(|s| s.value), Some(2016.0));
        assert_eq!(n.parse("one hundred and five").map(|s| s.value), Some(105.0));
        assert!(n.parse("first twenty").is_none());
        assert!(n.parse("soon").is_none());
    }

    #[test]
    fn stacked_scales_are_rejected() {
        let n = numbers();
        assert_eq!(n.parse("three hundred thousand").map(|s| s.value), Some(300_000.0));
        assert!(n.parse("nine hundred hundred").is_none());
        assert!(n.parse("thousand thousand").is_none());
        let long = format!("nine{}", " hundred".repeat(40));
        assert!(n.parse(&long).is_none());
        assert!(n.extract(&format!("{long} days ago")).iter().all(|s| s.value < 1e6));
    }

    #[test]
    fn extracts_numbers_in_context() {
        let n = numbers();
        let spans = n.extract("I'll be back in three weeks, on the 21st");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].value, 3.0);
        assert_eq!(spans[1].kind, NumberKind::Ordinal);
        assert!(n.extract("at 3pm").is_empty());
    }
}
