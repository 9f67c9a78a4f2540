//! Per-grain extractor/parser pairs.
//!
//! Each recognizer is a pair of an [`Extractor`], which finds spans of its
//! grain in raw text, and a [`Parser`], which resolves one span
//! against a reference instant. Both borrow the shared [`LocaleConfig`]; they
//! hold no other state, so constructing one is free.
//!
//! Parsers are written as an ordered cascade of strategies. The first
//! strategy that returns `Some` wins and is logged at `trace` level:
//!
//! ```text
//! ExtractResult ──► basic ──► implicit ──► weekday_of_month ──► ... ──► None
//!                     │           │               │
//!                     └───────────┴───────────────┴──► DateTimeResolutionResult
//! ```
//!
//! Composite recognizers (date-time, ranges, sets) run the simpler
//! extractors first and merge their spans; the parsed components end up in
//! `sub_resolutions`.

pub mod date;
pub mod date_period;
pub mod date_time;
pub mod date_time_period;
pub mod duration;
pub mod holiday;
pub mod set;
pub mod time;
pub mod time_period;

use chrono::NaiveDateTime;
use tracing::trace;

use crate::Dimension;
use crate::config::LocaleConfig;
use crate::matcher::PatternMatcher;
use crate::resolution::{DateTimeParseResult, DateTimeResolutionResult};
use crate::token::{ExtractResult, Token};

pub use date::{DateExtractor, DateParser};
pub use date_period::{DatePeriodExtractor, DatePeriodParser};
pub use date_time::{DateTimeExtractor, DateTimeParser};
pub use date_time_period::{DateTimePeriodExtractor, DateTimePeriodParser};
pub use duration::{DurationExtractor, DurationParser};
pub use holiday::{Holiday, HolidayExtractor, HolidayParser};
pub use set::{SetExtractor, SetParser};
pub use time::{TimeExtractor, TimeParser};
pub use time_period::{TimePeriodExtractor, TimePeriodParser};

/// Finds spans of one grain in raw text.
pub trait Extractor {
    fn dimension(&self) -> Dimension;

    /// Ordered, non-overlapping spans.
    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult>;
}

/// Resolves one span of its grain.
pub trait Parser {
    /// `None` when no strategy could resolve the span.
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult>;
}

/// One named strategy of a parser cascade.
pub(crate) type Strategy<P> = (&'static str, fn(&P, &ExtractResult, NaiveDateTime) -> Option<DateTimeResolutionResult>);

/// Run `strategies` in order and return the first resolution.
pub(crate) fn run_cascade<P>(
    parser: &P,
    strategies: &[Strategy<P>],
    er: &ExtractResult,
    reference: NaiveDateTime,
) -> Option<DateTimeResolutionResult> {
    for (name, strategy) in strategies {
        if let Some(res) = strategy(parser, er, reference) {
            trace!(target: "chronolex::parse", dim = er.dim.name(), strategy = *name, text = %er.text, timex = %res.timex, "resolved");
            return Some(res);
        }
    }
    trace!(target: "chronolex::parse", dim = er.dim.name(), text = %er.text, "no strategy matched");
    None
}

/// Wrap a parsed component for `sub_resolutions`. `part` was extracted from
/// `parent.text`, so it and everything parsed below it are moved into the
/// parent's coordinates.
pub(crate) fn child(
    parent: &ExtractResult,
    part: &ExtractResult,
    dim: Dimension,
    mut resolution: DateTimeResolutionResult,
) -> DateTimeParseResult {
    shift_offsets(&mut resolution, parent.start);
    let mut pr = DateTimeParseResult::new(parent.sub_span(part.start, part.end(), dim), Some(resolution));
    pr.render_values();
    pr
}

fn shift_offsets(res: &mut DateTimeResolutionResult, by: usize) {
    for sub in &mut res.sub_resolutions {
        sub.extract.start += by;
        if let Some(inner) = sub.resolution.as_mut() {
            shift_offsets(inner, by);
        }
    }
}

/// Start of a prefix matched by `re` that ends right at `start`.
pub(crate) fn prefix_start(re: &regex::Regex, text: &str, start: usize) -> Option<usize> {
    re.at_end(&text[..start]).map(|m| m.start)
}

/// End of a suffix matched by `re` that begins right at `end`.
pub(crate) fn suffix_end(re: &regex::Regex, text: &str, end: usize) -> Option<usize> {
    re.at_start(&text[end..]).map(|m| end + m.end)
}

/// Join pairs of adjacent points into range tokens.
///
/// Two points form a range when the gap between them is a "to"-style
/// connector, or "and" with a "between" right before the first point. A
/// leading "from"/"between" is folded into the span.
pub(crate) fn merge_two_points(config: &LocaleConfig, text: &str, points: &[ExtractResult]) -> Vec<Token> {
    let patterns = &config.range;
    let mut tokens = Vec::new();
    for pair in points.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        if second.start < first.end() {
            continue;
        }
        let gap = &text[first.end()..second.start];
        let between = prefix_start(&patterns.between_prefix, text, first.start);
        let start = if patterns.to_connector.exact(gap).is_some() {
            prefix_start(&patterns.from_prefix, text, first.start).or(between).unwrap_or(first.start)
        } else if let (Some(b), Some(_)) = (between, patterns.and_connector.exact(gap)) {
            b
        } else {
            continue;
        };
        trace!(target: "chronolex::extract", first = %first.text, second = %second.text, "two-point range");
        tokens.push(Token::new(start, second.end()));
    }
    tokens
}

/// First and last point of a range span's own text, re-extracted by the
/// caller.
pub(crate) fn outer_points(points: Vec<ExtractResult>) -> Option<(ExtractResult, ExtractResult)> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let last = points.last()?;
    (first.end() <= last.start).then_some((first, last))
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::config::LocaleConfig;

    pub(crate) fn english() -> &'static LocaleConfig {
        crate::api::english_config()
    }

    /// Monday 2016-11-07, midnight.
    pub(crate) fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 11, 7).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    pub(crate) fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }
}
