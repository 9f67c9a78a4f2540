//! Clock ranges: "from 3 to 5pm", "between 9 and 11 am", "late afternoon".

use chrono::{Duration, NaiveDateTime};
use tracing::trace;

use super::time::{ClockReading, TimeExtractor, TimeParser, parse_hour};
use super::{Extractor, Parser, Strategy, child, merge_two_points, outer_points, run_cascade};
use crate::calendar::DayPartWindow;
use crate::config::LocaleConfig;
use crate::matcher::{PatternMatch, PatternMatcher};
use crate::resolution::{DateTimeResolutionResult, Modifier, TimeValue};
use crate::token::{ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, timex};

pub struct TimePeriodExtractor<'a> {
    config: &'a LocaleConfig,
    skip_from_to_merge: bool,
}

impl<'a> TimePeriodExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        TimePeriodExtractor { config, skip_from_to_merge: false }
    }

    pub fn skip_from_to_merge(mut self, skip: bool) -> Self {
        self.skip_from_to_merge = skip;
        self
    }
}

impl Extractor for TimePeriodExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::TimePeriod
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        let p = &self.config.time_period;
        let mut tokens = Vec::new();

        // "3 to 5" alone is too weak; it needs "from" or an AM/PM marker
        for m in p.number_range.find_all(text) {
            if m.has("from") || ["am1", "pm1", "am2", "pm2"].iter().any(|g| m.has(g)) {
                tokens.push(Token::new(m.start, m.end));
            }
        }
        tokens.extend(p.between_range.find_all(text).into_iter().map(|m| Token::new(m.start, m.end)));

        if !self.skip_from_to_merge {
            let points = TimeExtractor::new(self.config).extract(text, reference);
            tokens.extend(merge_two_points(self.config, text, &points));
        }

        tokens.extend(p.day_part.find_all(text).into_iter().map(|m| Token::new(m.start, m.end)));

        merge_all_tokens(tokens, text, Dimension::TimePeriod)
    }
}

/// Settle the AM/PM of two range ends from whichever side carries a marker.
///
/// "3-5pm" puts both ends in the afternoon, "11-1pm" keeps the start in the
/// morning, "9am-5" moves the end past noon.
pub(crate) fn align_ends(left: ClockReading, right: ClockReading) -> (ClockReading, ClockReading) {
    match (left.ambiguous, right.ambiguous) {
        (true, false) if right.hour >= 12 && left.hour % 12 + 12 <= right.hour => (left.to_pm(), right),
        (true, false) => (ClockReading { ambiguous: false, ..left }, right),
        (false, true) if right.hour % 12 + 12 >= left.hour && (left.hour >= 12 || right.hour <= left.hour) => {
            (left, right.to_pm())
        }
        (false, true) => (left, ClockReading { ambiguous: false, ..right }),
        (true, true) if right.hour < left.hour && right.hour < 12 => {
            (left, ClockReading { hour: right.hour + 12, ..right })
        }
        _ => (left, right),
    }
}

/// Interval between two readings on the reference day. An end at or before
/// the start rolls over to the next day.
pub(crate) fn clock_interval(
    left: &ClockReading,
    right: &ClockReading,
    reference: NaiveDateTime,
) -> Option<DateTimeResolutionResult> {
    let start = left.on(reference.date())?;
    let mut end = right.on(reference.date())?;
    if end <= start {
        end += Duration::days(1);
    }
    let res = DateTimeResolutionResult::pinned(timex::time_range(start, end), TimeValue::Interval { start, end });
    Some(res.with_comment(left.comment().and(right.comment())))
}

pub struct TimePeriodParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> TimePeriodParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        TimePeriodParser { config }
    }

    fn end_reading(&self, m: &PatternMatch<'_>, n: u8) -> Option<ClockReading> {
        let hour = parse_hour(self.config, m.group(&format!("h{n}"))?)?;
        let minute = m.group(&format!("m{n}")).and_then(|v| v.parse().ok());
        Some(ClockReading::new(hour, minute).with_marker(m.has(&format!("am{n}")), m.has(&format!("pm{n}"))))
    }

    fn parse_number_range(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.time_period;
        let m = p.number_range.exact(&er.text).or_else(|| p.between_range.exact(&er.text))?;
        let (left, right) = align_ends(self.end_reading(&m, 1)?, self.end_reading(&m, 2)?);
        clock_interval(&left, &right, reference)
    }

    fn parse_two_points(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let (first, last) = outer_points(TimeExtractor::new(self.config).extract(&er.text, reference))?;
        let parser = TimeParser::new(self.config);
        let (left, right) = align_ends(parser.reading(&first.text)?, parser.reading(&last.text)?);
        trace!(target: "chronolex::parse", left = %left.timex(), right = %right.timex(), "time points");

        let children = [(&first, &left), (&last, &right)]
            .into_iter()
            .filter_map(|(point, reading)| {
                let res = reading.resolve(reference)?;
                Some(child(er, point, Dimension::Time, res))
            })
            .collect();
        Some(clock_interval(&left, &right, reference)?.with_children(children))
    }

    fn parse_day_part(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.time_period.day_part.exact(&er.text)?;
        let part = self.config.day_part(m.group("daypart")?)?;
        let (window, modifier) = match m.group_lower("window").as_deref() {
            Some("early") => (DayPartWindow::Early, Some(Modifier::Start)),
            Some("late") => (DayPartWindow::Late, Some(Modifier::End)),
            _ => (DayPartWindow::Whole, None),
        };
        let (start, end) = part.bounds(window);
        let day = reference.date();
        let mut res = DateTimeResolutionResult::pinned(
            timex::day_part(part),
            TimeValue::Interval { start: day.and_time(start), end: day.and_time(end) },
        );
        res.modifier = modifier;
        Some(res)
    }
}

impl Parser for TimePeriodParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let strategies: &[Strategy<Self>] = &[
            ("number_range", Self::parse_number_range),
            ("two_points", Self::parse_two_points),
            ("day_part", Self::parse_day_part),
        ];
        run_cascade(self, strategies, er, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::testing::{at, english, reference};
    use crate::resolution::Comment;

    fn resolve(text: &str) -> (String, DateTimeResolutionResult) {
        let spans = TimePeriodExtractor::new(english()).extract(text, reference());
        assert_eq!(spans.len(), 1, "{text}: {spans:?}");
        let res = TimePeriodParser::new(english()).parse(&spans[0], reference()).unwrap();
        (spans[0].text.clone(), res)
    }

    #[test]
    fn marker_on_one_side_disambiguates_the_other() {
        let (span, res) = resolve("I'm busy from 3 to 5pm");
        assert_eq!(span, "from 3 to 5pm");
        assert_eq!(res.timex, "(T15,T17,PT2H)");
        assert_eq!(
            res.future,
            Some(TimeValue::Interval { start: at(2016, 11, 7, 15, 0), end: at(2016, 11, 7, 17, 0) })
        );

        assert_eq!(resolve("between 9 and 11 am").1.timex, "(T09,T11,PT2H)");
        assert_eq!(resolve("11-1pm").1.timex, "(T11,T13,PT2H)");
        assert_eq!(resolve("9am-5").1.timex, "(T09,T17,PT8H)");
    }

    #[test]
    fn unmarked_range_keeps_ampm() {
        let (_, res) = resolve("from 9 to 11");
        assert_eq!(res.timex, "(T09,T11,PT2H)");
        assert_eq!(res.comment, Some(Comment::AmPm));
    }

    #[test]
    fn bare_numbers_need_from_or_marker() {
        assert!(TimePeriodExtractor::new(english()).extract("rooms 3 to 5", reference()).is_empty());
    }

    #[test]
    fn two_time_points_merge() {
        let (span, res) = resolve("open from noon until 3pm");
        assert_eq!(span, "from noon until 3pm");
        assert_eq!(res.timex, "(T12,T15,PT3H)");
        assert_eq!(res.sub_resolutions.len(), 2);
        assert_eq!(res.sub_resolutions[0].extract.text, "noon");
    }

    #[test]
    fn day_part_windows() {
        let (_, res) = resolve("in the morning");
        assert_eq!(res.timex, "TMO");
        assert_eq!(
            res.future,
            Some(TimeValue::Interval { start: at(2016, 11, 7, 8, 0), end: at(2016, 11, 7, 12, 0) })
        );

        let (_, res) = resolve("late afternoon");
        assert_eq!(res.modifier, Some(Modifier::End));
        assert_eq!(
            res.future,
            Some(TimeValue::Interval { start: at(2016, 11, 7, 14, 0), end: at(2016, 11, 7, 16, 0) })
        );
    }
}
