//! Bounded ranges below the day grain that carry a date: "tomorrow 5-6pm",
//! "from Friday at 8am to 10am", "Tuesday afternoon", "last night",
//! "the past 3 hours".

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::trace;

use super::date::{DateExtractor, DateParser};
use super::date_time::{DateTimeExtractor, DateTimeParser};
use super::duration::{direction_prefix, find_durations};
use super::time::{TimeExtractor, TimeParser};
use super::time_period::{TimePeriodExtractor, TimePeriodParser};
use super::{Extractor, Parser, Strategy, child, merge_two_points, outer_points, run_cascade, suffix_end};
use crate::calendar::{DayPart, DayPartWindow, shift_by_amount};
use crate::config::LocaleConfig;
use crate::matcher::{PatternMatch, PatternMatcher};
use crate::resolution::{DateTimeResolutionResult, Modifier, TimeValue};
use crate::token::{ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, timex};

fn window_of(m: &PatternMatch<'_>) -> (DayPartWindow, Option<Modifier>) {
    match m.group_lower("window").as_deref() {
        Some("early") => (DayPartWindow::Early, Some(Modifier::Start)),
        Some("late") => (DayPartWindow::Late, Some(Modifier::End)),
        _ => (DayPartWindow::Whole, None),
    }
}

fn day_part_interval(day: NaiveDate, part: DayPart, window: DayPartWindow) -> TimeValue {
    let (start, end) = part.bounds(window);
    TimeValue::Interval { start: day.and_time(start), end: day.and_time(end) }
}

fn first_day(value: Option<TimeValue>) -> Option<NaiveDate> {
    Some(value?.start()?.date())
}

/// Date prefix of a datetime timex: `XXXX-WXX-5T08` gives `XXXX-WXX-5`.
fn date_prefix(timex: &str) -> &str {
    timex.rfind('T').map_or(timex, |i| &timex[..i])
}

/// A date and a time span joined by nothing or a short connector.
fn date_and_clock(config: &LocaleConfig, text: &str, date: &ExtractResult, clock: &ExtractResult) -> Option<Token> {
    let (gap_start, gap_end) = if date.end() <= clock.start {
        (date.end(), clock.start)
    } else if clock.end() <= date.start {
        (clock.end(), date.start)
    } else {
        return None;
    };
    let gap = &text[gap_start..gap_end];
    if !gap.is_empty() && config.date_time_period.connector.exact(gap).is_none() {
        return None;
    }
    Some(Token::new(date.start.min(clock.start), date.end().max(clock.end())))
}

pub struct DateTimePeriodExtractor<'a> {
    config: &'a LocaleConfig,
    skip_from_to_merge: bool,
}

impl<'a> DateTimePeriodExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DateTimePeriodExtractor { config, skip_from_to_merge: false }
    }

    pub fn skip_from_to_merge(mut self, skip: bool) -> Self {
        self.skip_from_to_merge = skip;
        self
    }

    /// Date-time points plus the bare times none of them cover, in text order.
    fn points(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        let mut points = DateTimeExtractor::new(self.config).extract(text, reference);
        let times = TimeExtractor::new(self.config).extract(text, reference);
        for time in times {
            if !points.iter().any(|p| p.start < time.end() && time.start < p.end()) {
                points.push(time);
            }
        }
        points.sort_by_key(|p| p.start);
        points
    }

    fn two_points(&self, text: &str, reference: NaiveDateTime, tokens: &mut Vec<Token>) {
        let points = self.points(text, reference);
        for token in merge_two_points(self.config, text, &points) {
            // two bare times are a time period
            let dated = points
                .iter()
                .any(|p| p.dim == Dimension::DateTime && token.start <= p.start && p.end() <= token.end);
            if dated {
                tokens.push(token);
            }
        }
    }
}

impl Extractor for DateTimePeriodExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::DateTimePeriod
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        let p = &self.config.date_time_period;
        let mut tokens = Vec::new();

        let dates = DateExtractor::new(self.config).extract(text, reference);
        let clock_ranges =
            TimePeriodExtractor::new(self.config).skip_from_to_merge(self.skip_from_to_merge).extract(text, reference);
        for date in &dates {
            for range in &clock_ranges {
                if let Some(token) = date_and_clock(self.config, text, date, range) {
                    trace!(target: "chronolex::extract", date = %date.text, range = %range.text, "date and time range");
                    tokens.push(token);
                }
            }
            if let Some(end) = suffix_end(&p.day_part_suffix, text, date.end()) {
                tokens.push(Token::new(date.start, end));
            }
        }

        tokens.extend(p.special_day_part.find_all(text).into_iter().map(|m| Token::new(m.start, m.end)));

        if !self.skip_from_to_merge {
            self.two_points(text, reference, &mut tokens);
        }

        for (er, _, _) in find_durations(self.config, text, |g| g.is_sub_day()) {
            if let Some((start, _)) = direction_prefix(self.config, text, er.start) {
                tokens.push(Token::new(start, er.end()));
            }
        }

        merge_all_tokens(tokens, text, Dimension::DateTimePeriod)
    }
}

pub struct DateTimePeriodParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> DateTimePeriodParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DateTimePeriodParser { config }
    }

    /// "tonight", "last night", "early this morning".
    fn parse_special_day_part(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_time_period.special_day_part.exact(&er.text)?;
        let (offset, part) = if m.has("tonight") {
            (0, DayPart::Night)
        } else {
            let rel = m.group("rel")?;
            let offset = self.config.implicit_day(rel).or_else(|| self.config.relative_offset(rel))?;
            (offset, self.config.day_part(m.group("daypart")?)?)
        };
        let (window, modifier) = window_of(&m);
        let day = reference.date() + Duration::days(offset);

        let mut res = DateTimeResolutionResult::pinned(
            format!("{}{}", timex::date(day), timex::day_part(part)),
            day_part_interval(day, part, window),
        );
        res.modifier = modifier;
        Some(res)
    }

    /// "Tuesday afternoon", "tomorrow, late in the evening".
    fn parse_date_day_part(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let dates = DateExtractor::new(self.config).extract(&er.text, reference);
        let date = dates.first().filter(|d| d.start == 0)?;
        let m = self.config.date_time_period.day_part_suffix.exact(&er.text[date.end()..])?;
        let part = self.config.day_part(m.group("daypart")?)?;
        let (window, modifier) = window_of(&m);

        let date_res = DateParser::new(self.config).parse(date, reference)?;
        let future = first_day(date_res.future)?;
        let past = first_day(date_res.past)?;
        let mut res = DateTimeResolutionResult::new(
            format!("{}{}", date_res.timex, timex::day_part(part)),
            day_part_interval(future, part, window),
            day_part_interval(past, part, window),
        );
        res.modifier = modifier;
        Some(res.with_children(vec![child(er, date, Dimension::Date, date_res)]))
    }

    /// "5 to 6pm of April 22", "tomorrow 5-6pm": the clock range moves onto
    /// the date.
    fn parse_date_with_range(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let dates = DateExtractor::new(self.config).extract(&er.text, reference);
        let ranges = TimePeriodExtractor::new(self.config).extract(&er.text, reference);
        let (date, range) = dates.iter().find_map(|date| {
            ranges.iter().find_map(|range| {
                let token = date_and_clock(self.config, &er.text, date, range)?;
                (token.start == 0 && token.end == er.text.len()).then_some((date, range))
            })
        })?;

        let date_res = DateParser::new(self.config).parse(date, reference)?;
        let range_res = TimePeriodParser::new(self.config).parse(range, reference)?;
        let (start, end) = match range_res.future {
            Some(TimeValue::Interval { start, end }) => (start, end),
            _ => return None,
        };
        let project = |day: NaiveDate| {
            let s = day.and_time(start.time());
            (s, s + (end - start))
        };
        let (future_start, future_end) = project(first_day(date_res.future)?);
        let (past_start, past_end) = project(first_day(date_res.past)?);

        let timex = if range_res.timex.starts_with('(') {
            if date_res.is_ambiguous() {
                let day = date_prefix(&date_res.timex);
                format!(
                    "({day}{},{day}{},{})",
                    timex::time_of(start),
                    timex::time_of(end),
                    timex::clock_span(start, end)
                )
            } else {
                timex::date_time_range(future_start, future_end)
            }
        } else {
            format!("{}{}", date_res.timex, range_res.timex)
        };
        trace!(target: "chronolex::parse", date = %date_res.timex, range = %range_res.timex, %timex, "projected range");

        let mut res = DateTimeResolutionResult::new(
            timex,
            TimeValue::Interval { start: future_start, end: future_end },
            TimeValue::Interval { start: past_start, end: past_end },
        )
        .with_comment(range_res.comment);
        res.modifier = range_res.modifier;

        let children = vec![
            child(er, date, Dimension::Date, date_res),
            child(er, range, Dimension::TimePeriod, range_res),
        ];
        Some(res.with_children(children))
    }

    /// Resolve one end of a two-point range. A bare time borrows the day of
    /// `other`.
    fn point(
        &self,
        point: &ExtractResult,
        other: Option<&DateTimeResolutionResult>,
        reference: NaiveDateTime,
    ) -> Option<DateTimeResolutionResult> {
        if point.dim == Dimension::DateTime {
            return DateTimeParser::new(self.config).parse(point, reference);
        }
        let reading = TimeParser::new(self.config).reading(&point.text)?;
        let other = other?;
        let future = reading.on(first_day(other.future)?)?;
        let past = reading.on(first_day(other.past)?)?;
        let timex = format!("{}{}", date_prefix(&other.timex), reading.timex());
        Some(
            DateTimeResolutionResult::new(timex, TimeValue::Instant(future), TimeValue::Instant(past))
                .with_comment(reading.comment()),
        )
    }

    fn parse_two_points(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let extractor = DateTimePeriodExtractor::new(self.config);
        let (first, last) = outer_points(extractor.points(&er.text, reference))?;

        let (left, right) = if first.dim == Dimension::DateTime {
            let left = self.point(&first, None, reference)?;
            let right = self.point(&last, Some(&left), reference)?;
            (left, right)
        } else {
            let right = self.point(&last, None, reference)?;
            let left = self.point(&first, Some(&right), reference)?;
            (left, right)
        };

        let span = |l: &Option<TimeValue>, r: &Option<TimeValue>| -> Option<(NaiveDateTime, NaiveDateTime)> {
            let start = l.as_ref()?.start()?;
            let mut end = r.as_ref()?.start()?;
            // a bare end time at or before the start runs into the next day
            if end <= start && last.dim == Dimension::Time {
                end += Duration::days(1);
            }
            (start < end).then_some((start, end))
        };
        let Some((future_start, future_end)) = span(&left.future, &right.future) else {
            trace!(target: "chronolex::parse", left = %left.timex, right = %right.timex, "range ends out of order");
            return None;
        };
        let (past_start, past_end) = span(&left.past, &right.past)?;

        let pinned = !left.is_ambiguous() && !right.is_ambiguous();
        let timex = if pinned {
            timex::date_time_range(future_start, future_end)
        } else {
            format!("({},{},{})", left.timex, right.timex, timex::clock_span(future_start, future_end))
        };
        let comment = left.comment.or(right.comment);
        let res = DateTimeResolutionResult::new(
            timex,
            TimeValue::Interval { start: future_start, end: future_end },
            TimeValue::Interval { start: past_start, end: past_end },
        )
        .with_comment(comment);

        let children = vec![
            child(er, &first, first.dim, left),
            child(er, &last, last.dim, right),
        ];
        Some(res.with_children(children))
    }

    /// "the past 3 hours", "within the next 30 minutes".
    fn parse_duration_range(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let (duration, amount, grain) = find_durations(self.config, &er.text, |g| g.is_sub_day()).into_iter().next()?;
        if duration.end() != er.text.len() {
            return None;
        }
        let (start, next) = direction_prefix(self.config, &er.text, duration.start)?;
        if start != 0 {
            return None;
        }
        let (start, end) = if next {
            (reference, shift_by_amount(reference, amount, grain)?)
        } else {
            (shift_by_amount(reference, -amount, grain)?, reference)
        };
        Some(DateTimeResolutionResult::pinned(timex::date_time_range(start, end), TimeValue::Interval { start, end }))
    }
}

impl Parser for DateTimePeriodParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let strategies: &[Strategy<Self>] = &[
            ("special_day_part", Self::parse_special_day_part),
            ("date_day_part", Self::parse_date_day_part),
            ("date_with_time_range", Self::parse_date_with_range),
            ("two_points", Self::parse_two_points),
            ("duration_range", Self::parse_duration_range),
        ];
        run_cascade(self, strategies, er, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::testing::{at, english, reference};

    fn resolve(text: &str) -> (String, DateTimeResolutionResult) {
        let spans = DateTimePeriodExtractor::new(english()).extract(text, reference());
        assert_eq!(spans.len(), 1, "{text}: {spans:?}");
        let res = DateTimePeriodParser::new(english()).parse(&spans[0], reference()).unwrap();
        (spans[0].text.clone(), res)
    }

    fn between(start: NaiveDateTime, end: NaiveDateTime) -> Option<TimeValue> {
        Some(TimeValue::Interval { start, end })
    }

    #[test]
    fn time_range_projects_onto_date() {
        let (span, res) = resolve("I'm free tomorrow 5-6pm");
        assert_eq!(span, "tomorrow 5-6pm");
        assert_eq!(res.timex, "(2016-11-08T17,2016-11-08T18,PT1H)");
        assert_eq!(res.future, between(at(2016, 11, 8, 17, 0), at(2016, 11, 8, 18, 0)));

        let (span, res) = resolve("5 to 6pm of April 22");
        assert_eq!(span, "5 to 6pm of April 22");
        assert_eq!(res.timex, "(XXXX-04-22T17,XXXX-04-22T18,PT1H)");
        assert_eq!(res.future, between(at(2017, 4, 22, 17, 0), at(2017, 4, 22, 18, 0)));
        assert_eq!(res.past, between(at(2016, 4, 22, 17, 0), at(2016, 4, 22, 18, 0)));
        assert_eq!(res.sub_resolutions.len(), 2);
    }

    #[test]
    fn date_with_day_part() {
        let (span, res) = resolve("let's meet Tuesday afternoon");
        assert_eq!(span, "Tuesday afternoon");
        assert_eq!(res.timex, "XXXX-WXX-2TAF");
        assert_eq!(res.future, between(at(2016, 11, 8, 12, 0), at(2016, 11, 8, 16, 0)));
        assert_eq!(res.past, between(at(2016, 11, 1, 12, 0), at(2016, 11, 1, 16, 0)));
    }

    #[test]
    fn relative_day_parts() {
        assert_eq!(resolve("tomorrow night").1.timex, "2016-11-08TNI");
        assert_eq!(resolve("I slept badly last night").1.timex, "2016-11-06TNI");

        let (_, res) = resolve("tonight");
        assert_eq!(res.timex, "2016-11-07TNI");
        assert_eq!(res.future, res.past);

        let (_, res) = resolve("early this morning");
        assert_eq!(res.modifier, Some(Modifier::Start));
        assert_eq!(res.future, between(at(2016, 11, 7, 8, 0), at(2016, 11, 7, 10, 0)));
    }

    #[test]
    fn bare_end_time_borrows_the_date() {
        let (span, res) = resolve("busy from Friday at 8am to 10am");
        assert_eq!(span, "from Friday at 8am to 10am");
        assert_eq!(res.timex, "(XXXX-WXX-5T08,XXXX-WXX-5T10,PT2H)");
        assert_eq!(res.future, between(at(2016, 11, 11, 8, 0), at(2016, 11, 11, 10, 0)));
        assert_eq!(res.past, between(at(2016, 11, 4, 8, 0), at(2016, 11, 4, 10, 0)));
    }

    #[test]
    fn skipping_the_merge_keeps_from_outside() {
        let spans = DateTimePeriodExtractor::new(english())
            .skip_from_to_merge(true)
            .extract("from Friday at 8am to 10am", reference());
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Friday at 8am to 10am"]);
    }

    #[test]
    fn sub_day_duration_ranges() {
        assert_eq!(resolve("in the past 3 hours").1.timex, "(2016-11-06T21,2016-11-07T00,PT3H)");

        let (_, res) = resolve("within the next 2 hours");
        assert_eq!(res.future, between(reference(), at(2016, 11, 7, 2, 0)));
    }
}
