//! Date ranges: explicit day ranges, unit periods ("next week", "Q3 2016"),
//! month parts, seasons and duration-anchored ranges.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use tracing::trace;

use super::date::{DateExtractor, DateParser};
use super::duration::{direction_prefix, find_durations};
use super::{Extractor, Parser, Strategy, child, merge_two_points, outer_points, run_cascade};
use crate::calendar::{
    add_months, days_in_month, midnight, period_bounds, period_end, resolve_month_day, shift_by_amount,
    shift_date_by_grain, start_of, ymd,
};
use crate::config::LocaleConfig;
use crate::matcher::{PatternMatch, PatternMatcher};
use crate::resolution::{DateTimeResolutionResult, Modifier, TimeValue};
use crate::token::{ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, Grain, timex};

type DayRange = (NaiveDate, NaiveDate);

fn interval((start, end): DayRange) -> TimeValue {
    TimeValue::Interval { start: midnight(start), end: midnight(end) }
}

fn pinned_range(timex: impl Into<String>, range: DayRange) -> DateTimeResolutionResult {
    DateTimeResolutionResult::pinned(timex, interval(range))
}

fn ambiguous_range(timex: impl Into<String>, future: DayRange, past: DayRange) -> DateTimeResolutionResult {
    DateTimeResolutionResult::new(timex, interval(future), interval(past))
}

/// Years of the next and previous occurrence of `month`, counting the
/// reference month as upcoming.
fn month_years(reference: NaiveDate, month: u32) -> (i32, i32) {
    let future = if month >= reference.month() { reference.year() } else { reference.year() + 1 };
    (future, future - 1)
}

/// Year of a month qualified by "this", "next" or "last".
fn relative_month_year(reference: NaiveDate, month: u32, offset: i64) -> i32 {
    match offset {
        0 => reference.year(),
        o if o > 0 => {
            if month > reference.month() { reference.year() } else { reference.year() + 1 }
        }
        _ => {
            if month < reference.month() { reference.year() } else { reference.year() - 1 }
        }
    }
}

pub struct DatePeriodExtractor<'a> {
    config: &'a LocaleConfig,
    skip_from_to_merge: bool,
}

impl<'a> DatePeriodExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DatePeriodExtractor { config, skip_from_to_merge: false }
    }

    /// Leave "from X to Y" as two separate dates.
    pub fn skip_from_to_merge(mut self, skip: bool) -> Self {
        self.skip_from_to_merge = skip;
        self
    }

    fn valid_days(&self, m: &PatternMatch<'_>) -> bool {
        ["d1", "d2"].iter().all(|g| {
            m.group(g).and_then(|d| self.config.integer(d)).is_some_and(|d| (1..=31).contains(&d))
        })
    }

    /// A bare month name is only a period with a qualifier, a year or a
    /// licensing word before it ("in May").
    fn month_licensed(&self, text: &str, m: &PatternMatch<'_>) -> bool {
        m.has("rel") || m.has("year") || self.config.date_period.month_context.at_end(&text[..m.start]).is_some()
    }
}

impl Extractor for DatePeriodExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::DatePeriod
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        let p = &self.config.date_period;
        let mut tokens = Vec::new();

        for re in [&p.day_range_month, &p.month_day_range] {
            for m in re.find_all(text) {
                if self.valid_days(&m) {
                    tokens.push(Token::new(m.start, m.end));
                }
            }
        }

        for m in p.month.find_all(text) {
            if self.month_licensed(text, &m) {
                tokens.push(Token::new(m.start, m.end));
            } else {
                trace!(target: "chronolex::extract", text = m.text, "bare month without context");
            }
        }

        for re in [
            &p.relative_unit,
            &p.year,
            &p.week_of_month,
            &p.iso_week,
            &p.quarter_ordinal,
            &p.quarter_code,
            &p.half_ordinal,
            &p.half_code,
            &p.season,
            &p.month_part,
            &p.rest_of,
        ] {
            tokens.extend(re.find_all(text).into_iter().map(|m| Token::new(m.start, m.end)));
        }

        for (er, _, _) in find_durations(self.config, text, |g| !g.is_sub_day()) {
            if let Some((start, _)) = direction_prefix(self.config, text, er.start) {
                tokens.push(Token::new(start, er.end()));
            }
        }

        if !self.skip_from_to_merge {
            let points = DateExtractor::new(self.config).extract(text, reference);
            tokens.extend(merge_two_points(self.config, text, &points));
        }

        merge_all_tokens(tokens, text, Dimension::DatePeriod)
    }
}

pub struct DatePeriodParser<'a> {
    config: &'a LocaleConfig,
    inclusive_end: bool,
}

impl<'a> DatePeriodParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DatePeriodParser { config, inclusive_end: false }
    }

    /// Close unit periods on their last day instead of the day after.
    pub fn inclusive_end(mut self, inclusive: bool) -> Self {
        self.inclusive_end = inclusive;
        self
    }

    /// `[start, exclusive_end)` turned into the emitted bounds.
    fn unit_period(&self, start: NaiveDate, exclusive_end: NaiveDate) -> DayRange {
        (start, period_end(exclusive_end, self.inclusive_end))
    }

    fn year_of(m: &PatternMatch<'_>) -> Option<i32> {
        m.group("year").and_then(|y| y.parse().ok())
    }

    fn day_of(&self, m: &PatternMatch<'_>, group: &str) -> Option<u32> {
        u32::try_from(self.config.integer(m.group(group)?)?).ok()
    }

    fn month_of(&self, m: &PatternMatch<'_>) -> Option<u32> {
        self.config.month(m.group("month")?)
    }

    /// Apply `bounds` to a month given by name (optionally with a year) or
    /// by "this/next/last month". A bare month name is ambiguous by a year.
    fn month_scoped(
        &self,
        m: &PatternMatch<'_>,
        reference: NaiveDateTime,
        timex: impl Fn(Option<i32>, u32) -> String,
        bounds: impl Fn(i32, u32) -> Option<DayRange>,
    ) -> Option<DateTimeResolutionResult> {
        if let Some(rel) = m.group("rel") {
            let shifted = add_months(reference, self.config.relative_offset(rel)?)?;
            let range = bounds(shifted.year(), shifted.month())?;
            return Some(pinned_range(timex(Some(shifted.year()), shifted.month()), range));
        }
        let month = self.month_of(m)?;
        if let Some(year) = Self::year_of(m) {
            return Some(pinned_range(timex(Some(year), month), bounds(year, month)?));
        }
        let (future, past) = month_years(reference.date(), month);
        Some(ambiguous_range(timex(None, month), bounds(future, month)?, bounds(past, month)?))
    }

    fn parse_simple_range(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date_period;
        let m = p.day_range_month.exact(&er.text).or_else(|| p.month_day_range.exact(&er.text))?;
        let (d1, d2) = (self.day_of(&m, "d1")?, self.day_of(&m, "d2")?);
        if d1 > d2 {
            return None;
        }
        let span = |year: i32, month: u32| Some((ymd(year, month, d1)?, ymd(year, month, d2)?));

        if let Some(rel) = m.group("rel") {
            let shifted = add_months(reference, self.config.relative_offset(rel)?)?;
            let range = span(shifted.year(), shifted.month())?;
            return Some(pinned_range(timex::date_range(range.0, range.1), range));
        }
        let month = self.month_of(&m)?;
        if let Some(year) = Self::year_of(&m) {
            let range = span(year, month)?;
            return Some(pinned_range(timex::date_range(range.0, range.1), range));
        }
        let (future, past) = resolve_month_day(reference.date(), month, d1)?;
        let code = format!(
            "({},{},P{}D)",
            timex::luis_date(None, Some(month), d1),
            timex::luis_date(None, Some(month), d2),
            d2 - d1
        );
        Some(ambiguous_range(code, span(future.year(), month)?, span(past.year(), month)?))
    }

    fn parse_two_points(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let (first, last) = outer_points(DateExtractor::new(self.config).extract(&er.text, reference))?;
        let parser = DateParser::new(self.config);
        let begin = parser.parse(&first, reference)?;
        let end = parser.parse(&last, reference)?;

        let day = |v: Option<TimeValue>| v.and_then(|v| v.start()).map(|dt| dt.date());
        let (begin_future, begin_past) = (day(begin.future)?, day(begin.past)?);
        let (end_future, end_past) = (day(end.future)?, day(end.past)?);
        // ends on either side of the reference share the nearer year
        let future = if begin_future > end_future { (begin_past, end_future) } else { (begin_future, end_future) };
        let past = if begin_past > end_past { (begin_past, end_future) } else { (begin_past, end_past) };
        if future.0 > future.1 || past.0 > past.1 {
            trace!(target: "chronolex::parse", text = %er.text, "range ends before it begins");
            return None;
        }

        let code = format!("({},{},P{}D)", begin.timex, end.timex, (future.1 - future.0).num_days());
        let children = vec![
            child(er, &first, Dimension::Date, begin),
            child(er, &last, Dimension::Date, end),
        ];
        Some(ambiguous_range(code, future, past).with_children(children))
    }

    fn parse_relative_unit(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.relative_unit.exact(&er.text)?;
        let offset = self.config.relative_offset(m.group("rel")?)?;
        let today = reference.date();

        match m.group_lower("unit")?.as_str() {
            "week" => {
                let start = shift_date_by_grain(start_of(Grain::Week, reference).date(), offset, Grain::Week)?;
                let range = period_bounds(Grain::Week, start, self.inclusive_end)?;
                Some(pinned_range(timex::iso_week(start), range))
            }
            "weekend" => {
                let week = shift_date_by_grain(start_of(Grain::Week, reference).date(), offset, Grain::Week)?;
                let saturday = week + Duration::days(Weekday::Sat.num_days_from_monday() as i64);
                let range = self.unit_period(saturday, saturday + Duration::days(2));
                Some(pinned_range(timex::weekend(week), range))
            }
            "month" => {
                let shifted = shift_date_by_grain(today, offset, Grain::Month)?;
                let range = period_bounds(Grain::Month, shifted, self.inclusive_end)?;
                Some(pinned_range(timex::month(Some(shifted.year()), shifted.month()), range))
            }
            "year" => {
                let shifted = shift_date_by_grain(today, offset, Grain::Year)?;
                let range = period_bounds(Grain::Year, shifted, self.inclusive_end)?;
                Some(pinned_range(format!("{:04}", shifted.year()), range))
            }
            "quarter" => {
                let shifted = shift_date_by_grain(today, offset, Grain::Quarter)?;
                let start = start_of(Grain::Quarter, midnight(shifted)).date();
                self.months_result(start, 3)
            }
            _ => None,
        }
    }

    /// A run of whole months starting at `start`, with a `(start,end,PnM)` timex.
    fn months_result(&self, start: NaiveDate, months: i64) -> Option<DateTimeResolutionResult> {
        let range = self.unit_period(start, shift_date_by_grain(start, months, Grain::Month)?);
        let code = format!("({},{},P{months}M)", timex::date(range.0), timex::date(range.1));
        Some(pinned_range(code, range))
    }

    fn parse_month(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.month.exact(&er.text)?;
        let month = self.month_of(&m)?;
        let whole = |year: i32| {
            let first = ymd(year, month, 1)?;
            period_bounds(Grain::Month, first, self.inclusive_end)
        };

        let year = match (Self::year_of(&m), m.group("rel")) {
            (Some(year), _) => Some(year),
            (None, Some(rel)) => {
                Some(relative_month_year(reference.date(), month, self.config.relative_offset(rel)?))
            }
            (None, None) => None,
        };
        if let Some(year) = year {
            return Some(pinned_range(timex::month(Some(year), month), whole(year)?));
        }
        let (future, past) = month_years(reference.date(), month);
        Some(ambiguous_range(timex::month(None, month), whole(future)?, whole(past)?))
    }

    fn parse_year(&self, er: &ExtractResult, _reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.year.exact(&er.text)?;
        let year = Self::year_of(&m)?;
        let range = period_bounds(Grain::Year, ymd(year, 1, 1)?, self.inclusive_end)?;
        Some(pinned_range(format!("{year:04}"), range))
    }

    fn parse_week_of_month(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.week_of_month.exact(&er.text)?;
        let n = self.config.ordinal_count(m.group("cardinal")?)?;
        let bounds = |year: i32, month: u32| {
            let first_week = start_of(Grain::Week, midnight(ymd(year, month, 1)?)).date();
            let last_week = start_of(Grain::Week, midnight(ymd(year, month, days_in_month(year, month))?)).date();
            let start = (first_week + Duration::weeks(n as i64 - 1)).min(last_week);
            Some(self.unit_period(start, start + Duration::weeks(1)))
        };
        self.month_scoped(&m, reference, |year, month| format!("{}-W{n:02}", timex::month(year, month)), bounds)
    }

    fn parse_iso_week(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.iso_week.exact(&er.text)?;
        let week = m.group("week")?.parse().ok()?;
        let year = Self::year_of(&m).unwrap_or_else(|| reference.year());
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
        Some(pinned_range(timex::iso_week(monday), self.unit_period(monday, monday + Duration::weeks(1))))
    }

    /// Year of a quarter or half: explicit, "next year", or the reference year.
    fn qualified_year(&self, m: &PatternMatch<'_>, reference: NaiveDateTime) -> Option<i32> {
        match (Self::year_of(m), m.group("rel")) {
            (Some(year), _) => Some(year),
            (None, Some(rel)) => Some(reference.year() + self.config.relative_offset(rel)? as i32),
            (None, None) => Some(reference.year()),
        }
    }

    fn part_index(&self, m: &PatternMatch<'_>, last: u32) -> Option<u32> {
        if let Some(num) = m.group("num") {
            return num.parse().ok();
        }
        let cardinal = m.group_lower("cardinal")?;
        if cardinal == "last" { Some(last) } else { self.config.ordinal_count(&cardinal) }
    }

    fn parse_quarter(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date_period;
        let m = p.quarter_ordinal.exact(&er.text).or_else(|| p.quarter_code.exact(&er.text))?;
        let quarter = self.part_index(&m, 4).filter(|q| (1..=4).contains(q))?;
        let year = self.qualified_year(&m, reference)?;
        self.months_result(ymd(year, (quarter - 1) * 3 + 1, 1)?, 3)
    }

    fn parse_half(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date_period;
        let m = p.half_ordinal.exact(&er.text).or_else(|| p.half_code.exact(&er.text))?;
        let half = self.part_index(&m, 2).filter(|h| (1..=2).contains(h))?;
        let year = self.qualified_year(&m, reference)?;
        self.months_result(ymd(year, (half - 1) * 6 + 1, 1)?, 6)
    }

    fn parse_season(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.season.exact(&er.text)?;
        let season = self.config.season(m.group("season")?)?;
        let year = match (Self::year_of(&m), m.group("rel")) {
            (Some(year), _) => year,
            (None, Some(rel)) => reference.year() + self.config.relative_offset(rel)? as i32,
            (None, None) => return Some(DateTimeResolutionResult::timex_only(season.timex_code())),
        };
        let (start, end) = season.bounds(year)?;
        Some(pinned_range(format!("{year:04}-{}", season.timex_code()), self.unit_period(start, end)))
    }

    fn parse_month_part(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.month_part.exact(&er.text)?;
        let part = self.config.period_part(m.group("part")?)?;

        let mut res = match m.group_lower("unit").as_deref() {
            Some("week") => {
                let offset = self.config.relative_offset(m.group("rel").unwrap_or("this"))?;
                let week = shift_date_by_grain(start_of(Grain::Week, reference).date(), offset, Grain::Week)?;
                let (from, to) = match part {
                    Modifier::Start => (0, 3),
                    Modifier::Mid => (2, 5),
                    _ => (4, 7),
                };
                let range = self.unit_period(week + Duration::days(from), week + Duration::days(to));
                pinned_range(timex::iso_week(week), range)
            }
            Some("year") => {
                let offset = self.config.relative_offset(m.group("rel").unwrap_or("this"))?;
                let year = reference.year() + offset as i32;
                let first = match part {
                    Modifier::Start => 1,
                    Modifier::Mid => 5,
                    _ => 9,
                };
                let start = ymd(year, first, 1)?;
                let range = self.unit_period(start, shift_date_by_grain(start, 4, Grain::Month)?);
                pinned_range(format!("{year:04}"), range)
            }
            _ => {
                let bounds = |year: i32, month: u32| {
                    let (first, last) = match part {
                        Modifier::Start => (1, 11),
                        Modifier::Mid => (11, 21),
                        _ => (21, days_in_month(year, month) + 1),
                    };
                    let start = ymd(year, month, first)?;
                    Some(self.unit_period(start, start + Duration::days((last - first) as i64)))
                };
                self.month_scoped(&m, reference, timex::month, bounds)?
            }
        };
        res.modifier = Some(part);
        Some(res)
    }

    fn parse_rest_of(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date_period.rest_of.exact(&er.text)?;
        let grain = self.config.unit(m.group("unit")?)?;
        let today = reference.date();
        let (_, end) = period_bounds(grain, today, self.inclusive_end)?;
        Some(pinned_range(timex::date_range(today, end), (today, end)))
    }

    fn parse_duration_range(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let (duration, amount, grain) = find_durations(self.config, &er.text, |g| !g.is_sub_day()).into_iter().next()?;
        if duration.end() != er.text.len() {
            return None;
        }
        let (start, next) = direction_prefix(self.config, &er.text, duration.start)?;
        if start != 0 {
            return None;
        }

        let today = midnight(reference.date());
        let range = if next {
            let begin = today + Duration::days(1);
            (begin.date(), shift_by_amount(begin, amount, grain)?.date())
        } else {
            (shift_by_amount(today, -amount, grain)?.date(), today.date())
        };
        Some(pinned_range(timex::date_range(range.0, range.1), range))
    }
}

impl Parser for DatePeriodParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let strategies: &[Strategy<Self>] = &[
            ("simple_range", Self::parse_simple_range),
            ("two_points", Self::parse_two_points),
            ("relative_unit", Self::parse_relative_unit),
            ("month", Self::parse_month),
            ("year", Self::parse_year),
            ("week_of_month", Self::parse_week_of_month),
            ("iso_week", Self::parse_iso_week),
            ("quarter", Self::parse_quarter),
            ("half", Self::parse_half),
            ("season", Self::parse_season),
            ("month_part", Self::parse_month_part),
            ("rest_of", Self::parse_rest_of),
            ("duration_range", Self::parse_duration_range),
        ];
        run_cascade(self, strategies, er, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::testing::{english, reference};

    fn days(a: (i32, u32, u32), b: (i32, u32, u32)) -> Option<TimeValue> {
        let d = |(y, m, day): (i32, u32, u32)| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        Some(interval((d(a), d(b))))
    }

    fn resolve_with(text: &str, inclusive: bool) -> (String, DateTimeResolutionResult) {
        let spans = DatePeriodExtractor::new(english()).extract(text, reference());
        assert_eq!(spans.len(), 1, "{text}: {spans:?}");
        let res = DatePeriodParser::new(english()).inclusive_end(inclusive).parse(&spans[0], reference()).unwrap();
        (spans[0].text.clone(), res)
    }

    fn resolve(text: &str) -> DateTimeResolutionResult {
        resolve_with(text, false).1
    }

    #[test]
    fn day_range_in_this_month() {
        let (span, res) = resolve_with("I'll be out from 4 to 22 this month", false);
        assert_eq!(span, "from 4 to 22 this month");
        assert_eq!(res.timex, "(2016-11-04,2016-11-22,P18D)");
        assert_eq!(res.future, days((2016, 11, 4), (2016, 11, 22)));
    }

    #[test]
    fn day_ranges_with_month_names() {
        assert_eq!(resolve("January 4-22, 2017").timex, "(2017-01-04,2017-01-22,P18D)");

        let res = resolve("between 4 and 22 of May");
        assert_eq!(res.timex, "(XXXX-05-04,XXXX-05-22,P18D)");
        assert_eq!(res.future, days((2017, 5, 4), (2017, 5, 22)));
        assert_eq!(res.past, days((2016, 5, 4), (2016, 5, 22)));
    }

    #[test]
    fn rest_of_the_week_honors_end_flag() {
        let (_, res) = resolve_with("rest of the week", true);
        assert_eq!(res.future, days((2016, 11, 7), (2016, 11, 13)));
        let (_, res) = resolve_with("rest of the week", false);
        assert_eq!(res.future, days((2016, 11, 7), (2016, 11, 14)));
    }

    #[test]
    fn relative_units() {
        let res = resolve("next week");
        assert_eq!(res.timex, "2016-W46");
        assert_eq!(res.future, days((2016, 11, 14), (2016, 11, 21)));

        let res = resolve("this weekend");
        assert_eq!(res.timex, "2016-W45-WE");
        assert_eq!(res.future, days((2016, 11, 12), (2016, 11, 14)));

        assert_eq!(resolve("last month").timex, "2016-10");
        assert_eq!(resolve("next year").future, days((2017, 1, 1), (2018, 1, 1)));
        assert_eq!(resolve("this quarter").timex, "(2016-10-01,2017-01-01,P3M)");
    }

    #[test]
    fn bare_month_needs_context() {
        let (span, res) = resolve_with("I'll be there in May", false);
        assert_eq!(span, "May");
        assert_eq!(res.timex, "XXXX-05");
        assert_eq!(res.future, days((2017, 5, 1), (2017, 6, 1)));
        assert_eq!(res.past, days((2016, 5, 1), (2016, 6, 1)));

        assert!(DatePeriodExtractor::new(english()).extract("I may go", reference()).is_empty());
        assert_eq!(resolve("next May").timex, "2017-05");
        assert_eq!(resolve("May 2017").timex, "2017-05");
    }

    #[test]
    fn years_weeks_quarters_halves() {
        assert_eq!(resolve("the year 2016").timex, "2016");

        let res = resolve("the third week of July");
        assert_eq!(res.timex, "XXXX-07-W03");
        assert_eq!(res.future, days((2017, 7, 10), (2017, 7, 17)));
        assert_eq!(res.past, days((2016, 7, 11), (2016, 7, 18)));

        let res = resolve("week 45 2016");
        assert_eq!(res.timex, "2016-W45");
        assert_eq!(res.future, days((2016, 11, 7), (2016, 11, 14)));

        assert_eq!(resolve("Q3 2016").timex, "(2016-07-01,2016-10-01,P3M)");
        assert_eq!(resolve("the third quarter of 2016").timex, "(2016-07-01,2016-10-01,P3M)");
        assert_eq!(resolve("the first half of next year").timex, "(2017-01-01,2017-07-01,P6M)");
    }

    #[test]
    fn seasons() {
        let res = resolve("this summer");
        assert_eq!(res.timex, "2016-SU");
        assert_eq!(res.future, days((2016, 6, 21), (2016, 9, 24)));
        assert_eq!(resolve("winter 2017").future, days((2017, 12, 21), (2018, 3, 21)));

        let res = resolve("summer");
        assert_eq!(res.timex, "SU");
        assert_eq!(res.future, None);
    }

    #[test]
    fn month_parts() {
        let res = resolve("early June 2017");
        assert_eq!(res.timex, "2017-06");
        assert_eq!(res.modifier, Some(Modifier::Start));
        assert_eq!(res.future, days((2017, 6, 1), (2017, 6, 11)));

        let res = resolve("the end of next month");
        assert_eq!(res.timex, "2016-12");
        assert_eq!(res.future, days((2016, 12, 21), (2017, 1, 1)));
    }

    #[test]
    fn duration_ranges_keep_stated_ends() {
        assert_eq!(resolve("in the past 3 days").timex, "(2016-11-04,2016-11-07,P3D)");
        let res = resolve("within the next 2 weeks");
        assert_eq!(res.timex, "(2016-11-08,2016-11-22,P14D)");
    }

    #[test]
    fn two_dates_merge_into_a_range() {
        let (span, res) = resolve_with("from November 15 to November 20", false);
        assert_eq!(span, "from November 15 to November 20");
        assert_eq!(res.timex, "(XXXX-11-15,XXXX-11-20,P5D)");
        assert_eq!(res.future, days((2016, 11, 15), (2016, 11, 20)));
        assert_eq!(res.sub_resolutions.len(), 2);
    }

    #[test]
    fn two_dates_around_the_reference_share_a_year() {
        let (span, res) = resolve_with("from November 5 to November 10", false);
        assert_eq!(span, "from November 5 to November 10");
        assert_eq!(res.timex, "(XXXX-11-05,XXXX-11-10,P5D)");
        assert_eq!(res.future, days((2016, 11, 5), (2016, 11, 10)));
        assert_eq!(res.past, res.future);

        let res = resolve("between November 1 and November 30");
        assert_eq!(res.future, days((2016, 11, 1), (2016, 11, 30)));
    }

    #[test]
    fn reversed_ranges_fail() {
        let config = english();
        let spans = DatePeriodExtractor::new(config).extract("from 22 to 4 this month", reference());
        assert_eq!(spans.len(), 1);
        assert!(DatePeriodParser::new(config).parse(&spans[0], reference()).is_none());
    }
}
