//! Timex and value formatting.
//!
//! A timex is the compact, partially specified encoding of a resolved
//! expression: `XXXX-11-15` for a day without a year, `XXXX-WXX-5` for a bare
//! weekday, `T08:30` for a clock time, `P3W` for a duration and
//! `(2016-11-04,2016-11-22,P18D)` for a bounded range.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::Grain;
use crate::calendar::DayPart;

pub fn format_date(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d").to_string()
}

pub fn format_time(dt: NaiveDateTime) -> String {
    dt.format("%H:%M:%S").to_string()
}

pub fn format_date_time(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Duration value string: whole seconds when integral.
pub fn format_duration_seconds(secs: f64) -> String {
    format_number(secs)
}

/// `3` rather than `3.0`, `0.5` as is.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 { format!("{}", n as i64) } else { format!("{n}") }
}

pub fn date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Date timex with optional fields: `XXXX-11-15`, `XXXX-XX-15`, `2016-11-15`.
pub fn luis_date(year: Option<i32>, month: Option<u32>, day: u32) -> String {
    let year = year.map_or_else(|| "XXXX".to_string(), |y| format!("{y:04}"));
    let month = month.map_or_else(|| "XX".to_string(), |m| format!("{m:02}"));
    format!("{year}-{month}-{day:02}")
}

/// Bare weekday, Monday = 1: `XXXX-WXX-5`.
pub fn luis_weekday(weekday: Weekday) -> String {
    format!("XXXX-WXX-{}", weekday.number_from_monday())
}

/// Clock time: `T08`, `T08:30`, `T08:30:15`. Minutes are written when given,
/// seconds only when non-zero.
pub fn luis_time(hour: u32, minute: Option<u32>, second: Option<u32>) -> String {
    match (minute, second) {
        (None, _) => format!("T{hour:02}"),
        (Some(m), Some(s)) if s > 0 => format!("T{hour:02}:{m:02}:{s:02}"),
        (Some(m), _) => format!("T{hour:02}:{m:02}"),
    }
}

/// Clock time derived from a resolved instant, omitting zero minutes.
pub fn time_of(dt: NaiveDateTime) -> String {
    let minute = (dt.minute() != 0 || dt.second() != 0).then_some(dt.minute());
    luis_time(dt.hour(), minute, Some(dt.second()))
}

/// Full date-time: `2016-11-15T08`, `2016-11-15T08:30`.
pub fn date_time(dt: NaiveDateTime) -> String {
    format!("{}{}", date(dt.date()), time_of(dt))
}

pub fn duration(amount: f64, grain: Grain) -> String {
    let prefix = if grain.is_sub_day() { "PT" } else { "P" };
    format!("{prefix}{}{}", format_number(amount), grain.timex_unit())
}

/// Sub-day span between two instants: `PT2H`, `PT1H30M`, `PT45M`.
pub fn clock_span(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let minutes = (end - start).num_minutes().max(0);
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("PT{m}M"),
        (h, 0) => format!("PT{h}H"),
        (h, m) => format!("PT{h}H{m}M"),
    }
}

/// Span length in whole days: `P18D`.
pub fn day_span(start: NaiveDate, end: NaiveDate) -> String {
    format!("P{}D", (end - start).num_days())
}

pub fn date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("({},{},{})", date(start), date(end), day_span(start, end))
}

/// Range between two instants, with the span in hours and minutes.
pub fn date_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("({},{},{})", date_time(start), date_time(end), clock_span(start, end))
}

/// Clock-only range: `(T15,T17,PT2H)`.
pub fn time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("({},{},{})", time_of(start), time_of(end), clock_span(start, end))
}

pub fn iso_week(d: NaiveDate) -> String {
    let week = d.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

pub fn weekend(d: NaiveDate) -> String {
    format!("{}-WE", iso_week(d))
}

pub fn month(year: Option<i32>, month: u32) -> String {
    match year {
        Some(y) => format!("{y:04}-{month:02}"),
        None => format!("XXXX-{month:02}"),
    }
}

pub fn day_part(part: DayPart) -> String {
    format!("T{}", part.timex_code())
}
