//! Calendar arithmetic shared by the recognizers.
//!
//! Everything here is a pure function of its arguments. Weeks start on Monday.

pub mod boundaries;
pub mod shift;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

pub use boundaries::{period_bounds, period_end, start_of};
pub use shift::{add_months, days_in_month, shift_by_amount, shift_date_by_grain, shift_datetime_by_grain};

pub fn midnight(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

pub fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Two-digit years: 50–99 are 19xx, 00–49 are 20xx.
pub fn year_from(val: i64) -> i32 {
    if val < 100 { if val >= 50 { 1900 + val as i32 } else { 2000 + val as i32 } } else { val as i32 }
}

/// The given weekday inside the Monday-based week containing `reference`.
pub fn this_weekday(reference: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset = weekday.num_days_from_monday() as i64 - reference.weekday().num_days_from_monday() as i64;
    reference + Duration::days(offset)
}

/// Smallest date on or after `reference` falling on `weekday`.
pub fn upcoming_weekday(reference: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() as i64 - reference.weekday().num_days_from_monday() as i64) % 7;
    reference + Duration::days(ahead)
}

/// Largest date strictly before `reference` falling on `weekday`.
pub fn previous_weekday(reference: NaiveDate, weekday: Weekday) -> NaiveDate {
    upcoming_weekday(reference, weekday) - Duration::weeks(1)
}

/// The `n`-th `weekday` of a month. A count past the month's last occurrence
/// steps back one week, so 5 means "last".
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    let first = upcoming_weekday(ymd(year, month, 1)?, weekday);
    let mut date = first + Duration::weeks(n as i64 - 1);
    while date.month() != month {
        date -= Duration::weeks(1);
    }
    Some(date)
}

pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    nth_weekday_of_month(year, month, weekday, 5)
}

/// Easter Sunday by the anonymous Gregorian computus.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}

/// Future and past occurrences of a month/day pair without a year.
///
/// The future reading is the first occurrence on or after `reference`, the past
/// reading the last one strictly before it. Feb 29 hops between leap years.
/// Returns `None` for a month/day that exists in no year.
pub fn resolve_month_day(reference: NaiveDate, month: u32, day: u32) -> Option<(NaiveDate, NaiveDate)> {
    ymd(2000, month, day)?;
    let year = reference.year();

    if month == 2 && day == 29 {
        let mut future_year = year;
        while !is_leap_year(future_year) || ymd(future_year, 2, 29)? < reference {
            future_year += 1;
        }
        let mut past_year = year;
        while !is_leap_year(past_year) || ymd(past_year, 2, 29)? >= reference {
            past_year -= 1;
        }
        return Some((ymd(future_year, 2, 29)?, ymd(past_year, 2, 29)?));
    }

    let this_year = ymd(year, month, day)?;
    if this_year >= reference {
        Some((this_year, ymd(year - 1, month, day)?))
    } else {
        Some((ymd(year + 1, month, day)?, this_year))
    }
}

/// Future and past occurrences of a bare day-of-month, skipping months that
/// lack the day.
pub fn resolve_day(reference: NaiveDate, day: u32) -> Option<(NaiveDate, NaiveDate)> {
    if !(1..=31).contains(&day) {
        return None;
    }
    let month_start = ymd(reference.year(), reference.month(), 1)?;
    let candidate = |offset: i64| {
        let first = shift_date_by_grain(month_start, offset, crate::Grain::Month)?;
        ymd(first.year(), first.month(), day)
    };

    let future = (0..12).filter_map(candidate).find(|d| *d >= reference)?;
    let past = (0..12).map(|i| -i).filter_map(candidate).find(|d| *d < reference)?;
    Some((future, past))
}

/// Future/past occurrences of a bare weekday.
pub fn resolve_weekday(reference: NaiveDate, weekday: Weekday) -> (NaiveDate, NaiveDate) {
    (upcoming_weekday(reference, weekday), previous_weekday(reference, weekday))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// `[start, end)` of the season that begins in `start_year`.
    pub fn bounds(self, start_year: i32) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Season::Spring => Some((ymd(start_year, 3, 21)?, ymd(start_year, 6, 21)?)),
            Season::Summer => Some((ymd(start_year, 6, 21)?, ymd(start_year, 9, 24)?)),
            Season::Fall => Some((ymd(start_year, 9, 24)?, ymd(start_year, 12, 21)?)),
            Season::Winter => Some((ymd(start_year, 12, 21)?, ymd(start_year + 1, 3, 21)?)),
        }
    }

    pub fn timex_code(self) -> &'static str {
        match self {
            Season::Spring => "SP",
            Season::Summer => "SU",
            Season::Fall => "FA",
            Season::Winter => "WI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Sub-window of a day part selected by an "early"/"late" prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayPartWindow {
    #[default]
    Whole,
    Early,
    Late,
}

impl DayPart {
    /// Fixed hour table: morning 08–12, afternoon 12–16, evening 16–20,
    /// night 20–23:59:59.
    pub fn bounds(self, window: DayPartWindow) -> (NaiveTime, NaiveTime) {
        let hms = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN);
        let (start, end) = match self {
            DayPart::Morning => (hms(8, 0, 0), hms(12, 0, 0)),
            DayPart::Afternoon => (hms(12, 0, 0), hms(16, 0, 0)),
            DayPart::Evening => (hms(16, 0, 0), hms(20, 0, 0)),
            DayPart::Night => (hms(20, 0, 0), hms(23, 59, 59)),
        };
        match window {
            DayPartWindow::Whole => (start, end),
            DayPartWindow::Early => (start, start + Duration::hours(2)),
            DayPartWindow::Late => match self {
                DayPart::Night => (hms(22, 0, 0), end),
                _ => (end - Duration::hours(2), end),
            },
        }
    }

    pub fn timex_code(self) -> &'static str {
        match self {
            DayPart::Morning => "MO",
            DayPart::Afternoon => "AF",
            DayPart::Evening => "EV",
            DayPart::Night => "NI",
        }
    }

    /// Clock hours mentioned alongside this part are afternoon/evening hours.
    pub fn is_pm(self) -> bool {
        !matches!(self, DayPart::Morning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekday_helpers_use_monday_weeks() {
        let monday = d(2016, 11, 7);
        assert_eq!(this_weekday(monday, Weekday::Sun), d(2016, 11, 13));
        assert_eq!(this_weekday(d(2016, 11, 13), Weekday::Mon), monday);
        assert_eq!(resolve_weekday(monday, Weekday::Fri), (d(2016, 11, 11), d(2016, 11, 4)));
        assert_eq!(resolve_weekday(monday, Weekday::Mon), (monday, d(2016, 10, 31)));
    }

    #[test]
    fn nth_weekday_steps_back_on_overflow() {
        assert_eq!(nth_weekday_of_month(2016, 7, Weekday::Fri, 1), Some(d(2016, 7, 1)));
        assert_eq!(nth_weekday_of_month(2016, 11, Weekday::Thu, 4), Some(d(2016, 11, 24)));
        assert_eq!(last_weekday_of_month(2016, 5, Weekday::Mon), Some(d(2016, 5, 30)));
        assert_eq!(nth_weekday_of_month(2016, 2, Weekday::Mon, 5), Some(d(2016, 2, 29)));
    }

    #[test]
    fn computus_matches_known_easters() {
        assert_eq!(easter_sunday(2016), Some(d(2016, 3, 27)));
        assert_eq!(easter_sunday(2017), Some(d(2017, 4, 16)));
        assert_eq!(easter_sunday(2019), Some(d(2019, 4, 21)));
    }

    #[test]
    fn month_day_resolves_around_reference() {
        let reference = d(2016, 11, 7);
        assert_eq!(resolve_month_day(reference, 11, 15), Some((d(2016, 11, 15), d(2015, 11, 15))));
        assert_eq!(resolve_month_day(reference, 1, 3), Some((d(2017, 1, 3), d(2016, 1, 3))));
        assert_eq!(resolve_month_day(reference, 2, 30), None);
        assert_eq!(resolve_month_day(reference, 13, 1), None);
    }

    #[test]
    fn february_29_hops_between_leap_years() {
        assert_eq!(resolve_month_day(d(2016, 11, 7), 2, 29), Some((d(2020, 2, 29), d(2016, 2, 29))));
        assert_eq!(resolve_month_day(d(2016, 1, 7), 2, 29), Some((d(2016, 2, 29), d(2012, 2, 29))));
    }

    #[test]
    fn bare_day_skips_short_months() {
        let reference = d(2016, 11, 7);
        assert_eq!(resolve_day(reference, 15), Some((d(2016, 11, 15), d(2016, 10, 15))));
        assert_eq!(resolve_day(reference, 31), Some((d(2016, 12, 31), d(2016, 10, 31))));
        assert_eq!(resolve_day(reference, 32), None);
    }

    #[test]
    fn two_digit_years_pivot_at_fifty() {
        assert_eq!(year_from(16), 2016);
        assert_eq!(year_from(87), 1987);
        assert_eq!(year_from(2016), 2016);
    }

    #[test]
    fn day_part_windows() {
        let (s, e) = DayPart::Afternoon.bounds(DayPartWindow::Late);
        assert_eq!((s, e), (NaiveTime::from_hms_opt(14, 0, 0).unwrap(), NaiveTime::from_hms_opt(16, 0, 0).unwrap()));
        let (s, _) = DayPart::Morning.bounds(DayPartWindow::Early);
        assert_eq!(s, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }
}
