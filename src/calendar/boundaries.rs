use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::shift::shift_datetime_by_grain;
use crate::Grain;

pub fn start_of(grain: Grain, dt: NaiveDateTime) -> NaiveDateTime {
    let day_start = |date: NaiveDate| NaiveDateTime::new(date, NaiveTime::MIN);
    match grain {
        Grain::Second => dt.with_nanosecond(0).unwrap_or(dt),
        Grain::Minute => NaiveTime::from_hms_opt(dt.hour(), dt.minute(), 0).map_or(dt, |t| dt.date().and_time(t)),
        Grain::Hour => NaiveTime::from_hms_opt(dt.hour(), 0, 0).map_or(dt, |t| dt.date().and_time(t)),
        Grain::Day => day_start(dt.date()),
        Grain::Week => {
            let weekday_offset = dt.weekday().num_days_from_monday() as i64;
            dt.date().checked_sub_signed(Duration::days(weekday_offset)).map_or(dt, day_start)
        }
        Grain::Month => day_start(NaiveDate::from_ymd_opt(dt.year(), dt.month(), 1).unwrap_or(dt.date())),
        Grain::Quarter => {
            let quarter_start = ((dt.month() - 1) / 3) * 3 + 1;
            day_start(NaiveDate::from_ymd_opt(dt.year(), quarter_start, 1).unwrap_or(dt.date()))
        }
        Grain::Year => day_start(NaiveDate::from_ymd_opt(dt.year(), 1, 1).unwrap_or(dt.date())),
    }
}

/// Closing bound of a period whose first day after it is `exclusive_end`.
///
/// With `inclusive_end` the bound is the last day inside the period, otherwise
/// the first day after it.
pub fn period_end(exclusive_end: NaiveDate, inclusive_end: bool) -> NaiveDate {
    if inclusive_end { exclusive_end.pred_opt().unwrap_or(exclusive_end) } else { exclusive_end }
}

/// `[start, end]` of the `grain` period containing `d`, honoring `inclusive_end`.
pub fn period_bounds(grain: Grain, d: NaiveDate, inclusive_end: bool) -> Option<(NaiveDate, NaiveDate)> {
    let start = start_of(grain, super::midnight(d));
    let end = shift_datetime_by_grain(start, 1, grain)?;
    Some((start.date(), period_end(end.date(), inclusive_end)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn start_of_week_aligns_to_monday() {
        let dt = NaiveDate::from_ymd_opt(2016, 11, 10).unwrap().and_hms_opt(15, 45, 12).unwrap();
        let start = start_of(Grain::Week, dt);
        let expected = NaiveDate::from_ymd_opt(2016, 11, 7).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(start, expected);
    }

    #[test]
    fn start_of_quarter_returns_first_month() {
        let dt = NaiveDate::from_ymd_opt(2016, 8, 22).unwrap().and_hms_opt(9, 30, 0).unwrap();
        let start = start_of(Grain::Quarter, dt);
        let expected = NaiveDate::from_ymd_opt(2016, 7, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(start, expected);
    }

    #[test]
    fn period_bounds_follow_end_flag() {
        let d = NaiveDate::from_ymd_opt(2016, 11, 7).unwrap();
        let (s, e) = period_bounds(Grain::Month, d, false).unwrap();
        assert_eq!(s, NaiveDate::from_ymd_opt(2016, 11, 1).unwrap());
        assert_eq!(e, NaiveDate::from_ymd_opt(2016, 12, 1).unwrap());
        let (_, e) = period_bounds(Grain::Month, d, true).unwrap();
        assert_eq!(e, NaiveDate::from_ymd_opt(2016, 11, 30).unwrap());
        let (s, e) = period_bounds(Grain::Week, d, true).unwrap();
        assert_eq!((s, e), (d, NaiveDate::from_ymd_opt(2016, 11, 13).unwrap()));
    }
}
