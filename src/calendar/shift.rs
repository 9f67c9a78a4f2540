use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::Grain;

/// `None` when the result falls outside chrono's representable range.
pub fn shift_datetime_by_grain(dt: NaiveDateTime, amount: i64, grain: Grain) -> Option<NaiveDateTime> {
    let delta = match grain {
        Grain::Second => Duration::try_seconds(amount),
        Grain::Minute => Duration::try_minutes(amount),
        Grain::Hour => Duration::try_hours(amount),
        Grain::Day => Duration::try_days(amount),
        Grain::Week => Duration::try_weeks(amount),
        Grain::Month => return add_months(dt, amount),
        Grain::Quarter => return add_months(dt, amount.checked_mul(3)?),
        Grain::Year => return add_months(dt, amount.checked_mul(12)?),
    };
    dt.checked_add_signed(delta?)
}

/// Shift by a possibly fractional amount ("1.5 hours", "half a day").
///
/// Calendar units with a fractional part fall back to their nominal length in
/// seconds.
pub fn shift_by_amount(dt: NaiveDateTime, amount: f64, grain: Grain) -> Option<NaiveDateTime> {
    if !amount.is_finite() {
        return None;
    }
    if amount.fract() == 0.0 {
        return shift_datetime_by_grain(dt, amount as i64, grain);
    }
    dt.checked_add_signed(Duration::try_seconds((amount * grain.seconds()).round() as i64)?)
}

pub fn shift_date_by_grain(d: NaiveDate, amount: i64, grain: Grain) -> Option<NaiveDate> {
    shift_datetime_by_grain(super::midnight(d), amount, grain).map(|dt| dt.date())
}

/// Month arithmetic that clamps the day to the target month's length.
pub fn add_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let zero_based = (dt.month0() as i64).checked_add(months)?;
    let year = dt.year().checked_add(i32::try_from(zero_based.div_euclid(12)).ok()?)?;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = dt.day().min(days_in_month(year, month));
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(NaiveDateTime::new(date, dt.time()))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map_or(28, |last| last.day())
}
