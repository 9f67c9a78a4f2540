//! Dates: absolute forms, implicit days, relative weekdays, ordinals and
//! "3 days ago" style shifts.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use tracing::trace;

use super::duration::find_durations;
use super::{Extractor, Parser, Strategy, run_cascade, suffix_end};
use crate::calendar::{
    add_months, midnight, nth_weekday_of_month, resolve_day, resolve_month_day, resolve_weekday, shift_by_amount,
    this_weekday, year_from, ymd,
};
use crate::config::LocaleConfig;
use crate::matcher::{PatternMatch, PatternMatcher};
use crate::resolution::{DateTimeResolutionResult, TimeValue};
use crate::token::{ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, timex};

/// A resolution pinned to one calendar day.
pub(crate) fn pinned_day(d: NaiveDate) -> DateTimeResolutionResult {
    DateTimeResolutionResult::pinned(timex::date(d), TimeValue::Instant(midnight(d)))
}

fn ambiguous_day(timex: String, future: NaiveDate, past: NaiveDate) -> DateTimeResolutionResult {
    DateTimeResolutionResult::new(timex, TimeValue::Instant(midnight(future)), TimeValue::Instant(midnight(past)))
}

pub struct DateExtractor<'a> {
    config: &'a LocaleConfig,
}

impl<'a> DateExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DateExtractor { config }
    }

    fn day_value(&self, m: &PatternMatch<'_>, group: &str) -> Option<u32> {
        let day = self.config.integer(m.group(group)?)?;
        (1..=31).contains(&day).then_some(day as u32)
    }

    fn blocked(&self, text: &str, end: usize) -> bool {
        self.config.date.day_blocker.at_start(&text[end..]).is_some()
    }

    /// Month/day/year forms and bare weekdays, extended over a leading "next"/"last".
    fn absolute_forms(&self, text: &str, tokens: &mut Vec<Token>) {
        let p = &self.config.date;
        for (re, ends_with_day) in [
            (&p.month_day, true),
            (&p.day_month, false),
            (&p.weekday_month_day, false),
            (&p.numeric, false),
            (&p.iso, false),
            (&p.weekday, false),
        ] {
            for m in re.find_all(text) {
                let has_day = m.has("day") || m.has("day2");
                if has_day && self.day_value(&m, "day").or_else(|| self.day_value(&m, "day2")).is_none() {
                    continue;
                }
                if ends_with_day && !m.has("year") && self.blocked(text, m.end) {
                    continue;
                }
                let start = p.relative_prefix.at_end(&text[..m.start]).map_or(m.start, |r| r.start);
                tokens.push(Token::new(start, m.end));
            }
        }
    }

    fn implicit_forms(&self, text: &str, tokens: &mut Vec<Token>) {
        let p = &self.config.date;
        for re in [&p.special_day, &p.relative_weekday, &p.weekday_of_month] {
            tokens.extend(re.find_all(text).into_iter().map(|m| Token::new(m.start, m.end)));
        }
    }

    fn day_forms(&self, text: &str, reference: NaiveDate, tokens: &mut Vec<Token>) {
        let p = &self.config.date;
        for m in p.day_of_relative_month.find_all(text) {
            if self.day_value(&m, "day").is_some() {
                tokens.push(Token::new(m.start, m.end));
            }
        }
        for m in p.on_day.find_all(text) {
            if !(m.has("on") || m.has("the")) || self.day_value(&m, "day").is_none() || self.blocked(text, m.end) {
                continue;
            }
            if let Some((start, end)) = m.group_span("body") {
                tokens.push(Token::new(start, end));
            }
        }
        for m in p.weekday_day.find_all(text) {
            let (Some(weekday), Some(day)) = (m.group("weekday").and_then(|w| self.config.weekday(w)), self.day_value(&m, "day"))
            else {
                continue;
            };
            if self.blocked(text, m.end) {
                continue;
            }
            if weekday_day_date(reference, weekday, day).is_some() {
                tokens.push(Token::new(m.start, m.end));
            } else {
                trace!(target: "chronolex::extract", text = m.text, "weekday and day disagree");
            }
        }
    }

    /// "3 days ago", "2 weeks from now", "in 5 days".
    fn shifted_forms(&self, text: &str, tokens: &mut Vec<Token>) {
        let p = &self.config.date;
        for (er, _, _) in find_durations(self.config, text, |g| !g.is_sub_day()) {
            if let Some(end) = suffix_end(&p.duration_suffix, text, er.end()) {
                tokens.push(Token::new(er.start, end));
            } else if let Some(prefix) = p.duration_in_prefix.at_end(&text[..er.start]) {
                tokens.push(Token::new(prefix.start, er.end()));
            }
        }
    }
}

impl Extractor for DateExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::Date
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        let mut tokens = Vec::new();
        self.absolute_forms(text, &mut tokens);
        self.implicit_forms(text, &mut tokens);
        self.day_forms(text, reference.date(), &mut tokens);
        self.shifted_forms(text, &mut tokens);
        merge_all_tokens(tokens, text, Dimension::Date)
    }
}

/// The date in the reference month or the next one that has `day` on `weekday`.
fn weekday_day_date(reference: NaiveDate, weekday: Weekday, day: u32) -> Option<NaiveDate> {
    let month_start = ymd(reference.year(), reference.month(), 1)?;
    (0..2)
        .filter_map(|offset| {
            let first = add_months(midnight(month_start), offset)?.date();
            ymd(first.year(), first.month(), day)
        })
        .find(|d| d.weekday() == weekday)
}

pub struct DateParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> DateParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DateParser { config }
    }

    fn month_value(&self, m: &PatternMatch<'_>, group: &str) -> Option<u32> {
        let raw = m.group(group)?;
        self.config.month(raw).or_else(|| raw.parse().ok())
    }

    fn day_value(&self, m: &PatternMatch<'_>, group: &str) -> Option<u32> {
        u32::try_from(self.config.integer(m.group(group)?)?).ok()
    }

    /// A match of `re` ending the text, plus the offset of a relative
    /// qualifier ("next", "last") filling the rest of it.
    fn with_relative<'t>(&self, re: &regex::Regex, text: &'t str) -> Option<(PatternMatch<'t>, Option<i64>)> {
        let m = re.at_end(text)?;
        if m.start == 0 {
            return Some((m, None));
        }
        let rel = self.config.date.relative_prefix.exact(&text[..m.start])?;
        let offset = self.config.relative_offset(rel.group("rel")?)?;
        Some((m, Some(offset)))
    }

    fn parse_basic(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date;
        let (m, relative) = [&p.weekday_month_day, &p.month_day, &p.day_month, &p.numeric, &p.iso]
            .into_iter()
            .find_map(|re| self.with_relative(re, &er.text))?;

        let month = self.month_value(&m, "month").or_else(|| self.month_value(&m, "month2"))?;
        let day = self.day_value(&m, "day").or_else(|| self.day_value(&m, "day2"))?;
        let weekday = m.group("weekday").and_then(|w| self.config.weekday(w));
        let year = match m.group("year") {
            Some(y) => Some(year_from(y.parse().ok()?)),
            None => relative.map(|offset| reference.year() + offset as i32),
        };

        if let Some(year) = year {
            return ymd(year, month, day).map(pinned_day);
        }
        if let Some(weekday) = weekday {
            // the year whose date falls on the weekday, nearest to the reference year
            let base = reference.year();
            let pinned = (0..=28)
                .flat_map(|i| [base + i, base - i])
                .filter_map(|y| ymd(y, month, day))
                .find(|d| d.weekday() == weekday)?;
            return Some(pinned_day(pinned));
        }
        let (future, past) = resolve_month_day(reference.date(), month, day)?;
        Some(ambiguous_day(timex::luis_date(None, Some(month), day), future, past))
    }

    fn parse_implicit(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date;
        let today = reference.date();

        if let Some(m) = p.special_day.exact(&er.text) {
            let offset = self.config.implicit_day(m.group("special")?)?;
            return Some(pinned_day(today + Duration::days(offset)));
        }
        if let Some(m) = p.relative_weekday.exact(&er.text) {
            let offset = self.config.relative_offset(m.group("rel")?)?;
            let weekday = self.config.weekday(m.group("weekday")?)?;
            return Some(pinned_day(this_weekday(today + Duration::weeks(offset), weekday)));
        }
        let m = p.weekday.exact(&er.text)?;
        let weekday = self.config.weekday(m.group("weekday")?)?;
        let (future, past) = resolve_weekday(today, weekday);
        Some(ambiguous_day(timex::luis_weekday(weekday), future, past))
    }

    fn parse_weekday_of_month(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date.weekday_of_month.exact(&er.text)?;
        let n = self.config.ordinal_count(m.group("cardinal")?)?;
        let weekday = self.config.weekday(m.group("weekday")?)?;
        let code = |year: Option<i32>, month: u32| {
            format!("{}-WXX-{}-#{}", timex::month(year, month), weekday.number_from_monday(), n)
        };

        if let Some(rel) = m.group("rel") {
            let shifted = add_months(reference, self.config.relative_offset(rel)?)?;
            let date = nth_weekday_of_month(shifted.year(), shifted.month(), weekday, n)?;
            return Some(pinned_day(date).with_timex(code(Some(date.year()), date.month())));
        }

        let month = self.month_value(&m, "month")?;
        if let Some(year) = m.group("year") {
            let year = year.parse().ok()?;
            let date = nth_weekday_of_month(year, month, weekday, n)?;
            return Some(pinned_day(date).with_timex(code(Some(year), month)));
        }

        let today = reference.date();
        let this_year = nth_weekday_of_month(today.year(), month, weekday, n)?;
        let (future, past) = if this_year >= today {
            (this_year, nth_weekday_of_month(today.year() - 1, month, weekday, n)?)
        } else {
            (nth_weekday_of_month(today.year() + 1, month, weekday, n)?, this_year)
        };
        Some(ambiguous_day(code(None, month), future, past))
    }

    fn parse_duration_shift(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date;
        let (duration, amount, grain) = find_durations(self.config, &er.text, |g| !g.is_sub_day()).into_iter().next()?;
        let rest = &er.text[duration.end()..];

        let sign = if duration.start == 0 {
            let suffix = p.duration_suffix.at_start(rest)?;
            if suffix.end != rest.len() {
                return None;
            }
            if suffix.has("ago") { -1.0 } else { 1.0 }
        } else if rest.is_empty() && p.duration_in_prefix.exact(&er.text[..duration.start]).is_some() {
            1.0
        } else {
            return None;
        };

        let date = shift_by_amount(midnight(reference.date()), sign * amount, grain)?.date();
        Some(pinned_day(date))
    }

    fn parse_day_with_month_token(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date;
        if let Some(m) = p.day_of_relative_month.exact(&er.text) {
            let day = self.day_value(&m, "day")?;
            let offset = self.config.relative_offset(m.group("rel")?)?;
            let month = add_months(midnight(ymd(reference.year(), reference.month(), 1)?), offset)?;
            return ymd(month.year(), month.month(), day).map(pinned_day);
        }
        let m = p.weekday_day.exact(&er.text)?;
        let weekday = self.config.weekday(m.group("weekday")?)?;
        let day = self.day_value(&m, "day")?;
        weekday_day_date(reference.date(), weekday, day).map(pinned_day)
    }

    fn parse_bare_day(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.date.on_day.exact(&er.text)?;
        let day = self.day_value(&m, "day")?;
        let (future, past) = resolve_day(reference.date(), day)?;
        Some(ambiguous_day(timex::luis_date(None, None, day), future, past))
    }
}

impl Parser for DateParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let strategies: &[Strategy<Self>] = &[
            ("basic", Self::parse_basic),
            ("implicit", Self::parse_implicit),
            ("weekday_of_month", Self::parse_weekday_of_month),
            ("duration_ago_later", Self::parse_duration_shift),
            ("day_with_month_token", Self::parse_day_with_month_token),
            ("bare_day", Self::parse_bare_day),
        ];
        run_cascade(self, strategies, er, reference)
    }
}
