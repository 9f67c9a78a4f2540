//! Clock times: "8:30pm", "a quarter to eight", "7 in the morning", "noon".

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::trace;

use super::{Extractor, Parser, Strategy, run_cascade, suffix_end};
use crate::calendar::DayPart;
use crate::config::LocaleConfig;
use crate::matcher::{PatternMatch, PatternMatcher};
use crate::resolution::{Comment, DateTimeResolutionResult, TimeValue};
use crate::token::{ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, timex};

/// A clock reading before it is attached to a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClockReading {
    pub hour: u32,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    /// No AM/PM marker or day part decided the half of the day.
    pub ambiguous: bool,
}

impl ClockReading {
    pub fn new(hour: u32, minute: Option<u32>) -> Self {
        ClockReading { hour, minute, second: None, ambiguous: (1..=12).contains(&hour) }
    }

    /// Apply an explicit AM/PM marker.
    pub fn with_marker(mut self, am: bool, pm: bool) -> Self {
        if am {
            self.hour %= 12;
            self.ambiguous = false;
        } else if pm {
            self.hour = self.hour % 12 + 12;
            self.ambiguous = false;
        }
        self
    }

    /// Move the reading into the half of the day a day part implies.
    pub fn with_day_part(mut self, part: DayPart) -> Self {
        self.hour = match part {
            DayPart::Morning => self.hour % 12,
            DayPart::Night if self.hour < 6 || self.hour == 12 => self.hour % 12,
            _ if self.hour < 12 => self.hour + 12,
            _ => self.hour,
        };
        self.ambiguous = false;
        self
    }

    pub fn to_pm(self) -> Self {
        self.with_marker(false, true)
    }

    pub fn time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute.unwrap_or(0), self.second.unwrap_or(0))
    }

    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        self.time().map(|t| date.and_time(t))
    }

    pub fn timex(&self) -> String {
        timex::luis_time(self.hour, self.minute, self.second)
    }

    pub fn comment(&self) -> Option<Comment> {
        self.ambiguous.then_some(Comment::AmPm)
    }

    /// Next occurrence at or after `reference`, and the one a day before it.
    fn bracket(&self, reference: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let day = Duration::try_days(1)?;
        let today = self.on(reference.date())?;
        let future = if today >= reference { today } else { today.checked_add_signed(day)? };
        Some((future, future.checked_sub_signed(day)?))
    }

    /// Resolution around the reference: the future reading is the next
    /// occurrence of the clock time and the past reading the one before.
    pub fn resolve(&self, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let (future, past) = self.bracket(reference)?;
        let mut res = DateTimeResolutionResult::new(self.timex(), TimeValue::Instant(future), TimeValue::Instant(past))
            .with_comment(self.comment());
        if self.ambiguous {
            let other = ClockReading { hour: (self.hour + 12) % 24, ..*self };
            let (future, past) = other.bracket(reference)?;
            res.other_half = Some((TimeValue::Instant(future), TimeValue::Instant(past)));
        }
        Some(res)
    }
}

pub struct TimeExtractor<'a> {
    config: &'a LocaleConfig,
}

impl<'a> TimeExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        TimeExtractor { config }
    }

    /// "5 to 6" reads as an hour range: digit minutes that could be an hour.
    fn is_range_like(m: &PatternMatch<'_>) -> bool {
        let Some(dir) = m.group_lower("dir") else { return false };
        if !matches!(dir.as_str(), "to" | "till" | "til" | "before") || m.has("minword") {
            return false;
        }
        m.group("min").and_then(|min| min.parse::<u32>().ok()).is_some_and(|min| min <= 12)
    }
}

impl Extractor for TimeExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::Time
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractResult> {
        let p = &self.config.time;
        let mut tokens = Vec::new();

        for re in [
            &p.clock,
            &p.hour_desc,
            &p.oclock,
            &p.relative,
            &p.spelled,
            &p.hour_day_part,
            &p.day_part_hour,
            &p.special,
            &p.meal,
        ] {
            for m in re.find_all(text) {
                if Self::is_range_like(&m) {
                    trace!(target: "chronolex::extract", text = m.text, "relative minutes read as a range");
                    continue;
                }
                let end = suffix_end(&p.ish_suffix, text, m.end).unwrap_or(m.end);
                tokens.push(Token::new(m.start, end));
            }
        }

        // "at 8" only when nothing more specific claimed the hour
        for m in p.at_hour.find_all(text) {
            if !tokens.iter().any(|t| t.start < m.end && m.start < t.end) {
                let end = suffix_end(&p.ish_suffix, text, m.end).unwrap_or(m.end);
                tokens.push(Token::new(m.start, end));
            }
        }

        merge_all_tokens(tokens, text, Dimension::Time)
    }
}

pub(crate) fn parse_minute(config: &LocaleConfig, text: &str) -> Option<u32> {
    let lowered = text.trim().to_lowercase();
    let digits = lowered.strip_prefix("oh ").or_else(|| lowered.strip_prefix("o ")).unwrap_or(&lowered);
    let min = u32::try_from(config.integer(digits)?).ok()?;
    (min < 60).then_some(min)
}

pub(crate) fn parse_hour(config: &LocaleConfig, text: &str) -> Option<u32> {
    let hour = u32::try_from(config.integer(text)?).ok()?;
    (hour < 24).then_some(hour)
}

pub struct TimeParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> TimeParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        TimeParser { config }
    }

    /// A match covering the text, allowing a trailing "ish".
    fn whole<'t>(&self, re: &regex::Regex, text: &'t str) -> Option<PatternMatch<'t>> {
        if let Some(m) = re.exact(text) {
            return Some(m);
        }
        let m = re.at_start(text)?;
        let ish = self.config.time.ish_suffix.at_start(&text[m.end..])?;
        (m.end + ish.end == text.len()).then_some(m)
    }

    fn marked(&self, m: &PatternMatch<'_>, reading: ClockReading) -> ClockReading {
        let reading = reading.with_marker(m.has("am"), m.has("pm"));
        match m.group("daypart").and_then(|p| self.config.day_part(p)) {
            Some(part) => reading.with_day_part(part),
            None => reading,
        }
    }

    /// Clock reading of a text that is exactly one time expression.
    pub(crate) fn reading(&self, text: &str) -> Option<ClockReading> {
        let p = &self.config.time;

        if let Some(m) = self.whole(&p.clock, text) {
            let hour = m.group("hour")?.parse().ok()?;
            let mut reading = ClockReading::new(hour, Some(m.group("min")?.parse().ok()?));
            reading.second = m.group("sec").and_then(|s| s.parse().ok());
            return Some(self.marked(&m, reading));
        }
        for re in [&p.hour_desc, &p.oclock] {
            if let Some(m) = self.whole(re, text) {
                let hour = parse_hour(self.config, m.group("hour")?)?;
                return Some(self.marked(&m, ClockReading::new(hour, None)));
            }
        }
        if let Some(m) = self.whole(&p.relative, text) {
            let minutes = if m.has("quarter") {
                15
            } else if m.has("half") {
                30
            } else {
                parse_minute(self.config, m.group("min")?)?
            };
            let hour = parse_hour(self.config, m.group("hour")?)?;
            let before = matches!(m.group_lower("dir")?.as_str(), "to" | "till" | "til" | "before");
            let reading = if before {
                let hour = if hour <= 1 { hour + 11 } else { hour - 1 };
                ClockReading::new(hour, Some(60 - minutes))
            } else {
                ClockReading::new(hour, Some(minutes))
            };
            return Some(self.marked(&m, reading));
        }
        if let Some(m) = self.whole(&p.spelled, text) {
            let hour = parse_hour(self.config, m.group("hour")?)?;
            let minute = parse_minute(self.config, m.group("min")?)?;
            return Some(self.marked(&m, ClockReading::new(hour, Some(minute))));
        }
        for re in [&p.hour_day_part, &p.day_part_hour] {
            if let Some(m) = self.whole(re, text) {
                let hour = parse_hour(self.config, m.group("hour")?)?;
                let minute = m.group("min").and_then(|v| v.parse().ok());
                return Some(self.marked(&m, ClockReading::new(hour, minute)));
            }
        }
        if let Some(m) = self.whole(&p.special, text) {
            let special = m.group_lower("special")?;
            let hour = if special.contains("night") { 0 } else { 12 };
            return Some(ClockReading { hour, minute: None, second: None, ambiguous: false });
        }
        if let Some(m) = self.whole(&p.meal, text) {
            let hour = self.config.meal_hour(m.group("meal")?)?;
            return Some(ClockReading { hour, minute: None, second: None, ambiguous: false });
        }
        let m = self.whole(&p.at_hour, text).or_else(|| p.bare_hour.exact(text))?;
        Some(ClockReading::new(parse_hour(self.config, m.group("hour")?)?, None))
    }

    fn parse_reading(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        self.reading(&er.text)?.resolve(reference)
    }
}

impl Parser for TimeParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let strategies: &[Strategy<Self>] = &[("clock_reading", Self::parse_reading)];
        run_cascade(self, strategies, er, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::testing::{at, english, reference};

    fn resolve(text: &str) -> (String, DateTimeResolutionResult) {
        let spans = TimeExtractor::new(english()).extract(text, reference());
        assert_eq!(spans.len(), 1, "{text}: {spans:?}");
        let res = TimeParser::new(english()).parse(&spans[0], reference()).unwrap();
        (spans[0].text.clone(), res)
    }

    #[test]
    fn digital_and_marked_hours() {
        let (span, res) = resolve("I'll be back at 8:30pm");
        assert_eq!(span, "8:30pm");
        assert_eq!(res.timex, "T20:30");
        assert_eq!(res.future, Some(TimeValue::Instant(at(2016, 11, 7, 20, 30))));
        assert_eq!(res.comment, None);

        assert_eq!(resolve("eight a.m.").1.timex, "T08");
        assert_eq!(resolve("at 12am").1.timex, "T00");
        assert_eq!(resolve("10 o'clock pm").1.timex, "T22");
    }

    #[test]
    fn unmarked_hours_carry_ampm() {
        let (span, res) = resolve("see you at 8");
        assert_eq!(span, "at 8");
        assert_eq!(res.timex, "T08");
        assert_eq!(res.comment, Some(Comment::AmPm));

        let (_, res) = resolve("at 20:15");
        assert_eq!(res.comment, None);
        assert_eq!(res.other_half, None);
    }

    #[test]
    fn clock_times_bracket_the_reference() {
        let noon = at(2016, 11, 7, 12, 0);
        let reading = ClockReading::new(20, Some(30));
        let res = reading.resolve(noon).unwrap();
        assert_eq!(res.future, Some(TimeValue::Instant(at(2016, 11, 7, 20, 30))));
        assert_eq!(res.past, Some(TimeValue::Instant(at(2016, 11, 6, 20, 30))));

        let res = ClockReading::new(8, None).resolve(noon).unwrap();
        assert_eq!(res.future, Some(TimeValue::Instant(at(2016, 11, 8, 8, 0))));
        assert_eq!(res.past, Some(TimeValue::Instant(at(2016, 11, 7, 8, 0))));
        let pm = (TimeValue::Instant(at(2016, 11, 7, 20, 0)), TimeValue::Instant(at(2016, 11, 6, 20, 0)));
        assert_eq!(res.other_half, Some(pm));

        let res = ClockReading::new(12, None).resolve(noon).unwrap();
        assert_eq!(res.future, Some(TimeValue::Instant(noon)));
        assert_eq!(res.past, Some(TimeValue::Instant(at(2016, 11, 6, 12, 0))));
        let midnight = (TimeValue::Instant(at(2016, 11, 8, 0, 0)), TimeValue::Instant(at(2016, 11, 7, 0, 0)));
        assert_eq!(res.other_half, Some(midnight));
    }

    #[test]
    fn relative_minutes() {
        assert_eq!(resolve("a quarter to eight").1.timex, "T07:45");
        assert_eq!(resolve("half past 3 pm").1.timex, "T15:30");
        assert_eq!(resolve("twenty past five").1.timex, "T05:20");
        assert_eq!(resolve("ten to one").1.timex, "T12:50");
    }

    #[test]
    fn range_shaped_hours_are_not_relative_times() {
        let spans = TimeExtractor::new(english()).extract("5 to 6pm", reference());
        assert_eq!(spans.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(), vec!["6pm"]);
    }

    #[test]
    fn spelled_and_day_part_forms() {
        assert_eq!(resolve("seven thirty pm").1.timex, "T19:30");
        assert_eq!(resolve("7 in the morning").1.timex, "T07");
        let (_, res) = resolve("in the evening at 8");
        assert_eq!(res.timex, "T20");
        assert_eq!(res.comment, None);
    }

    #[test]
    fn special_times() {
        assert_eq!(resolve("at noon").1.timex, "T12");
        assert_eq!(resolve("midnight").1.timex, "T00");
        assert_eq!(resolve("lunchtime").1.timex, "T12");
        assert_eq!(resolve("dinner time").1.timex, "T19");
    }

    #[test]
    fn ish_suffix_extends_the_span() {
        let (span, res) = resolve("around 8ish");
        assert_eq!(span, "around 8ish");
        assert_eq!(res.timex, "T08");
        let (span, _) = resolve("8pm-ish");
        assert_eq!(span, "8pm-ish");
    }
}
