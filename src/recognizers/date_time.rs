//! Date plus clock time: "next Friday at 8pm", "tonight at 8", "now",
//! "in 3 hours".

use chrono::{Duration, NaiveDateTime};
use tracing::trace;

use super::date::{DateExtractor, DateParser};
use super::duration::find_durations;
use super::time::{ClockReading, TimeExtractor, TimeParser};
use super::{Extractor, Parser, Strategy, child, run_cascade, suffix_end};
use crate::calendar::{DayPart, shift_by_amount};
use crate::config::LocaleConfig;
use crate::matcher::{PatternMatch, PatternMatcher};
use crate::resolution::{DateTimeResolutionResult, TimeValue};
use crate::token::{ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, timex};

/// Timex of the present instant.
pub const PRESENT_REF: &str = "PRESENT_REF";

pub(crate) fn pinned_instant(at: NaiveDateTime) -> DateTimeResolutionResult {
    DateTimeResolutionResult::pinned(timex::date_time(at), TimeValue::Instant(at))
}

/// Span covering a date and a time separated by nothing or a short connector.
fn joined(config: &LocaleConfig, text: &str, date: &ExtractResult, time: &ExtractResult) -> Option<Token> {
    let (gap_start, gap_end) = if date.end() <= time.start {
        (date.end(), time.start)
    } else if time.end() <= date.start {
        (time.end(), date.start)
    } else {
        return None;
    };
    let gap = &text[gap_start..gap_end];
    if !gap.is_empty() && config.date_time.connector.exact(gap).is_none() {
        return None;
    }
    Some(Token::new(date.start.min(time.start), date.end().max(time.end())))
}

/// An anchor names a day part itself, or the time it anchors carries one.
fn anchor_licensed(config: &LocaleConfig, m: &PatternMatch<'_>, time_text: &str) -> bool {
    m.has("tonight") || m.has("daypart") || config.time_period.day_part.is_match(time_text)
}

pub struct DateTimeExtractor<'a> {
    config: &'a LocaleConfig,
}

impl<'a> DateTimeExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DateTimeExtractor { config }
    }

    fn anchored(&self, text: &str, times: &[ExtractResult], tokens: &mut Vec<Token>) {
        let p = &self.config.date_time;
        for time in times {
            if let Some(m) = p.anchor_prefix.at_end(&text[..time.start]) {
                if anchor_licensed(self.config, &m, &time.text) {
                    tokens.push(Token::new(m.start, time.end()));
                }
            }
            if let Some(m) = p.anchor_suffix.at_start(&text[time.end()..]) {
                if anchor_licensed(self.config, &m, &time.text) {
                    tokens.push(Token::new(time.start, time.end() + m.end));
                }
            }
        }
    }

    /// "3 hours ago", "in 20 minutes".
    fn shifted(&self, text: &str, tokens: &mut Vec<Token>) {
        let p = &self.config.date;
        for (er, _, _) in find_durations(self.config, text, |g| g.is_sub_day()) {
            if let Some(end) = suffix_end(&p.duration_suffix, text, er.end()) {
                tokens.push(Token::new(er.start, end));
            } else if let Some(prefix) = p.duration_in_prefix.at_end(&text[..er.start]) {
                tokens.push(Token::new(prefix.start, er.end()));
            }
        }
    }
}

impl Extractor for DateTimeExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::DateTime
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        let mut tokens: Vec<Token> =
            self.config.date_time.now.find_all(text).into_iter().map(|m| Token::new(m.start, m.end)).collect();

        let dates = DateExtractor::new(self.config).extract(text, reference);
        let times = TimeExtractor::new(self.config).extract(text, reference);
        for date in &dates {
            for time in &times {
                if let Some(token) = joined(self.config, text, date, time) {
                    trace!(target: "chronolex::extract", date = %date.text, time = %time.text, "date and time");
                    tokens.push(token);
                }
            }
        }

        self.anchored(text, &times, &mut tokens);
        self.shifted(text, &mut tokens);
        merge_all_tokens(tokens, text, Dimension::DateTime)
    }
}

pub struct DateTimeParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> DateTimeParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DateTimeParser { config }
    }

    /// A day part named anywhere in `text` settles an unmarked hour.
    fn settle(&self, reading: ClockReading, text: &str) -> ClockReading {
        if !reading.ambiguous {
            return reading;
        }
        let part = self.config.time_period.day_part.find_all(text).into_iter().find_map(|m| {
            m.group("daypart").and_then(|p| self.config.day_part(p))
        });
        match part {
            Some(part) => reading.with_day_part(part),
            None => reading,
        }
    }

    fn parse_now(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        self.config.date_time.now.exact(&er.text)?;
        Some(DateTimeResolutionResult::pinned(PRESENT_REF, TimeValue::Instant(reference)))
    }

    fn parse_date_and_time(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let dates = DateExtractor::new(self.config).extract(&er.text, reference);
        let times = TimeExtractor::new(self.config).extract(&er.text, reference);
        let (date, time) = dates.iter().find_map(|date| {
            times.iter().find_map(|time| {
                let token = joined(self.config, &er.text, date, time)?;
                (token.start == 0 && token.end == er.text.len()).then_some((date, time))
            })
        })?;

        let date_res = DateParser::new(self.config).parse(date, reference)?;
        let reading = self.settle(TimeParser::new(self.config).reading(&time.text)?, &er.text);
        let time_res = reading.resolve(reference)?;

        let at = |value: Option<TimeValue>| reading.on(value?.start()?.date());
        let future = at(date_res.future)?;
        let past = at(date_res.past)?;
        let res = DateTimeResolutionResult::new(
            format!("{}{}", date_res.timex, reading.timex()),
            TimeValue::Instant(future),
            TimeValue::Instant(past),
        )
        .with_comment(reading.comment());

        let children = vec![
            child(er, date, Dimension::Date, date_res),
            child(er, time, Dimension::Time, time_res),
        ];
        Some(res.with_children(children))
    }

    fn parse_anchored(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date_time;
        let times = TimeExtractor::new(self.config).extract(&er.text, reference);
        let [time] = times.as_slice() else { return None };

        let m = if time.start > 0 {
            if time.end() != er.text.len() {
                return None;
            }
            p.anchor_prefix.exact(&er.text[..time.start])?
        } else {
            p.anchor_suffix.exact(&er.text[time.end()..])?
        };

        let mut reading = TimeParser::new(self.config).reading(&time.text)?;
        let (offset, part) = if m.has("tonight") {
            (0, Some(DayPart::Night))
        } else {
            let anchor = m.group("anchor")?;
            let part = m.group("daypart").and_then(|p| self.config.day_part(p));
            (self.config.implicit_day(anchor).unwrap_or(0), part)
        };
        if let Some(part) = part.filter(|_| reading.ambiguous) {
            reading = reading.with_day_part(part);
        }

        let at = reading.on(reference.date() + Duration::days(offset))?;
        Some(pinned_instant(at))
    }

    fn parse_duration_shift(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.date;
        let (duration, amount, grain) = find_durations(self.config, &er.text, |g| g.is_sub_day()).into_iter().next()?;
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
        Some(pinned_instant(shift_by_amount(reference, sign * amount, grain)?))
    }
}

impl Parser for DateTimeParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let strategies: &[Strategy<Self>] = &[
            ("now", Self::parse_now),
            ("date_and_time", Self::parse_date_and_time),
            ("anchored", Self::parse_anchored),
            ("duration_ago_later", Self::parse_duration_shift),
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
        let spans = DateTimeExtractor::new(english()).extract(text, reference());
        assert_eq!(spans.len(), 1, "{text}: {spans:?}");
        let res = DateTimeParser::new(english()).parse(&spans[0], reference()).unwrap();
        (spans[0].text.clone(), res)
    }

    #[test]
    fn date_and_time_merge() {
        let (span, res) = resolve("I'll go back next Friday at 8pm");
        assert_eq!(span, "next Friday at 8pm");
        assert_eq!(res.timex, "2016-11-18T20");
        assert_eq!(res.future, Some(TimeValue::Instant(at(2016, 11, 18, 20, 0))));
        assert_eq!(res.sub_resolutions.len(), 2);
        assert_eq!(res.sub_resolutions[1].extract.text, "8pm");

        let (span, res) = resolve("see you 8pm on Friday");
        assert_eq!(span, "8pm on Friday");
        assert_eq!(res.timex, "XXXX-WXX-5T20");
        assert_eq!(res.past, Some(TimeValue::Instant(at(2016, 11, 4, 20, 0))));

        assert_eq!(resolve("tomorrow 8pm").1.timex, "2016-11-08T20");
    }

    #[test]
    fn unmarked_hour_keeps_ampm() {
        let (span, res) = resolve("Friday at 8");
        assert_eq!(span, "Friday at 8");
        assert_eq!(res.timex, "XXXX-WXX-5T08");
        assert_eq!(res.comment, Some(Comment::AmPm));
        assert_eq!(res.future, Some(TimeValue::Instant(at(2016, 11, 11, 8, 0))));
    }

    #[test]
    fn day_part_in_the_date_settles_the_hour() {
        let (_, res) = resolve("Friday evening at 8");
        assert_eq!(res.timex, "XXXX-WXX-5T20");
        assert_eq!(res.comment, None);
    }

    #[test]
    fn anchors() {
        let (span, res) = resolve("call me tonight at 8");
        assert_eq!(span, "tonight at 8");
        assert_eq!(res.timex, "2016-11-07T20");

        let (span, res) = resolve("this morning at 7");
        assert_eq!(span, "this morning at 7");
        assert_eq!(res.future, Some(TimeValue::Instant(at(2016, 11, 7, 7, 0))));

        assert_eq!(resolve("8pm tonight").1.timex, "2016-11-07T20");
        assert!(DateTimeExtractor::new(english()).extract("I did this at 8pm", reference()).is_empty());
    }

    #[test]
    fn now_is_present_ref() {
        let (_, res) = resolve("I'm leaving right now");
        assert_eq!(res.timex, PRESENT_REF);
        assert_eq!(res.future, Some(TimeValue::Instant(reference())));
    }

    #[test]
    fn sub_day_shifts() {
        assert_eq!(resolve("in 3 hours").1.timex, "2016-11-07T03");
        assert_eq!(resolve("2 hours ago").1.future, Some(TimeValue::Instant(at(2016, 11, 6, 22, 0))));
        assert!(DateTimeExtractor::new(english()).extract("in 3 days", reference()).is_empty());
    }
}
