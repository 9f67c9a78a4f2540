//! Recurrences: "every week", "weekly", "Mondays", "8am every day",
//! "every Friday at 8pm".
//!
//! A set carries only a timex; it has no single future or past value.

use chrono::NaiveDateTime;
use tracing::trace;

use super::{
    DateExtractor, DateParser, DateTimeExtractor, DateTimeParser, DateTimePeriodExtractor, DateTimePeriodParser,
    Extractor, Parser, Strategy, TimeExtractor, TimeParser, TimePeriodExtractor, TimePeriodParser, child, run_cascade,
    suffix_end,
};
use crate::config::LocaleConfig;
use crate::matcher::PatternMatcher;
use crate::resolution::DateTimeResolutionResult;
use crate::token::{ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, timex};

/// Grains an "every"/"each" can wrap, widest first.
fn wrapped<'a>(config: &'a LocaleConfig) -> [(Box<dyn Extractor + 'a>, Box<dyn Parser + 'a>); 5] {
    [
        (Box::new(DateTimePeriodExtractor::new(config)), Box::new(DateTimePeriodParser::new(config))),
        (Box::new(DateTimeExtractor::new(config)), Box::new(DateTimeParser::new(config))),
        (Box::new(TimePeriodExtractor::new(config)), Box::new(TimePeriodParser::new(config))),
        (Box::new(DateExtractor::new(config)), Box::new(DateParser::new(config))),
        (Box::new(TimeExtractor::new(config)), Box::new(TimeParser::new(config))),
    ]
}

pub struct SetExtractor<'a> {
    config: &'a LocaleConfig,
}

impl<'a> SetExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        SetExtractor { config }
    }
}

impl Extractor for SetExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::Set
    }

    fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        let p = &self.config.set;
        let mut tokens = Vec::new();

        for re in [&p.each_unit, &p.periodic, &p.plural_weekday] {
            tokens.extend(re.find_all(text).into_iter().map(|m| Token::new(m.start, m.end)));
        }

        for (extractor, _) in wrapped(self.config) {
            for er in extractor.extract(text, reference) {
                if let Some(prefix) = p.each_prefix.at_end(&text[..er.start]) {
                    tokens.push(Token::new(prefix.start, er.end()));
                }
            }
        }

        for time in TimeExtractor::new(self.config).extract(text, reference) {
            if let Some(end) = suffix_end(&p.daily_suffix, text, time.end()) {
                tokens.push(Token::new(time.start, end));
            }
            if let Some(prefix) = p.daily_prefix.at_end(&text[..time.start]) {
                tokens.push(Token::new(prefix.start, time.end()));
            }
        }

        merge_all_tokens(tokens, text, Dimension::Set)
    }
}

pub struct SetParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> SetParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        SetParser { config }
    }

    fn parse_each_unit(&self, er: &ExtractResult, _reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.set.each_unit.exact(&er.text)?;
        let grain = self.config.unit(m.group("unit")?)?;
        let count = if m.has("other") {
            2.0
        } else {
            m.group("num").map_or(Some(1.0), |n| self.config.number(n))?
        };
        Some(DateTimeResolutionResult::timex_only(timex::duration(count, grain)))
    }

    fn parse_periodic(&self, er: &ExtractResult, _reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.set.periodic.exact(&er.text)?;
        let (amount, grain) = self.config.periodic_adverb(m.group("adverb")?)?;
        Some(DateTimeResolutionResult::timex_only(timex::duration(amount, grain)))
    }

    fn parse_plural_weekday(&self, er: &ExtractResult, _reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let m = self.config.set.plural_weekday.exact(&er.text)?;
        let weekday = self.config.weekday(m.group("weekday")?)?;
        Some(DateTimeResolutionResult::timex_only(timex::luis_weekday(weekday)))
    }

    /// "8am every day", "every night at 10".
    fn parse_daily(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.set;
        let times = TimeExtractor::new(self.config).extract(&er.text, reference);
        let time = times.iter().find(|t| {
            let (head, tail) = (&er.text[..t.start], &er.text[t.end()..]);
            (head.is_empty() && p.daily_suffix.at_start(tail).is_some_and(|m| m.end == tail.len()))
                || (tail.is_empty() && p.daily_prefix.exact(head).is_some())
        })?;
        let reading = TimeParser::new(self.config).reading(&time.text)?;
        let res = reading.resolve(reference)?;
        let timex = res.timex.clone();
        Some(
            DateTimeResolutionResult::timex_only(timex)
                .with_comment(reading.comment())
                .with_children(vec![child(er, time, Dimension::Time, res)]),
        )
    }

    /// "every Monday", "each Friday at 8pm": the wrapped entity's timex.
    fn parse_each_entity(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let p = &self.config.set;
        for (extractor, parser) in wrapped(self.config) {
            let Some(inner) = extractor
                .extract(&er.text, reference)
                .into_iter()
                .find(|e| e.end() == er.text.len() && p.each_prefix.exact(&er.text[..e.start]).is_some())
            else {
                continue;
            };
            let Some(res) = parser.parse(&inner, reference) else { continue };
            trace!(target: "chronolex::parse", inner = %inner.text, dim = extractor.dimension().name(), "each wraps");
            let timex = res.timex.clone();
            let comment = res.comment;
            let dim = extractor.dimension();
            return Some(
                DateTimeResolutionResult::timex_only(timex)
                    .with_comment(comment)
                    .with_children(vec![child(er, &inner, dim, res)]),
            );
        }
        None
    }
}

impl Parser for SetParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let strategies: &[Strategy<Self>] = &[
            ("each_unit", Self::parse_each_unit),
            ("periodic", Self::parse_periodic),
            ("plural_weekday", Self::parse_plural_weekday),
            ("daily", Self::parse_daily),
            ("each_entity", Self::parse_each_entity),
        ];
        run_cascade(self, strategies, er, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::testing::{english, reference};
    use crate::resolution::{Comment, DateTimeParseResult};

    fn resolve(text: &str) -> (String, DateTimeResolutionResult) {
        let spans = SetExtractor::new(english()).extract(text, reference());
        assert_eq!(spans.len(), 1, "{text}: {spans:?}");
        let res = SetParser::new(english()).parse(&spans[0], reference()).unwrap();
        (spans[0].text.clone(), res)
    }

    #[test]
    fn unit_recurrences() {
        let (span, res) = resolve("I go every week");
        assert_eq!(span, "every week");
        assert_eq!(res.timex, "P1W");
        assert_eq!(res.future, None);

        assert_eq!(resolve("every other week").1.timex, "P2W");
        assert_eq!(resolve("every 3 days").1.timex, "P3D");
        assert_eq!(resolve("each hour").1.timex, "PT1H");
    }

    #[test]
    fn periodic_adverbs() {
        assert_eq!(resolve("the report runs weekly").1.timex, "P1W");
        assert_eq!(resolve("biweekly").1.timex, "P2W");
        assert_eq!(resolve("quarterly").1.timex, "P3M");
        assert_eq!(resolve("hourly").1.timex, "PT1H");
    }

    #[test]
    fn plural_weekdays() {
        let (span, res) = resolve("I work from home on Mondays");
        assert_eq!(span, "on Mondays");
        assert_eq!(res.timex, "XXXX-WXX-1");
    }

    #[test]
    fn daily_times() {
        let (span, res) = resolve("I run 8am every day");
        assert_eq!(span, "8am every day");
        assert_eq!(res.timex, "T08");

        let (span, res) = resolve("every day at 7");
        assert_eq!(span, "every day at 7");
        assert_eq!(res.timex, "T07");
        assert_eq!(res.comment, Some(Comment::AmPm));
    }

    #[test]
    fn each_wraps_other_grains() {
        let (span, res) = resolve("every Monday");
        assert_eq!(span, "every Monday");
        assert_eq!(res.timex, "XXXX-WXX-1");

        let (span, res) = resolve("we meet each Friday at 8pm");
        assert_eq!(span, "each Friday at 8pm");
        assert_eq!(res.timex, "XXXX-WXX-5T20");
        assert_eq!(res.sub_resolutions[0].extract.dim, Dimension::DateTime);
    }

    #[test]
    fn sets_render_not_applicable() {
        let (_, res) = resolve("every week");
        let er = SetExtractor::new(english()).extract("every week", reference()).remove(0);
        let mut pr = DateTimeParseResult::new(er, Some(res));
        pr.render_values();
        assert_eq!(pr.values["resolve"].value.as_deref(), Some("not applicable"));
    }
}
