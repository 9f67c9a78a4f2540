//! Durations: "3 weeks", "an hour and a half", "a couple of days".

use chrono::NaiveDateTime;
use tracing::trace;

use super::{Extractor, Parser};
use crate::config::LocaleConfig;
use crate::matcher::{PatternMatch, PatternMatcher};
use crate::resolution::{DateTimeResolutionResult, Modifier, TimeValue};
use crate::token::{ExtractAux, ExtractResult, Token, merge_all_tokens};
use crate::{Dimension, Grain, timex};

pub struct DurationExtractor<'a> {
    config: &'a LocaleConfig,
}

impl<'a> DurationExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DurationExtractor { config }
    }
}

impl Extractor for DurationExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::Duration
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractResult> {
        let patterns = &self.config.duration;
        let mut tokens = Vec::new();

        for re in [&patterns.number_unit, &patterns.article_unit, &patterns.all_half, &patterns.inexact] {
            for m in re.find_all(text) {
                if amount_of(self.config, &m).is_none() {
                    continue;
                }
                let token = match patterns.modifier_prefix.at_end(&text[..m.start]) {
                    Some(prefix) => {
                        let modifier = if prefix.has("more") { Modifier::More } else { Modifier::Less };
                        trace!(target: "chronolex::extract", prefix = prefix.text, "duration modifier");
                        Token::with_tag(prefix.start, m.end, ExtractAux::Modifier(modifier))
                    }
                    None => Token::new(m.start, m.end),
                };
                tokens.push(token);
            }
        }

        merge_all_tokens(tokens, text, Dimension::Duration)
    }
}

/// Amount and unit of one duration match.
fn amount_of(config: &LocaleConfig, m: &PatternMatch<'_>) -> Option<(f64, Grain)> {
    let grain = config.unit(m.group("unit")?)?;
    let amount = if let Some(num) = m.group("num") {
        config.number(num)?
    } else if let Some(amount) = m.group("amount") {
        config.inexact_amount(amount)?
    } else if let Some(which) = m.group_lower("which") {
        if which == "half" { 0.5 } else { 1.0 }
    } else {
        let base = if m.has("half") { 0.5 } else { 1.0 };
        base + if m.has("and_half") { 0.5 } else { 0.0 }
    };
    (amount > 0.0).then_some((amount, grain))
}

/// Amount and unit of a text that is exactly one duration expression.
pub(crate) fn parse_amount(config: &LocaleConfig, text: &str) -> Option<(f64, Grain)> {
    let patterns = &config.duration;
    [&patterns.number_unit, &patterns.article_unit, &patterns.all_half, &patterns.inexact]
        .into_iter()
        .find_map(|re| re.exact(text).and_then(|m| amount_of(config, &m)))
}

/// Durations inside `text` whose unit satisfies `keep`, with their amounts.
pub(crate) fn find_durations(
    config: &LocaleConfig,
    text: &str,
    keep: impl Fn(Grain) -> bool,
) -> Vec<(ExtractResult, f64, Grain)> {
    DurationExtractor::new(config)
        .extract(text, NaiveDateTime::MIN)
        .into_iter()
        .filter(|er| er.aux.is_none())
        .filter_map(|er| {
            let (amount, grain) = parse_amount(config, &er.text)?;
            keep(grain).then_some((er, amount, grain))
        })
        .collect()
}

pub struct DurationParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> DurationParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        DurationParser { config }
    }
}

impl Parser for DurationParser<'_> {
    fn parse(&self, er: &ExtractResult, _reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let patterns = &self.config.duration;
        // the span may carry a "more than" head, the duration itself ends the span
        let (amount, grain) = [&patterns.number_unit, &patterns.article_unit, &patterns.all_half, &patterns.inexact]
            .into_iter()
            .find_map(|re| re.at_end(&er.text).and_then(|m| amount_of(self.config, &m)))?;
        trace!(target: "chronolex::parse", text = %er.text, amount, ?grain, "duration");

        let mut res =
            DateTimeResolutionResult::pinned(timex::duration(amount, grain), TimeValue::Duration(amount * grain.seconds()));
        if let Some(ExtractAux::Modifier(modifier)) = er.aux {
            res.modifier = Some(modifier);
        }
        Some(res)
    }
}

/// Start of a "past"/"next"-style qualifier ending at `start`, with its direction.
pub(crate) fn direction_prefix(config: &LocaleConfig, text: &str, start: usize) -> Option<(usize, bool)> {
    let m = config.date_period.duration_prefix.at_end(&text[..start])?;
    Some((m.start, m.has("next")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::testing::{english, reference};

    fn run(text: &str) -> Vec<(String, DateTimeResolutionResult)> {
        let config = english();
        DurationExtractor::new(config)
            .extract(text, reference())
            .into_iter()
            .map(|er| {
                let res = DurationParser::new(config).parse(&er, reference()).unwrap();
                (er.text, res)
            })
            .collect()
    }

    #[test]
    fn numeric_durations() {
        let out = run("I'll leave for 3 weeks");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, "3 weeks");
        assert_eq!(out[0].1.timex, "P3W");
        assert_eq!(out[0].1.future, Some(TimeValue::Duration(1_814_400.0)));

        let out = run("takes 2.5 hours or 3h");
        assert_eq!(out.iter().map(|(_, r)| r.timex.as_str()).collect::<Vec<_>>(), vec!["PT2.5H", "PT3H"]);
    }

    #[test]
    fn article_and_half_forms() {
        let out = run("it lasted an hour and a half");
        assert_eq!(out[0].0, "an hour and a half");
        assert_eq!(out[0].1.future, Some(TimeValue::Duration(5_400.0)));

        let out = run("I was there all day");
        assert_eq!(out[0].1.timex, "P1D");

        let out = run("half a day");
        assert_eq!(out[0].1.timex, "P0.5D");
    }

    #[test]
    fn inexact_amounts() {
        let out = run("stay for a couple of days");
        assert_eq!(out[0].0, "a couple of days");
        assert_eq!(out[0].1.timex, "P2D");
        assert_eq!(run("several weeks")[0].1.timex, "P3W");
    }

    #[test]
    fn modifier_prefix_is_attached_without_changing_value() {
        let out = run("it took more than 2 hours");
        assert_eq!(out[0].0, "more than 2 hours");
        assert_eq!(out[0].1.modifier, Some(Modifier::More));
        assert_eq!(out[0].1.future, Some(TimeValue::Duration(7_200.0)));

        let out = run("less than ten minutes");
        assert_eq!(out[0].1.modifier, Some(Modifier::Less));
        assert_eq!(out[0].1.timex, "PT10M");
    }

    #[test]
    fn plain_words_are_not_durations() {
        assert!(run("the day is nice").is_empty());
    }
}
