//! Merged extraction and parsing across every grain.
//!
//! The orchestrator runs each recognizer's extractor over the same text and
//! folds their spans into one ordered, non-overlapping list:
//!
//! ```text
//! date ─ time ─ duration ─ daterange ─ timerange ─ datetime ─ datetimerange ─ set ─ holiday
//!   │      │        │          │           │           │             │          │       │
//!   └──────┴────────┴──────────┴─────┬─────┴───────────┴─────────────┴──────────┴───────┘
//!                                    v
//!                      covering merge (wider replaces, else first wins)
//!                                    │
//!                     number endings, modifier prefixes, negative filter
//!                                    v
//!                            Vec<ExtractResult>
//! ```
//!
//! Parsing dispatches on the span's dimension. A leading before/after/since is
//! stripped, the rest is parsed on its own, and the modifier turns the value
//! into an open-ended range.

use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use super::metrics::{RunMetrics, RunResult, StageMetrics};
use crate::Dimension;
use crate::config::{DateTimeOptions, LocaleConfig, Options};
use crate::matcher::PatternMatcher;
use crate::recognizers::{
    DateExtractor, DateParser, DatePeriodExtractor, DatePeriodParser, DateTimeExtractor, DateTimeParser,
    DateTimePeriodExtractor, DateTimePeriodParser, DurationExtractor, DurationParser, Extractor, HolidayExtractor,
    HolidayParser, Parser, SetExtractor, SetParser, TimeExtractor, TimeParser, TimePeriodExtractor, TimePeriodParser,
};
use crate::resolution::{DateTimeParseResult, DateTimeResolutionResult, Modifier, TimeValue};
use crate::token::{ExtractAux, ExtractResult};

/// Offer `er` to the merged list. A strictly wider span replaces every span
/// it overlaps; anything else that overlaps is dropped.
fn add_covering(merged: &mut Vec<ExtractResult>, er: ExtractResult) -> bool {
    let token = er.as_token();
    let overlapping: Vec<usize> =
        merged.iter().enumerate().filter(|(_, kept)| kept.as_token().overlaps(&token)).map(|(i, _)| i).collect();

    let wider = overlapping.iter().all(|&i| token.covers(&merged[i].as_token()) && er.length > merged[i].length);
    if !wider {
        trace!(target: "chronolex::merge", text = %er.text, dim = er.dim.name(), "dropped by an existing span");
        return false;
    }
    for i in overlapping.into_iter().rev() {
        let replaced = merged.remove(i);
        trace!(target: "chronolex::merge", old = %replaced.text, new = %er.text, "replaced by a wider span");
    }
    merged.push(er);
    true
}

pub struct MergedExtractor<'a> {
    config: &'a LocaleConfig,
    options: &'a Options,
}

impl<'a> MergedExtractor<'a> {
    pub fn new(config: &'a LocaleConfig, options: &'a Options) -> Self {
        MergedExtractor { config, options }
    }

    fn stages(&self) -> Vec<(&'static str, Box<dyn Extractor + 'a>)> {
        let config = self.config;
        let skip = self.options.flags.contains(DateTimeOptions::SKIP_FROM_TO_MERGE);
        vec![
            ("date", Box::new(DateExtractor::new(config))),
            ("time", Box::new(TimeExtractor::new(config))),
            ("duration", Box::new(DurationExtractor::new(config))),
            ("daterange", Box::new(DatePeriodExtractor::new(config).skip_from_to_merge(skip))),
            ("timerange", Box::new(TimePeriodExtractor::new(config).skip_from_to_merge(skip))),
            ("datetime", Box::new(DateTimeExtractor::new(config))),
            ("datetimerange", Box::new(DateTimePeriodExtractor::new(config).skip_from_to_merge(skip))),
            ("set", Box::new(SetExtractor::new(config))),
            ("holiday", Box::new(HolidayExtractor::new(config))),
        ]
    }

    pub fn extract(&self, text: &str, reference: NaiveDateTime) -> Vec<ExtractResult> {
        self.extract_staged(text, reference, None)
    }

    /// Like [`extract`](Self::extract), also reporting what each stage produced.
    pub fn extract_with_metrics(&self, text: &str, reference: NaiveDateTime) -> (Vec<ExtractResult>, Vec<StageMetrics>) {
        let mut stages = Vec::new();
        let spans = self.extract_staged(text, reference, Some(&mut stages));
        (spans, stages)
    }

    fn extract_staged(
        &self,
        text: &str,
        reference: NaiveDateTime,
        mut metrics: Option<&mut Vec<StageMetrics>>,
    ) -> Vec<ExtractResult> {
        let mut merged = Vec::new();
        for (name, extractor) in self.stages() {
            let started = Instant::now();
            let spans = extractor.extract(text, reference);
            let produced = spans.len();
            let accepted = spans.iter().filter(|er| add_covering(&mut merged, (*er).clone())).count();
            if let Some(out) = metrics.as_deref_mut() {
                out.push(StageMetrics { name, duration: started.elapsed(), produced, spans, accepted });
            }
        }

        self.number_endings(text, &mut merged);
        merged.sort_by_key(|er| er.start);
        self.attach_modifiers(text, &mut merged);
        if self.options.flags.contains(DateTimeOptions::ENABLE_NEGATIVE_FILTER) {
            self.filter_negatives(&mut merged);
        }
        merged
    }

    /// "move the 3pm meeting to 4": the bare 4 becomes a time of its own.
    fn number_endings(&self, text: &str, merged: &mut Vec<ExtractResult>) {
        let endings: Vec<ExtractResult> = merged
            .iter()
            .filter(|er| matches!(er.dim, Dimension::Time | Dimension::DateTime))
            .filter_map(|er| {
                let m = self.config.merged.number_ending.at_start(&text[er.end()..])?;
                let (start, end) = m.group_span("num")?;
                let mut num = ExtractResult::new(text, er.end() + start, er.end() + end, Dimension::Time);
                num.aux = Some(ExtractAux::NumberEnding);
                Some(num)
            })
            .collect();
        for num in endings {
            debug!(target: "chronolex::merge", text = %num.text, start = num.start, "number ending");
            add_covering(merged, num);
        }
    }

    /// Pull a "before"/"after"/"since" right in front of a span into it.
    fn attach_modifiers(&self, text: &str, merged: &mut [ExtractResult]) {
        let mut floor = 0;
        for er in merged.iter_mut() {
            if !matches!(er.dim, Dimension::Duration | Dimension::Set) {
                if let Some(m) = self.config.merged.modifier_prefix.at_end(&text[floor..er.start]) {
                    let start = floor + m.start;
                    debug!(target: "chronolex::merge", modifier = m.text.trim(), text = %er.text, "modifier prefix");
                    *er = ExtractResult { aux: er.aux, ..ExtractResult::new(text, start, er.end(), er.dim) };
                }
            }
            floor = er.end();
        }
    }

    fn filter_negatives(&self, merged: &mut Vec<ExtractResult>) {
        merged.retain(|er| {
            let text = er.text.trim();
            let blocked = self.config.negative_filters.iter().any(|re| re.is_match(text))
                || self.options.extra_filters.iter().any(|f| f.trim().eq_ignore_ascii_case(text));
            if blocked {
                debug!(target: "chronolex::merge", text, "negative filter");
            }
            !blocked
        });
    }
}

pub struct MergedParser<'a> {
    config: &'a LocaleConfig,
    options: &'a Options,
}

impl<'a> MergedParser<'a> {
    pub fn new(config: &'a LocaleConfig, options: &'a Options) -> Self {
        MergedParser { config, options }
    }

    fn resolve(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let config = self.config;
        match er.dim {
            Dimension::Date => {
                HolidayParser::new(config).parse(er, reference).or_else(|| DateParser::new(config).parse(er, reference))
            }
            Dimension::Time => TimeParser::new(config).parse(er, reference),
            Dimension::DatePeriod => {
                DatePeriodParser::new(config).inclusive_end(self.options.inclusive_end()).parse(er, reference)
            }
            Dimension::TimePeriod => TimePeriodParser::new(config).parse(er, reference),
            Dimension::DateTime => DateTimeParser::new(config).parse(er, reference),
            Dimension::DateTimePeriod => DateTimePeriodParser::new(config).parse(er, reference),
            Dimension::Duration => DurationParser::new(config).parse(er, reference),
            Dimension::Set => SetParser::new(config).parse(er, reference),
        }
    }

    /// Resolve a span that opens with before/after/since. The point turns
    /// into its range dimension with one open end.
    fn parse_modified(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<(DateTimeResolutionResult, Dimension)> {
        if matches!(er.dim, Dimension::Duration | Dimension::Set) {
            return None;
        }
        let m = self.config.merged.modifier_head.at_start(&er.text)?;
        let modifier = if m.has("before") {
            Modifier::Before
        } else if m.has("after") {
            Modifier::After
        } else {
            Modifier::Since
        };

        let inner = er.sub_span(m.end, er.text.len(), er.dim);
        let mut res = self.resolve(&inner, reference)?;
        debug!(target: "chronolex::parse", modifier = modifier.as_str(), inner = %inner.text, timex = %res.timex, "modifier");

        let bound = |value: Option<TimeValue>| {
            let value = value?;
            match modifier {
                Modifier::Before => value.start().map(TimeValue::OpenBefore),
                Modifier::After => value.end().map(TimeValue::OpenAfter),
                _ => value.start().map(TimeValue::OpenAfter),
            }
        };
        res.future = bound(res.future);
        res.past = bound(res.past);
        res.other_half = res.other_half.and_then(|(future, past)| Some((bound(Some(future))?, bound(Some(past))?)));
        res.modifier = Some(modifier);
        Some((res, er.dim.as_range()))
    }

    pub fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> DateTimeParseResult {
        let (resolution, dim) = match self.parse_modified(er, reference) {
            Some((res, dim)) => (Some(res), dim),
            None => (self.resolve(er, reference), er.dim),
        };
        if resolution.is_none() {
            debug!(target: "chronolex::parse", text = %er.text, dim = er.dim.name(), "not resolved");
        }
        let mut pr = DateTimeParseResult::new(er.clone(), resolution);
        pr.dim = dim;
        pr.render_values();
        pr
    }
}

/// Extract and parse `text`, timing each stage.
pub fn run_with_metrics(config: &LocaleConfig, options: &Options, text: &str, reference: NaiveDateTime) -> RunResult {
    let total_start = Instant::now();
    let (spans, stages) = MergedExtractor::new(config, options).extract_with_metrics(text, reference);
    let extraction = total_start.elapsed();

    let parse_start = Instant::now();
    let parser = MergedParser::new(config, options);
    let results = spans.iter().map(|er| parser.parse(er, reference)).collect();
    let parse = parse_start.elapsed();

    RunResult { spans, results, metrics: RunMetrics { total: total_start.elapsed(), extraction, stages, parse } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizers::testing::{at, english, reference};
    use crate::resolution::Comment;

    fn run(text: &str, options: &Options) -> Vec<DateTimeParseResult> {
        run_with_metrics(english(), options, text, reference()).results
    }

    fn texts(results: &[DateTimeParseResult]) -> Vec<&str> {
        results.iter().map(|pr| pr.extract.text.as_str()).collect()
    }

    #[test]
    fn wider_spans_replace_their_parts() {
        let out = run("I'll go back next Friday at 8pm", &Options::default());
        assert_eq!(texts(&out), vec!["next Friday at 8pm"]);
        assert_eq!(out[0].dim, Dimension::DateTime);
        assert_eq!(out[0].timex(), Some("2016-11-18T20"));
        assert_eq!(out[0].values["resolve"].value.as_deref(), Some("2016-11-18 20:00:00"));
    }

    #[test]
    fn equal_spans_keep_the_first_grain() {
        let mut merged = vec![ExtractResult::new("on Friday", 3, 9, Dimension::Date)];
        assert!(!add_covering(&mut merged, ExtractResult::new("on Friday", 3, 9, Dimension::DateTime)));
        assert!(add_covering(&mut merged, ExtractResult::new("on Friday", 0, 9, Dimension::DateTime)));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].dim, Dimension::DateTime);
    }

    #[test]
    fn day_range_is_one_entity() {
        let out = run("I'll be out from 4 to 22 this month", &Options::default());
        assert_eq!(texts(&out), vec!["from 4 to 22 this month"]);
        assert_eq!(out[0].timex(), Some("(2016-11-04,2016-11-22,P18D)"));
    }

    #[test]
    fn before_and_since_open_the_range() {
        let out = run("finish it before next Friday", &Options::default());
        assert_eq!(texts(&out), vec!["before next Friday"]);
        assert_eq!(out[0].dim, Dimension::DatePeriod);
        assert_eq!(out[0].future(), Some(TimeValue::OpenBefore(at(2016, 11, 18, 0, 0))));
        let value = &out[0].values["resolve"];
        assert_eq!(value.modifier.as_deref(), Some("before"));
        assert_eq!(value.end.as_deref(), Some("2016-11-18"));
        assert_eq!(value.type_name, "daterange");

        let out = run("sick since yesterday", &Options::default());
        assert_eq!(texts(&out), vec!["since yesterday"]);
        assert_eq!(out[0].future(), Some(TimeValue::OpenAfter(at(2016, 11, 6, 0, 0))));
    }

    #[test]
    fn number_ending_adds_a_time() {
        let out = run("move the 3pm meeting to 4", &Options::default());
        assert_eq!(texts(&out), vec!["3pm", "4"]);
        assert_eq!(out[1].extract.aux, Some(ExtractAux::NumberEnding));
        assert_eq!(out[1].timex(), Some("T04"));
        assert_eq!(out[1].resolution.as_ref().and_then(|r| r.comment), Some(Comment::AmPm));
    }

    #[test]
    fn ampm_renders_both_readings() {
        let out = run("let's talk at 8", &Options::default());
        assert_eq!(texts(&out), vec!["at 8"]);
        let keys: Vec<&str> = out[0].values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["resolveToFutureAm", "resolveToFuturePm", "resolveToPastAm", "resolveToPastPm"]);
        assert_eq!(out[0].values["resolveToFutureAm"].value.as_deref(), Some("08:00:00"));
        assert_eq!(out[0].values["resolveToFuturePm"].value.as_deref(), Some("20:00:00"));
    }

    #[test]
    fn noon_hour_reads_as_midnight_or_noon() {
        let out = run("see you at 12", &Options::default());
        assert_eq!(texts(&out), vec!["at 12"]);
        assert_eq!(out[0].timex(), Some("T12"));
        assert_eq!(out[0].values["resolveToFutureAm"].value.as_deref(), Some("00:00:00"));
        assert_eq!(out[0].values["resolveToFuturePm"].value.as_deref(), Some("12:00:00"));
    }

    #[test]
    fn negative_filter_is_opt_in() {
        let text = "I'll visit in May";
        assert_eq!(texts(&run(text, &Options::default())), vec!["May"]);

        let filtered = Options::with_flags(DateTimeOptions::ENABLE_NEGATIVE_FILTER);
        assert!(run(text, &filtered).is_empty());

        let mut extra = Options::with_flags(DateTimeOptions::ENABLE_NEGATIVE_FILTER);
        extra.extra_filters.push("next week".to_string());
        assert!(run("see you next week", &extra).is_empty());
    }

    #[test]
    fn skip_from_to_merge_keeps_points() {
        let text = "from November 15 to November 20";
        assert_eq!(texts(&run(text, &Options::default())), vec![text]);

        let skip = Options::with_flags(DateTimeOptions::SKIP_FROM_TO_MERGE);
        assert_eq!(texts(&run(text, &skip)), vec!["November 15", "November 20"]);
    }

    #[test]
    fn inclusive_end_reaches_the_period_parser() {
        let inclusive = Options::with_flags(DateTimeOptions::INCLUSIVE_END_PERIOD);
        let out = run("rest of the week", &inclusive);
        assert_eq!(out[0].values["resolve"].end.as_deref(), Some("2016-11-13"));

        let out = run("rest of the week", &Options::default());
        assert_eq!(out[0].values["resolve"].end.as_deref(), Some("2016-11-14"));
    }

    #[test]
    fn metrics_cover_every_stage() {
        let run = run_with_metrics(english(), &Options::default(), "tomorrow at 5pm", reference());
        let names: Vec<&str> = run.metrics.stages.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["date", "time", "duration", "daterange", "timerange", "datetime", "datetimerange", "set", "holiday"]
        );
        assert!(run.metrics.extraction <= run.metrics.total);
        assert_eq!(run.spans.len(), 1);
        assert_eq!(run.metrics.stages[0].produced, 1);
    }
}
