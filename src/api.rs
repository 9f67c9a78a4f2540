use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;

use crate::config::{DateTimeOptions, LocaleConfig, Options};
use crate::engine::{self, MergedExtractor, MergedParser, StageMetrics};
use crate::resolution::{DateTimeParseResult, ResolutionValue};
use crate::token::ExtractResult;
use crate::Dimension;

static ENGLISH: Lazy<LocaleConfig> = Lazy::new(|| {
    LocaleConfig::english().unwrap_or_else(|err| panic!("built-in English configuration is invalid: {err}"))
});

/// The built-in English configuration, built on first use.
pub(crate) fn english_config() -> &'static LocaleConfig {
    &ENGLISH
}

/// Parsing context.
///
/// This holds environment needed to resolve relative expressions (like "tomorrow").
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference datetime used to resolve relative expressions.
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2016, 11, 7).unwrap_or_default();
            Self { reference_time: NaiveDateTime::new(date, NaiveTime::MIN) }
        } else {
            Self { reference_time: Local::now().naive_local() }
        }
    }
}

/// A resolved entity found in input.
///
/// `start`/`end` are byte offsets into the original input.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Type name, e.g. `"date"` or `"datetimerange"`.
    pub name: String,
    /// Slice of the original input that matched.
    pub body: String,
    /// Start byte index of the match.
    pub start: usize,
    /// End byte index of the match (exclusive).
    pub end: usize,
    /// Rendered values keyed by `resolve`, `resolveToPast`, `resolveToFuture`.
    pub resolution: BTreeMap<String, ResolutionValue>,
}

impl Entity {
    /// Timex of the first rendered value.
    pub fn timex(&self) -> Option<&str> {
        self.resolution.values().next().map(|v| v.timex.as_str()).filter(|t| !t.is_empty())
    }
}

/// Result from [`parse`] and [`parse_with`].
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed input text.
    pub text: String,
    /// Resolved entities, in text order.
    pub results: Vec<Entity>,
    /// Total elapsed time spent extracting + parsing.
    pub elapsed: Duration,
}

/// A compact per-stage extraction trace.
#[derive(Debug, Clone)]
pub struct StagePass {
    pub name: &'static str,
    pub duration: Duration,
    pub produced: usize,
    pub accepted: usize,
    pub samples: Vec<SpanSummary>,
}

/// A compact span summary used in verbose traces.
#[derive(Debug, Clone)]
pub struct SpanSummary {
    pub start: usize,
    pub end: usize,
    pub dim: &'static str,
    pub preview: String,
}

/// Additional details returned by [`parse_verbose`] and [`parse_verbose_with`]:
/// which grain claimed which span, and where the time went.
#[derive(Debug, Clone)]
pub struct ParseDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent running the extractors and merging their spans.
    pub extraction: Duration,
    pub stages: Vec<StagePass>,
    /// Time spent parsing the merged spans.
    pub parse: Duration,
    /// Merged spans no parser strategy could resolve.
    pub unresolved: Vec<SpanSummary>,
}

/// Result from [`parse_verbose`] and [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub text: String,
    pub results: Vec<Entity>,
    pub elapsed: Duration,
    pub details: ParseDetails,
}

/// Parse `text` with the built-in English configuration and a default [`Context`].
///
/// # Example
/// ```
/// use chronolex::parse;
///
/// let out = parse("tomorrow at 8pm");
/// assert_eq!(out.results.len(), 1);
/// assert_eq!(out.results[0].name, "datetime");
/// ```
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, &Context::default(), &Options::default())
}

/// Parse `text` using the provided `context`/`options`.
///
/// Use this when you want deterministic parsing by supplying a reference time.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> ParseResult {
    let started = Instant::now();
    let config = english_config();
    let reference = context.reference_time;

    let parser = MergedParser::new(config, options);
    let parsed: Vec<DateTimeParseResult> = MergedExtractor::new(config, options)
        .extract(text, reference)
        .iter()
        .map(|er| parser.parse(er, reference))
        .collect();

    ParseResult { text: text.to_string(), results: to_entities(&parsed, options), elapsed: started.elapsed() }
}

pub fn parse_verbose(text: &str) -> ParseResultVerbose {
    parse_verbose_with(text, &Context::default(), &Options::default())
}

/// Parse `text` with `context`/`options` and return extra (compact) debug details.
///
/// The default [`parse_with`] path does not collect these traces.
pub fn parse_verbose_with(text: &str, context: &Context, options: &Options) -> ParseResultVerbose {
    let run = engine::run_with_metrics(english_config(), options, text, context.reference_time);

    let stages = run.metrics.stages.iter().map(stage_pass).collect();
    let unresolved = run.results.iter().filter(|pr| !pr.is_resolved()).map(|pr| span_summary(&pr.extract)).collect();
    let details = ParseDetails {
        total: run.metrics.total,
        extraction: run.metrics.extraction,
        stages,
        parse: run.metrics.parse,
        unresolved,
    };

    ParseResultVerbose {
        text: text.to_string(),
        results: to_entities(&run.results, options),
        elapsed: run.metrics.total,
        details,
    }
}

fn to_entities(parsed: &[DateTimeParseResult], options: &Options) -> Vec<Entity> {
    let split = options.flags.contains(DateTimeOptions::SPLIT_DATE_AND_TIME);
    let mut entities = Vec::new();
    for pr in parsed {
        match split_parts(pr).filter(|_| split) {
            Some(parts) => entities.extend(parts.into_iter().map(to_entity)),
            None => entities.push(to_entity(pr)),
        }
    }
    entities
}

/// Date and time children of a merged date-time, when it has both.
fn split_parts(pr: &DateTimeParseResult) -> Option<Vec<&DateTimeParseResult>> {
    if pr.dim != Dimension::DateTime {
        return None;
    }
    let children = &pr.resolution.as_ref()?.sub_resolutions;
    let date = children.iter().find(|c| c.dim == Dimension::Date)?;
    let time = children.iter().find(|c| c.dim == Dimension::Time)?;
    let mut parts = vec![date, time];
    parts.sort_by_key(|p| p.extract.start);
    Some(parts)
}

fn to_entity(pr: &DateTimeParseResult) -> Entity {
    Entity {
        name: pr.type_name().to_string(),
        body: pr.extract.text.clone(),
        start: pr.extract.start,
        end: pr.extract.end(),
        resolution: pr.values.clone(),
    }
}

fn stage_pass(stage: &StageMetrics) -> StagePass {
    StagePass {
        name: stage.name,
        duration: stage.duration,
        produced: stage.produced,
        accepted: stage.accepted,
        samples: stage.spans.iter().take(8).map(span_summary).collect(),
    }
}

fn span_summary(er: &ExtractResult) -> SpanSummary {
    SpanSummary { start: er.start, end: er.end(), dim: er.dim.name(), preview: er.text.chars().take(80).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_context() -> Context {
        let date = NaiveDate::from_ymd_opt(2016, 11, 7).unwrap();
        let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        Context { reference_time: NaiveDateTime::new(date, time) }
    }

    #[test]
    fn parse_with_returns_entities() {
        let ctx = reference_context();
        let res = parse_with("I'll go back on Friday", &ctx, &Options::default());

        assert_eq!(res.text, "I'll go back on Friday");
        let date = res.results.iter().find(|e| e.name == "date").unwrap();
        assert_eq!(date.body, "Friday");
        assert_eq!(date.start, 16);
        assert_eq!(date.end, 22);
        assert_eq!(date.timex(), Some("XXXX-WXX-5"));
        assert_eq!(date.resolution["resolveToFuture"].value.as_deref(), Some("2016-11-11"));
        assert_eq!(date.resolution["resolveToPast"].value.as_deref(), Some("2016-11-04"));
    }

    #[test]
    fn default_context_is_fixed_under_test() {
        let midnight = NaiveDate::from_ymd_opt(2016, 11, 7).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(Context::default().reference_time, midnight);
        let res = parse("tomorrow");
        assert_eq!(res.results[0].timex(), Some("2016-11-08"));
    }

    #[test]
    fn split_date_and_time_reports_parts() {
        let ctx = reference_context();
        let opts = Options::with_flags(DateTimeOptions::SPLIT_DATE_AND_TIME);
        let res = parse_with("tomorrow at 8pm", &ctx, &opts);
        let names: Vec<&str> = res.results.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["date", "time"]);
        assert_eq!(res.results[1].body, "8pm");
        assert_eq!(res.results[1].start, 12);

        let res = parse_with("tomorrow at 8pm", &ctx, &Options::default());
        assert_eq!(res.results.len(), 1);
        assert_eq!(res.results[0].timex(), Some("2016-11-08T20"));
    }

    #[test]
    fn parse_verbose_includes_metrics_and_stages() {
        let ctx = reference_context();
        let res = parse_verbose_with("next week", &ctx, &Options::default());

        assert_eq!(res.text, "next week");
        assert_eq!(res.elapsed, res.details.total);
        assert!(res.details.extraction <= res.details.total);
        assert_eq!(res.details.stages.len(), 9);
        let range = res.details.stages.iter().find(|s| s.name == "daterange").unwrap();
        assert_eq!(range.produced, 1);
        assert_eq!(range.samples[0].preview, "next week");
        assert!(res.details.unresolved.is_empty());
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert!(parse("").results.is_empty());
        assert!(parse("nothing temporal here").results.is_empty());
    }
}
