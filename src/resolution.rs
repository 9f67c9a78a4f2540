//! Resolution model.
//!
//! A parser turns an [`ExtractResult`] into a [`DateTimeResolutionResult`]:
//! a timex plus a future and a past interpretation. The orchestrator wraps
//! that into a [`DateTimeParseResult`] and renders the public value map.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::Dimension;
use crate::timex::{format_date, format_date_time, format_duration_seconds, format_time};
use crate::token::ExtractResult;

/// Rendered value for a span that no strategy could resolve.
pub const NOT_RESOLVED: &str = "not resolved";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeValue {
    Instant(NaiveDateTime),
    Interval { start: NaiveDateTime, end: NaiveDateTime },
    /// From this point onwards.
    OpenAfter(NaiveDateTime),
    /// Up until this point.
    OpenBefore(NaiveDateTime),
    /// A length of time, in seconds.
    Duration(f64),
}

impl TimeValue {
    /// First instant covered by the value.
    pub fn start(&self) -> Option<NaiveDateTime> {
        match self {
            TimeValue::Instant(dt) | TimeValue::OpenAfter(dt) => Some(*dt),
            TimeValue::Interval { start, .. } => Some(*start),
            TimeValue::OpenBefore(_) | TimeValue::Duration(_) => None,
        }
    }

    /// Last instant (or exclusive bound) covered by the value.
    pub fn end(&self) -> Option<NaiveDateTime> {
        match self {
            TimeValue::Instant(dt) | TimeValue::OpenBefore(dt) => Some(*dt),
            TimeValue::Interval { end, .. } => Some(*end),
            TimeValue::OpenAfter(_) | TimeValue::Duration(_) => None,
        }
    }

    pub fn shifted(&self, by: Duration) -> TimeValue {
        match *self {
            TimeValue::Instant(dt) => TimeValue::Instant(dt + by),
            TimeValue::Interval { start, end } => TimeValue::Interval { start: start + by, end: end + by },
            TimeValue::OpenAfter(dt) => TimeValue::OpenAfter(dt + by),
            TimeValue::OpenBefore(dt) => TimeValue::OpenBefore(dt + by),
            TimeValue::Duration(s) => TimeValue::Duration(s),
        }
    }
}

/// Qualifier attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Before,
    After,
    Since,
    More,
    Less,
    /// "early", "the beginning of".
    Start,
    Mid,
    /// "late", "the end of".
    End,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Before => "before",
            Modifier::After => "after",
            Modifier::Since => "since",
            Modifier::More => "more",
            Modifier::Less => "less",
            Modifier::Start => "start",
            Modifier::Mid => "mid",
            Modifier::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comment {
    /// Clock hour without an AM/PM marker; both readings are emitted.
    AmPm,
}

impl Comment {
    pub fn as_str(self) -> &'static str {
        match self {
            Comment::AmPm => "ampm",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeResolutionResult {
    pub timex: String,
    pub future: Option<TimeValue>,
    pub past: Option<TimeValue>,
    /// Parsed components of a span built by merging two spans.
    pub sub_resolutions: Vec<DateTimeParseResult>,
    pub modifier: Option<Modifier>,
    pub comment: Option<Comment>,
    /// Future and past of the clock reading in the other half of the day.
    pub other_half: Option<(TimeValue, TimeValue)>,
}

impl DateTimeResolutionResult {
    pub fn new(timex: impl Into<String>, future: TimeValue, past: TimeValue) -> Self {
        DateTimeResolutionResult {
            timex: timex.into(),
            future: Some(future),
            past: Some(past),
            sub_resolutions: Vec::new(),
            modifier: None,
            comment: None,
            other_half: None,
        }
    }

    /// A resolution whose future and past readings coincide.
    pub fn pinned(timex: impl Into<String>, value: TimeValue) -> Self {
        Self::new(timex, value, value)
    }

    /// A resolution that carries a timex but no calendar value (sets, bare seasons).
    pub fn timex_only(timex: impl Into<String>) -> Self {
        DateTimeResolutionResult {
            timex: timex.into(),
            future: None,
            past: None,
            sub_resolutions: Vec::new(),
            modifier: None,
            comment: None,
            other_half: None,
        }
    }

    pub fn with_timex(mut self, timex: impl Into<String>) -> Self {
        self.timex = timex.into();
        self
    }

    pub fn with_comment(mut self, comment: Option<Comment>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_children(mut self, children: Vec<DateTimeParseResult>) -> Self {
        self.sub_resolutions = children;
        self
    }

    pub fn is_ambiguous(&self) -> bool {
        self.future != self.past
    }
}

/// One rendered resolution entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionValue {
    pub timex: String,
    pub type_name: String,
    pub modifier: Option<String>,
    pub comment: Option<String>,
    pub value: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeParseResult {
    pub extract: ExtractResult,
    pub resolution: Option<DateTimeResolutionResult>,
    /// Externally visible type, which a modifier may have turned into a range type.
    pub dim: Dimension,
    /// Rendered values keyed by `resolve`, `resolveToPast`, `resolveToFuture`
    /// (with `Am`/`Pm` suffixes for ambiguous clock hours).
    pub values: BTreeMap<String, ResolutionValue>,
}

impl DateTimeParseResult {
    pub fn new(extract: ExtractResult, resolution: Option<DateTimeResolutionResult>) -> Self {
        let dim = extract.dim;
        DateTimeParseResult { extract, resolution, dim, values: BTreeMap::new() }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn type_name(&self) -> &'static str {
        self.dim.name()
    }

    pub fn timex(&self) -> Option<&str> {
        self.resolution.as_ref().map(|r| r.timex.as_str())
    }

    /// Future-side value (falls back to the past side).
    pub fn future(&self) -> Option<TimeValue> {
        let res = self.resolution.as_ref()?;
        res.future.or(res.past)
    }

    pub fn past(&self) -> Option<TimeValue> {
        let res = self.resolution.as_ref()?;
        res.past.or(res.future)
    }

    /// Render the value map. Identical readings produce a single `resolve`
    /// entry; differing readings produce `resolveToPast` and `resolveToFuture`.
    /// An "ampm" comment splits the keys into an `Am` and a `Pm` reading of the hour.
    pub fn render_values(&mut self) {
        let mut values = BTreeMap::new();
        let type_name = self.type_name().to_string();

        let Some(res) = &self.resolution else {
            values.insert(
                "resolve".to_string(),
                ResolutionValue {
                    timex: String::new(),
                    type_name,
                    modifier: None,
                    comment: None,
                    value: Some(NOT_RESOLVED.to_string()),
                    start: None,
                    end: None,
                },
            );
            self.values = values;
            return;
        };

        let entry = |value: Option<TimeValue>| -> ResolutionValue {
            let (value, start, end) = render_time_value(self.dim, value);
            ResolutionValue {
                timex: res.timex.clone(),
                type_name: type_name.clone(),
                modifier: res.modifier.map(|m| m.as_str().to_string()),
                comment: res.comment.map(|c| c.as_str().to_string()),
                value,
                start,
                end,
            }
        };

        let written = (res.future, res.past);
        let halves = match res.comment {
            Some(Comment::AmPm) => {
                let other = match res.other_half {
                    Some((future, past)) => (Some(future), Some(past)),
                    None => (res.future.map(opposite_half), res.past.map(opposite_half)),
                };
                let written_is_am = res.future.or(res.past).and_then(|v| anchor(&v)).is_some_and(|dt| dt.hour() < 12);
                if written_is_am { vec![("Am", written), ("Pm", other)] } else { vec![("Am", other), ("Pm", written)] }
            }
            None => vec![("", written)],
        };

        for (suffix, (future, past)) in halves {
            if future == past {
                values.insert(format!("resolve{suffix}"), entry(future));
            } else {
                values.insert(format!("resolveToPast{suffix}"), entry(past));
                values.insert(format!("resolveToFuture{suffix}"), entry(future));
            }
        }

        self.values = values;
    }
}

fn anchor(value: &TimeValue) -> Option<NaiveDateTime> {
    value.start().or(value.end())
}

/// The same clock reading in the other half of the day: 12:xx pairs with 00:xx.
fn opposite_half(value: TimeValue) -> TimeValue {
    let pm = anchor(&value).is_some_and(|dt| dt.hour() >= 12);
    value.shifted(Duration::hours(if pm { -12 } else { 12 }))
}

/// Format a value for the given dimension: `(value, start, end)`.
fn render_time_value(dim: Dimension, value: Option<TimeValue>) -> (Option<String>, Option<String>, Option<String>) {
    let fmt = |dt: NaiveDateTime| match dim {
        Dimension::Date | Dimension::DatePeriod => format_date(dt),
        Dimension::Time | Dimension::TimePeriod => format_time(dt),
        _ => format_date_time(dt),
    };

    match value {
        None if dim == Dimension::Set => (Some("not applicable".to_string()), None, None),
        None => (Some(NOT_RESOLVED.to_string()), None, None),
        Some(TimeValue::Instant(dt)) => (Some(fmt(dt)), None, None),
        Some(TimeValue::Interval { start, end }) => (None, Some(fmt(start)), Some(fmt(end))),
        Some(TimeValue::OpenAfter(dt)) => (None, Some(fmt(dt)), None),
        Some(TimeValue::OpenBefore(dt)) => (None, None, Some(fmt(dt))),
        Some(TimeValue::Duration(secs)) => (Some(format_duration_seconds(secs)), None, None),
    }
}
