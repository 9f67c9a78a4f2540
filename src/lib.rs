extern crate self as chronolex;

#[macro_use]
mod macros;
mod api;
mod calendar;
mod config;
mod engine;
mod error;
mod matcher;
mod number;
pub mod recognizers;
mod resolution;
mod timex;
mod token;

#[cfg(test)]
mod tests;

pub use api::{
    Context, Entity, ParseDetails, ParseResult, ParseResultVerbose, SpanSummary, StagePass, parse, parse_verbose,
    parse_verbose_with, parse_with,
};
pub use config::{DateTimeOptions, LocaleConfig, Options};
pub use engine::{MergedExtractor, MergedParser, RunMetrics, RunResult, StageMetrics, run_with_metrics};
pub use error::ConfigError;
pub use matcher::{PatternMatch, PatternMatcher};
pub use number::{EnglishNumbers, NumberKind, NumberModel, NumberSpan};
pub use resolution::{
    Comment, DateTimeParseResult, DateTimeResolutionResult, Modifier, NOT_RESOLVED, ResolutionValue, TimeValue,
};
pub use token::{ExtractAux, ExtractResult, Token, merge_all_tokens};

// --- Shared types -------------------------------------------------------------

/// Category of a recognized expression.
///
/// Every extractor tags its spans with one dimension and every parser is
/// selected by it. The orchestrator can re-tag a point dimension to its range
/// counterpart when a before/after/since modifier is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Date,
    Time,
    DatePeriod,
    TimePeriod,
    DateTime,
    DateTimePeriod,
    Duration,
    Set,
}

impl Dimension {
    /// Externally visible type name.
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Date => "date",
            Dimension::Time => "time",
            Dimension::DatePeriod => "daterange",
            Dimension::TimePeriod => "timerange",
            Dimension::DateTime => "datetime",
            Dimension::DateTimePeriod => "datetimerange",
            Dimension::Duration => "duration",
            Dimension::Set => "set",
        }
    }

    /// The range dimension a point dimension turns into under a modifier.
    pub fn as_range(self) -> Dimension {
        match self {
            Dimension::Date => Dimension::DatePeriod,
            Dimension::Time => Dimension::TimePeriod,
            Dimension::DateTime => Dimension::DateTimePeriod,
            other => other,
        }
    }
}

/// Calendar unit used by durations, shifts and period boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grain {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Grain {
    /// Units strictly below one day produce a time-duration timex (`PT..`).
    pub fn is_sub_day(self) -> bool {
        matches!(self, Grain::Second | Grain::Minute | Grain::Hour)
    }

    /// Nominal length in seconds, as used for duration values.
    pub fn seconds(self) -> f64 {
        match self {
            Grain::Second => 1.0,
            Grain::Minute => 60.0,
            Grain::Hour => 3_600.0,
            Grain::Day => 86_400.0,
            Grain::Week => 604_800.0,
            Grain::Month => 2_592_000.0,
            Grain::Quarter => 7_776_000.0,
            Grain::Year => 31_536_000.0,
        }
    }

    /// Unit letter used inside duration timex strings.
    pub fn timex_unit(self) -> &'static str {
        match self {
            Grain::Second => "S",
            Grain::Minute => "M",
            Grain::Hour => "H",
            Grain::Day => "D",
            Grain::Week => "W",
            Grain::Month => "M",
            Grain::Quarter => "Q",
            Grain::Year => "Y",
        }
    }
}
