//! Locale configuration and behavioral options.
//!
//! A [`LocaleConfig`] bundles the lookup tables (weekday and month names, unit
//! synonyms, day parts, holidays, ...) and the compiled pattern groups every
//! extractor and parser reads. It is built once, validated at construction and
//! never mutated, so one instance can be shared across threads.

mod english;
mod patterns;

use std::collections::HashMap;

use bitflags::bitflags;
use chrono::Weekday;
use regex::Regex;

use crate::calendar::{DayPart, Season};
use crate::error::ConfigError;
use crate::number::NumberModel;
use crate::recognizers::holiday::Holiday;
use crate::resolution::Modifier;
use crate::Grain;

pub use patterns::{
    DatePatterns, DatePeriodPatterns, DateTimePatterns, DateTimePeriodPatterns, DurationPatterns, HolidayPatterns,
    MergedPatterns, RangePatterns, SetPatterns, TimePatterns, TimePeriodPatterns,
};

bitflags! {
    /// Behavioral switches consumed by the orchestrator and the range parsers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DateTimeOptions: u32 {
        /// Keep "from X to Y" as two separate points.
        const SKIP_FROM_TO_MERGE     = 1 << 0;
        /// Report a merged date-time as its date and time parts.
        const SPLIT_DATE_AND_TIME    = 1 << 1;
        /// Drop entities matching the negative filter list.
        const ENABLE_NEGATIVE_FILTER = 1 << 2;
        /// Close unit periods on their last day instead of the first day after.
        const INCLUSIVE_END_PERIOD   = 1 << 3;
    }
}

impl Default for DateTimeOptions {
    fn default() -> Self {
        DateTimeOptions::empty()
    }
}

/// Options that affect extraction and resolution.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub flags: DateTimeOptions,
    /// Extra entity texts to suppress (case-insensitive) when
    /// `ENABLE_NEGATIVE_FILTER` is set.
    pub extra_filters: Vec<String>,
}

impl Options {
    pub fn with_flags(flags: DateTimeOptions) -> Self {
        Options { flags, extra_filters: Vec::new() }
    }

    pub fn inclusive_end(&self) -> bool {
        self.flags.contains(DateTimeOptions::INCLUSIVE_END_PERIOD)
    }
}

/// Lowercase, trim a trailing dot and collapse runs of whitespace or hyphens.
pub fn normalize_key(text: &str) -> String {
    let lowered = text.trim().trim_end_matches('.').to_lowercase();
    lowered.split(|c: char| c.is_whitespace() || c == '-').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" ")
}

pub struct LocaleConfig {
    pub name: &'static str,

    pub weekdays: HashMap<&'static str, Weekday>,
    pub months: HashMap<&'static str, u32>,
    pub units: HashMap<&'static str, Grain>,
    pub day_parts: HashMap<&'static str, DayPart>,
    pub seasons: HashMap<&'static str, Season>,
    /// "a few" = 3, "a couple" = 2, ...
    pub inexact_amounts: HashMap<&'static str, f64>,
    /// "today" = 0, "the day after tomorrow" = 2, ...
    pub implicit_days: HashMap<&'static str, i64>,
    /// "next" = 1, "last" = -1, "this" = 0, ...
    pub relative_offsets: HashMap<&'static str, i64>,
    /// Ordinal counts used by "the third week of", "first Friday of"; "last" = 5.
    pub ordinal_counts: HashMap<&'static str, u32>,
    /// "daily" = 1 day, "biweekly" = 2 weeks, ...
    pub periodic_adverbs: HashMap<&'static str, (f64, Grain)>,
    /// "lunch" = 12, ...
    pub meal_hours: HashMap<&'static str, u32>,
    /// "early" = start, "mid" = mid, "the end of" = end.
    pub period_parts: HashMap<&'static str, Modifier>,
    pub holidays: Vec<(Regex, Holiday)>,
    /// Entity texts that are almost never temporal on their own ("may", "sun").
    pub negative_filters: Vec<Regex>,

    pub numbers: Box<dyn NumberModel>,

    pub duration: DurationPatterns,
    pub date: DatePatterns,
    pub time: TimePatterns,
    pub date_period: DatePeriodPatterns,
    pub time_period: TimePeriodPatterns,
    pub date_time: DateTimePatterns,
    pub date_time_period: DateTimePeriodPatterns,
    pub set: SetPatterns,
    pub holiday: HolidayPatterns,
    pub range: RangePatterns,
    pub merged: MergedPatterns,
}

impl std::fmt::Debug for LocaleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleConfig").field("name", &self.name).finish_non_exhaustive()
    }
}

impl LocaleConfig {
    /// Build and validate the built-in English bundle.
    pub fn english() -> Result<LocaleConfig, ConfigError> {
        let config = english::build()?;
        config.validate()?;
        Ok(config)
    }

    pub fn weekday(&self, text: &str) -> Option<Weekday> {
        self.weekdays.get(normalize_key(text).as_str()).copied()
    }

    pub fn month(&self, text: &str) -> Option<u32> {
        self.months.get(normalize_key(text).as_str()).copied()
    }

    pub fn unit(&self, text: &str) -> Option<Grain> {
        self.units.get(normalize_key(text).as_str()).copied()
    }

    pub fn day_part(&self, text: &str) -> Option<DayPart> {
        self.day_parts.get(normalize_key(text).as_str()).copied()
    }

    pub fn season(&self, text: &str) -> Option<Season> {
        self.seasons.get(normalize_key(text).as_str()).copied()
    }

    pub fn inexact_amount(&self, text: &str) -> Option<f64> {
        self.inexact_amounts.get(normalize_key(text).as_str()).copied()
    }

    pub fn implicit_day(&self, text: &str) -> Option<i64> {
        self.implicit_days.get(normalize_key(text).as_str()).copied()
    }

    pub fn relative_offset(&self, text: &str) -> Option<i64> {
        self.relative_offsets.get(normalize_key(text).as_str()).copied()
    }

    pub fn ordinal_count(&self, text: &str) -> Option<u32> {
        self.ordinal_counts.get(normalize_key(text).as_str()).copied()
    }

    pub fn periodic_adverb(&self, text: &str) -> Option<(f64, Grain)> {
        self.periodic_adverbs.get(normalize_key(text).as_str()).copied()
    }

    pub fn meal_hour(&self, text: &str) -> Option<u32> {
        self.meal_hours.get(normalize_key(text).as_str()).copied()
    }

    pub fn period_part(&self, text: &str) -> Option<Modifier> {
        self.period_parts.get(normalize_key(text).as_str()).copied()
    }

    pub fn holiday_named(&self, text: &str) -> Option<Holiday> {
        use crate::matcher::PatternMatcher;
        let key = normalize_key(text);
        self.holidays.iter().find(|(re, _)| re.exact(&key).is_some()).map(|(_, h)| *h)
    }

    /// Integer value of a number expression ("15", "15th", "fifteenth").
    pub fn integer(&self, text: &str) -> Option<i64> {
        self.numbers.parse(text)?.as_integer()
    }

    pub fn number(&self, text: &str) -> Option<f64> {
        self.numbers.parse(text).map(|n| n.value)
    }

    /// Fail fast on a bundle whose tables cannot back its patterns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_empty<K, V>(table: &'static str, map: &HashMap<K, V>) -> Result<(), ConfigError> {
            if map.is_empty() { Err(ConfigError::EmptyTable(table)) } else { Ok(()) }
        }

        non_empty("weekdays", &self.weekdays)?;
        non_empty("months", &self.months)?;
        non_empty("units", &self.units)?;
        non_empty("day_parts", &self.day_parts)?;
        non_empty("seasons", &self.seasons)?;
        non_empty("inexact_amounts", &self.inexact_amounts)?;
        non_empty("implicit_days", &self.implicit_days)?;
        non_empty("relative_offsets", &self.relative_offsets)?;
        non_empty("ordinal_counts", &self.ordinal_counts)?;
        non_empty("periodic_adverbs", &self.periodic_adverbs)?;
        non_empty("meal_hours", &self.meal_hours)?;
        non_empty("period_parts", &self.period_parts)?;
        if self.holidays.is_empty() {
            return Err(ConfigError::EmptyTable("holidays"));
        }

        let missing = |table: &'static str, key: String| Err(ConfigError::MissingTableEntry { table, key });

        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            if !self.weekdays.values().any(|w| *w == day) {
                return missing("weekdays", format!("{day:?}"));
            }
        }
        for month in 1..=12 {
            if !self.months.values().any(|m| *m == month) {
                return missing("months", month.to_string());
            }
        }
        for part in [DayPart::Morning, DayPart::Afternoon, DayPart::Evening, DayPart::Night] {
            if !self.day_parts.values().any(|p| *p == part) {
                return missing("day_parts", format!("{part:?}"));
            }
        }
        for season in [Season::Spring, Season::Summer, Season::Fall, Season::Winter] {
            if !self.seasons.values().any(|s| *s == season) {
                return missing("seasons", format!("{season:?}"));
            }
        }
        for holiday in Holiday::ALL {
            if !self.holidays.iter().any(|(_, h)| h == holiday) {
                return missing("holidays", format!("{holiday:?}"));
            }
        }
        for key in ["next", "last", "this"] {
            if !self.relative_offsets.contains_key(key) {
                return missing("relative_offsets", key.to_string());
            }
        }
        for key in ["first", "last"] {
            if !self.ordinal_counts.contains_key(key) {
                return missing("ordinal_counts", key.to_string());
            }
        }
        Ok(())
    }
}

/// Compile a locale pattern, case-insensitive.
pub(crate) fn compile(name: &'static str, src: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("(?i){src}")).map_err(|e| ConfigError::InvalidPattern { name, source: Box::new(e) })
}

/// Longest-first alternation of table keys, with spaces matching any whitespace.
pub(crate) fn alternation<'k>(keys: impl IntoIterator<Item = &'k str>) -> String {
    let mut keys: Vec<&str> = keys.into_iter().collect();
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    keys.dedup();
    keys.iter().map(|k| regex::escape(k).replace(' ', r"[\s-]+")).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_bundle_builds_and_validates() {
        let config = LocaleConfig::english().unwrap();
        assert_eq!(config.weekday("Fri"), Some(Weekday::Fri));
        assert_eq!(config.month("Sept."), Some(9));
        assert_eq!(config.unit("hours"), Some(Grain::Hour));
        assert_eq!(config.implicit_day("the day  before yesterday"), Some(-2));
        assert_eq!(config.holiday_named("Mother's Day"), Some(Holiday::MothersDay));
        assert_eq!(config.integer("twenty-first"), Some(21));
    }

    #[test]
    fn alternation_is_longest_first() {
        assert_eq!(alternation(["mon", "monday"]), "monday|mon");
        assert_eq!(alternation(["a few"]), r"a[\s-]+few");
    }

    #[test]
    fn validation_reports_missing_entries() {
        let mut config = LocaleConfig::english().unwrap();
        config.months.retain(|_, m| *m != 5);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingTableEntry { table: "months", .. }));

        config.meal_hours.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyTable("meal_hours"))));
    }

    #[test]
    fn option_flags_compose() {
        let opts = Options::with_flags(DateTimeOptions::INCLUSIVE_END_PERIOD | DateTimeOptions::SKIP_FROM_TO_MERGE);
        assert!(opts.inclusive_end());
        assert!(!opts.flags.contains(DateTimeOptions::SPLIT_DATE_AND_TIME));
    }
}
