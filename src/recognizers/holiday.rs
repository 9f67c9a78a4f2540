//! Holidays: named days with a fixed or computed date.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use super::{Extractor, Parser};
use crate::Dimension;
use crate::calendar::{easter_sunday, last_weekday_of_month, midnight, nth_weekday_of_month, ymd};
use crate::config::LocaleConfig;
use crate::matcher::PatternMatcher;
use crate::resolution::{DateTimeResolutionResult, TimeValue};
use crate::timex;
use crate::token::{ExtractResult, Token, merge_all_tokens};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Holiday {
    NewYear,
    NewYearsEve,
    Valentines,
    StPatricks,
    EarthDay,
    Independence,
    Halloween,
    Veterans,
    ChristmasEve,
    Christmas,
    BoxingDay,
    BossDay,
    MartinLutherKing,
    Presidents,
    MothersDay,
    Memorial,
    FathersDay,
    Labor,
    Columbus,
    Thanksgiving,
    BlackFriday,
    Easter,
    GoodFriday,
    EasterMonday,
}

impl Holiday {
    pub const ALL: &'static [Holiday] = &[
        Holiday::NewYear,
        Holiday::NewYearsEve,
        Holiday::Valentines,
        Holiday::StPatricks,
        Holiday::EarthDay,
        Holiday::Independence,
        Holiday::Halloween,
        Holiday::Veterans,
        Holiday::ChristmasEve,
        Holiday::Christmas,
        Holiday::BoxingDay,
        Holiday::BossDay,
        Holiday::MartinLutherKing,
        Holiday::Presidents,
        Holiday::MothersDay,
        Holiday::Memorial,
        Holiday::FathersDay,
        Holiday::Labor,
        Holiday::Columbus,
        Holiday::Thanksgiving,
        Holiday::BlackFriday,
        Holiday::Easter,
        Holiday::GoodFriday,
        Holiday::EasterMonday,
    ];

    fn rule(self) -> Rule {
        match self {
            Holiday::NewYear => Rule::Fixed(1, 1),
            Holiday::NewYearsEve => Rule::Fixed(12, 31),
            Holiday::Valentines => Rule::Fixed(2, 14),
            Holiday::StPatricks => Rule::Fixed(3, 17),
            Holiday::EarthDay => Rule::Fixed(4, 22),
            Holiday::Independence => Rule::Fixed(7, 4),
            Holiday::Halloween => Rule::Fixed(10, 31),
            Holiday::Veterans => Rule::Fixed(11, 11),
            Holiday::ChristmasEve => Rule::Fixed(12, 24),
            Holiday::Christmas => Rule::Fixed(12, 25),
            Holiday::BoxingDay => Rule::Fixed(12, 26),
            Holiday::BossDay => Rule::Fixed(10, 16),
            Holiday::MartinLutherKing => Rule::NthWeekday(1, Weekday::Mon, 3),
            Holiday::Presidents => Rule::NthWeekday(2, Weekday::Mon, 3),
            Holiday::MothersDay => Rule::NthWeekday(5, Weekday::Sun, 2),
            Holiday::Memorial => Rule::LastWeekday(5, Weekday::Mon),
            Holiday::FathersDay => Rule::NthWeekday(6, Weekday::Sun, 3),
            Holiday::Labor => Rule::NthWeekday(9, Weekday::Mon, 1),
            Holiday::Columbus => Rule::NthWeekday(10, Weekday::Mon, 2),
            Holiday::Thanksgiving => Rule::NthWeekday(11, Weekday::Thu, 4),
            Holiday::BlackFriday => Rule::AfterThanksgiving,
            Holiday::Easter => Rule::Easter(0),
            Holiday::GoodFriday => Rule::Easter(-2),
            Holiday::EasterMonday => Rule::Easter(1),
        }
    }

    /// The holiday's date in `year`.
    pub fn date(self, year: i32) -> Option<NaiveDate> {
        match self.rule() {
            Rule::Fixed(month, day) => ymd(year, month, day),
            Rule::NthWeekday(month, weekday, n) => nth_weekday_of_month(year, month, weekday, n),
            Rule::LastWeekday(month, weekday) => last_weekday_of_month(year, month, weekday),
            Rule::AfterThanksgiving => Holiday::Thanksgiving.date(year)?.succ_opt(),
            Rule::Easter(offset) => easter_sunday(year)?.checked_add_signed(Duration::try_days(offset)?),
        }
    }

    /// Timex without a year: month and day for fixed dates, the weekday rule
    /// for floating ones. `None` when no year-less form exists.
    pub fn year_less_timex(self) -> Option<String> {
        let weekday_rule = |month: u32, weekday: Weekday, n: u32| {
            format!("{}-WXX-{}-#{}", timex::month(None, month), weekday.number_from_monday(), n)
        };
        match self.rule() {
            Rule::Fixed(month, day) => Some(timex::luis_date(None, Some(month), day)),
            Rule::NthWeekday(month, weekday, n) => Some(weekday_rule(month, weekday, n)),
            Rule::LastWeekday(month, weekday) => Some(weekday_rule(month, weekday, 5)),
            Rule::AfterThanksgiving | Rule::Easter(_) => None,
        }
    }
}

/// How a holiday's date is found in a given year.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Month and day.
    Fixed(u32, u32),
    /// The n-th weekday of a month.
    NthWeekday(u32, Weekday, u32),
    LastWeekday(u32, Weekday),
    AfterThanksgiving,
    /// Days from Easter Sunday.
    Easter(i64),
}

pub struct HolidayExtractor<'a> {
    config: &'a LocaleConfig,
}

impl<'a> HolidayExtractor<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        HolidayExtractor { config }
    }
}

impl Extractor for HolidayExtractor<'_> {
    fn dimension(&self) -> Dimension {
        Dimension::Date
    }

    fn extract(&self, text: &str, _reference: NaiveDateTime) -> Vec<ExtractResult> {
        let patterns = &self.config.holiday;
        let tokens = [&patterns.holiday, &patterns.holiday_relative_year]
            .into_iter()
            .flat_map(|re| re.find_all(text))
            .map(|m| Token::new(m.start, m.end))
            .collect();
        merge_all_tokens(tokens, text, Dimension::Date)
    }
}

pub struct HolidayParser<'a> {
    config: &'a LocaleConfig,
}

impl<'a> HolidayParser<'a> {
    pub fn new(config: &'a LocaleConfig) -> Self {
        HolidayParser { config }
    }
}

impl Parser for HolidayParser<'_> {
    fn parse(&self, er: &ExtractResult, reference: NaiveDateTime) -> Option<DateTimeResolutionResult> {
        let patterns = &self.config.holiday;
        let m = patterns.holiday_relative_year.exact(&er.text).or_else(|| patterns.holiday.exact(&er.text))?;
        let holiday = self.config.holiday_named(m.group("holiday")?)?;

        let explicit_year = match (m.group("year"), m.group("rel")) {
            (Some(year), _) => Some(year.parse::<i32>().ok()?),
            (None, Some(rel)) => Some(reference.year() + self.config.relative_offset(rel)? as i32),
            (None, None) => None,
        };

        if let Some(year) = explicit_year {
            let date = holiday.date(year)?;
            return Some(DateTimeResolutionResult::pinned(timex::date(date), TimeValue::Instant(midnight(date))));
        }

        let today = reference.date();
        let this_year = holiday.date(today.year())?;
        let (future, past) = if this_year >= today {
            (this_year, holiday.date(today.year() - 1)?)
        } else {
            (holiday.date(today.year() + 1)?, this_year)
        };
        // moveable feasts have no year-less form; name the coming one
        let code = holiday.year_less_timex().unwrap_or_else(|| timex::date(future));
        Some(DateTimeResolutionResult::new(
            code,
            TimeValue::Instant(midnight(future)),
            TimeValue::Instant(midnight(past)),
        ))
    }
}
