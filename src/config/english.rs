//! Built-in English bundle.

use std::collections::HashMap;

use chrono::Weekday;

use super::patterns::*;
use super::{LocaleConfig, alternation, compile};
use crate::Grain;
use crate::calendar::{DayPart, Season};
use crate::error::ConfigError;
use crate::number::{EnglishNumbers, cardinal_alternation, day_ordinal_alternation};
use crate::recognizers::holiday::Holiday;
use crate::resolution::Modifier;

const HOUR_WORD: &str = "twelve|eleven|three|seven|eight|four|five|nine|one|two|six|ten";
const UNIT_DIGIT: &str = "one|two|three|four|five|six|seven|eight|nine";
const FULL_WEEKDAYS: &str = "wednesday|thursday|saturday|tuesday|monday|friday|sunday";
const RANGE_DASH: &str = r"(?:-|–|~|to|till|til|until|through|thru)";

/// Holiday name fragments. Longer names that share a head with a shorter one
/// come first.
const HOLIDAY_NAMES: &[(&str, Holiday)] = &[
    (r"new\s+year'?s?\s+eve", Holiday::NewYearsEve),
    (r"new\s+year'?s?(?:\s+day)?", Holiday::NewYear),
    (r"(?:st\.?\s+|saint\s+)?valentine'?s?(?:\s+day)?", Holiday::Valentines),
    (r"(?:st\.?|saint)\s+patrick'?s?(?:\s+day)?", Holiday::StPatricks),
    (r"earth\s+day", Holiday::EarthDay),
    (r"independence\s+day|(?:the\s+)?(?:fourth|4th)\s+of\s+july", Holiday::Independence),
    (r"hallowe'?en", Holiday::Halloween),
    (r"veteran'?s'?\s+day", Holiday::Veterans),
    (r"(?:christmas|x[\s-]?mas)\s+eve", Holiday::ChristmasEve),
    (r"(?:christmas|x[\s-]?mas)(?:\s+day)?", Holiday::Christmas),
    (r"boxing\s+day", Holiday::BoxingDay),
    (r"boss(?:es|'s|')?\s+day", Holiday::BossDay),
    (r"mlk(?:\s+day)?|martin\s+luther\s+king(?:\s+jr\.?)?(?:\s+day)?", Holiday::MartinLutherKing),
    (r"president'?s'?\s+day", Holiday::Presidents),
    (r"mother'?s'?\s+day", Holiday::MothersDay),
    (r"memorial\s+day", Holiday::Memorial),
    (r"father'?s'?\s+day", Holiday::FathersDay),
    (r"labou?r\s+day", Holiday::Labor),
    (r"columbus\s+day", Holiday::Columbus),
    (r"thanks\s*giving(?:\s+day)?", Holiday::Thanksgiving),
    (r"black\s+friday", Holiday::BlackFriday),
    (r"good\s+friday", Holiday::GoodFriday),
    (r"easter\s+monday", Holiday::EasterMonday),
    (r"easter(?:\s+sunday|\s+day)?", Holiday::Easter),
];

/// AM/PM marker with caller-chosen group names.
fn desc(am: &str, pm: &str) -> String {
    format!(r"(?:(?P<{am}>a\.?\s?m\b\.?)|(?P<{pm}>p\.?\s?m\b\.?))")
}

fn weekdays() -> HashMap<&'static str, Weekday> {
    HashMap::from([
        ("monday", Weekday::Mon),
        ("mon", Weekday::Mon),
        ("tuesday", Weekday::Tue),
        ("tue", Weekday::Tue),
        ("tues", Weekday::Tue),
        ("wednesday", Weekday::Wed),
        ("wed", Weekday::Wed),
        ("weds", Weekday::Wed),
        ("thursday", Weekday::Thu),
        ("thu", Weekday::Thu),
        ("thur", Weekday::Thu),
        ("thurs", Weekday::Thu),
        ("friday", Weekday::Fri),
        ("fri", Weekday::Fri),
        ("saturday", Weekday::Sat),
        ("sat", Weekday::Sat),
        ("sunday", Weekday::Sun),
        ("sun", Weekday::Sun),
    ])
}

fn months() -> HashMap<&'static str, u32> {
    HashMap::from([
        ("january", 1),
        ("jan", 1),
        ("february", 2),
        ("feb", 2),
        ("march", 3),
        ("mar", 3),
        ("april", 4),
        ("apr", 4),
        ("may", 5),
        ("june", 6),
        ("jun", 6),
        ("july", 7),
        ("jul", 7),
        ("august", 8),
        ("aug", 8),
        ("september", 9),
        ("sept", 9),
        ("sep", 9),
        ("october", 10),
        ("oct", 10),
        ("november", 11),
        ("nov", 11),
        ("december", 12),
        ("dec", 12),
    ])
}

fn units() -> HashMap<&'static str, Grain> {
    HashMap::from([
        ("years", Grain::Year),
        ("year", Grain::Year),
        ("yrs", Grain::Year),
        ("yr", Grain::Year),
        ("months", Grain::Month),
        ("month", Grain::Month),
        ("weeks", Grain::Week),
        ("week", Grain::Week),
        ("wks", Grain::Week),
        ("wk", Grain::Week),
        ("days", Grain::Day),
        ("day", Grain::Day),
        ("hours", Grain::Hour),
        ("hour", Grain::Hour),
        ("hrs", Grain::Hour),
        ("hr", Grain::Hour),
        ("h", Grain::Hour),
        ("minutes", Grain::Minute),
        ("minute", Grain::Minute),
        ("mins", Grain::Minute),
        ("min", Grain::Minute),
        ("seconds", Grain::Second),
        ("second", Grain::Second),
        ("secs", Grain::Second),
        ("sec", Grain::Second),
    ])
}

fn period_parts() -> HashMap<&'static str, Modifier> {
    HashMap::from([
        ("early", Modifier::Start),
        ("earlier", Modifier::Start),
        ("beginning of", Modifier::Start),
        ("the beginning of", Modifier::Start),
        ("start of", Modifier::Start),
        ("the start of", Modifier::Start),
        ("mid", Modifier::Mid),
        ("middle of", Modifier::Mid),
        ("the middle of", Modifier::Mid),
        ("late", Modifier::End),
        ("later", Modifier::End),
        ("end of", Modifier::End),
        ("the end of", Modifier::End),
    ])
}

pub(super) fn build() -> Result<LocaleConfig, ConfigError> {
    let weekdays = weekdays();
    let months = months();
    let units = units();
    let day_parts = HashMap::from([
        ("morning", DayPart::Morning),
        ("afternoon", DayPart::Afternoon),
        ("evening", DayPart::Evening),
        ("night", DayPart::Night),
    ]);
    let seasons = HashMap::from([
        ("spring", Season::Spring),
        ("summer", Season::Summer),
        ("fall", Season::Fall),
        ("autumn", Season::Fall),
        ("winter", Season::Winter),
    ]);
    let inexact_amounts = HashMap::from([
        ("a few", 3.0),
        ("few", 3.0),
        ("several", 3.0),
        ("a couple", 2.0),
        ("couple", 2.0),
        ("a couple of", 2.0),
        ("couple of", 2.0),
    ]);
    let implicit_days = HashMap::from([
        ("today", 0),
        ("tomorrow", 1),
        ("tmr", 1),
        ("tmrw", 1),
        ("yesterday", -1),
        ("day after tomorrow", 2),
        ("the day after tomorrow", 2),
        ("day before yesterday", -2),
        ("the day before yesterday", -2),
    ]);
    let relative_offsets = HashMap::from([
        ("next", 1),
        ("coming", 1),
        ("upcoming", 1),
        ("following", 1),
        ("last", -1),
        ("previous", -1),
        ("this", 0),
        ("current", 0),
    ]);
    let ordinal_counts = HashMap::from([
        ("first", 1),
        ("1st", 1),
        ("second", 2),
        ("2nd", 2),
        ("third", 3),
        ("3rd", 3),
        ("fourth", 4),
        ("4th", 4),
        ("fifth", 5),
        ("5th", 5),
        ("last", 5),
    ]);
    let periodic_adverbs = HashMap::from([
        ("daily", (1.0, Grain::Day)),
        ("everyday", (1.0, Grain::Day)),
        ("nightly", (1.0, Grain::Day)),
        ("weekly", (1.0, Grain::Week)),
        ("biweekly", (2.0, Grain::Week)),
        ("fortnightly", (2.0, Grain::Week)),
        ("monthly", (1.0, Grain::Month)),
        ("bimonthly", (2.0, Grain::Month)),
        ("quarterly", (3.0, Grain::Month)),
        ("semiannually", (6.0, Grain::Month)),
        ("annually", (1.0, Grain::Year)),
        ("yearly", (1.0, Grain::Year)),
        ("hourly", (1.0, Grain::Hour)),
    ]);
    let meal_hours =
        HashMap::from([("breakfast", 8), ("brunch", 11), ("lunch", 12), ("dinner", 19), ("supper", 19)]);
    let period_parts = period_parts();

    let holidays = HOLIDAY_NAMES
        .iter()
        .map(|(frag, holiday)| Ok((compile("holiday.name", &format!("^(?:{frag})$"))?, *holiday)))
        .collect::<Result<Vec<_>, ConfigError>>()?;
    let negative_filters = ["may", "march", "mar", "sun", "sat", "wed", "fall"]
        .iter()
        .map(|word| compile("negative_filter", &format!("^{word}$")))
        .collect::<Result<Vec<_>, ConfigError>>()?;

    // Shared fragments.
    let wd = format!(r"(?:{})\b", alternation(weekdays.keys().copied()));
    let mon = format!(r"(?:{})\b\.?", alternation(months.keys().copied()));
    let unit = alternation(units.keys().copied());
    let rel = alternation(relative_offsets.keys().copied());
    let ord = alternation(ordinal_counts.keys().copied());
    let day_part = alternation(day_parts.keys().copied());
    let season = alternation(seasons.keys().copied());
    let inexact = alternation(inexact_amounts.keys().copied());
    let implicit = alternation(implicit_days.keys().copied());
    let adverbs = alternation(periodic_adverbs.keys().copied());
    let meals = alternation(meal_hours.keys().copied());
    let parts = alternation(period_parts.keys().copied());
    let holiday_names = HOLIDAY_NAMES.iter().map(|(frag, _)| format!("(?:{frag})")).collect::<Vec<_>>().join("|");

    let cardinal = cardinal_alternation();
    let number = format!(r"(?:\d+(?:\.\d+)?|(?:{cardinal})(?:[\s-]+(?:{cardinal}))*)");
    let day = format!(r"(?:(?:3[01]|[12]\d|0?[1-9])(?:st|nd|rd|th)?|{})", day_ordinal_alternation());
    let year = r"(?:19|20)\d{2}";
    let opt_year = format!(r"(?:,?\s*(?:of\s+)?(?P<year>{year})\b)?");
    let hour = format!(r"(?:1[0-2]|0?[1-9]|{HOUR_WORD})");
    let min_word = format!(
        r"(?:(?:twenty|thirty|forty|fifty)(?:[\s-](?:{UNIT_DIGIT}))?|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|eleven|twelve|ten|(?:oh|o)\s+(?:{UNIT_DIGIT}))"
    );
    let month_or_rel = format!(r"(?:(?P<rel>{rel})\s+month\b|(?P<month>{mon}){opt_year})");

    let duration = DurationPatterns {
        number_unit: compile("duration.number_unit", &format!(r"\b(?P<num>{number})\s*(?P<unit>{unit})\b"))?,
        article_unit: compile(
            "duration.article_unit",
            r"\b(?:(?P<half>half)\s+(?:an?\s+)?|an?\s+)(?P<unit>year|month|week|day|hour|minute|second)\b(?P<and_half>\s+and\s+a\s+half)?",
        )?,
        all_half: compile(
            "duration.all_half",
            r"\b(?P<which>all|whole|full|half)[\s-]+(?:the\s+)?(?P<unit>year|month|week|day)\b",
        )?,
        inexact: compile("duration.inexact", &format!(r"\b(?P<amount>{inexact})\s+(?P<unit>{unit})\b"))?,
        modifier_prefix: compile(
            "duration.modifier_prefix",
            r"\b(?:(?P<more>more\s+than|longer\s+than|over|at\s+least)|(?P<less>less\s+than|fewer\s+than|shorter\s+than|under|at\s+most))\s+$",
        )?,
    };

    let date = DatePatterns {
        month_day: compile(
            "date.month_day",
            &format!(r"\b(?P<month>{mon})\s*(?:the\s+)?(?P<day>{day})\b(?:,?\s*(?P<year>{year})\b)?"),
        )?,
        day_month: compile(
            "date.day_month",
            &format!(r"\b(?:the\s+)?(?P<day>{day})\b\s+(?:of\s+)?(?P<month>{mon})(?:,?\s*(?P<year>{year})\b)?"),
        )?,
        weekday_month_day: compile(
            "date.weekday_month_day",
            &format!(
                r"\b(?P<weekday>{wd}),?\s*(?:(?:the\s+)?(?P<day2>{day})\b\s+(?:of\s+)?(?P<month2>{mon})|(?P<month>{mon})\s*(?:the\s+)?(?P<day>{day})\b)(?:,?\s*(?P<year>{year})\b)?"
            ),
        )?,
        numeric: compile(
            "date.numeric",
            r"\b(?P<month>1[0-2]|0?[1-9])/(?P<day>3[01]|[12]\d|0?[1-9])(?:/(?P<year>\d{4}|\d{2}))?\b",
        )?,
        iso: compile(
            "date.iso",
            &format!(r"\b(?P<year>{year})-(?P<month>1[0-2]|0?[1-9])-(?P<day>3[01]|[12]\d|0?[1-9])\b"),
        )?,
        weekday: compile("date.weekday", &format!(r"\b(?P<weekday>{wd})"))?,
        relative_prefix: compile("date.relative_prefix", &format!(r"\b(?P<rel>{rel})\s+$"))?,
        special_day: compile("date.special_day", &format!(r"\b(?P<special>{implicit})\b"))?,
        relative_weekday: compile("date.relative_weekday", &format!(r"\b(?P<rel>{rel})\s+(?P<weekday>{wd})"))?,
        weekday_of_month: compile(
            "date.weekday_of_month",
            &format!(r"\b(?:the\s+)?(?P<cardinal>{ord})\s+(?P<weekday>{wd})\s+(?:of|in)\s+{month_or_rel}"),
        )?,
        day_of_relative_month: compile(
            "date.day_of_relative_month",
            &format!(r"\b(?:the\s+)?(?P<day>{day})\b\s+(?:day\s+)?of\s+(?:the\s+)?(?P<rel>{rel})\s+month\b"),
        )?,
        on_day: compile("date.on_day", &format!(r"\b(?P<on>on\s+)?(?P<body>(?P<the>the\s+)?(?P<day>{day}))\b"))?,
        weekday_day: compile("date.weekday_day", &format!(r"\b(?P<weekday>{wd}),?\s+(?:the\s+)?(?P<day>{day})\b"))?,
        day_blocker: compile(
            "date.day_blocker",
            &format!(
                r"^(?:\s*(?:%|:\d|/\d|(?:{unit})\b|[ap]\.?\s?m\b|o'?\s*clock\b)|\s+(?:time|times|one|ones|place|person|people|floor|quarter|half|century|grade)\b)"
            ),
        )?,
        duration_suffix: compile(
            "date.duration_suffix",
            r"^\s+(?:(?P<ago>ago|before|earlier|back)|(?P<later>later|from\s+now|from\s+today|hence|after))\b",
        )?,
        duration_in_prefix: compile("date.duration_in_prefix", r"\bin\s+$")?,
    };

    let time = TimePatterns {
        clock: compile(
            "time.clock",
            &format!(
                r"\b(?P<hour>2[0-3]|[01]?\d):(?P<min>[0-5]\d)(?::(?P<sec>[0-5]\d))?(?:\s*{}|\b)",
                desc("am", "pm")
            ),
        )?,
        hour_desc: compile("time.hour_desc", &format!(r"\b(?P<hour>{hour})\s*{}", desc("am", "pm")))?,
        oclock: compile(
            "time.oclock",
            &format!(r"\b(?P<hour>{hour})\s*o'?\s*clock\b(?:\s*{})?", desc("am", "pm")),
        )?,
        relative: compile(
            "time.relative",
            &format!(
                r"\b(?:(?P<quarter>(?:a\s+)?quarter)|(?P<half>half)|(?P<min>[1-5]?\d|{min_word}))(?P<minword>\s+minutes?)?\s+(?P<dir>past|after|to|before|till|til)\s+(?P<hour>{hour})(?:\s*{}|\b)",
                desc("am", "pm")
            ),
        )?,
        spelled: compile(
            "time.spelled",
            &format!(r"\b(?P<hour>{HOUR_WORD})[\s-]+(?P<min>{min_word})\b(?:\s*{})?", desc("am", "pm")),
        )?,
        hour_day_part: compile(
            "time.hour_day_part",
            &format!(
                r"\b(?P<hour>{hour})(?::(?P<min>[0-5]\d))?\s*(?:{})?\s+(?:in\s+the|at)\s+(?P<daypart>{day_part})\b",
                desc("am", "pm")
            ),
        )?,
        day_part_hour: compile(
            "time.day_part_hour",
            &format!(
                r"\b(?:in\s+the\s+)?(?P<daypart>{day_part})\s+(?:at|around|about)\s+(?P<hour>{hour})(?::(?P<min>[0-5]\d))?\b"
            ),
        )?,
        special: compile("time.special", r"\b(?P<special>mid[\s-]?day|noon|mid[\s-]?night)\b")?,
        meal: compile("time.meal", &format!(r"\b(?P<meal>{meals})[\s-]?time\b"))?,
        at_hour: compile("time.at_hour", &format!(r"(?:\b(?:at|around|about)\s+|@\s*)(?P<hour>{hour})(?:-?ish)?\b"))?,
        bare_hour: compile("time.bare_hour", &format!(r"^(?P<hour>2[0-3]|[01]?\d|{HOUR_WORD})$"))?,
        ish_suffix: compile("time.ish_suffix", r"^(?:\s*-?\s*ish|\s+or\s+so)\b")?,
    };

    let endpoint = |n: u8| {
        format!(
            r"(?P<h{n}>{hour})(?::(?P<m{n}>[0-5]\d))?(?:\s*{}|\b)",
            desc(&format!("am{n}"), &format!("pm{n}"))
        )
    };
    let time_period = TimePeriodPatterns {
        number_range: compile(
            "time_period.number_range",
            &format!(r"\b(?:(?P<from>from)\s+)?{}\s*{RANGE_DASH}\s*{}", endpoint(1), endpoint(2)),
        )?,
        between_range: compile(
            "time_period.between_range",
            &format!(r"\b(?P<from>between)\s+{}\s*and\s*{}", endpoint(1), endpoint(2)),
        )?,
        day_part: compile(
            "time_period.day_part",
            &format!(
                r"\b(?:in\s+the\s+)?(?:(?P<window>early|late)[\s-]+(?:in\s+the\s+)?)?(?P<daypart>{day_part})\b"
            ),
        )?,
    };

    let range = RangePatterns {
        to_connector: compile("range.to_connector", &format!(r"^\s*{RANGE_DASH}\s*$"))?,
        and_connector: compile("range.and_connector", r"^\s*and\s*$")?,
        from_prefix: compile("range.from_prefix", r"\bfrom\s+$")?,
        between_prefix: compile("range.between_prefix", r"\bbetween\s+$")?,
    };

    let date_period = DatePeriodPatterns {
        day_range_month: compile(
            "date_period.day_range_month",
            &format!(
                r"\b(?:(?P<from>from|between)\s+)?(?:the\s+)?(?P<d1>{day})\b\s*(?:{RANGE_DASH}|and)\s*(?:the\s+)?(?P<d2>{day})\b\s*(?:of\s+)?{month_or_rel}"
            ),
        )?,
        month_day_range: compile(
            "date_period.month_day_range",
            &format!(
                r"\b(?:(?P<from>from|between)\s+)?(?P<month>{mon})\s*(?P<d1>{day})\b\s*(?:{RANGE_DASH}|and)\s*(?P<d2>{day})\b(?:,?\s*(?P<year>{year})\b)?"
            ),
        )?,
        relative_unit: compile(
            "date_period.relative_unit",
            &format!(r"\b(?P<rel>{rel})\s+(?P<unit>weekend|week|month|year|quarter)\b"),
        )?,
        month: compile("date_period.month", &format!(r"\b(?:(?P<rel>{rel})\s+)?(?P<month>{mon}){opt_year}"))?,
        month_context: compile(
            "date_period.month_context",
            r"\b(?:in|of|during|since|until|till|before|after|from|by|for|through|throughout|around|whole|entire)\s+$",
        )?,
        year: compile("date_period.year", &format!(r"\b(?:(?:the\s+)?year\s+)?(?P<year>{year})\b"))?,
        week_of_month: compile(
            "date_period.week_of_month",
            &format!(r"\b(?:the\s+)?(?P<cardinal>{ord})\s+week\s+(?:of|in)\s+{month_or_rel}"),
        )?,
        iso_week: compile(
            "date_period.iso_week",
            &format!(
                r"\bweek\s*(?:#\s*|no\.?\s*|number\s+)?(?P<week>5[0-3]|[1-4]\d|0?[1-9])\b(?:,?\s*(?:of\s+)?(?P<year>{year})\b)?"
            ),
        )?,
        quarter_ordinal: compile(
            "date_period.quarter_ordinal",
            &format!(
                r"\b(?:the\s+)?(?P<cardinal>first|second|third|fourth|last|1st|2nd|3rd|4th)\s+quarter\b(?:\s+(?:of\s+)?(?:(?:(?P<rel>{rel})|the)\s+year\b|(?:the\s+year\s+)?(?P<year>{year})\b))?"
            ),
        )?,
        quarter_code: compile(
            "date_period.quarter_code",
            &format!(r"\bq(?P<num>[1-4])\b(?:,?\s*(?:of\s+)?(?P<year>{year})\b)?"),
        )?,
        half_ordinal: compile(
            "date_period.half_ordinal",
            &format!(
                r"\b(?:the\s+)?(?P<cardinal>first|second|last|1st|2nd)\s+half\s+(?:of\s+)?(?:(?:(?P<rel>{rel})|the)\s+year\b|(?:the\s+year\s+)?(?P<year>{year})\b)"
            ),
        )?,
        half_code: compile("date_period.half_code", &format!(r"\bh(?P<num>[12])\b(?:,?\s*(?P<year>{year})\b)?"))?,
        season: compile(
            "date_period.season",
            &format!(r"\b(?:(?P<rel>{rel})\s+)?(?P<season>{season})\b{opt_year}"),
        )?,
        month_part: compile(
            "date_period.month_part",
            &format!(
                r"\b(?P<part>{parts})\s*-?\s*(?:(?:(?P<rel>{rel})|the)\s+(?P<unit>week|month|year)\b|(?P<month>{mon}){opt_year})"
            ),
        )?,
        rest_of: compile(
            "date_period.rest_of",
            r"\b(?:the\s+)?rest\s+of\s+(?:the|this|my)\s+(?P<unit>week|month|year)\b",
        )?,
        duration_prefix: compile(
            "date_period.duration_prefix",
            r"\b(?:(?P<past>past|last|previous|recent)|(?P<next>next|coming|upcoming|following|within\s+the\s+next|in\s+the\s+next|for\s+the\s+next))\s+$",
        )?,
    };

    let anchor = format!(
        r"(?:(?P<tonight>tonight|tonite)|(?P<anchor>this|today|tomorrow|tmr|yesterday)(?:\s+(?P<daypart>{day_part}))?)"
    );
    let date_time = DateTimePatterns {
        now: compile(
            "date_time.now",
            r"\b(?:right\s+now|just\s+now|as\s+soon\s+as\s+possible|asap|at\s+the\s+moment|now)\b",
        )?,
        connector: compile("date_time.connector", r"^\s*(?:,\s*)?(?:at|on|around|about|@|by|in\s+the)?\s*$")?,
        anchor_prefix: compile("date_time.anchor_prefix", &format!(r"\b{anchor}\s*(?:at|around|about|@)?\s*$"))?,
        anchor_suffix: compile("date_time.anchor_suffix", &format!(r"^\s*(?:,\s*)?{anchor}\b"))?,
    };

    let date_time_period = DateTimePeriodPatterns {
        connector: compile("date_time_period.connector", r"^\s*(?:,\s*)?(?:on|of|in|at|for)?\s*$")?,
        day_part_suffix: compile(
            "date_time_period.day_part_suffix",
            &format!(
                r"^\s*(?:,\s*)?(?:in\s+the\s+)?(?:(?P<window>early|late)\s+(?:in\s+the\s+)?)?(?P<daypart>{day_part})\b"
            ),
        )?,
        special_day_part: compile(
            "date_time_period.special_day_part",
            &format!(
                r"\b(?:(?P<window>early|late)\s+)?(?:(?P<tonight>tonight|tonite)|(?P<rel>this|last|next|today|tomorrow|tmr|yesterday)\s+(?P<daypart>{day_part}))\b"
            ),
        )?,
    };

    let set = SetPatterns {
        each_unit: compile(
            "set.each_unit",
            &format!(r"\b(?:every|each)\s+(?:(?P<other>other)\s+|(?P<num>\d+|{cardinal})\s+)?(?P<unit>{unit})\b"),
        )?,
        periodic: compile("set.periodic", &format!(r"\b(?P<adverb>{adverbs})\b"))?,
        each_prefix: compile("set.each_prefix", r"\b(?:every|each)\s+$")?,
        plural_weekday: compile("set.plural_weekday", &format!(r"\b(?:on\s+)?(?P<weekday>{FULL_WEEKDAYS})s\b"))?,
        daily_suffix: compile(
            "set.daily_suffix",
            r"^\s*(?:every\s+day|each\s+day|every\s+night|each\s+night|everyday|daily|nightly)\b",
        )?,
        daily_prefix: compile("set.daily_prefix", r"\b(?:every|each)\s+(?:day|night)\s+(?:at\s+)?$")?,
    };

    let holiday = HolidayPatterns {
        holiday: compile(
            "holiday.holiday",
            &format!(r"\b(?:(?P<rel>{rel})\s+)?(?P<holiday>{holiday_names})\b{opt_year}"),
        )?,
        holiday_relative_year: compile(
            "holiday.holiday_relative_year",
            &format!(r"\b(?P<holiday>{holiday_names})\s+(?:of\s+)?(?P<rel>{rel})\s+year\b"),
        )?,
    };

    let modifiers = r"(?:(?P<before>before|prior\s+to|no\s+later\s+than|earlier\s+than|ahead\s+of|until|till|by)|(?P<after>after|later\s+than)|(?P<since>since|starting\s+from|starting|as\s+of))";
    let merged = MergedPatterns {
        modifier_prefix: compile("merged.modifier_prefix", &format!(r"\b{modifiers}\s+$"))?,
        modifier_head: compile("merged.modifier_head", &format!(r"^{modifiers}\s+"))?,
        number_ending: compile(
            "merged.number_ending",
            &format!(
                r"^\s+(?:meeting|appointment|call|conference|session|class)s?\s+to\s+(?P<num>2[0-3]|[01]?\d|{HOUR_WORD})\b"
            ),
        )?,
    };

    Ok(LocaleConfig {
        name: "en-us",
        weekdays,
        months,
        units,
        day_parts,
        seasons,
        inexact_amounts,
        implicit_days,
        relative_offsets,
        ordinal_counts,
        periodic_adverbs,
        meal_hours,
        period_parts,
        holidays,
        negative_filters,
        numbers: Box::new(EnglishNumbers::new()?),
        duration,
        date,
        time,
        date_period,
        time_period,
        date_time,
        date_time_period,
        set,
        holiday,
        range,
        merged,
    })
}
