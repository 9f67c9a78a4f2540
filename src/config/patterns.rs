//! Named pattern groups.
//!
//! Each recognizer reads one group. Field docs list the named captures the
//! recognizer relies on; a locale bundle must provide them.

use regex::Regex;

pub struct DurationPatterns {
    /// "3 weeks", "2.5 hours", "3h": `num`, `unit`.
    pub number_unit: Regex,
    /// "an hour", "half a day", "an hour and a half": `half`, `unit`, `and_half`.
    pub article_unit: Regex,
    /// "all day", "half day", "whole week": `which`, `unit`.
    pub all_half: Regex,
    /// "a few days", "several weeks", "a couple of hours": `amount`, `unit`.
    pub inexact: Regex,
    /// Prefix ending right before a duration: `more`, `less`.
    pub modifier_prefix: Regex,
}

pub struct DatePatterns {
    /// "November 15", "Nov 15th, 2016": `month`, `day`, `year`.
    pub month_day: Regex,
    /// "15th of November", "15 Nov 2016": `day`, `month`, `year`.
    pub day_month: Regex,
    /// "Tuesday, November 15": `weekday`, `month`, `day`, `year`.
    pub weekday_month_day: Regex,
    /// "11/15/2016", "11/15": `month`, `day`, `year`.
    pub numeric: Regex,
    /// "2016-11-15": `year`, `month`, `day`.
    pub iso: Regex,
    /// Bare weekday: `weekday`.
    pub weekday: Regex,
    /// Qualifier right before a date: `rel`.
    pub relative_prefix: Regex,
    /// "today", "the day after tomorrow": `special`.
    pub special_day: Regex,
    /// "next Friday": `rel`, `weekday`.
    pub relative_weekday: Regex,
    /// "the first Friday of July": `cardinal`, `weekday`, `rel`, `month`, `year`.
    pub weekday_of_month: Regex,
    /// "20th of next month": `day`, `rel`.
    pub day_of_relative_month: Regex,
    /// "on 15", "the 15th": `day`.
    pub on_day: Regex,
    /// "Thursday the 21st": `weekday`, `day`.
    pub weekday_day: Regex,
    /// Text right after a bare day that makes it something else ("15 minutes").
    pub day_blocker: Regex,
    /// Direction right after a duration: `ago` or `later`.
    pub duration_suffix: Regex,
    /// "in" right before a duration.
    pub duration_in_prefix: Regex,
}

pub struct TimePatterns {
    /// "8:30", "8:30:15pm": `hour`, `min`, `sec`, `am`, `pm`.
    pub clock: Regex,
    /// "8pm", "eight a.m.": `hour`, `am`, `pm`.
    pub hour_desc: Regex,
    /// "8 o'clock": `hour`, `am`, `pm`.
    pub oclock: Regex,
    /// "a quarter to eight", "twenty past five": `quarter`, `half`, `min`, `dir`, `hour`, `am`, `pm`.
    pub relative: Regex,
    /// "seven thirty pm": `hour`, `min`, `am`, `pm`.
    pub spelled: Regex,
    /// "7 in the morning": `hour`, `min`, `daypart`.
    pub hour_day_part: Regex,
    /// "in the evening at 8": `daypart`, `hour`, `min`.
    pub day_part_hour: Regex,
    /// "noon", "midnight": `special`.
    pub special: Regex,
    /// "lunchtime", "dinner time": `meal`.
    pub meal: Regex,
    /// "at 8": `hour`. Fallback, only kept when nothing else overlaps it.
    pub at_hour: Regex,
    /// A bare hour, used for number-ending spans: `hour`.
    pub bare_hour: Regex,
    /// "ish" right after a time.
    pub ish_suffix: Regex,
}

pub struct TimePeriodPatterns {
    /// "from 3 to 5pm", "3-5pm": `from`, `h1`, `m1`, `am1`, `pm1`, `h2`, `m2`, `am2`, `pm2`.
    pub number_range: Regex,
    /// "between 9 and 11 am": same groups as `number_range`.
    pub between_range: Regex,
    /// "in the morning", "late afternoon": `window`, `daypart`.
    pub day_part: Regex,
}

pub struct RangePatterns {
    /// Gap between two points of a range: "to", "until", "-".
    pub to_connector: Regex,
    /// Gap "and", only valid after "between".
    pub and_connector: Regex,
    /// "from" right before the first point.
    pub from_prefix: Regex,
    /// "between" right before the first point.
    pub between_prefix: Regex,
}

pub struct DatePeriodPatterns {
    /// "from 4 to 22 this month", "between 4 and 22 of May": `d1`, `d2`, `rel`, `month`, `year`.
    pub day_range_month: Regex,
    /// "January 4-22, 2017": `month`, `d1`, `d2`, `year`.
    pub month_day_range: Regex,
    /// "next week", "this weekend": `rel`, `unit`.
    pub relative_unit: Regex,
    /// "May", "next May", "May 2017": `rel`, `month`, `year`.
    pub month: Regex,
    /// Context that licenses a bare month or year right after it.
    pub month_context: Regex,
    /// "2016": `year`.
    pub year: Regex,
    /// "the third week of July": `cardinal`, `rel`, `month`, `year`.
    pub week_of_month: Regex,
    /// "week 45 2016": `week`, `year`.
    pub iso_week: Regex,
    /// "third quarter of 2016": `cardinal`, `rel`, `year`.
    pub quarter_ordinal: Regex,
    /// "Q3 2016", "this quarter" handled by `relative_unit`: `num`, `year`.
    pub quarter_code: Regex,
    /// "the first half of next year": `cardinal`, `rel`, `year`.
    pub half_ordinal: Regex,
    /// "H1 2017": `num`, `year`.
    pub half_code: Regex,
    /// "this summer", "winter 2017": `rel`, `season`, `year`.
    pub season: Regex,
    /// "early June", "the end of next month": `part`, `rel`, `unit`, `month`, `year`.
    pub month_part: Regex,
    /// "rest of the week": `unit`.
    pub rest_of: Regex,
    /// Qualifier right before a duration: `past` or `next`.
    pub duration_prefix: Regex,
}

pub struct DateTimePatterns {
    /// "now", "right now", "as soon as possible".
    pub now: Regex,
    /// Gap between a date and a time.
    pub connector: Regex,
    /// "tonight at", "this morning around" right before a time: `tonight`,
    /// `anchor`, `daypart`. A bare anchor ("this") needs a day part inside the
    /// time itself.
    pub anchor_prefix: Regex,
    /// "tonight", "this evening" right after a time: same groups.
    pub anchor_suffix: Regex,
}

pub struct DateTimePeriodPatterns {
    /// Gap between a time range and a date.
    pub connector: Regex,
    /// Day part right after a date ("Tuesday afternoon"): `window`, `daypart`.
    pub day_part_suffix: Regex,
    /// "tonight", "this morning", "last night": `rel`, `window`, `daypart`, `tonight`.
    pub special_day_part: Regex,
}

pub struct SetPatterns {
    /// "every week", "every 2 days", "every other month": `num`, `other`, `unit`.
    pub each_unit: Regex,
    /// "daily", "biweekly": `adverb`.
    pub periodic: Regex,
    /// "every", "each" right before another entity.
    pub each_prefix: Regex,
    /// "Mondays", "on Mondays": `weekday`.
    pub plural_weekday: Regex,
    /// "every day", "daily" right after a time.
    pub daily_suffix: Regex,
    /// "every day at" right before a time.
    pub daily_prefix: Regex,
}

pub struct HolidayPatterns {
    /// "next Christmas", "Thanksgiving 2016": `rel`, `holiday`, `year`.
    pub holiday: Regex,
    /// "Christmas of next year": `holiday`, `rel`.
    pub holiday_relative_year: Regex,
}

pub struct MergedPatterns {
    /// Modifier right before an entity: `before`, `after`, `since`.
    pub modifier_prefix: Regex,
    /// Modifier at the head of an entity's own text, same groups.
    pub modifier_head: Regex,
    /// "meeting to 4" right after a time: `num`.
    pub number_ending: Regex,
}
