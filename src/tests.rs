use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Weekday};
use proptest::prelude::*;

use crate::recognizers::testing::{english, reference};
use crate::recognizers::{DateExtractor, DateParser, Extractor, Parser, TimeExtractor, TimeParser};
use crate::{
    Context, DateTimeOptions, DateTimeParseResult, DateTimeResolutionResult, Dimension, NOT_RESOLVED, Options, Token,
    TimeValue, merge_all_tokens, parse_with, run_with_metrics,
};

fn context() -> Context {
    Context { reference_time: reference() }
}

fn date_of(value: Option<TimeValue>) -> Option<NaiveDate> {
    match value? {
        TimeValue::Instant(dt) => Some(dt.date()),
        _ => None,
    }
}

/// Extract and parse a single date span.
fn single_date(text: &str, at: NaiveDateTime) -> (Option<NaiveDate>, Option<NaiveDate>, String) {
    let spans = DateExtractor::new(english()).extract(text, at);
    assert_eq!(spans.len(), 1, "{text}: {spans:?}");
    let res = DateParser::new(english()).parse(&spans[0], at).unwrap();
    (date_of(res.future), date_of(res.past), res.timex)
}

fn instant(value: Option<TimeValue>) -> NaiveDateTime {
    match value {
        Some(TimeValue::Instant(dt)) => dt,
        other => panic!("expected an instant, got {other:?}"),
    }
}

/// Extract and parse a single clock time.
fn single_time(text: &str, at: NaiveDateTime) -> DateTimeResolutionResult {
    let spans = TimeExtractor::new(english()).extract(text, at);
    assert_eq!(spans.len(), 1, "{text}: {spans:?}");
    TimeParser::new(english()).parse(&spans[0], at).unwrap()
}

fn run(text: &str) -> Vec<DateTimeParseResult> {
    run_with_metrics(english(), &Options::default(), text, reference()).results
}

#[test]
fn end_to_end_examples() {
    // (input, entity body, type, timex, rendered key, rendered value or start)
    let cases: Vec<(&str, &str, &str, &str, &str, &str)> = vec![
        ("I'll go back on 15", "15", "date", "XXXX-XX-15", "resolveToFuture", "2016-11-15"),
        ("I'll go back on 15", "15", "date", "XXXX-XX-15", "resolveToPast", "2016-10-15"),
        ("I went back 20th of next month", "20th of next month", "date", "2016-12-20", "resolve", "2016-12-20"),
        ("I'll go back on Friday", "Friday", "date", "XXXX-WXX-5", "resolveToFuture", "2016-11-11"),
        ("I'll go back on Friday", "Friday", "date", "XXXX-WXX-5", "resolveToPast", "2016-11-04"),
        ("I'll go back tomorrow", "tomorrow", "date", "2016-11-08", "resolve", "2016-11-08"),
        ("see you next Friday at 8pm", "next Friday at 8pm", "datetime", "2016-11-18T20", "resolve", "2016-11-18 20:00:00"),
        ("I'll be out from 4 to 22 this month", "from 4 to 22 this month", "daterange", "(2016-11-04,2016-11-22,P18D)", "resolve", "2016-11-04"),
        ("it will take 3 hours", "3 hours", "duration", "PT3H", "resolve", "10800"),
        ("I'm free tomorrow 5-6pm", "tomorrow 5-6pm", "datetimerange", "(2016-11-08T17,2016-11-08T18,PT1H)", "resolve", "2016-11-08 17:00:00"),
    ];

    for (input, body, name, timex, key, expected) in cases {
        let res = parse_with(input, &context(), &Options::default());
        assert_eq!(res.results.len(), 1, "{input}: {:?}", res.results);
        let ent = &res.results[0];
        assert_eq!(ent.body, body, "{input}");
        assert_eq!(ent.name, name, "{input}");
        assert_eq!(ent.timex(), Some(timex), "{input}");
        assert_eq!(&input[ent.start..ent.end], body, "{input}");

        let value = ent.resolution.get(key).unwrap_or_else(|| panic!("{input}: no {key} in {:?}", ent.resolution));
        let rendered = value.value.as_deref().or(value.start.as_deref());
        assert_eq!(rendered, Some(expected), "{input}");
    }
}

#[test]
fn rest_of_the_week_end_depends_on_flag() {
    let inclusive = Options::with_flags(DateTimeOptions::INCLUSIVE_END_PERIOD);
    let res = parse_with("rest of the week", &context(), &inclusive);
    let value = &res.results[0].resolution["resolve"];
    assert_eq!(value.start.as_deref(), Some("2016-11-07"));
    assert_eq!(value.end.as_deref(), Some("2016-11-13"));

    let res = parse_with("rest of the week", &context(), &Options::default());
    assert_eq!(res.results[0].resolution["resolve"].end.as_deref(), Some("2016-11-14"));
}

#[test]
fn several_entities_come_back_in_text_order() {
    let res = parse_with("call me tomorrow at 8pm or every Monday", &context(), &Options::default());
    let found: Vec<(&str, &str)> = res.results.iter().map(|e| (e.name.as_str(), e.body.as_str())).collect();
    assert_eq!(found, vec![("datetime", "tomorrow at 8pm"), ("set", "every Monday")]);
}

#[test]
fn absolute_dates_ignore_the_reference() {
    let far = NaiveDate::from_ymd_opt(1999, 3, 2).unwrap().and_hms_opt(13, 0, 0).unwrap();
    for at in [reference(), far] {
        let (future, past, timex) = single_date("due on 2017-01-04", at);
        assert_eq!(timex, "2017-01-04");
        assert_eq!(future, NaiveDate::from_ymd_opt(2017, 1, 4));
        assert_eq!(future, past);
    }
}

#[test]
fn february_29_waits_for_a_leap_year() {
    let (future, past, timex) = single_date("I'll see you on February 29", reference());
    assert_eq!(timex, "XXXX-02-29");
    assert_eq!(future, NaiveDate::from_ymd_opt(2020, 2, 29));
    assert_eq!(past, NaiveDate::from_ymd_opt(2016, 2, 29));
}

fn assert_nested(text: &str, parent: &DateTimeParseResult) -> usize {
    let Some(res) = &parent.resolution else { return 0 };
    let mut depth = 0;
    for sub in &res.sub_resolutions {
        let span = &sub.extract;
        assert!(
            span.start >= parent.extract.start && span.end() <= parent.extract.end(),
            "{text}: {:?} outside {:?}",
            span.text,
            parent.extract.text
        );
        assert_eq!(&text[span.start..span.end()], span.text, "{text}");
        depth = depth.max(1 + assert_nested(text, sub));
    }
    depth
}

#[test]
fn sub_resolutions_stay_inside_their_parent() {
    let cases = [
        ("I'm free tomorrow 5-6pm", 1),
        ("see you next Friday at 8pm", 1),
        ("I'll be out from November 5 to November 10", 1),
        ("we meet each Friday at 8pm", 2),
        ("call me 8am every day", 1),
        ("finish it before next Friday at 8pm", 1),
        ("busy from Tuesday 8am to Friday 10am", 1),
    ];
    for (text, min_depth) in cases {
        let results = run(text);
        assert!(!results.is_empty(), "{text}");
        let depth = results.iter().map(|pr| assert_nested(text, pr)).max().unwrap_or(0);
        assert!(depth >= min_depth, "{text}: depth {depth}");
    }
}

#[test]
fn range_ends_on_both_sides_of_the_reference() {
    let res = parse_with("I'll be out from November 5 to November 10", &context(), &Options::default());
    assert_eq!(res.results.len(), 1);
    let ent = &res.results[0];
    assert_eq!(ent.name, "daterange");
    let value = &ent.resolution["resolve"];
    assert_eq!(value.start.as_deref(), Some("2016-11-05"));
    assert_eq!(value.end.as_deref(), Some("2016-11-10"));

    let res = parse_with("on leave between November 1 and November 30", &context(), &Options::default());
    let value = &res.results[0].resolution["resolve"];
    assert_eq!((value.start.as_deref(), value.end.as_deref()), (Some("2016-11-01"), Some("2016-11-30")));
}

#[test]
fn out_of_range_amounts_are_not_resolved() {
    for text in ["I left 99999999999999 days ago", "in 99999999 years"] {
        let results = run(text);
        assert!(results.iter().any(|pr| pr.dim != Dimension::Duration), "{text}: {results:?}");
        for pr in results.iter().filter(|pr| pr.dim != Dimension::Duration) {
            assert!(!pr.is_resolved(), "{text}: {:?}", pr.resolution);
            assert_eq!(pr.values["resolve"].value.as_deref(), Some(NOT_RESOLVED), "{text}");
        }
    }
    let results = run("I left 99999999999999 days ago");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].extract.text, "99999999999999 days ago");
}

#[test]
fn twelve_without_marker_is_midnight_or_noon() {
    let res = parse_with("see you at 12", &context(), &Options::default());
    let ent = &res.results[0];
    assert_eq!(ent.timex(), Some("T12"));
    assert_eq!(ent.resolution["resolveToFutureAm"].value.as_deref(), Some("00:00:00"));
    assert_eq!(ent.resolution["resolveToFuturePm"].value.as_deref(), Some("12:00:00"));
    assert_eq!(ent.resolution["resolveToPastAm"].value.as_deref(), Some("00:00:00"));
    assert_eq!(ent.resolution["resolveToPastPm"].value.as_deref(), Some("12:00:00"));

    let res = parse_with("tomorrow at 12", &context(), &Options::default());
    let ent = &res.results[0];
    assert_eq!(ent.resolution["resolveAm"].value.as_deref(), Some("2016-11-08 00:00:00"));
    assert_eq!(ent.resolution["resolvePm"].value.as_deref(), Some("2016-11-08 12:00:00"));
}

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("Monday", Weekday::Mon),
    ("Tuesday", Weekday::Tue),
    ("Wednesday", Weekday::Wed),
    ("Thursday", Weekday::Thu),
    ("Friday", Weekday::Fri),
    ("Saturday", Weekday::Sat),
    ("Sunday", Weekday::Sun),
];

const PHRASES: [&str; 12] = [
    "tomorrow at 8pm",
    "next week",
    "from 4 to 22 this month",
    "every Monday",
    "last night",
    "3 hours",
    "on Friday",
    "before next Friday",
    "at 8",
    "rest of the week",
    "in May",
    "between 4 and 22 of May",
];

fn reference_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (0i64..14_000, 0u32..24).prop_map(|(days, hour)| {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days);
        date.and_hms_opt(hour, 0, 0).unwrap()
    })
}

proptest! {
    #[test]
    fn parsing_is_deterministic(
        picks in proptest::collection::vec(0usize..PHRASES.len(), 1..4),
        at in reference_strategy(),
    ) {
        let text = picks.iter().map(|&i| PHRASES[i]).collect::<Vec<_>>().join(" and then ");
        let ctx = Context { reference_time: at };
        let first = parse_with(&text, &ctx, &Options::default());
        let second = parse_with(&text, &ctx, &Options::default());
        prop_assert_eq!(format!("{:?}", first.results), format!("{:?}", second.results));
    }

    #[test]
    fn merging_is_idempotent(spans in proptest::collection::vec((0usize..40, 1usize..12), 0..16)) {
        let text = "x".repeat(48);
        let tokens: Vec<Token> = spans.into_iter().map(|(start, len)| Token::new(start, start + len)).collect();
        let once = merge_all_tokens(tokens, &text, Dimension::Date);
        let twice = merge_all_tokens(once.iter().map(|er| er.as_token()).collect(), &text, Dimension::Date);
        prop_assert_eq!(&once, &twice);
        for pair in once.windows(2) {
            prop_assert!(pair[0].end() <= pair[1].start);
        }
    }

    #[test]
    fn bare_weekday_brackets_the_reference(idx in 0usize..7, at in reference_strategy()) {
        let (name, weekday) = WEEKDAYS[idx];
        let (future, past, _) = single_date(&format!("I'll go back on {name}"), at);
        let (future, past) = (future.unwrap(), past.unwrap());
        prop_assert!(future >= at.date());
        prop_assert!(past < at.date());
        prop_assert_eq!(future - past, Duration::weeks(1));
        prop_assert_eq!(future.weekday(), weekday);
    }

    #[test]
    fn bare_day_brackets_the_reference(day in 1u32..=28, at in reference_strategy()) {
        let (future, past, timex) = single_date(&format!("I'll go back on {day}"), at);
        let (future, past) = (future.unwrap(), past.unwrap());
        prop_assert_eq!(timex, format!("XXXX-XX-{day:02}"));
        prop_assert!(future >= at.date());
        prop_assert!(past < at.date());
        prop_assert_eq!((future.day(), past.day()), (day, day));
        let months = |d: NaiveDate| d.year() * 12 + d.month() as i32;
        prop_assert_eq!(months(future) - months(past), 1);
    }

    #[test]
    fn bare_clock_time_brackets_the_reference(hour in 0u32..24, at in reference_strategy()) {
        let res = single_time(&format!("see you at {hour}:30"), at);
        let (future, past) = (instant(res.future), instant(res.past));
        prop_assert!(future >= at);
        prop_assert!(past < at);
        prop_assert_eq!(future - past, Duration::days(1));
        prop_assert_eq!(future.hour(), hour);

        // an unmarked 1-12 also gets the other half of the day, bracketed the same way
        prop_assert_eq!(res.other_half.is_some(), (1..=12).contains(&hour));
        if let Some((other_future, other_past)) = res.other_half {
            let (other_future, other_past) = (instant(Some(other_future)), instant(Some(other_past)));
            prop_assert!(other_future >= at);
            prop_assert!(other_past < at);
            prop_assert_eq!(other_future - other_past, Duration::days(1));
            prop_assert_eq!(other_future.hour(), (hour + 12) % 24);
        }
    }
}
