mod debug_report;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chronolex::{Context, DateTimeOptions, Options, parse_verbose_with};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const DEFAULT_REFERENCE: &str = "2016-11-07T00:00:00";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_tracing(config.verbose);

    let ctx = Context { reference_time: config.reference_time };
    let opts = Options::with_flags(config.flags);
    let res = parse_verbose_with(&config.input, &ctx, &opts);
    debug_report::print_run(&res, config.color);
}

struct CliConfig {
    input: String,
    reference_time: NaiveDateTime,
    flags: DateTimeOptions,
    color: bool,
    verbose: bool,
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "chronolex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(true).try_init();
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference_time = parse_reference(DEFAULT_REFERENCE)?;
    let mut flags = DateTimeOptions::empty();
    let mut color = io::stdout().is_terminal();
    let mut verbose = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("chronolex {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "-v" | "--verbose" => verbose = true,
            "--inclusive-end" => flags |= DateTimeOptions::INCLUSIVE_END_PERIOD,
            "--skip-from-to" => flags |= DateTimeOptions::SKIP_FROM_TO_MERGE,
            "--split-date-time" => flags |= DateTimeOptions::SPLIT_DATE_AND_TIME,
            "--filter" => flags |= DateTimeOptions::ENABLE_NEGATIVE_FILTER,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_time = parse_reference(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                let value = arg.trim_start_matches("--reference=");
                reference_time = parse_reference(value)?;
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, reference_time, flags, color, verbose })
}

fn set_input(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.replace(value).is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

/// Accepts a full timestamp or a bare date (midnight).
fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    let invalid = || format!("error: invalid --reference '{value}' (expected YYYY-MM-DD[THH:MM:SS])");
    if chronolex::regex!(r"^\d{4}-\d{2}-\d{2}$").is_match(value) {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
        return Ok(NaiveDateTime::new(date, NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").map_err(|_| invalid())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "chronolex {version}

Recognize English date and time expressions and resolve them to timex values.

Usage:
  chronolex [OPTIONS] [--] <input...>
  chronolex [OPTIONS] --input <text>

Options:
  -i, --input <text>         Input text to parse. If omitted, reads remaining args
                             or stdin when no args are provided.
  --reference <timestamp>    Reference time in YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD.
                             Default: {default_reference}
  --inclusive-end            Make \"rest of\" ranges end on their last day.
  --skip-from-to             Do not merge two points into a from/to range.
  --split-date-time          Report a date with a time as two entities.
  --filter                   Drop ambiguous words such as a bare \"may\".
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -v, --verbose              Log engine decisions to stderr (RUST_LOG overrides).
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_reference = DEFAULT_REFERENCE
    )
}
