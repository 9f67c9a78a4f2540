use chronolex::{Entity, ParseResultVerbose, SpanSummary};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(run: &ParseResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &run.details;
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", run.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Extractors ━━━", ansi::GRAY));
    print_stages(run, &palette);

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    if run.results.is_empty() {
        println!("{}", palette.dim("  No entities found"));
    } else {
        for (idx, ent) in run.results.iter().enumerate() {
            print_entity(idx, ent, &palette);
        }
    }

    if !details.unresolved.is_empty() {
        println!("\n{}", palette.paint("━━━ Unresolved ━━━", ansi::GRAY));
        for span in &details.unresolved {
            println!("    {}", fmt_span_compact(span, &palette));
        }
        println!("\n{}", palette.dim("  Tip: RUST_LOG=chronolex::parse=trace shows which strategies were tried"));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Extract: {}  │  Parse: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(format!("{:?}", details.extraction), ansi::CYAN),
        palette.dim(format!("{:?}", details.parse)),
    );
    println!();
}

fn print_stages(run: &ParseResultVerbose, palette: &ansi::Palette) {
    for stage in &run.details.stages {
        let label = format!("{:<15}", format!("{}:", stage.name));
        let count = if stage.produced > 0 {
            palette.paint(format!("✓ {} spans, {} kept", stage.produced, stage.accepted), ansi::GREEN)
        } else {
            palette.dim("✗ 0 spans")
        };
        println!("  {} {} {}", palette.paint(label, ansi::BLUE), count, palette.dim(format!("{:?}", stage.duration)));

        for span in stage.samples.iter().take(5) {
            println!("    {}", fmt_span_compact(span, palette));
        }
        if stage.produced > 5 {
            println!("    {}", palette.dim(format!("... +{} more", stage.produced - 5)));
        }
    }
}

fn print_entity(idx: usize, ent: &Entity, palette: &ansi::Palette) {
    println!(
        "  {} {} {} {}",
        palette.paint(format!("[{}]", idx), ansi::GRAY),
        palette.bold(palette.paint(&ent.body, ansi::GREEN)),
        palette.dim("│"),
        palette.paint(format!("span {}..{}", ent.start, ent.end), ansi::YELLOW),
    );
    println!(
        "      {} {}  {} {}",
        palette.dim("type:"),
        palette.paint(&ent.name, ansi::BLUE),
        palette.dim("│ timex:"),
        palette.paint(ent.timex().unwrap_or("-"), ansi::CYAN)
    );
    for (key, value) in &ent.resolution {
        let rendered = match (&value.value, &value.start, &value.end) {
            (Some(v), _, _) => v.clone(),
            (None, Some(s), Some(e)) => format!("{s} → {e}"),
            (None, Some(s), None) => format!("{s} →"),
            (None, None, Some(e)) => format!("→ {e}"),
            (None, None, None) => "-".to_string(),
        };
        println!("      {} {}", palette.dim(format!("{key}:")), rendered);
    }
}

fn fmt_span_compact(span: &SpanSummary, palette: &ansi::Palette) -> String {
    format!(
        "{} {} {}",
        palette.paint(format!("{}..{}", span.start, span.end), ansi::YELLOW),
        palette.paint(span.dim, ansi::BLUE),
        palette.dim(&span.preview)
    )
}
