//! Orchestration engine.
//!
//! This module is the entry point that ties the per-grain recognizers in
//! `src/recognizers/` together. It is split into focused submodules under
//! `src/engine/` while keeping public paths stable (for example
//! `crate::engine::MergedExtractor`).
//!
//! ## How the parts work together
//!
//! ```text
//! input ── MergedExtractor::extract (merged.rs)
//!            - run each grain's extractor in a fixed order
//!            - covering merge across grains
//!            - number endings, modifier prefixes, negative filter
//!                               │
//!                               v
//!                     Vec<ExtractResult>
//!                               │
//!          MergedParser::parse (merged.rs)
//!            - before/after/since handling
//!            - dispatch on dimension, parser cascade
//!            - render the value map
//!                               │
//!                               v
//!                    Vec<DateTimeParseResult>
//! ```
//!
//! ## Responsibilities by module
//!
//! - `merged.rs`: the merged extractor and parser, and `run_with_metrics`.
//! - `metrics.rs`: optional timing/debug data for runs and stages.
//!
//! ## Debugging
//!
//! Merge decisions are logged under the `chronolex::merge` target and parser
//! strategy hits under `chronolex::parse`; set `RUST_LOG=chronolex=trace` with
//! the bundled binary to see them.

#[path = "engine/merged.rs"]
mod merged;
#[path = "engine/metrics.rs"]
mod metrics;

pub use merged::{MergedExtractor, MergedParser, run_with_metrics};
pub use metrics::{RunMetrics, RunResult, StageMetrics};
