//! Engine run metrics.
//!
//! A small set of structs used to observe what one orchestrated run did:
//!
//! - `MergedExtractor::extract` for normal operation.
//! - `run_with_metrics` for profiling, debugging regressions, and inspecting
//!   what each sub-extractor produced before the covering merge.
//!
//! `StageMetrics::spans` holds every span the stage produced, so collecting
//! it allocates; the plain `extract`/`parse` path never builds these structs.

use std::time::Duration;

use crate::resolution::DateTimeParseResult;
use crate::token::ExtractResult;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for `run_with_metrics`.
    pub total: Duration,
    /// Time spent running the sub-extractors and merging their spans.
    pub extraction: Duration,
    /// One entry per sub-extractor, in run order.
    pub stages: Vec<StageMetrics>,
    /// Time spent parsing the merged spans.
    pub parse: Duration,
}

/// Timing and output of one sub-extractor.
#[derive(Debug, Default, Clone)]
pub struct StageMetrics {
    pub name: &'static str,
    pub duration: Duration,
    /// Number of spans the stage produced before the covering merge.
    pub produced: usize,
    /// Spans the stage produced (for debugging).
    pub spans: Vec<ExtractResult>,
    /// How many of them the covering merge accepted when they were offered.
    pub accepted: usize,
}

/// Orchestrator output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Merged spans, in text order.
    pub spans: Vec<ExtractResult>,
    /// One parse result per merged span.
    pub results: Vec<DateTimeParseResult>,
    pub metrics: RunMetrics,
}
