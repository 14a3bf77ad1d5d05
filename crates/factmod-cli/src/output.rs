//! CLI output formatting.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use factmod_core::range::Range;
use factmod_orchestration::interfaces::DistributedResult;

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a range as `begin..end` with separators.
#[must_use]
pub fn format_range(range: Range) -> String {
    if range.is_empty() {
        "(empty)".to_string()
    } else {
        format!("{}..{}", format_number(range.begin), format_number(range.end))
    }
}

/// Write the result value to a file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: &Path, value: u64) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "{value}")?;
    Ok(())
}

#[derive(Serialize)]
struct ShardSummary<'a> {
    index: usize,
    server: &'a str,
    range: Range,
    dispatched: bool,
    value: Option<u64>,
    error: Option<String>,
    duration_ms: u128,
}

#[derive(Serialize)]
struct ResultSummary<'a> {
    k: u64,
    modulus: u64,
    value: u64,
    succeeded: usize,
    total: usize,
    partial: bool,
    duration_ms: u128,
    shards: Vec<ShardSummary<'a>>,
}

/// Machine-readable JSON summary of a distributed result.
///
/// # Errors
///
/// Propagates `serde_json` serialization errors.
pub fn summary_json(result: &DistributedResult) -> serde_json::Result<String> {
    let summary = ResultSummary {
        k: result.k,
        modulus: result.modulus,
        value: result.value,
        succeeded: result.succeeded,
        total: result.total,
        partial: result.is_partial(),
        duration_ms: result.duration.as_millis(),
        shards: result
            .shards
            .iter()
            .map(|s| ShardSummary {
                index: s.index,
                server: &s.server,
                range: s.range,
                dispatched: s.dispatched,
                value: s.outcome.as_ref().ok().copied(),
                error: s.outcome.as_ref().err().map(ToString::to_string),
                duration_ms: s.duration.as_millis(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&summary)
}
