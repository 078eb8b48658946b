//! Post-Matrix Summary
//!
//! Renders the collected run records into a human-readable summary:
//! status counts, then one line per failed run with its exit code and the
//! tail of its stderr. Individual run failures never change the exit
//! status of the harness; this summary is how they surface.

use brilbench_core::{ProcessCapture, RunRecord, RunStatus};
use chrono::Utc;

/// Count of records per status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    /// Runs that produced a timing report.
    pub success: usize,
    /// Runs whose build failed.
    pub build_failed: usize,
    /// Runs skipped for an incomplete artifact pair.
    pub skipped: usize,
    /// Runs whose measurement failed.
    pub measure_failed: usize,
}

impl StatusCounts {
    /// Tally the records.
    pub fn tally(records: &[RunRecord]) -> Self {
        let mut counts = Self::default();
        for record in records {
            match record.status {
                RunStatus::Success => counts.success += 1,
                RunStatus::BuildFailed => counts.build_failed += 1,
                RunStatus::Skipped => counts.skipped += 1,
                RunStatus::MeasureFailed => counts.measure_failed += 1,
            }
        }
        counts
    }

    /// Total number of runs.
    pub fn total(&self) -> usize {
        self.success + self.build_failed + self.skipped + self.measure_failed
    }
}

/// Format the post-matrix summary.
pub fn format_summary(records: &[RunRecord]) -> String {
    let counts = StatusCounts::tally(records);
    let mut output = String::new();

    output.push_str(&format!(
        "\nMatrix complete at {}: {} runs ({} ok, {} build failed, {} skipped, {} measure failed)\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        counts.total(),
        counts.success,
        counts.build_failed,
        counts.skipped,
        counts.measure_failed,
    ));

    let failures: Vec<&RunRecord> = records.iter().filter(|r| !r.status.is_success()).collect();
    if !failures.is_empty() {
        output.push_str("\nFailed runs:\n");
        for record in failures {
            output.push_str(&format!(
                "  ✗ {} [{}] {}{}\n",
                record.benchmark,
                record.mode,
                record.status.label(),
                failing_capture(record)
                    .and_then(|c| c.exit_code)
                    .map(|code| format!(" (exit {code})"))
                    .unwrap_or_default(),
            ));
            if let Some(message) = &record.message {
                output.push_str(&format!("      {message}\n"));
            }
            if let Some(tail) = failing_capture(record).and_then(stderr_tail) {
                output.push_str(&format!("      {tail}\n"));
            }
        }
    }

    output
}

/// The capture that explains a failed run, if one exists.
fn failing_capture(record: &RunRecord) -> Option<&ProcessCapture> {
    match record.status {
        RunStatus::BuildFailed | RunStatus::Skipped => record.build.as_ref(),
        RunStatus::MeasureFailed => record.measure.as_ref(),
        RunStatus::Success => None,
    }
}

/// Last non-empty stderr line of a capture.
fn stderr_tail(capture: &ProcessCapture) -> Option<String> {
    capture
        .stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(str::to_owned)
}
