//! Per-Run Outcome Types
//!
//! One run is one (benchmark, mode) pair. Failures are recorded, never
//! propagated: an unsupported program under one mode must not abort the
//! rest of the matrix. The driver collects these records into the run log
//! summarized after the matrix completes.

use serde::Serialize;

use crate::ProcessCapture;

/// How a single (benchmark, mode) run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// Build and measurement both completed with exit code zero.
    Success,
    /// The build tool could not be spawned or exited non-zero.
    BuildFailed,
    /// The build claimed success but the executable/args pair was
    /// incomplete; measurement was skipped.
    Skipped,
    /// The measurement tool could not be spawned or exited non-zero.
    MeasureFailed,
}

impl RunStatus {
    /// Whether this run produced a usable timing report.
    pub fn is_success(self) -> bool {
        matches!(self, RunStatus::Success)
    }

    /// Short label for summaries.
    pub fn label(self) -> &'static str {
        match self {
            RunStatus::Success => "ok",
            RunStatus::BuildFailed => "build failed",
            RunStatus::Skipped => "skipped",
            RunStatus::MeasureFailed => "measure failed",
        }
    }
}

/// Outcome of one (benchmark, mode) run.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    /// Benchmark identity (base file name).
    pub benchmark: String,
    /// Mode name from the mode table.
    pub mode: &'static str,
    /// How the run ended.
    pub status: RunStatus,
    /// Captured build invocation, if the build tool was spawned.
    pub build: Option<ProcessCapture>,
    /// Captured measurement invocation, if one was attempted.
    pub measure: Option<ProcessCapture>,
    /// Context for failures the captures alone do not explain
    /// (spawn errors, missing artifacts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_success_is_success() {
        assert!(RunStatus::Success.is_success());
        assert!(!RunStatus::BuildFailed.is_success());
        assert!(!RunStatus::Skipped.is_success());
        assert!(!RunStatus::MeasureFailed.is_success());
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&RunStatus::BuildFailed).unwrap();
        assert_eq!(json, "\"build-failed\"");
    }

    #[test]
    fn absent_message_is_omitted_from_the_log() {
        let record = RunRecord {
            benchmark: "fib".to_owned(),
            mode: "no_optimize",
            status: RunStatus::Success,
            build: None,
            measure: None,
            message: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("message"));
    }
}
