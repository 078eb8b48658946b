//! Aggregated Record Types

use serde::{Deserialize, Serialize};

/// One measurement report wrapped with its benchmark identity.
///
/// The `hyperfine` field holds the measurement tool's report verbatim;
/// its schema is owned by the external tool and opaque here beyond being
/// valid JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    /// Constant label for the backend that produced the executable.
    #[serde(rename = "runMethod")]
    pub run_method: String,
    /// Benchmark identity, derived from the report's parent directory.
    pub benchmark: String,
    /// The parsed measurement report.
    pub hyperfine: serde_json::Value,
}

/// The combined report: an ordered sequence of records, serialized as a
/// JSON array. Multiple records per benchmark are all retained; there is
/// no deduplication by name.
pub type AggregatedReport = Vec<AggregatedRecord>;
