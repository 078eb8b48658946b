#![warn(missing_docs)]
//! Brilbench Report - Result Aggregation
//!
//! Walks the per-run timing reports the matrix left on disk and folds them
//! into one combined JSON document:
//! - two-level scan, one directory per benchmark, one file per run report
//! - zero-length files (failed runs) skipped silently
//! - the final report written atomically, replacing any prior contents

mod aggregate;
mod record;

pub use aggregate::{aggregate_reports, write_report, AggregateError};
pub use record::{AggregatedRecord, AggregatedReport};
