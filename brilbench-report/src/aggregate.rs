//! Report Aggregation
//!
//! Locates every per-run timing report under the bench directory and folds
//! them into one [`AggregatedReport`]. A zero-length file signals a run
//! that failed to produce measurement output and is skipped; a non-empty
//! file that is not valid JSON aborts aggregation naming the offending
//! path. The combined report is written via a temporary file and rename,
//! so a failure partway through never exposes a truncated report and
//! leaves any previous report file untouched.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{AggregatedRecord, AggregatedReport};

/// Errors raised while aggregating or writing the combined report.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The bench directory could not be rendered as a glob pattern.
    #[error("invalid report pattern '{pattern}': {source}")]
    Pattern {
        /// The rendered two-level pattern.
        pattern: String,
        /// Parse failure from the glob engine.
        source: glob::PatternError,
    },
    /// A report file could not be read.
    #[error("failed to read report {path}: {source}")]
    Read {
        /// The unreadable report file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A non-empty report file is not valid JSON. Fatal: no partial
    /// report is better than a silently-truncated one.
    #[error("report {path} is not valid JSON: {source}")]
    Parse {
        /// The malformed report file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The combined report could not be serialized.
    #[error("failed to serialize aggregated report: {0}")]
    Serialize(serde_json::Error),
    /// The combined report could not be written to disk.
    #[error("failed to write aggregated report {path}: {source}")]
    Write {
        /// The destination report path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

/// Collect every non-empty per-run report under `bench_dir`.
///
/// The scan is two-level: one directory per benchmark, one `.json` file
/// per run report. Benchmark identity is the immediate parent directory
/// name. Records come back in the glob engine's sorted path order.
pub fn aggregate_reports(
    bench_dir: &Path,
    run_method: &str,
) -> Result<AggregatedReport, AggregateError> {
    let pattern = bench_dir.join("*/*.json").to_string_lossy().into_owned();
    let paths = glob::glob(&pattern).map_err(|source| AggregateError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut records = Vec::new();
    for entry in paths {
        let path = match entry {
            Ok(path) => path,
            Err(_) => continue,
        };

        let metadata = fs::metadata(&path).map_err(|source| AggregateError::Read {
            path: path.clone(),
            source,
        })?;
        // Empty file: the run never produced measurement output.
        if metadata.len() == 0 {
            continue;
        }

        let Some(benchmark) = benchmark_name(&path) else {
            continue;
        };

        let contents = fs::read_to_string(&path).map_err(|source| AggregateError::Read {
            path: path.clone(),
            source,
        })?;
        let hyperfine =
            serde_json::from_str(&contents).map_err(|source| AggregateError::Parse {
                path: path.clone(),
                source,
            })?;

        records.push(AggregatedRecord {
            run_method: run_method.to_owned(),
            benchmark,
            hyperfine,
        });
    }

    Ok(records)
}

/// Write the combined report as pretty-printed JSON, atomically.
///
/// The report is serialized in full, written to a sibling temporary file,
/// and renamed over `path`. Parent directories are created if absent.
pub fn write_report(report: &AggregatedReport, path: &Path) -> Result<(), AggregateError> {
    let json = serde_json::to_string_pretty(report).map_err(AggregateError::Serialize)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| AggregateError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, json).map_err(|source| AggregateError::Write {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| AggregateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn benchmark_name(path: &Path) -> Option<String> {
    path.parent()?
        .file_name()?
        .to_str()
        .map(str::to_owned)
}
