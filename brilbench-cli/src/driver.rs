//! Matrix Driver
//!
//! The outer control loop: for every benchmark in enumeration order,
//! create its output directory, then run every mode in table order.
//! Scheduling is strictly sequential; one external process pair completes
//! (or fails silently into its record) before the next begins. Timing
//! results are only meaningful under exclusive use of the host CPU, so
//! the driver never parallelizes across benchmarks or modes.

use std::fs;
use std::io;
use std::path::PathBuf;

use brilbench_core::{BenchmarkInput, OptMode, RunRecord};
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::config::BenchConfig;
use crate::executor::RunExecutor;

/// Fatal setup failures that abort the whole matrix.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A benchmark's output directory already exists: the harness expects
    /// a fresh tree per execution, so this indicates a prior unclean run.
    #[error("output directory {path} already exists; remove it and re-run")]
    OutputDirExists {
        /// The colliding directory.
        path: PathBuf,
    },
    /// An output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    Io {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

/// Drives the full (benchmark × mode) matrix.
pub struct MatrixDriver<'a> {
    config: &'a BenchConfig,
    executor: RunExecutor<'a>,
    show_progress: bool,
}

impl<'a> MatrixDriver<'a> {
    /// Create a driver over an immutable configuration.
    pub fn new(config: &'a BenchConfig) -> Self {
        Self {
            config,
            executor: RunExecutor::new(config),
            show_progress: true,
        }
    }

    /// Disable the progress bar (used by tests and `--run-log` pipelines).
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Run the full matrix, returning one record per (benchmark, mode).
    ///
    /// Per-run failures are collected in the records; only directory
    /// setup collisions abort, and they abort before any build tool is
    /// spawned for the colliding benchmark.
    pub fn run(
        &self,
        corpus: &[BenchmarkInput],
        modes: &[OptMode],
    ) -> Result<Vec<RunRecord>, SetupError> {
        let bench_dir = &self.config.output.bench_dir;
        fs::create_dir_all(bench_dir).map_err(|source| SetupError::Io {
            path: bench_dir.clone(),
            source,
        })?;

        let pb = if self.show_progress {
            let pb = ProgressBar::new((corpus.len() * modes.len()) as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut records = Vec::with_capacity(corpus.len() * modes.len());
        for bench in corpus {
            let out_dir = bench_dir.join(&bench.name);
            match fs::create_dir(&out_dir) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    return Err(SetupError::OutputDirExists { path: out_dir });
                }
                Err(source) => {
                    return Err(SetupError::Io {
                        path: out_dir,
                        source,
                    });
                }
            }

            for mode in modes {
                pb.set_message(format!("{} [{}]", bench.name, mode.name));
                records.push(self.executor.execute(bench, mode, &out_dir));
                pb.inc(1);
            }
        }

        pb.finish_and_clear();
        Ok(records)
    }
}
