//! Run Executor
//!
//! Executes one (benchmark, mode) pair: invoke the build tool to produce
//! an executable and its companion args file in the benchmark's output
//! directory, then invoke the measurement tool against the executable,
//! exporting a mode-specific JSON timing report.
//!
//! Failures here are recorded, never propagated: a program one mode cannot
//! compile or run must not abort the rest of the matrix. The executor
//! also keeps the artifact pair consistent: it never leaves an executable
//! behind without its args file, or the reverse.

use std::fs;
use std::io;
use std::path::Path;

use brilbench_core::{BenchmarkInput, Invocation, OptMode, ProcessCapture, RunRecord, RunStatus};

use crate::config::BenchConfig;

/// Executes single (benchmark, mode) runs against the configured tools.
pub struct RunExecutor<'a> {
    config: &'a BenchConfig,
}

impl<'a> RunExecutor<'a> {
    /// Create an executor over an immutable configuration.
    pub fn new(config: &'a BenchConfig) -> Self {
        Self { config }
    }

    /// Execute one run, returning its record. Never fails the matrix.
    pub fn execute(&self, bench: &BenchmarkInput, mode: &OptMode, out_dir: &Path) -> RunRecord {
        let exe_path = out_dir.join(mode.name);
        let args_path = out_dir.join(format!("{}-args", mode.name));
        let report_path = out_dir.join(format!("{}.json", mode.name));

        let record = |status, build, measure, message| RunRecord {
            benchmark: bench.name.clone(),
            mode: mode.name,
            status,
            build,
            measure,
            message,
        };

        let build = match self.build(bench, mode, &exe_path) {
            Ok(capture) => capture,
            Err(e) => {
                return record(
                    RunStatus::BuildFailed,
                    None,
                    None,
                    Some(format!("failed to spawn build tool: {e}")),
                );
            }
        };

        if !build.success() {
            discard_partial_pair(&exe_path, &args_path);
            return record(RunStatus::BuildFailed, Some(build), None, None);
        }

        if !exe_path.is_file() || !args_path.is_file() {
            let message = format!(
                "build reported success but did not produce {}",
                if exe_path.is_file() {
                    args_path.display()
                } else {
                    exe_path.display()
                }
            );
            discard_partial_pair(&exe_path, &args_path);
            return record(RunStatus::Skipped, Some(build), None, Some(message));
        }

        let args = match fs::read_to_string(&args_path) {
            Ok(contents) => contents.trim_end().to_owned(),
            Err(e) => {
                return record(
                    RunStatus::Skipped,
                    Some(build),
                    None,
                    Some(format!("failed to read {}: {e}", args_path.display())),
                );
            }
        };

        let measure = match self.measure(&exe_path, &args, &report_path) {
            Ok(capture) => capture,
            Err(e) => {
                return record(
                    RunStatus::MeasureFailed,
                    Some(build),
                    None,
                    Some(format!("failed to spawn measurement tool: {e}")),
                );
            }
        };

        let status = if measure.success() {
            RunStatus::Success
        } else {
            RunStatus::MeasureFailed
        };
        record(status, Some(build), Some(measure), None)
    }

    fn build(
        &self,
        bench: &BenchmarkInput,
        mode: &OptMode,
        exe_path: &Path,
    ) -> io::Result<ProcessCapture> {
        let (program, leading) = self
            .config
            .build
            .command
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty build command"))?;

        let invocation = Invocation::new(program)
            .args(leading.iter().cloned())
            .arg(bench.path.to_string_lossy())
            .arg("--run-mode")
            .arg(format!("compile-{}", self.config.build.backend))
            .args(mode.flags())
            .arg("-o")
            .arg(exe_path.to_string_lossy());

        tracing::debug!(command = %invocation.command_line(), "build");
        invocation.run()
    }

    fn measure(
        &self,
        exe_path: &Path,
        args: &str,
        report_path: &Path,
    ) -> io::Result<ProcessCapture> {
        let command_line = if args.is_empty() {
            exe_path.display().to_string()
        } else {
            format!("{} {args}", exe_path.display())
        };

        let invocation = Invocation::new(&self.config.measure.command)
            .arg("--warmup")
            .arg(self.config.measure.warmup.to_string())
            .arg("--export-json")
            .arg(report_path.to_string_lossy())
            .arg(command_line);

        tracing::debug!(command = %invocation.command_line(), "measure");
        invocation.run()
    }
}

/// Remove whichever half of the executable/args pair exists without the
/// other, so a failed build never leaves a partially-written pair behind.
fn discard_partial_pair(exe_path: &Path, args_path: &Path) {
    match (exe_path.is_file(), args_path.is_file()) {
        (true, false) => remove_quiet(exe_path),
        (false, true) => remove_quiet(args_path),
        _ => {}
    }
}

fn remove_quiet(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::debug!(path = %path.display(), error = %e, "failed to remove orphan artifact");
    }
}
