//! Captured External Invocation
//!
//! Every external tool call goes through [`Invocation`], which blocks until
//! the child exits and records exit code, both output streams, and elapsed
//! wall time. There is no timeout: a hung tool hangs the harness, and the
//! matrix driver relies on that blocking behavior for measurement validity.

use std::io;
use std::process::{Command, Stdio};
use std::time::Instant;

use serde::Serialize;

/// Captured outcome of one external invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessCapture {
    /// Exit code, or `None` if the child was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Everything the child wrote to stdout.
    pub stdout: String,
    /// Everything the child wrote to stderr.
    pub stderr: String,
    /// Wall-clock time from spawn to exit, in milliseconds.
    pub duration_ms: u64,
}

impl ProcessCapture {
    /// Whether the child exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// One external command, built up then run to completion.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The full command line, for logging.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Spawn the command and block until it exits.
    ///
    /// Returns `Err` only when the child could not be spawned at all
    /// (program missing, permission denied); a child that runs and fails
    /// is a successful capture with a non-zero exit code.
    pub fn run(&self) -> io::Result<ProcessCapture> {
        let start = Instant::now();
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()?;

        Ok(ProcessCapture {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_exit_code() {
        let capture = Invocation::new("/bin/sh")
            .args(["-c", "echo hello"])
            .run()
            .unwrap();
        assert!(capture.success());
        assert_eq!(capture.exit_code, Some(0));
        assert_eq!(capture.stdout, "hello\n");
        assert!(capture.stderr.is_empty());
    }

    #[test]
    fn nonzero_exit_is_a_capture_not_an_error() {
        let capture = Invocation::new("/bin/sh")
            .args(["-c", "echo oops >&2; exit 3"])
            .run()
            .unwrap();
        assert!(!capture.success());
        assert_eq!(capture.exit_code, Some(3));
        assert_eq!(capture.stderr, "oops\n");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let result = Invocation::new("/nonexistent/brilbench-tool").run();
        assert!(result.is_err());
    }

    #[test]
    fn command_line_joins_program_and_args() {
        let invocation = Invocation::new("hyperfine")
            .args(["--warmup", "2"])
            .arg("./tmp/bench/foo/no_optimize 5");
        assert_eq!(
            invocation.command_line(),
            "hyperfine --warmup 2 ./tmp/bench/foo/no_optimize 5"
        );
    }
}
