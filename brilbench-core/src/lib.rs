#![warn(missing_docs)]
//! Brilbench Core - Matrix Building Blocks
//!
//! This crate provides the leaf components of the benchmark matrix:
//! - Corpus enumeration over the configured glob tiers
//! - The fixed, ordered optimization mode table
//! - Captured external-process invocation
//! - Per-run outcome types collected by the matrix driver

mod corpus;
mod modes;
mod process;
mod run;

pub use corpus::{enumerate_corpus, BenchmarkInput, CorpusError};
pub use modes::{OptMode, MODES};
pub use process::{Invocation, ProcessCapture};
pub use run::{RunRecord, RunStatus};
