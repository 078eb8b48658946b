#![warn(missing_docs)]
//! Brilbench CLI Library
//!
//! Ties the harness together: load configuration, enumerate the corpus,
//! drive the (benchmark × mode) matrix, summarize the run records, and
//! aggregate the timing reports into the combined profile.
//!
//! The default invocation takes no arguments and runs the full matrix
//! followed by aggregation; every flag is an optional override. Exit
//! status reflects only fatal errors (setup collisions, configuration
//! problems, aggregation parse failures) — individual run failures are
//! reported in the summary and never change the exit status.

mod config;
mod driver;
mod executor;
mod summary;

pub use config::*;
pub use driver::{MatrixDriver, SetupError};
pub use executor::RunExecutor;
pub use summary::{format_summary, StatusCounts};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use brilbench_core::{enumerate_corpus, BenchmarkInput, RunRecord, MODES};
use brilbench_report::{aggregate_reports, write_report};
use clap::{Parser, Subcommand};
use regex::Regex;

/// Brilbench CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "brilbench")]
#[command(author, version, about = "Compile a bril corpus under fixed optimization modes and time the results")]
pub struct Cli {
    /// Optional subcommand (run, list, aggregate); defaults to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter benchmarks by regex pattern on their base name
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Configuration file (defaults to discovering brilbench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the benchmark output directory
    #[arg(long)]
    pub bench_dir: Option<PathBuf>,

    /// Override the aggregated report path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the measurement warmup count
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Write the full per-run record log as JSON
    #[arg(long)]
    pub run_log: Option<PathBuf>,

    /// List the matrix without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full matrix, then aggregate (default)
    Run,
    /// List the enumerated corpus and mode table
    List,
    /// Aggregate an existing bench tree without running anything
    Aggregate,
}

/// Run the brilbench CLI. This is the binary entry point.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the brilbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let env_filter = if cli.verbose {
        "brilbench=debug"
    } else {
        "brilbench=info"
    };
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();

    // Load brilbench.toml (explicit path wins), then apply CLI overrides.
    // The resulting value is immutable for the rest of the run.
    let mut config = match &cli.config {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => BenchConfig::discover().unwrap_or_default(),
    };
    if let Some(dir) = &cli.bench_dir {
        config.output.bench_dir = dir.clone();
    }
    if let Some(report) = &cli.output {
        config.output.report = report.clone();
    }
    if let Some(warmup) = cli.warmup {
        config.measure.warmup = warmup;
    }
    config.validate()?;
    let config = config;

    match cli.command {
        Some(Commands::List) => list_matrix(&cli, &config),
        Some(Commands::Aggregate) => aggregate_only(&config),
        Some(Commands::Run) | None => {
            if cli.dry_run {
                list_matrix(&cli, &config)
            } else {
                run_matrix(&cli, &config)
            }
        }
    }
}

/// Enumerate the corpus and apply the CLI regex filter.
fn enumerate_filtered(cli: &Cli, config: &BenchConfig) -> anyhow::Result<Vec<BenchmarkInput>> {
    let corpus = enumerate_corpus(&config.corpus.root, &config.corpus.patterns)?;
    let re = Regex::new(&cli.filter)
        .with_context(|| format!("invalid benchmark filter '{}'", cli.filter))?;
    Ok(corpus
        .into_iter()
        .filter(|bench| re.is_match(&bench.name))
        .collect())
}

fn run_matrix(cli: &Cli, config: &BenchConfig) -> anyhow::Result<()> {
    let corpus = enumerate_filtered(cli, config)?;
    if corpus.is_empty() {
        println!("No benchmarks found.");
        return Ok(());
    }

    println!(
        "Running {} benchmarks x {} modes, sequentially...\n",
        corpus.len(),
        MODES.len()
    );

    let records = MatrixDriver::new(config).run(&corpus, &MODES)?;
    print!("{}", format_summary(&records));

    if let Some(path) = &cli.run_log {
        write_run_log(&records, path)?;
        eprintln!("Run log written to: {}", path.display());
    }

    aggregate_only(config)
}

fn aggregate_only(config: &BenchConfig) -> anyhow::Result<()> {
    let report = aggregate_reports(&config.output.bench_dir, &config.build.backend)?;
    write_report(&report, &config.output.report)?;
    println!(
        "Aggregated {} records into {}",
        report.len(),
        config.output.report.display()
    );
    Ok(())
}

fn list_matrix(cli: &Cli, config: &BenchConfig) -> anyhow::Result<()> {
    let corpus = enumerate_filtered(cli, config)?;

    println!("Benchmark matrix plan:");
    for bench in &corpus {
        println!("├── {} ({})", bench.name, bench.path.display());
    }
    let mode_names: Vec<&str> = MODES.iter().map(|m| m.name).collect();
    println!("Modes: {}", mode_names.join(", "));
    println!(
        "{} benchmarks x {} modes = {} runs.",
        corpus.len(),
        MODES.len(),
        corpus.len() * MODES.len()
    );
    Ok(())
}

/// Write the collected run records as pretty-printed JSON.
fn write_run_log(records: &[RunRecord], path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write run log {}", path.display()))?;
    Ok(())
}
