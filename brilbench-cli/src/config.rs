//! Configuration loading from brilbench.toml
//!
//! Harness configuration can be specified in a `brilbench.toml` file,
//! discovered by walking up from the current directory. Every field is
//! defaulted, so with no file at all the harness runs the stock setup:
//! the three bril corpus tiers, `cargo run --release` as the build tool,
//! and `hyperfine` with two warmup runs as the measurement tool.
//!
//! The loaded value is immutable; the driver and executor receive it by
//! reference and never mutate it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Corpus discovery configuration.
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Build tool configuration.
    #[serde(default)]
    pub build: BuildConfig,
    /// Measurement tool configuration.
    #[serde(default)]
    pub measure: MeasureConfig,
    /// Output location configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Corpus discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory the corpus patterns are resolved under.
    #[serde(default = "default_corpus_root")]
    pub root: PathBuf,
    /// Glob tiers, resolved in order.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_corpus_root(),
            patterns: default_patterns(),
        }
    }
}

fn default_corpus_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_patterns() -> Vec<String> {
    vec![
        "tests/*.bril".to_owned(),
        "tests/small/*.bril".to_owned(),
        "tests/brils/passing/**/*.bril".to_owned(),
    ]
}

/// Build tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// The build command; the first element is the program, the rest are
    /// leading arguments placed before the per-run arguments.
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,
    /// Backend selector; renders as `--run-mode compile-<backend>` and
    /// labels every aggregated record.
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: default_build_command(),
            backend: default_backend(),
        }
    }
}

fn default_build_command() -> Vec<String> {
    vec![
        "cargo".to_owned(),
        "run".to_owned(),
        "--release".to_owned(),
    ]
}

fn default_backend() -> String {
    "brilift".to_owned()
}

/// Measurement tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureConfig {
    /// The measurement program.
    #[serde(default = "default_measure_command")]
    pub command: String,
    /// Warmup iterations passed to the measurement tool.
    #[serde(default = "default_warmup")]
    pub warmup: u32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            command: default_measure_command(),
            warmup: default_warmup(),
        }
    }
}

fn default_measure_command() -> String {
    "hyperfine".to_owned()
}

fn default_warmup() -> u32 {
    2
}

/// Output location configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory holding one subdirectory of artifacts per benchmark.
    #[serde(default = "default_bench_dir")]
    pub bench_dir: PathBuf,
    /// Destination of the aggregated report.
    #[serde(default = "default_report_path")]
    pub report: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bench_dir: default_bench_dir(),
            report: default_report_path(),
        }
    }
}

fn default_bench_dir() -> PathBuf {
    PathBuf::from("tmp/bench")
}

fn default_report_path() -> PathBuf {
    PathBuf::from("nightly/data/profile.json")
}

impl BenchConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("brilbench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Reject configurations the executor cannot act on.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.build.command.is_empty() {
            anyhow::bail!("build.command must name a program");
        }
        if self.measure.command.is_empty() {
            anyhow::bail!("measure.command must name a program");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_the_stock_setup() {
        let config = BenchConfig::default();
        assert_eq!(config.corpus.patterns.len(), 3);
        assert_eq!(config.corpus.patterns[0], "tests/*.bril");
        assert_eq!(config.build.command, ["cargo", "run", "--release"]);
        assert_eq!(config.build.backend, "brilift");
        assert_eq!(config.measure.command, "hyperfine");
        assert_eq!(config.measure.warmup, 2);
        assert_eq!(config.output.bench_dir, PathBuf::from("tmp/bench"));
        assert_eq!(
            config.output.report,
            PathBuf::from("nightly/data/profile.json")
        );
    }

    #[test]
    fn partial_toml_keeps_defaults_elsewhere() {
        let toml_str = r#"
            [measure]
            warmup = 5

            [output]
            bench_dir = "scratch/bench"
        "#;

        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.measure.warmup, 5);
        assert_eq!(config.measure.command, "hyperfine");
        assert_eq!(config.output.bench_dir, PathBuf::from("scratch/bench"));
        // Untouched sections still apply defaults
        assert_eq!(config.build.backend, "brilift");
        assert_eq!(config.corpus.patterns.len(), 3);
    }

    #[test]
    fn empty_build_command_is_rejected() {
        let toml_str = r#"
            [build]
            command = []
        "#;
        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brilbench.toml");
        std::fs::write(
            &path,
            r#"
                [build]
                backend = "llvm"
            "#,
        )
        .unwrap();

        let config = BenchConfig::load(&path).unwrap();
        assert_eq!(config.build.backend, "llvm");
    }
}
