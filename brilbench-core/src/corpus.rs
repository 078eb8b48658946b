//! Corpus Enumeration
//!
//! Resolves the configured glob tiers into the set of benchmark inputs.
//! A tier whose directories do not exist simply contributes nothing;
//! only a malformed pattern is an error.

use std::path::{Path, PathBuf};

use glob::glob;
use thiserror::Error;

/// Errors raised while resolving the corpus patterns.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// A configured glob pattern failed to parse.
    #[error("invalid corpus pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern as configured.
        pattern: String,
        /// Parse failure from the glob engine.
        source: glob::PatternError,
    },
}

/// One benchmark program from the corpus.
///
/// Identity is the base file name with path and extension stripped;
/// `tests/small/loop_sum.bril` becomes `loop_sum`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkInput {
    /// Source file path as matched by the corpus pattern.
    pub path: PathBuf,
    /// Base name used for the output directory and aggregated records.
    pub name: String,
}

impl BenchmarkInput {
    fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_stem()?.to_str()?.to_owned();
        Some(Self { path, name })
    }
}

/// Enumerate the corpus under `root` using the configured patterns.
///
/// Patterns are resolved in the order given; within a pattern the glob
/// engine returns paths in sorted order, so runs are reproducible.
/// Matches that are not regular files, and directory entries the walk
/// cannot read, are skipped.
pub fn enumerate_corpus(
    root: &Path,
    patterns: &[String],
) -> Result<Vec<BenchmarkInput>, CorpusError> {
    let mut inputs = Vec::new();

    for pattern in patterns {
        let full = root.join(pattern).to_string_lossy().into_owned();
        let paths = glob(&full).map_err(|source| CorpusError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                // Unreadable directory mid-walk: a tier is optional, skip it.
                Err(_) => continue,
            };
            if !path.is_file() {
                continue;
            }
            if let Some(input) = BenchmarkInput::from_path(path) {
                inputs.push(input);
            }
        }
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "@main {\n}\n").unwrap();
    }

    fn tier_patterns() -> Vec<String> {
        vec![
            "tests/*.bril".to_owned(),
            "tests/small/*.bril".to_owned(),
            "tests/brils/passing/**/*.bril".to_owned(),
        ]
    }

    #[test]
    fn enumerates_all_tiers() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("tests/fib.bril"));
        touch(&dir.path().join("tests/small/add.bril"));
        touch(&dir.path().join("tests/brils/passing/mem/alloc.bril"));

        let corpus = enumerate_corpus(dir.path(), &tier_patterns()).unwrap();
        let names: Vec<&str> = corpus.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["fib", "add", "alloc"]);
    }

    #[test]
    fn identity_strips_path_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("tests/small/loop_sum.bril"));

        let corpus = enumerate_corpus(dir.path(), &tier_patterns()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].name, "loop_sum");
        assert!(corpus[0].path.ends_with("tests/small/loop_sum.bril"));
    }

    #[test]
    fn missing_tiers_are_silently_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("tests/only.bril"));

        // small and passing tiers do not exist at all
        let corpus = enumerate_corpus(dir.path(), &tier_patterns()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].name, "only");
    }

    #[test]
    fn empty_root_yields_empty_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = enumerate_corpus(dir.path(), &tier_patterns()).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn within_a_pattern_order_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("tests/zeta.bril"));
        touch(&dir.path().join("tests/alpha.bril"));
        touch(&dir.path().join("tests/mid.bril"));

        let corpus = enumerate_corpus(dir.path(), &["tests/*.bril".to_owned()]).unwrap();
        let names: Vec<&str> = corpus.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn malformed_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = enumerate_corpus(dir.path(), &["tests/[*.bril".to_owned()]).unwrap_err();
        assert!(err.to_string().contains("tests/[*.bril"));
    }

    #[test]
    fn directories_are_not_inputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tests/odd.bril")).unwrap();
        touch(&dir.path().join("tests/real.bril"));

        let corpus = enumerate_corpus(dir.path(), &["tests/*.bril".to_owned()]).unwrap();
        let names: Vec<&str> = corpus.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["real"]);
    }
}
