// src/analysis/mod.rs
//! Core analysis logic (The "Rule Engine").

pub mod large_tuple;
pub mod tuples;

use crate::config::Config;
use crate::error::LintError;
use crate::syntax::{self, LineIndex};
use crate::types::{FileReport, Finding, ScanReport};
use colored::Colorize;
use large_tuple::LargeTupleRule;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub use large_tuple::RULE_ID;
pub use tuples::{scan_tuples, TupleObservation};

const IGNORE_DIRECTIVE: &str = "tuplelint:ignore";

pub struct RuleEngine {
    config: Config,
    rule: LargeTupleRule,
}

impl RuleEngine {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rule = LargeTupleRule::new(&config.rules.large_tuple);
        Self { config, rule }
    }

    /// Analyzes every file independently; report order follows `files`.
    #[must_use]
    #[allow(clippy::needless_pass_by_value)]
    pub fn scan(&self, files: Vec<PathBuf>) -> ScanReport {
        let start = std::time::Instant::now();

        let results: Vec<FileReport> = files
            .par_iter()
            .map(|path| self.analyze_file(path))
            .collect();

        let total_violations: usize = results.iter().map(|r| r.findings.len()).sum();

        ScanReport {
            files: results,
            total_violations,
            duration_ms: start.elapsed().as_millis(),
        }
    }

    fn analyze_file(&self, path: &Path) -> FileReport {
        match std::fs::read_to_string(path) {
            Ok(source) => self.analyze_source(path, &source),
            Err(e) => self.failed(path, &LintError::io(e, path)),
        }
    }

    /// Runs the check over in-memory source attributed to `path`.
    #[must_use]
    pub fn analyze_source(&self, path: &Path, source: &str) -> FileReport {
        let mut report = FileReport::new(path.to_path_buf());
        if Self::has_ignore_directive(source) {
            return report;
        }

        let root = match syntax::parse(source) {
            Ok(root) => root,
            Err(e) => return self.failed(path, &e),
        };

        let observations = scan_tuples(&root);
        report.tuple_count = observations.len();
        let index = LineIndex::new(source);
        report.findings = self
            .rule
            .evaluate(observations)
            .into_iter()
            .map(|violation| {
                let (line, column) = index.location(violation.position);
                Finding {
                    line,
                    column,
                    violation,
                }
            })
            .collect();
        report
    }

    fn failed(&self, path: &Path, error: &LintError) -> FileReport {
        if self.config.verbose {
            eprintln!("{} {}: {error}", "warn:".yellow(), path.display());
        }
        let mut report = FileReport::new(path.to_path_buf());
        report.parse_error = Some(error.to_string());
        report
    }

    fn has_ignore_directive(source: &str) -> bool {
        source
            .lines()
            .take(5)
            .any(|line| line.contains(IGNORE_DIRECTIVE))
    }
}
