// src/cli/handlers.rs
use crate::analysis::RuleEngine;
use crate::cli::args::{Cli, OutputFormat};
use crate::config::Config;
use crate::discovery;
use crate::exit::LintExit;
use crate::reporting;
use crate::types::{ScanReport, Severity};
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Handles a scan invocation.
///
/// # Errors
/// Returns error if the configuration cannot be loaded or output fails.
pub fn handle_scan(cli: &Cli) -> Result<LintExit> {
    let roots = scan_roots(&cli.paths);
    let mut config = load_config(cli, &roots)?;
    config.verbose |= cli.verbose;

    let files = discovery::discover(&roots, &config);
    if config.verbose {
        eprintln!("{} scanning {} Swift files", "info:".cyan(), files.len());
    }

    let engine = RuleEngine::new(config);
    let report = engine.scan(files);

    match cli.format {
        OutputFormat::Text => reporting::print_report(&report)?,
        OutputFormat::Json => reporting::print_json(&report)?,
    }

    Ok(exit_for(&report, cli.strict))
}

fn scan_roots(paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    }
}

// An explicit --config wins; otherwise settings come from the first
// directory being scanned.
fn load_config(cli: &Cli, roots: &[PathBuf]) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Ok(Config::from_file(path)?);
    }
    let base = roots
        .iter()
        .find(|p| p.is_dir())
        .map_or_else(|| Path::new("."), PathBuf::as_path);
    Ok(Config::load(base)?)
}

#[must_use]
pub fn exit_for(report: &ScanReport, strict: bool) -> LintExit {
    let failing = report.has_errors() || (strict && report.count_of(Severity::Warning) > 0);
    if failing {
        LintExit::ViolationsFound
    } else {
        LintExit::Success
    }
}
