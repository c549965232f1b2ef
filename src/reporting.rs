//! Console and JSON output for scan results.

use crate::types::{Finding, ScanReport, Severity};
use anyhow::Result;
use colored::Colorize;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use std::time::Duration;

const WHY: &str = "Large tuples hide what each position means; callers end up matching on .0, .1, .2.";
const FIX: &str = "Introduce a struct with named fields, or label every tuple member.";

/// Prints a formatted scan report to stdout.
///
/// # Errors
/// Returns error if formatting fails.
pub fn print_report(report: &ScanReport) -> Result<()> {
    print!("{}", render_report(report, true)?);
    Ok(())
}

/// Renders the report as text. `snippets` reads each file with findings once
/// to show the offending lines.
///
/// # Errors
/// Returns error if formatting fails.
pub fn render_report(report: &ScanReport, snippets: bool) -> Result<String> {
    let mut out = String::new();
    let mut explained = false;
    for file in &report.files {
        let content = if snippets && !file.findings.is_empty() {
            fs::read_to_string(&file.path).ok()
        } else {
            None
        };
        if let Some(reason) = &file.parse_error {
            writeln!(
                out,
                "{} {}: could not be analyzed: {reason}",
                "skipped:".dimmed(),
                file.path.display()
            )?;
        }
        for finding in &file.findings {
            render_finding(&mut out, &file.path, finding)?;
            if let Some(content) = &content {
                render_snippet(&mut out, content, finding)?;
            }
            if !explained {
                render_guidance(&mut out)?;
                explained = true;
            }
            out.push('\n');
        }
    }
    render_summary(&mut out, report)?;
    Ok(out)
}

fn render_finding(out: &mut String, path: &Path, finding: &Finding) -> std::fmt::Result {
    let v = &finding.violation;
    let header = format!("{}: {}", v.severity, v.message);
    match v.severity {
        Severity::Error => writeln!(out, "{}", header.red().bold())?,
        Severity::Warning => writeln!(out, "{}", header.yellow())?,
    }
    writeln!(
        out,
        "  {} {}:{}:{} ({})",
        "-->".blue(),
        path.display(),
        finding.line,
        finding.column,
        v.rule
    )
}

fn render_snippet(out: &mut String, content: &str, finding: &Finding) -> std::fmt::Result {
    let Some(line) = content.lines().nth(finding.line.saturating_sub(1)) else {
        return Ok(());
    };
    let gutter = format!("{:3} |", finding.line);
    writeln!(out, "   {}", "|".blue())?;
    writeln!(out, "   {} {}", gutter.blue(), line)?;
    let spaces = " ".repeat(finding.column.saturating_sub(1));
    writeln!(out, "   {} {}{}", "|".blue(), spaces, "^".red().bold())
}

fn render_guidance(out: &mut String) -> std::fmt::Result {
    writeln!(out, "   {} {} {}", "=".blue(), "WHY:".cyan(), WHY)?;
    writeln!(out, "   {} {} {}", "=".blue(), "FIX:".green(), FIX)?;
    writeln!(
        out,
        "   {} {}",
        "=".blue(),
        "SUPPRESS: add `// tuplelint:ignore` to the first lines of the file".dimmed()
    )
}

fn render_summary(out: &mut String, report: &ScanReport) -> std::fmt::Result {
    #[allow(clippy::cast_possible_truncation)]
    let duration = Duration::from_millis(report.duration_ms as u64);
    let errors = report.count_of(Severity::Error);
    let warnings = report.count_of(Severity::Warning);
    let files = report.files.len();
    let skipped = report.parse_failures();
    if skipped > 0 {
        writeln!(
            out,
            "{} {skipped} {} could not be analyzed.",
            "NOTE".yellow().bold(),
            pluralize("file", skipped)
        )?;
    }

    if errors == 0 && warnings == 0 {
        return writeln!(
            out,
            "{} No large tuples in {files} {} ({duration:?}).",
            "OK".green().bold(),
            pluralize("file", files)
        );
    }

    let mut parts: Vec<String> = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} {}", pluralize("error", errors)));
    }
    if warnings > 0 {
        parts.push(format!("{warnings} {}", pluralize("warning", warnings)));
    }
    let dirty = files - report.clean_file_count();
    writeln!(
        out,
        "{} {} in {dirty} of {files} {} ({duration:?}).",
        "FOUND".red().bold(),
        parts.join(", "),
        pluralize("file", files)
    )
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Prints any serializable value as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn print_json<T: serde::Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{json}");
    Ok(())
}
