use super::types::{Config, TupleLintToml};
use crate::error::{LintError, Result};
use colored::Colorize;
use regex::Regex;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "tuplelint.toml";
pub const IGNORE_FILE: &str = ".tuplelintignore";

pub fn load_ignore_file(config: &mut Config, root: &Path) -> Result<()> {
    let path = root.join(IGNORE_FILE);
    if !path.is_file() {
        return Ok(());
    }
    let content = fs::read_to_string(&path).map_err(|e| LintError::io(e, &path))?;
    for line in content.lines() {
        process_ignore_line(config, line)?;
    }
    Ok(())
}

pub fn process_ignore_line(config: &mut Config, line: &str) -> Result<()> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(());
    }
    config.exclude_patterns.push(Regex::new(trimmed)?);
    Ok(())
}

pub fn load_toml_config(config: &mut Config, root: &Path) -> Result<()> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(());
    }
    load_toml_file(config, &path)
}

pub fn load_toml_file(config: &mut Config, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| LintError::io(e, path))?;
    parse_toml(config, &content)?;
    if config.verbose {
        eprintln!("{} loaded {}", "info:".cyan(), path.display());
    }
    Ok(())
}

pub fn parse_toml(config: &mut Config, content: &str) -> Result<()> {
    let parsed: TupleLintToml = toml::from_str(content)?;
    config.rules.large_tuple = parsed.large_tuple;
    config.verbose |= parsed.scan.verbose;
    for pattern in &parsed.scan.include {
        config.include_patterns.push(Regex::new(pattern)?);
    }
    for pattern in &parsed.scan.exclude {
        config.exclude_patterns.push(Regex::new(pattern)?);
    }
    Ok(())
}
