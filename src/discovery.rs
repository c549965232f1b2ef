// src/discovery.rs
use crate::config::{Config, PRUNE_DIRS, SOURCE_EXT_PATTERN};
use colored::Colorize;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static SOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SOURCE_EXT_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));

/// Collects the Swift files under `roots`, sorted and deduplicated.
///
/// Files named explicitly are kept even when a pruned directory holds them;
/// config include/exclude patterns apply to every path.
#[must_use]
pub fn discover(roots: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
        } else {
            files.extend(walk_filesystem(root, config.verbose));
        }
    }
    files.retain(|p| is_source_file(p));
    files.sort();
    files.dedup();
    filter_config(files, config)
}

fn walk_filesystem(root: &Path, verbose: bool) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy()));

    let (paths, error_count) = accumulate_walker(walker);
    if error_count > 0 && verbose {
        eprintln!(
            "{} Encountered {error_count} errors during file walk of {}",
            "warn:".yellow(),
            root.display()
        );
    }
    paths
}

fn accumulate_walker<I>(walker: I) -> (Vec<PathBuf>, usize)
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    let p = entry.path().strip_prefix(".").unwrap_or(entry.path());
                    paths.push(p.to_path_buf());
                }
            }
            Err(_) => errors += 1,
        }
    }
    (paths, errors)
}

fn should_prune(name: &str) -> bool {
    PRUNE_DIRS.contains(&name)
}

fn is_source_file(path: &Path) -> bool {
    let filename = path.file_name().map_or("", |f| f.to_str().unwrap_or(""));
    SOURCE_RE.is_match(filename)
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn filter_config(mut paths: Vec<PathBuf>, config: &Config) -> Vec<PathBuf> {
    if !config.include_patterns.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            config.include_patterns.iter().any(|re| re.is_match(&s))
        });
    }

    if !config.exclude_patterns.is_empty() {
        paths.retain(|p| {
            let s = normalize_path(p);
            !config.exclude_patterns.iter().any(|re| re.is_match(&s))
        });
    }

    paths
}
