// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::{CONFIG_FILE, IGNORE_FILE};
pub use self::types::{
    Config, LabelExemption, LargeTupleConfig, RuleConfig, ScanConfig, SeverityThreshold,
    TupleLintToml,
};
use crate::error::Result;
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from `tuplelint.toml` and `.tuplelintignore` in `root`.
    ///
    /// # Errors
    /// Returns error if either file exists but cannot be read, is not valid
    /// TOML, or contains an invalid pattern.
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::new();
        config.load_local_config(root)?;
        Ok(config)
    }

    /// Creates a config from an explicit TOML file, ignoring the scan root.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::new();
        io::load_toml_file(&mut config, path)?;
        Ok(config)
    }

    /// # Errors
    /// Propagates read, TOML and regex errors.
    pub fn load_local_config(&mut self, root: &Path) -> Result<()> {
        io::load_ignore_file(self, root)?;
        io::load_toml_config(self, root)
    }

    /// # Errors
    /// Returns error if the line is not a valid regex.
    pub fn process_ignore_line(&mut self, line: &str) -> Result<()> {
        io::process_ignore_line(self, line)
    }

    /// # Errors
    /// Returns error on malformed TOML, unknown `[large_tuple]` keys or bad patterns.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        io::parse_toml(self, content)
    }
}

// Directories never worth descending into.
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    ".build",
    ".swiftpm",
    "build",
    "DerivedData",
    "Pods",
    "Carthage",
    "node_modules",
    "target",
    "vendor",
];

pub const SOURCE_EXT_PATTERN: &str = r"(?i)\.swift$";
