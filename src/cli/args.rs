use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tuplelint",
    version,
    about = "Flags Swift tuple types with too many unlabelled members"
)]
pub struct Cli {
    /// Files or directories to scan (defaults to the current directory)
    pub paths: Vec<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Read settings from this TOML file instead of `tuplelint.toml`
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Fail on warnings as well as errors
    #[arg(long)]
    pub strict: bool,
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
