// src/cli/mod.rs
//! CLI argument parsing and command handlers.

pub mod args;
pub mod handlers;

pub use args::{Cli, OutputFormat};
