// src/bin/tuplelint.rs
use clap::Parser;
use colored::Colorize;

use tuplelint_core::cli::handlers::handle_scan;
use tuplelint_core::cli::Cli;
use tuplelint_core::exit::LintExit;

fn main() -> LintExit {
    let cli = Cli::parse();
    match handle_scan(&cli) {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            LintExit::Error
        }
    }
}
