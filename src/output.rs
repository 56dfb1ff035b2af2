//! Level-tagged status lines for the terminal.
//!
//! Status output goes to stderr; stdout is reserved for machine-readable
//! results (the usage text and release tag names).

use colored::Colorize;

pub fn info(message: &str) {
    eprintln!("{} {message}", "info:".cyan().bold());
}

pub fn success(message: &str) {
    eprintln!("{} {message}", "done:".green().bold());
}

pub fn warn(message: &str) {
    eprintln!("{} {message}", "warn:".yellow().bold());
}

pub fn error(message: &str) {
    eprintln!("{} {message}", "error:".red().bold());
}

/// Echo an external command line before it runs.
pub fn command(line: &str) {
    eprintln!("{} {}", "+".dimmed(), line.dimmed());
}
