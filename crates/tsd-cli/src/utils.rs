//! Utility functions shared across the CLI.

use colored::Colorize;
use tsd_core::{Diagnostic, Error};

/// Prints a status message with colored output.
pub fn print_status(status: &str, message: &str) {
    println!("{} {message}", status.green().bold());
}

/// Prints a non-blocking merge diagnostic to stderr.
pub fn print_diagnostic(diagnostic: &Diagnostic) {
    eprintln!("{} {diagnostic}", "warning:".yellow().bold());
}

/// Prints an error found by whole-program validation to stderr.
pub fn print_error(error: &Error) {
    eprintln!("{} {error}", "error:".red().bold());
}
