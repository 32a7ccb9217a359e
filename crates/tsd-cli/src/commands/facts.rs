//! Implementation of the `tsd facts` command.

use crate::pipeline::{merge_files, resolve_inputs};
use crate::utils::print_diagnostic;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Executes the `facts` command, printing the evaluator-facing facts as
/// pretty JSON on stdout.
///
/// Facts skipped during the merge are reported on stderr and left out.
///
/// # Errors
/// Returns an error if merging or fact conversion fails.
pub fn execute(files: &[PathBuf]) -> Result<()> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    let inputs = resolve_inputs(files, &current_dir)?;
    let state = merge_files(&inputs)?;

    for diagnostic in state.errors() {
        print_diagnostic(diagnostic);
    }

    let facts = state.evaluator_facts()?;
    let json = serde_json::to_string_pretty(&facts).with_context(|| "Failed to serialize facts")?;
    println!("{json}");
    Ok(())
}
