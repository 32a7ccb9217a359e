//! Implementation of the `tsd check` command.

use crate::pipeline::{merge_files, resolve_inputs};
use crate::utils::{print_diagnostic, print_error, print_status};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Executes the `check` command.
///
/// Merges every document, reports the non-blocking diagnostics, then
/// validates the accumulated program as a whole.
///
/// # Errors
/// Returns an error if any document is blocked or any problem was found.
pub fn execute(files: &[PathBuf]) -> Result<()> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    let inputs = resolve_inputs(files, &current_dir)?;
    let state = merge_files(&inputs)?;

    let mut problems = state.errors().len();
    for diagnostic in state.errors() {
        print_diagnostic(diagnostic);
    }

    match state.analyze() {
        Ok(analysis) => {
            problems += analysis.discarded.len();
            for error in &analysis.discarded {
                print_error(error);
            }
        }
        Err(error) => {
            problems += 1;
            print_error(&error);
        }
    }

    if problems > 0 {
        anyhow::bail!("found {problems} problem(s) in {} file(s)", inputs.files.len());
    }

    print_status(
        "Checked",
        &format!(
            "{} file(s): {} type(s), {} rule(s), {} fact(s)",
            state.files_parsed().len(),
            state.types().count(),
            state.rules().len(),
            state.facts().len() + state.assignments().len()
        ),
    );
    Ok(())
}
