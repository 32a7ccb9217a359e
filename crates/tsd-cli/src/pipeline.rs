//! Loading AST documents and merging them into program state.

use anyhow::{Context, Result};
use miette::NamedSource;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tsd_core::Limits;
use tsd_state::ProgramState;
use tsd_utils::Config;

/// Documents to merge and the limits to analyze them with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub files: Vec<PathBuf>,
    pub limits: Limits,
}

/// Picks the documents to merge.
///
/// Explicit files win; otherwise the `sources` of the nearest `tsd.toml`
/// are used. Limits come from the configuration when one is found.
///
/// # Errors
/// Returns an error if no files are given and no usable configuration is
/// found, or if the configuration lists no sources.
pub fn resolve_inputs(files: &[PathBuf], start: &Path) -> Result<Inputs> {
    if !files.is_empty() {
        let limits = Config::find_from(start)
            .map(|(config, _)| config.limits())
            .unwrap_or_default();
        return Ok(Inputs {
            files: files.to_vec(),
            limits,
        });
    }

    let (config, root) = Config::find_from(start)
        .with_context(|| "No input files given and not in a TSD project directory")?;
    let files = config.source_paths(&root);
    if files.is_empty() {
        anyhow::bail!(
            "No input files given and '{}' lists no sources",
            root.join(tsd_utils::CONFIG_FILE).display()
        );
    }
    Ok(Inputs {
        files,
        limits: config.limits(),
    })
}

/// Reads one AST document from disk.
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON or nests
/// too deeply to be read.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    tsd_ast::parse_json(&content)
        .with_context(|| format!("Failed to parse '{}' as JSON", path.display()))
}

/// Merges the documents in order into a fresh program state.
///
/// Non-blocking problems stay in the returned state's diagnostics. A
/// blocking error is rendered to stderr and stops the merge.
///
/// # Errors
/// Returns an error if a document cannot be loaded or a merge is blocked.
pub fn merge_files(inputs: &Inputs) -> Result<ProgramState> {
    let mut state = ProgramState::new().with_limits(inputs.limits);

    for path in &inputs.files {
        let document = load_document(path)?;
        let source = path.display().to_string();
        let report = state.merge_document(&document, &source).map_err(|e| {
            let report = miette::Report::new(e)
                .with_source_code(NamedSource::new(source.clone(), document.to_string()));
            eprintln!("{report:?}");
            anyhow::anyhow!("Merging '{source}' failed")
        })?;
        debug!(
            source = %source,
            rules = report.rules_added,
            facts = report.facts_added,
            diagnostics = report.diagnostics,
            "document merged"
        );
    }

    info!(
        files = state.files_parsed().len(),
        diagnostics = state.errors().len(),
        "all documents merged"
    );
    Ok(state)
}
