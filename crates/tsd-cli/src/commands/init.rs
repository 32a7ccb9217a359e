//! Implementation of the `tsd init` command.

use crate::utils::print_status;
use anyhow::{Context, Result};
use std::path::Path;
use tsd_utils::{CONFIG_FILE, Config};

/// Executes the `init` command, writing a default tsd.toml in the current directory.
///
/// # Errors
/// Returns an error if tsd.toml already exists or cannot be written.
pub fn execute(name: Option<&str>) -> Result<()> {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;

    if Path::new(CONFIG_FILE).exists() {
        anyhow::bail!("{CONFIG_FILE} already exists in current directory");
    }

    let project_name = name
        .or_else(|| current_dir.file_name().and_then(|n| n.to_str()))
        .unwrap_or("tsd-project");

    Config::new(project_name).save(CONFIG_FILE)?;

    print_status("Created", &format!("TSD project '{project_name}'"));
    println!();
    println!("List your AST documents under [project] sources, then run:");
    println!("  tsd check");

    Ok(())
}
