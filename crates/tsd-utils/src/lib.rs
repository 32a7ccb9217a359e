//! Project-level utilities shared by TSD tools.

mod config;

pub use config::{AnalyzerConfig, CONFIG_FILE, Config, Project};
