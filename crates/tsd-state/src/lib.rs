//! Incremental program state for TSD.
//!
//! A [`ProgramState`] accumulates the types, rules and facts of program
//! fragments merged one after another, typically one per source file.
//! Problems confined to a single rule or fact are recorded as diagnostics
//! and the offending item is skipped; problems that make the accumulated
//! program itself inconsistent abort the merge.

mod merge;
mod state;
mod types;

pub use merge::MergeReport;
pub use state::ProgramState;
