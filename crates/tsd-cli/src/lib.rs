//! TSD CLI library for testing and reusability.

pub mod pipeline;
pub mod utils;

pub use pipeline::{Inputs, load_document, merge_files, resolve_inputs};
pub use tsd_utils::Config;
