//! Ingest implementation modules.

mod constraints;
mod helpers;
mod ingestor;
mod rules;
mod types;
mod xuple;

pub use ingestor::Ingestor;
