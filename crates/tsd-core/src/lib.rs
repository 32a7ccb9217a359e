//! Core types and utilities for the TSD semantic analyzer.
//!
//! This crate provides the fixed vocabulary of the language, the static type
//! model, the builtin function registry, error handling and diagnostics
//! shared across all analysis stages.

pub mod diagnostic;
pub mod duration;
pub mod error;
pub mod limits;
pub mod text;
pub mod type_system;
pub mod vocabulary;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{Error, ErrorKind, Result};
pub use limits::Limits;
