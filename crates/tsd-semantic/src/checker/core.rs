//! Core validator structure.

use crate::checker::actions::ActionValidator;
use crate::checker::xuple::XupleSpace;
use crate::type_system::TypeSystem;
use std::sync::Arc;
use tsd_core::{Error, Limits};
use tsd_core::type_system::FunctionRegistry;

/// Validator for TSD programs.
///
/// Holds only configuration; every check receives the type system it runs
/// against, so one validator can serve both whole programs and the
/// incremental merge.
#[derive(Debug, Clone)]
pub struct Validator {
    pub(crate) limits: Limits,
    /// Functions callable from constraints
    pub(crate) functions: Arc<FunctionRegistry>,
}

impl Validator {
    /// Creates a validator with default limits and the process-wide
    /// function registry.
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            functions: FunctionRegistry::global(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Uses an isolated function registry instead of the process-wide one.
    #[must_use]
    pub fn with_functions(mut self, functions: Arc<FunctionRegistry>) -> Self {
        self.functions = functions;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn functions(&self) -> &Arc<FunctionRegistry> {
        &self.functions
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of validating a whole program.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Declared types plus the variables bound by fact assignments
    pub type_system: TypeSystem,
    /// Default and program-declared actions
    pub actions: ActionValidator,
    pub xuple_spaces: Vec<XupleSpace>,
    /// Non-blocking problems: rules dropped for reusing an earlier id
    pub discarded: Vec<Error>,
}
