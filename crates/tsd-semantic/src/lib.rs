//! Semantic analysis for TSD programs.
//!
//! This crate checks that a program is well-formed: every referenced name is
//! defined, every field access is valid, comparisons and action arguments
//! are type-compatible, and the identity invariants of facts hold. It
//! operates on the data model produced by `tsd-ast`.

mod checker;
mod scope;
mod type_system;

pub use checker::{
    ActionValidator, Analysis, ConsumptionPolicy, ExpressionAnalyzer, FactValidator,
    RetentionPolicy, SelectionPolicy, Validator, XupleSpace, default_actions,
};
pub use scope::{Binding, Scope};
pub use type_system::TypeSystem;

use tsd_ast::Program;
use tsd_core::{Limits, Result};

/// Validates a program with default limits.
///
/// # Errors
/// Returns the first blocking problem found, in phase order: types,
/// circularity, fact assignments, facts, actions, rules, xuple-spaces.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use tsd_ast::Program;
/// use tsd_semantic::analyze;
///
/// let program = Program::from_json(&json!({
///     "types": [{
///         "type": "typeDefinition",
///         "name": "User",
///         "fields": [{ "name": "name", "type": "string", "isPrimaryKey": true }]
///     }]
/// }))
/// .unwrap();
/// assert!(analyze(&program).is_ok());
/// ```
pub fn analyze(program: &Program) -> Result<Analysis> {
    Validator::new().check_program(program)
}

/// Validates a program with explicit limits.
pub fn analyze_with_limits(program: &Program, limits: Limits) -> Result<Analysis> {
    Validator::new().with_limits(limits).check_program(program)
}
