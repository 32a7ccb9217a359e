//! Evaluator-facing representation of TSD facts.
//!
//! Every fact is flattened into a map from field name to native value,
//! tagged with its type name under `_type_` and identified by a generated
//! `_id_`:
//!
//! - types with a primary key get `Type~value1~value2`, the key values in
//!   declaration order
//! - other types get `Type~` followed by a 16 hex digit fingerprint of the
//!   fact's fields
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tsd_ast::Program;
//!
//! let program = Program::from_json(&json!({
//!     "types": [{"name": "User", "fields": [
//!         {"name": "name", "type": "string", "isPrimaryKey": true}
//!     ]}],
//!     "facts": [{"typeName": "User", "fields": [
//!         {"name": "name", "value": {"type": "string", "value": "Alice"}}
//!     ]}]
//! }))
//! .unwrap();
//!
//! let facts = tsd_ir::lower_program(&program).unwrap();
//! assert_eq!(facts[0].id(), Some("User~Alice"));
//! ```

mod fact;
mod identity;
mod lowering;

pub use fact::{EvaluatorFact, Value};
pub use identity::{fingerprint, generate_id, render_key};
pub use lowering::FactLowering;

use tsd_ast::Program;
use tsd_core::Result;

/// Converts the fact assignments and then the facts of a validated program.
///
/// # Errors
/// Fails on the first fact whose identity cannot be generated.
pub fn lower_program(program: &Program) -> Result<Vec<EvaluatorFact>> {
    FactLowering::new(&program.types).lower_program(program)
}
