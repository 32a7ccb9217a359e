//! AST for TSD programs.
//!
//! This crate defines the closed data model the analyzer works on and the
//! ingest step that translates the parser's generic tagged document (a JSON
//! tree whose nodes carry a `type` tag) into that model.

pub mod ast;
mod ingest;

pub use ast::{
    Action, ActionDefinition, ConsumptionPolicyDecl, Constraint, DurationDecl, Expression, Fact,
    FactAssignment, FactField, FactValue, Field, JobCall, LogicalOperation, Parameter, Pattern,
    Program, Reset, RetentionPolicyDecl, TypeDefinition, TypedVariable, XupleSpaceDeclaration,
};
pub use ingest::Ingestor;

use tsd_core::{Error, Result};

impl Program {
    /// Translates a parsed AST document into a program.
    ///
    /// # Errors
    /// Returns `MalformedAst` if the document does not have the expected shape.
    pub fn from_json(document: &serde_json::Value) -> Result<Self> {
        Ingestor::new().ingest_program(document)
    }
}

/// Deepest JSON nesting the text reader accepts.
pub const MAX_DOCUMENT_NESTING: usize = 128;

/// Reads the text of an AST document into a generic JSON tree.
///
/// # Errors
/// - `DepthExceeded` if the text nests deeper than [`MAX_DOCUMENT_NESTING`]
/// - `MalformedAst` if the text is not JSON
pub fn parse_json(source: &str) -> Result<serde_json::Value> {
    serde_json::from_str(source).map_err(|e| {
        if e.is_syntax() && e.to_string().starts_with("recursion limit exceeded") {
            Error::DepthExceeded(format!(
                "AST document nests deeper than {MAX_DOCUMENT_NESTING} levels: {e}"
            ))
        } else {
            Error::MalformedAst(format!("invalid AST document: {e}"))
        }
    })
}

/// Parses the text of an AST document and translates it into a program.
///
/// # Errors
/// Returns `DepthExceeded` for documents nested too deeply to read, and
/// `MalformedAst` if the text is not JSON or the document does not have
/// the expected shape.
///
/// # Examples
/// ```
/// use tsd_ast::parse_document;
///
/// let source = r#"{"types": [{"type": "typeDefinition", "name": "User",
///     "fields": [{"name": "name", "type": "string", "isPrimaryKey": true}]}]}"#;
/// let program = parse_document(source).unwrap();
/// assert_eq!(program.types[0].name, "User");
/// ```
pub fn parse_document(source: &str) -> Result<Program> {
    Program::from_json(&parse_json(source)?)
}
