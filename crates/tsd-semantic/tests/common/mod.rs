//! Common test utilities for semantic analysis tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use tsd_ast::Program;
use tsd_core::{ErrorKind, Result};
use tsd_semantic::{Analysis, analyze};

/// Ingests an AST document and validates it.
pub fn check(document: &Value) -> Result<Analysis> {
    let program = Program::from_json(document)?;
    analyze(&program)
}

/// Helper function to check if a document passes semantic analysis.
pub fn should_pass(document: &Value) -> bool {
    check(document).is_ok()
}

/// Helper function to check if a document fails semantic analysis.
pub fn should_fail(document: &Value) -> bool {
    check(document).is_err()
}

/// Returns the class of the first error, panicking if the document passes.
pub fn error_kind(document: &Value) -> ErrorKind {
    match check(document) {
        Ok(_) => panic!("expected document to be rejected"),
        Err(err) => err.kind(),
    }
}

/// Returns the message of the first error, panicking if the document passes.
pub fn error_message(document: &Value) -> String {
    match check(document) {
        Ok(_) => panic!("expected document to be rejected"),
        Err(err) => err.message().to_string(),
    }
}

/// `type Person(#name: string, age: number)`
pub fn person_type() -> Value {
    json!({
        "type": "typeDefinition",
        "name": "Person",
        "fields": [
            {"name": "name", "type": "string", "isPrimaryKey": true},
            {"name": "age", "type": "number"}
        ]
    })
}

pub fn field_access(object: &str, field: &str) -> Value {
    json!({"type": "fieldAccess", "object": object, "field": field})
}

pub fn number(value: f64) -> Value {
    json!({"type": "number", "value": value})
}

pub fn string(value: &str) -> Value {
    json!({"type": "string", "value": value})
}

pub fn comparison(left: Value, operator: &str, right: Value) -> Value {
    json!({"type": "comparison", "left": left, "operator": operator, "right": right})
}

pub fn job(name: &str, args: Vec<Value>) -> Value {
    json!({"type": "jobCall", "name": name, "args": args})
}

/// A single-pattern rule `rule id : {p: Person} / constraints ==> jobs`.
pub fn person_rule(id: &str, constraints: Value, jobs: Vec<Value>) -> Value {
    json!({
        "type": "expression",
        "ruleId": id,
        "set": {"type": "set", "variables": [
            {"type": "typedVariable", "name": "p", "dataType": "Person"}
        ]},
        "constraints": constraints,
        "action": {"type": "action", "jobs": jobs}
    })
}

/// A program with the `Person` type and the given rules.
pub fn person_program(rules: Vec<Value>) -> Value {
    json!({
        "types": [person_type()],
        "expressions": rules
    })
}
