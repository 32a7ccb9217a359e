//! Ingest of constraint trees.

use super::helpers::{array, as_object, optional_str, required_str, shown, tag};
use super::ingestor::Ingestor;
use crate::ast::{Constraint, LogicalOperation};
use serde_json::Value;
use tsd_core::{Error, Result};

impl Ingestor {
    /// Translates a constraint node. Unrecognized tags become
    /// [`Constraint::Unknown`] so the analyzer can report them in context.
    pub(crate) fn ingest_constraint(&self, value: &Value, depth: usize) -> Result<Constraint> {
        if depth > self.max_nesting {
            return Err(Error::DepthExceeded(format!(
                "maximum AST nesting of {} exceeded",
                self.max_nesting
            )));
        }

        let node = as_object(value, "constraint node")?;
        let kind = tag(node, "constraint node")?;
        let what = kind;

        let constraint = match kind {
            "comparison" | "binaryOp" => {
                let left = Box::new(self.ingest_child(node, "left", kind, depth)?);
                let right = Box::new(self.ingest_child(node, "right", kind, depth)?);
                let operator = required_str(node, "operator", kind)?;
                if kind == "comparison" {
                    Constraint::Comparison {
                        left,
                        operator,
                        right,
                    }
                } else {
                    Constraint::BinaryOp {
                        left,
                        operator,
                        right,
                    }
                }
            }

            "logicalExpr" => {
                let left = Box::new(self.ingest_child(node, "left", kind, depth)?);
                let operations = array(node, "operations", what)?
                    .iter()
                    .map(|op| {
                        let op_node = as_object(op, "logical operation")?;
                        let operator = optional_str(op_node, "op", "logical operation")?
                            .or(optional_str(op_node, "operator", "logical operation")?)
                            .ok_or_else(|| {
                                Error::MalformedAst("logical operation is missing 'op'".into())
                            })?;
                        Ok(LogicalOperation {
                            operator,
                            right: self.ingest_child(op_node, "right", "logical operation", depth)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Constraint::LogicalExpr { left, operations }
            }

            "fieldAccess" => Constraint::FieldAccess {
                object: required_str(node, "object", what)?,
                field: required_str(node, "field", what)?,
            },

            "variable" => Constraint::Variable {
                name: required_str(node, "name", what)?,
            },

            "string" | "stringLiteral" => match node.get("value") {
                Some(Value::String(s)) => Constraint::String(s.clone()),
                _ => return Err(literal_error(kind, "string")),
            },

            "number" | "numberLiteral" => match node.get("value").and_then(Value::as_f64) {
                Some(n) => Constraint::Number(n),
                None => return Err(literal_error(kind, "number")),
            },

            "boolean" | "booleanLiteral" | "bool" => match node.get("value") {
                Some(Value::Bool(b)) => Constraint::Boolean(*b),
                _ => return Err(literal_error(kind, "boolean")),
            },

            "functionCall" => Constraint::FunctionCall {
                name: required_str(node, "name", what)?,
                args: array(node, "args", what)?
                    .iter()
                    .map(|arg| self.ingest_constraint(arg, depth + 1))
                    .collect::<Result<Vec<_>>>()?,
            },

            "inlineFact" => {
                let type_name = required_str(node, "typeName", what)?;
                let fields = array(node, "fields", what)?
                    .iter()
                    .map(|f| {
                        let field = as_object(f, "inline fact field")?;
                        let name = required_str(field, "name", "inline fact field")?;
                        let value = self.ingest_child(field, "value", "inline fact field", depth)?;
                        Ok((name, value))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Constraint::InlineFact { type_name, fields }
            }

            other => Constraint::Unknown(other.to_string()),
        };

        Ok(constraint)
    }

    fn ingest_child(
        &self,
        node: &super::helpers::Object,
        key: &str,
        what: &str,
        depth: usize,
    ) -> Result<Constraint> {
        let child = node.get(key).ok_or_else(|| {
            Error::MalformedAst(format!("{} node is missing '{key}'", shown(what)))
        })?;
        self.ingest_constraint(child, depth + 1)
    }
}

fn literal_error(kind: &str, expected: &str) -> Error {
    Error::MalformedAst(format!("{kind} literal must carry a {expected} value"))
}
