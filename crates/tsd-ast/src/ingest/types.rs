//! Ingest of type definitions, facts and fact assignments.

use super::helpers::{array, as_object, flag, line, optional_str, required_str, shown, tag};
use super::ingestor::Ingestor;
use crate::ast::{Fact, FactAssignment, FactField, FactValue, Field, TypeDefinition};
use serde_json::Value;
use tsd_core::vocabulary::value_kind;
use tsd_core::{Error, Result};

impl Ingestor {
    pub(crate) fn ingest_type_definition(&self, value: &Value) -> Result<TypeDefinition> {
        let node = as_object(value, "type definition")?;
        let name = required_str(node, "name", "type definition")?;
        let what = format!("type '{}'", shown(&name));

        let fields = array(node, "fields", &what)?
            .iter()
            .map(|f| {
                let field = as_object(f, &what)?;
                Ok(Field {
                    name: required_str(field, "name", &what)?,
                    field_type: required_str(field, "type", &what)?,
                    is_primary_key: flag(field, "isPrimaryKey", &what)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TypeDefinition {
            name,
            fields,
            line: line(node)?,
        })
    }

    pub(crate) fn ingest_fact(&self, value: &Value) -> Result<Fact> {
        let node = as_object(value, "fact")?;
        let type_name = required_str(node, "typeName", "fact")?;
        let what = format!("fact of type '{}'", shown(&type_name));

        let fields = array(node, "fields", &what)?
            .iter()
            .map(|f| {
                let field = as_object(f, &what)?;
                let name = required_str(field, "name", &what)?;
                let raw = field.get("value").ok_or_else(|| {
                    Error::MalformedAst(format!("field '{}' of {what} has no value", shown(&name)))
                })?;
                Ok(FactField {
                    value: self.ingest_fact_value(raw, &name)?,
                    name,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Fact {
            type_name,
            fields,
            line: line(node)?,
        })
    }

    fn ingest_fact_value(&self, value: &Value, field: &str) -> Result<FactValue> {
        let what = format!("value of field '{}'", shown(field));
        let node = as_object(value, &what)?;
        let kind = tag(node, &what)?;
        let payload = node.get("value");

        let malformed = |expected: &str| {
            Error::MalformedAst(format!("{what} must carry a {expected} payload"))
        };

        let fact_value = match kind {
            value_kind::STRING => match payload {
                Some(Value::String(s)) => FactValue::String(s.clone()),
                _ => return Err(malformed("string")),
            },
            value_kind::NUMBER => match payload.and_then(Value::as_f64) {
                Some(n) => FactValue::Number(n),
                None => return Err(malformed("number")),
            },
            value_kind::BOOL | value_kind::BOOLEAN => match payload {
                Some(Value::Bool(b)) => FactValue::Bool(*b),
                _ => return Err(malformed("boolean")),
            },
            value_kind::IDENTIFIER => match payload {
                Some(Value::String(s)) => FactValue::Identifier(s.clone()),
                _ => return Err(malformed("string")),
            },
            value_kind::VARIABLE_REFERENCE => {
                let name = match payload {
                    Some(Value::String(s)) => Some(s.clone()),
                    _ => optional_str(node, "name", &what)?,
                };
                FactValue::VariableReference(name.ok_or_else(|| malformed("variable name"))?)
            }
            other => {
                return Err(Error::MalformedAst(format!(
                    "unknown fact value type '{}' for field '{}'",
                    shown(other),
                    shown(field)
                )));
            }
        };
        Ok(fact_value)
    }

    pub(crate) fn ingest_fact_assignment(&self, value: &Value) -> Result<FactAssignment> {
        let node = as_object(value, "fact assignment")?;
        let variable = required_str(node, "variable", "fact assignment")?;
        let fact = node.get("fact").ok_or_else(|| {
            Error::MalformedAst(format!(
                "fact assignment '{}' has no fact",
                shown(&variable)
            ))
        })?;

        Ok(FactAssignment {
            fact: self.ingest_fact(fact)?,
            variable,
            line: line(node)?,
        })
    }
}
