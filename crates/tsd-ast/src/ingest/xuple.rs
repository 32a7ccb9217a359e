//! Ingest of xuple-space declarations.

use super::helpers::{as_object, line, optional_number, optional_str, required_str, shown};
use super::ingestor::Ingestor;
use crate::ast::{
    ConsumptionPolicyDecl, DurationDecl, RetentionPolicyDecl, XupleSpaceDeclaration,
};
use serde_json::Value;
use tsd_core::{Error, Result};

const DEFAULT_SELECTION: &str = "fifo";
const DEFAULT_CONSUMPTION: &str = "once";
const DEFAULT_RETENTION: &str = "unlimited";

impl Ingestor {
    pub(crate) fn ingest_xuple_space(&self, value: &Value) -> Result<XupleSpaceDeclaration> {
        let node = as_object(value, "xuple-space declaration")?;
        let name = required_str(node, "name", "xuple-space declaration")?;
        let what = format!("xuple-space '{}'", shown(&name));

        let selection_policy =
            optional_str(node, "selectionPolicy", &what)?.unwrap_or_else(|| DEFAULT_SELECTION.into());

        let consumption_policy = match node.get("consumptionPolicy") {
            None | Some(Value::Null) => ConsumptionPolicyDecl {
                kind: DEFAULT_CONSUMPTION.to_string(),
                limit: None,
            },
            Some(policy) => {
                let policy = as_object(policy, &what)?;
                ConsumptionPolicyDecl {
                    kind: required_str(policy, "type", &what)?,
                    limit: optional_number(policy, "limit", &what)?,
                }
            }
        };

        let retention_policy = match node.get("retentionPolicy") {
            None | Some(Value::Null) => RetentionPolicyDecl {
                kind: DEFAULT_RETENTION.to_string(),
                duration: None,
            },
            Some(policy) => {
                let policy = as_object(policy, &what)?;
                let duration = match policy.get("duration") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(text)) => Some(DurationDecl::Text(text.clone())),
                    Some(Value::Number(n)) => Some(DurationDecl::Seconds(n.as_f64().ok_or_else(
                        || Error::MalformedAst(format!("duration of {what} is out of range")),
                    )?)),
                    Some(_) => {
                        return Err(Error::MalformedAst(format!(
                            "duration of {what} must be a number or a string"
                        )));
                    }
                };
                RetentionPolicyDecl {
                    kind: required_str(policy, "type", &what)?,
                    duration,
                }
            }
        };

        Ok(XupleSpaceDeclaration {
            name,
            selection_policy,
            consumption_policy,
            retention_policy,
            max_size: optional_number(node, "maxSize", &what)?.unwrap_or(0.0),
            line: line(node)?,
        })
    }
}
