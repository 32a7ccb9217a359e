//! Ingest of rules, actions and action definitions.

use super::helpers::{array, as_object, flag, line, optional_str, required_str, shown};
use super::ingestor::Ingestor;
use crate::ast::{
    Action, ActionDefinition, Expression, JobCall, Parameter, Pattern, TypedVariable,
};
use serde_json::Value;
use tsd_core::{Error, Result};

impl Ingestor {
    pub(crate) fn ingest_expression(&self, value: &Value) -> Result<Expression> {
        let node = as_object(value, "rule")?;
        let rule_id = optional_str(node, "ruleId", "rule")?;
        let what = match &rule_id {
            Some(id) => format!("rule '{}'", shown(id)),
            None => "rule".to_string(),
        };

        let mut patterns = array(node, "patterns", &what)?
            .iter()
            .map(|p| self.ingest_pattern(p, &what))
            .collect::<Result<Vec<_>>>()?;
        patterns.retain(|p| !p.variables.is_empty());

        // Legacy single-set form; non-empty patterns take precedence
        if patterns.is_empty()
            && let Some(set) = node.get("set").filter(|s| !s.is_null())
        {
            let pattern = self.ingest_pattern(set, &what)?;
            if !pattern.variables.is_empty() {
                patterns.push(pattern);
            }
        }

        let constraints = match node.get("constraints") {
            None | Some(Value::Null) => None,
            Some(c) => Some(self.ingest_constraint(c, 0)?),
        };

        let action = match node.get("action") {
            None | Some(Value::Null) => None,
            Some(a) => Some(self.ingest_action(a, &what)?),
        };

        Ok(Expression {
            rule_id,
            patterns,
            constraints,
            action,
            line: line(node)?,
        })
    }

    fn ingest_pattern(&self, value: &Value, what: &str) -> Result<Pattern> {
        let node = as_object(value, "pattern")?;
        let variables = array(node, "variables", what)?
            .iter()
            .map(|v| {
                let var = as_object(v, "typed variable")?;
                Ok(TypedVariable {
                    name: required_str(var, "name", "typed variable")?,
                    data_type: required_str(var, "dataType", "typed variable")?,
                    aggregation: optional_str(var, "aggregation", "typed variable")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Pattern { variables })
    }

    fn ingest_action(&self, value: &Value, what: &str) -> Result<Action> {
        let node = as_object(value, "action")?;
        let single = node.get("job").filter(|j| !j.is_null());
        let many = node.get("jobs").filter(|j| !j.is_null());

        let jobs = match (single, many) {
            (Some(_), Some(_)) => {
                return Err(Error::MalformedAst(format!(
                    "action of {what} has both 'job' and 'jobs'"
                )));
            }
            (Some(job), None) => vec![self.ingest_job(job)?],
            (None, Some(_)) => array(node, "jobs", what)?
                .iter()
                .map(|job| self.ingest_job(job))
                .collect::<Result<Vec<_>>>()?,
            (None, None) => Vec::new(),
        };

        Ok(Action { jobs })
    }

    fn ingest_job(&self, value: &Value) -> Result<JobCall> {
        let node = as_object(value, "job call")?;
        let name = required_str(node, "name", "job call")?;
        let what = format!("job '{}'", shown(&name));
        let args = array(node, "args", &what)?
            .iter()
            .map(|arg| self.ingest_constraint(arg, 0))
            .collect::<Result<Vec<_>>>()?;
        Ok(JobCall { name, args })
    }

    pub(crate) fn ingest_action_definition(&self, value: &Value) -> Result<ActionDefinition> {
        let node = as_object(value, "action definition")?;
        let name = required_str(node, "name", "action definition")?;
        let what = format!("action '{}'", shown(&name));

        let parameters = array(node, "parameters", &what)?
            .iter()
            .map(|p| {
                let param = as_object(p, &what)?;
                let default_value = match param.get("defaultValue") {
                    None | Some(Value::Null) => None,
                    Some(d) => Some(self.ingest_constraint(d, 0)?),
                };
                Ok(Parameter {
                    name: required_str(param, "name", &what)?,
                    param_type: required_str(param, "type", &what)?,
                    optional: flag(param, "optional", &what)?,
                    default_value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ActionDefinition {
            name,
            parameters,
            is_default: flag(node, "isDefault", &what)?,
            line: line(node)?,
        })
    }
}
