//! Fact and program lowering.

use crate::fact::{EvaluatorFact, Value};
use crate::identity::generate_id;
use crate::lowering::core::FactLowering;
use std::collections::BTreeMap;
use tracing::debug;
use tsd_ast::{Fact, FactAssignment, FactValue, Program};
use tsd_core::text::sanitize;
use tsd_core::{Error, Limits, Result, vocabulary};

impl FactLowering<'_> {
    /// Lowers the assignments and then the facts of a program.
    ///
    /// # Errors
    /// Fails on the first fact that cannot be lowered; no partial result is
    /// returned.
    pub fn lower_program(&mut self, program: &Program) -> Result<Vec<EvaluatorFact>> {
        self.lower_all(&program.fact_assignments, &program.facts)
    }

    /// Lowers assignments in order, binding their variables, then facts.
    pub fn lower_all(
        &mut self,
        assignments: &[FactAssignment],
        facts: &[Fact],
    ) -> Result<Vec<EvaluatorFact>> {
        let mut lowered = Vec::with_capacity(assignments.len() + facts.len());
        for assignment in assignments {
            lowered.push(self.lower_assignment(assignment)?);
        }
        for fact in facts {
            lowered.push(self.lower_fact(fact)?);
        }
        debug!(facts = lowered.len(), "converted facts for evaluation");
        Ok(lowered)
    }

    /// Lowers the fact of an assignment and binds its variable.
    pub fn lower_assignment(&mut self, assignment: &FactAssignment) -> Result<EvaluatorFact> {
        let fact = self.lower_fact(&assignment.fact)?;
        if let Some(id) = fact.id() {
            self.bind(assignment.variable.clone(), id);
        }
        Ok(fact)
    }

    /// Lowers one fact.
    ///
    /// # Errors
    /// - `InvalidType` if the fact's type is unknown
    /// - `ReservedName` if the fact sets `_id_` or `_type_`
    /// - `UndefinedName` for a reference to an unbound variable
    /// - any identity generation error
    pub fn lower_fact(&self, fact: &Fact) -> Result<EvaluatorFact> {
        let definition = self.types.get(fact.type_name.as_str()).ok_or_else(|| {
            Error::InvalidType(format!(
                "fact has undefined type '{}'",
                shown(&fact.type_name)
            ))
        })?;

        let mut fields = BTreeMap::new();
        for field in &fact.fields {
            if field.name == vocabulary::TYPE_TAG_FIELD {
                return Err(Error::ReservedName(
                    "`_type_` cannot be set manually".to_string(),
                ));
            }
            fields.insert(field.name.clone(), self.unwrap_value(fact, &field.name, &field.value)?);
        }

        fields.insert(
            vocabulary::TYPE_TAG_FIELD.to_string(),
            Value::String(definition.name.clone()),
        );
        let id = generate_id(definition, &fields)?;
        fields.insert(vocabulary::ID_FIELD.to_string(), Value::String(id));

        Ok(EvaluatorFact::from_fields(fields))
    }

    fn unwrap_value(&self, fact: &Fact, field: &str, value: &FactValue) -> Result<Value> {
        let native = match value {
            FactValue::String(s) | FactValue::Identifier(s) => Value::String(s.clone()),
            FactValue::Number(n) => Value::Number(*n),
            FactValue::Bool(b) => Value::Bool(*b),
            FactValue::VariableReference(variable) => {
                let id = self.binding(variable).ok_or_else(|| {
                    Error::UndefinedName(format!(
                        "unbound variable '{}' in field '{}' of fact of type '{}'",
                        shown(variable),
                        shown(field),
                        shown(&fact.type_name)
                    ))
                })?;
                Value::String(id.to_string())
            }
        };
        Ok(native)
    }
}

fn shown(text: &str) -> String {
    sanitize(text, Limits::DEFAULT_MAX_MESSAGE_LENGTH)
}
