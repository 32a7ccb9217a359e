//! The accumulator and its accessors.

use std::collections::{BTreeMap, BTreeSet};
use tracing::info;
use tsd_ast::{Expression, Fact, FactAssignment, Program, TypeDefinition};
use tsd_core::{Diagnostic, Diagnostics, Limits, Result};
use tsd_ir::{EvaluatorFact, FactLowering};
use tsd_semantic::{Analysis, TypeSystem, Validator};

/// Cumulative state of all merged program fragments.
///
/// Types only grow between resets: a type is introduced once and may later
/// be replaced by a compatible declaration with more fields. Rules, facts
/// and assignments are append-only.
#[derive(Debug, Clone, Default)]
pub struct ProgramState {
    pub(crate) types: BTreeMap<String, TypeDefinition>,
    pub(crate) rules: Vec<Expression>,
    pub(crate) facts: Vec<Fact>,
    pub(crate) assignments: Vec<FactAssignment>,
    /// Variable name to the type of the fact it is bound to
    pub(crate) variables: BTreeMap<String, String>,
    pub(crate) files_parsed: Vec<String>,
    pub(crate) errors: Vec<Diagnostic>,
    pub(crate) rule_ids: BTreeSet<String>,
    pub(crate) validator: Validator,
}

impl ProgramState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.validator = self.validator.with_limits(limits);
        self
    }

    /// Discards everything merged so far.
    pub fn reset(&mut self) {
        self.types.clear();
        self.rules.clear();
        self.facts.clear();
        self.assignments.clear();
        self.variables.clear();
        self.files_parsed.clear();
        self.errors.clear();
        self.rule_ids.clear();
        info!("cleared accumulated program state");
    }

    /// Accumulated types in name order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn rules(&self) -> &[Expression] {
        &self.rules
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn assignments(&self) -> &[FactAssignment] {
        &self.assignments
    }

    /// Source identifiers in merge order.
    pub fn files_parsed(&self) -> &[String] {
        &self.files_parsed
    }

    pub fn rule_ids(&self) -> impl Iterator<Item = &str> {
        self.rule_ids.iter().map(String::as_str)
    }

    pub fn has_rule_id(&self, id: &str) -> bool {
        self.rule_ids.contains(id)
    }

    /// Non-blocking problems recorded so far, in the order they occurred.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::from(self.errors.clone())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.rules.is_empty()
            && self.facts.is_empty()
            && self.assignments.is_empty()
            && self.files_parsed.is_empty()
    }

    /// The type system of the accumulated types and variable bindings.
    pub fn type_system(&self) -> TypeSystem {
        let mut types = TypeSystem::new(self.types.values().cloned())
            .with_limits(*self.validator.limits());
        for (variable, type_name) in &self.variables {
            // Bound types are never removed outside a reset
            let _ = types.register_variable(variable, type_name);
        }
        types
    }

    /// Assembles the accumulated fragments into one program.
    pub fn to_program(&self) -> Program {
        Program {
            types: self.types.values().cloned().collect(),
            fact_assignments: self.assignments.clone(),
            facts: self.facts.clone(),
            expressions: self.rules.clone(),
            ..Program::default()
        }
    }

    /// Validates the accumulated program as a whole.
    ///
    /// This catches what fragment-level checks tolerate, such as field
    /// types that were never defined or rules calling unknown actions.
    pub fn analyze(&self) -> Result<Analysis> {
        self.validator.check_program(&self.to_program())
    }

    /// Converts the accumulated assignments and then facts into
    /// evaluator-facing records.
    pub fn evaluator_facts(&self) -> Result<Vec<EvaluatorFact>> {
        FactLowering::new(self.types.values()).lower_all(&self.assignments, &self.facts)
    }
}
