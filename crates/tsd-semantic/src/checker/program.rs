//! Whole-program validation.

use crate::checker::actions::ActionValidator;
use crate::checker::core::{Analysis, Validator};
use crate::checker::facts::FactValidator;
use crate::type_system::TypeSystem;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use tsd_ast::{Fact, FactAssignment, Program};
use tsd_core::{Error, Result};

impl Validator {
    /// Checks a complete program, stopping at the first error.
    ///
    /// Phases run in a fixed order because later phases consult what
    /// earlier ones established: types, circularity, fact assignments
    /// (which bind variables), facts, actions, rules and xuple-spaces.
    pub fn check_program(&self, program: &Program) -> Result<Analysis> {
        let mut types = self.check_types(&program.types)?;

        for assignment in &program.fact_assignments {
            self.check_assignment(&mut types, assignment)?;
        }
        debug!(
            assignments = program.fact_assignments.len(),
            "fact assignments checked"
        );

        for fact in &program.facts {
            self.check_fact(&types, fact)?;
        }
        debug!(facts = program.facts.len(), "facts checked");

        let mut actions =
            ActionValidator::with_defaults(types.clone()).with_functions(self.functions.clone());
        for definition in &program.actions {
            actions.register(definition.clone())?;
        }

        let mut rule_ids = HashSet::new();
        let mut discarded = Vec::new();
        for rule in &program.expressions {
            if let Some(id) = rule.rule_id()
                && !rule_ids.insert(id)
            {
                warn!(rule = %id, "discarding rule with duplicate id");
                discarded.push(Error::DuplicateRuleId(format!(
                    "rule id '{}' is already defined",
                    self.shown(id)
                )));
                continue;
            }
            let scope = self.check_rule(&types, rule)?;
            self.check_rule_action(&actions, rule, &scope)?;
        }
        debug!(rules = program.expressions.len(), "rules checked");

        let mut names = HashSet::new();
        let mut xuple_spaces = Vec::with_capacity(program.xuple_spaces.len());
        for declaration in &program.xuple_spaces {
            if !names.insert(declaration.name.as_str()) {
                return Err(Error::XupleSpacePolicy(format!(
                    "xuple-space '{}' is declared more than once",
                    self.shown(&declaration.name)
                )));
            }
            xuple_spaces.push(self.check_xuple_space(declaration)?);
        }

        info!(
            types = types.len(),
            facts = program.facts.len(),
            rules = program.expressions.len(),
            "program is well-formed"
        );

        Ok(Analysis {
            type_system: types,
            actions,
            xuple_spaces,
            discarded,
        })
    }

    /// Validates one fact against a type system.
    pub fn check_fact(&self, types: &TypeSystem, fact: &Fact) -> Result<()> {
        FactValidator::new(types).validate(fact)
    }

    /// Validates the fact of an assignment, then binds its variable.
    pub fn check_assignment(
        &self,
        types: &mut TypeSystem,
        assignment: &FactAssignment,
    ) -> Result<()> {
        self.check_fact(types, &assignment.fact)?;
        types.register_variable(&assignment.variable, &assignment.fact.type_name)
    }
}
