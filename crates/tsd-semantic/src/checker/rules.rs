//! Rule checks: variable scope, constraints and jobs.

use crate::checker::actions::ActionValidator;
use crate::checker::core::Validator;
use crate::scope::Scope;
use crate::type_system::TypeSystem;
use tsd_ast::Expression;
use tsd_core::{Error, Result};

impl Validator {
    /// Checks a rule's variables and constraints.
    ///
    /// Returns the rule's scope so callers can go on to check its jobs.
    ///
    /// # Errors
    /// Fails on a rule without variables, a variable of undefined type or
    /// any constraint problem.
    pub fn check_rule(&self, types: &TypeSystem, rule: &Expression) -> Result<Scope> {
        let scope = Scope::for_rule(rule, types)?;
        if let Some(constraints) = &rule.constraints {
            self.analyzer(types, &scope).validate(constraints, 0)?;
        }
        Ok(scope)
    }

    /// Checks the jobs of a rule against the registered actions.
    ///
    /// # Errors
    /// - `MalformedAst` if the rule has no action or an empty job list
    /// - any error of [`ActionValidator::validate_call`]
    pub fn check_rule_action(
        &self,
        actions: &ActionValidator,
        rule: &Expression,
        scope: &Scope,
    ) -> Result<()> {
        let label = self.rule_label(rule.rule_id(), rule.line);
        let action = rule
            .action
            .as_ref()
            .ok_or_else(|| Error::MalformedAst(format!("{label} has no action")))?;

        if action.jobs.is_empty() {
            return Err(Error::MalformedAst(format!("action of {label} has no jobs")));
        }

        for job in &action.jobs {
            actions.validate_call(job, scope)?;
        }
        Ok(())
    }
}
