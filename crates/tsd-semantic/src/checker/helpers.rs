//! Helper functions shared by the checks.

use crate::checker::core::Validator;
use crate::checker::expressions::ExpressionAnalyzer;
use crate::scope::Scope;
use crate::type_system::TypeSystem;
use tsd_core::text::sanitize;

impl Validator {
    /// Sanitizes an externally originated string for an error message.
    pub(crate) fn shown(&self, text: &str) -> String {
        sanitize(text, self.limits.max_message_length)
    }

    /// Creates an expression analyzer bound to this validator's limits and
    /// function registry.
    pub(crate) fn analyzer<'a>(
        &'a self,
        types: &'a TypeSystem,
        scope: &'a Scope,
    ) -> ExpressionAnalyzer<'a> {
        ExpressionAnalyzer::new(types, scope, &self.functions).with_limits(self.limits)
    }

    /// Describes a rule for messages: `rule 'r1'` or `rule at line 3`.
    pub(crate) fn rule_label(&self, rule_id: Option<&str>, line: usize) -> String {
        match rule_id {
            Some(id) => format!("rule '{}'", self.shown(id)),
            None if line > 0 => format!("rule at line {line}"),
            None => "rule".to_string(),
        }
    }
}
