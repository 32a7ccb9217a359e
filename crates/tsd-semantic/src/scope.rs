//! Variable scope of a single rule.

use crate::type_system::TypeSystem;
use std::collections::HashMap;
use tsd_ast::{Expression, TypedVariable};
use tsd_core::type_system::StaticType;
use tsd_core::{Error, Result};

/// A variable declared by one of the rule's patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    /// Effective static type; always `number` for aggregations
    pub static_type: StaticType,
    pub aggregation: Option<String>,
}

/// Maps the typed variables of a rule to their effective static types.
///
/// Patterns share one flat scope: a name declared again by a later pattern
/// replaces the earlier declaration.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the scope of a rule, checking that every declared type exists.
    ///
    /// # Errors
    /// - `MalformedAst` if the rule declares no variables
    /// - `InvalidType` if a variable's declared type does not exist
    pub fn for_rule(rule: &Expression, types: &TypeSystem) -> Result<Self> {
        let mut scope = Self::new();
        for variable in rule.variables() {
            scope.declare(variable, types)?;
        }

        if scope.bindings.is_empty() {
            let rule_name = rule
                .rule_id()
                .map(|id| format!("rule '{}'", types.shown(id)))
                .unwrap_or_else(|| "rule".to_string());
            return Err(Error::MalformedAst(format!(
                "{rule_name} declares no typed variables"
            )));
        }

        Ok(scope)
    }

    /// Declares one typed variable.
    ///
    /// # Errors
    /// Returns `InvalidType` if the declared type does not exist.
    pub fn declare(&mut self, variable: &TypedVariable, types: &TypeSystem) -> Result<()> {
        if !types.exists(&variable.data_type) {
            return Err(Error::InvalidType(format!(
                "variable '{}' has undefined type '{}'",
                types.shown(&variable.name),
                types.shown(&variable.data_type)
            )));
        }

        let static_type = if variable.aggregation.is_some() {
            StaticType::NUMBER
        } else {
            StaticType::from_name(&variable.data_type)
        };

        self.bindings.insert(
            variable.name.clone(),
            Binding {
                name: variable.name.clone(),
                static_type,
                aggregation: variable.aggregation.clone(),
            },
        );
        Ok(())
    }

    /// Looks up a variable by name.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsd_ast::Pattern;

    fn variable(name: &str, data_type: &str, aggregation: Option<&str>) -> TypedVariable {
        TypedVariable {
            name: name.to_string(),
            data_type: data_type.to_string(),
            aggregation: aggregation.map(str::to_string),
        }
    }

    #[test]
    fn test_aggregation_is_numeric() {
        let types = TypeSystem::default();
        let mut scope = Scope::new();
        scope
            .declare(&variable("total", "number", Some("sum")), &types)
            .unwrap();
        scope
            .declare(&variable("label", "string", Some("count")), &types)
            .unwrap();
        assert_eq!(scope.lookup("total").unwrap().static_type, StaticType::NUMBER);
        assert_eq!(scope.lookup("label").unwrap().static_type, StaticType::NUMBER);
    }

    #[test]
    fn test_undefined_type_rejected() {
        let types = TypeSystem::default();
        let err = Scope::new()
            .declare(&variable("p", "Person", None), &types)
            .unwrap_err();
        assert_eq!(err.message(), "variable 'p' has undefined type 'Person'");
    }

    #[test]
    fn test_rule_without_variables() {
        let rule = Expression {
            rule_id: Some("empty".to_string()),
            patterns: vec![Pattern::default()],
            constraints: None,
            action: None,
            line: 0,
        };
        let err = Scope::for_rule(&rule, &TypeSystem::default()).unwrap_err();
        assert_eq!(err.message(), "rule 'empty' declares no typed variables");
    }
}
