//! Index of user-defined types and fact-assignment variables.

use std::collections::{HashMap, HashSet};
use tsd_ast::TypeDefinition;
use tsd_core::text::sanitize;
use tsd_core::type_system::{Operator, StaticType};
use tsd_core::{Error, Limits, Result, vocabulary};

/// Answers existence, field and compatibility questions about the types of
/// one program.
///
/// Variables bound by fact assignments live in a single flat scope: binding
/// a name again replaces the previous binding.
#[derive(Debug, Clone, Default)]
pub struct TypeSystem {
    types: HashMap<String, TypeDefinition>,
    /// Declaration order, used to keep reports deterministic
    order: Vec<String>,
    variables: HashMap<String, String>,
    limits: Limits,
}

impl TypeSystem {
    /// Indexes the given type definitions. A later definition of the same
    /// name replaces an earlier one.
    pub fn new(types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        let mut system = Self::default();
        for definition in types {
            system.insert(definition);
        }
        system
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Adds or replaces a type definition.
    pub fn insert(&mut self, definition: TypeDefinition) {
        if !self.types.contains_key(&definition.name) {
            self.order.push(definition.name.clone());
        }
        self.types.insert(definition.name.clone(), definition);
    }

    /// Membership in `{string, number, bool}` and the synonym `boolean`.
    pub fn is_primitive(name: &str) -> bool {
        vocabulary::is_primitive(name)
    }

    pub fn is_user_defined(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        Self::is_primitive(name) || self.is_user_defined(name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Iterates type definitions in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the declared type of `type_name.field`.
    ///
    /// # Errors
    /// - `ReservedName` if `field` is a reserved name
    /// - `InvalidType` if `type_name` is not a user-defined type
    /// - `InvalidField` if the type has no such field
    pub fn field_type(&self, type_name: &str, field: &str) -> Result<StaticType> {
        if vocabulary::is_reserved_field(field) {
            return Err(Error::ReservedName(format!(
                "field '{}' is reserved and cannot be accessed",
                self.shown(field)
            )));
        }

        let definition = self.types.get(type_name).ok_or_else(|| {
            Error::InvalidType(format!("type '{}' is not defined", self.shown(type_name)))
        })?;

        definition
            .field(field)
            .map(|f| StaticType::from_name(&f.field_type))
            .ok_or_else(|| {
                Error::InvalidField(format!(
                    "field '{}' not found in type '{}'",
                    self.shown(field),
                    self.shown(type_name)
                ))
            })
    }

    /// Binds a fact-assignment variable to a type.
    ///
    /// # Errors
    /// Returns `InvalidType` if the type does not exist.
    pub fn register_variable(&mut self, variable: &str, type_name: &str) -> Result<()> {
        if !self.exists(type_name) {
            return Err(Error::InvalidType(format!(
                "cannot bind variable '{}' to undefined type '{}'",
                self.shown(variable),
                self.shown(type_name)
            )));
        }
        self.variables
            .insert(variable.to_string(), type_name.to_string());
        Ok(())
    }

    /// Returns the type name bound to a fact-assignment variable.
    pub fn variable_type(&self, variable: &str) -> Option<&str> {
        self.variables.get(variable).map(String::as_str)
    }

    /// Checks operand compatibility under an operator.
    pub fn are_compatible(&self, left: &StaticType, right: &StaticType, op: Operator) -> bool {
        left.compatible_with(right, op)
    }

    /// Rejects cycles in the graph of record types referencing each other
    /// through their fields.
    ///
    /// The search is an iterative depth-first traversal so deep type graphs
    /// cannot exhaust the call stack. Unresolved references are ignored.
    ///
    /// # Errors
    /// Returns `CircularReference` naming the types on the cycle.
    pub fn validate_circular_references(&self) -> Result<()> {
        let mut done: HashSet<&str> = HashSet::new();

        for start in &self.order {
            if done.contains(start.as_str()) {
                continue;
            }

            let mut stack: Vec<(&str, usize)> = vec![(start.as_str(), 0)];
            let mut on_stack: HashSet<&str> = HashSet::from([start.as_str()]);

            while let Some(&(node, next_edge)) = stack.last() {
                let edges = self.references(node);

                let Some(&target) = edges.get(next_edge) else {
                    on_stack.remove(node);
                    done.insert(node);
                    stack.pop();
                    continue;
                };

                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }

                if on_stack.contains(target) {
                    let from = stack.iter().position(|(n, _)| *n == target).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        stack[from..].iter().map(|(n, _)| self.shown(n)).collect();
                    cycle.push(self.shown(target));
                    return Err(Error::CircularReference(format!(
                        "circular reference detected in type '{}': {}",
                        self.shown(target),
                        cycle.join(" -> ")
                    )));
                }

                if !done.contains(target) {
                    on_stack.insert(target);
                    stack.push((target, 0));
                }
            }
        }

        Ok(())
    }

    /// Record types referenced by the fields of `name`, in field order.
    fn references(&self, name: &str) -> Vec<&str> {
        self.types
            .get(name)
            .map(|definition| {
                definition
                    .fields
                    .iter()
                    .filter_map(|f| self.types.get_key_value(f.field_type.as_str()))
                    .map(|(key, _)| key.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn shown(&self, text: &str) -> String {
        sanitize(text, self.limits.max_message_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsd_ast::Field;
    use tsd_core::ErrorKind;

    fn record(name: &str, fields: &[(&str, &str)]) -> TypeDefinition {
        TypeDefinition {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(n, t)| Field {
                    name: n.to_string(),
                    field_type: t.to_string(),
                    is_primary_key: false,
                })
                .collect(),
            line: 0,
        }
    }

    #[test]
    fn test_exists() {
        let types = TypeSystem::new([record("Person", &[("name", "string")])]);
        assert!(types.exists("string"));
        assert!(types.exists("boolean"));
        assert!(types.exists("Person"));
        assert!(!types.exists("Order"));
        assert!(!types.exists("any"));
    }

    #[test]
    fn test_field_type() {
        let types = TypeSystem::new([record("Person", &[("age", "number")])]);
        assert_eq!(types.field_type("Person", "age").unwrap(), StaticType::NUMBER);
        assert_eq!(
            types.field_type("Person", "height").unwrap_err().kind(),
            ErrorKind::InvalidField
        );
        assert_eq!(
            types.field_type("Order", "age").unwrap_err().kind(),
            ErrorKind::InvalidType
        );
        assert_eq!(
            types.field_type("Person", "_id_").unwrap_err().kind(),
            ErrorKind::ReservedName
        );
    }

    #[test]
    fn test_register_variable_replaces() {
        let mut types = TypeSystem::new([record("A", &[]), record("B", &[])]);
        types.register_variable("x", "A").unwrap();
        types.register_variable("x", "B").unwrap();
        assert_eq!(types.variable_type("x"), Some("B"));
        assert!(types.register_variable("y", "Missing").is_err());
    }

    #[test]
    fn test_two_type_cycle() {
        let types = TypeSystem::new([record("A", &[("b", "B")]), record("B", &[("a", "A")])]);
        let err = types.validate_circular_references().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CircularReference);
        assert!(err.message().contains("A -> B -> A"));
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let types = TypeSystem::new([record("Node", &[("next", "Node")])]);
        assert!(types.validate_circular_references().is_err());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let types = TypeSystem::new([
            record("Top", &[("l", "Left"), ("r", "Right")]),
            record("Left", &[("b", "Bottom")]),
            record("Right", &[("b", "Bottom")]),
            record("Bottom", &[("v", "number")]),
        ]);
        assert!(types.validate_circular_references().is_ok());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let count = 20_000;
        let types = TypeSystem::new((0..count).map(|i| {
            let next = if i + 1 < count {
                format!("T{}", i + 1)
            } else {
                "number".to_string()
            };
            record(&format!("T{i}"), &[("next", next.as_str())])
        }));
        assert!(types.validate_circular_references().is_ok());
    }
}
