//! Constraint analysis: static type inference and the validating walk.

use crate::scope::Scope;
use crate::type_system::TypeSystem;
use tsd_ast::Constraint;
use tsd_core::type_system::{FunctionRegistry, Operator, OperatorClass, StaticType};
use tsd_core::{Error, Limits, Result, vocabulary};

/// Infers static types of constraint nodes and validates constraint trees
/// against a rule's variable scope.
///
/// Every recursive step carries an explicit depth; exceeding
/// `limits.max_depth` is an error.
pub struct ExpressionAnalyzer<'a> {
    types: &'a TypeSystem,
    scope: &'a Scope,
    functions: &'a FunctionRegistry,
    limits: Limits,
}

impl<'a> ExpressionAnalyzer<'a> {
    pub fn new(types: &'a TypeSystem, scope: &'a Scope, functions: &'a FunctionRegistry) -> Self {
        Self {
            types,
            scope,
            functions,
            limits: *types.limits(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.limits.max_depth {
            return Err(Error::DepthExceeded(format!(
                "maximum validation depth of {} exceeded",
                self.limits.max_depth
            )));
        }
        Ok(())
    }

    fn shown(&self, text: &str) -> String {
        tsd_core::text::sanitize(text, self.limits.max_message_length)
    }

    /// Returns the static type of a constraint node.
    ///
    /// # Errors
    /// Fails on invalid field accesses, unknown operators, undefined inline
    /// fact types, unrecognized node tags and excessive depth.
    pub fn infer(&self, node: &Constraint, depth: usize) -> Result<StaticType> {
        self.check_depth(depth)?;

        match node {
            Constraint::String(_) => Ok(StaticType::STRING),
            Constraint::Number(_) => Ok(StaticType::NUMBER),
            Constraint::Boolean(_) => Ok(StaticType::BOOL),

            Constraint::Variable { name } => Ok(self.variable_type(name)),

            Constraint::FieldAccess { object, field } => self.field_access_type(object, field),

            Constraint::BinaryOp { operator, .. } => {
                match Operator::decode(operator, &self.limits)?.class() {
                    OperatorClass::Arithmetic => Ok(StaticType::NUMBER),
                    OperatorClass::Comparison => Ok(StaticType::BOOL),
                }
            }

            Constraint::Comparison { .. } | Constraint::LogicalExpr { .. } => Ok(StaticType::BOOL),

            Constraint::FunctionCall { name, .. } => {
                Ok(self.functions.return_type(name, StaticType::STRING))
            }

            Constraint::InlineFact { type_name, fields } => {
                self.inline_fact_type(type_name, fields, depth)
            }

            Constraint::Unknown(tag) => Err(self.unknown_node(tag)),
        }
    }

    /// Walks a constraint tree depth-first, validating field accesses,
    /// comparison operand compatibility and function arguments.
    ///
    /// # Errors
    /// Returns the first problem found in the tree.
    pub fn validate(&self, node: &Constraint, depth: usize) -> Result<()> {
        self.check(node, depth).map(|_| ())
    }

    /// Validates a constraint tree and returns the static type of its root.
    ///
    /// Each node is visited once, so the work is linear in the size of the
    /// tree.
    ///
    /// # Errors
    /// Returns the first problem found in the tree.
    pub fn check(&self, node: &Constraint, depth: usize) -> Result<StaticType> {
        self.check_depth(depth)?;

        match node {
            Constraint::Comparison {
                left,
                operator,
                right,
            } => {
                let left_type = self.check(left, depth + 1)?;
                let right_type = self.check(right, depth + 1)?;
                self.check_comparison(&left_type, operator, &right_type)?;
                Ok(StaticType::BOOL)
            }

            Constraint::BinaryOp {
                left,
                operator,
                right,
            } => {
                let op = Operator::decode(operator, &self.limits)?;
                self.check(left, depth + 1)?;
                self.check(right, depth + 1)?;
                Ok(match op.class() {
                    OperatorClass::Arithmetic => StaticType::NUMBER,
                    OperatorClass::Comparison => StaticType::BOOL,
                })
            }

            Constraint::LogicalExpr { left, operations } => {
                self.check(left, depth + 1)?;
                for operation in operations {
                    self.check(&operation.right, depth + 1)?;
                }
                Ok(StaticType::BOOL)
            }

            Constraint::FunctionCall { name, args } => {
                let found = args
                    .iter()
                    .map(|arg| self.check(arg, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                self.check_function_arguments(name, &found)?;
                Ok(self.functions.return_type(name, StaticType::STRING))
            }

            Constraint::FieldAccess { .. }
            | Constraint::InlineFact { .. }
            | Constraint::Variable { .. }
            | Constraint::String(_)
            | Constraint::Number(_)
            | Constraint::Boolean(_)
            | Constraint::Unknown(_) => self.infer(node, depth),
        }
    }

    fn check_comparison(
        &self,
        left_type: &StaticType,
        operator: &str,
        right_type: &StaticType,
    ) -> Result<()> {
        let op = Operator::decode(operator, &self.limits)?;

        // Aggregation results are numeric but may only be known by name
        let aggregate_pair = matches!(
            (left_type, right_type),
            (StaticType::Variable, t) | (t, StaticType::Variable) if *t == StaticType::NUMBER
        );

        if aggregate_pair || self.types.are_compatible(left_type, right_type, op) {
            return Ok(());
        }

        Err(Error::IncompatibleTypes(format!(
            "incompatible types in comparison: '{}' {op} '{}'",
            self.shown(left_type.name()),
            self.shown(right_type.name())
        )))
    }

    fn check_function_arguments(&self, name: &str, found: &[StaticType]) -> Result<()> {
        let Some(signature) = self.functions.get(name) else {
            return Ok(());
        };
        let Some(parameters) = signature.parameters else {
            return Ok(());
        };

        if parameters.len() != found.len() {
            return Err(Error::IncompatibleTypes(format!(
                "function '{}' expects {} argument(s), found {}",
                self.shown(name),
                parameters.len(),
                found.len()
            )));
        }

        for (i, (expected, found)) in parameters.iter().zip(found).enumerate() {
            if *found != StaticType::Variable && !expected.accepts(found) {
                return Err(Error::IncompatibleTypes(format!(
                    "argument {} of function '{}' expects {expected}, found {}",
                    i + 1,
                    self.shown(name),
                    self.shown(found.name())
                )));
            }
        }
        Ok(())
    }

    fn variable_type(&self, name: &str) -> StaticType {
        if let Some(binding) = self.scope.lookup(name) {
            return binding.static_type.clone();
        }
        match name {
            "true" | "false" => StaticType::BOOL,
            _ => StaticType::Variable,
        }
    }

    fn field_access_type(&self, object: &str, field: &str) -> Result<StaticType> {
        let binding = self.scope.lookup(object).ok_or_else(|| {
            Error::UndefinedName(format!(
                "unknown variable '{}' in field access '{}.{}'",
                self.shown(object),
                self.shown(object),
                self.shown(field)
            ))
        })?;

        let StaticType::Record(type_name) = &binding.static_type else {
            return Err(Error::InvalidField(format!(
                "cannot access field '{}' of variable '{}' with type '{}'",
                self.shown(field),
                self.shown(object),
                self.shown(binding.static_type.name())
            )));
        };

        if field == vocabulary::SYNTHETIC_ID_FIELD {
            return Ok(StaticType::STRING);
        }
        self.types.field_type(type_name, field)
    }

    fn inline_fact_type(
        &self,
        type_name: &str,
        fields: &[(String, Constraint)],
        depth: usize,
    ) -> Result<StaticType> {
        if !self.types.is_user_defined(type_name) {
            return Err(Error::InvalidType(format!(
                "inline fact has undefined type '{}'",
                self.shown(type_name)
            )));
        }

        for (field, value) in fields {
            let expected = self.types.field_type(type_name, field)?;
            let found = self.check(value, depth + 1)?;
            if found != StaticType::Variable && !expected.accepts(&found) {
                return Err(Error::IncompatibleTypes(format!(
                    "field '{}' of inline fact '{}' expects {expected}, found {}",
                    self.shown(field),
                    self.shown(type_name),
                    self.shown(found.name())
                )));
            }
        }

        Ok(StaticType::Record(type_name.to_string()))
    }

    fn unknown_node(&self, tag: &str) -> Error {
        Error::MalformedAst(format!("unknown argument type: {}", self.shown(tag)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsd_ast::{Field, LogicalOperation, TypeDefinition, TypedVariable};
    use tsd_core::ErrorKind;

    fn person_types() -> TypeSystem {
        TypeSystem::new([TypeDefinition {
            name: "Person".to_string(),
            fields: vec![
                Field {
                    name: "name".to_string(),
                    field_type: "string".to_string(),
                    is_primary_key: true,
                },
                Field {
                    name: "age".to_string(),
                    field_type: "number".to_string(),
                    is_primary_key: false,
                },
            ],
            line: 0,
        }])
    }

    fn person_scope(types: &TypeSystem) -> Scope {
        let mut scope = Scope::new();
        scope
            .declare(
                &TypedVariable {
                    name: "p".to_string(),
                    data_type: "Person".to_string(),
                    aggregation: None,
                },
                types,
            )
            .unwrap();
        scope
    }

    fn access(object: &str, field: &str) -> Constraint {
        Constraint::FieldAccess {
            object: object.to_string(),
            field: field.to_string(),
        }
    }

    fn compare(left: Constraint, op: &str, right: Constraint) -> Constraint {
        Constraint::Comparison {
            left: Box::new(left),
            operator: op.to_string(),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_literal_inference() {
        let types = TypeSystem::default();
        let scope = Scope::new();
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        assert_eq!(analyzer.infer(&Constraint::Number(1.0), 0).unwrap(), StaticType::NUMBER);
        assert_eq!(
            analyzer.infer(&Constraint::String("x".into()), 0).unwrap(),
            StaticType::STRING
        );
        assert_eq!(
            analyzer
                .infer(&Constraint::Variable { name: "true".into() }, 0)
                .unwrap(),
            StaticType::BOOL
        );
        assert_eq!(
            analyzer
                .infer(&Constraint::Variable { name: "n".into() }, 0)
                .unwrap(),
            StaticType::Variable
        );
    }

    #[test]
    fn test_field_access_and_synthetic_id() {
        let types = person_types();
        let scope = person_scope(&types);
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        assert_eq!(analyzer.infer(&access("p", "age"), 0).unwrap(), StaticType::NUMBER);
        assert_eq!(analyzer.infer(&access("p", "id"), 0).unwrap(), StaticType::STRING);
        assert_eq!(
            analyzer.infer(&access("p", "height"), 0).unwrap_err().kind(),
            ErrorKind::InvalidField
        );
        assert_eq!(
            analyzer.infer(&access("q", "age"), 0).unwrap_err().kind(),
            ErrorKind::UndefinedName
        );
    }

    #[test]
    fn test_incompatible_comparison() {
        let types = person_types();
        let scope = person_scope(&types);
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        let node = compare(access("p", "name"), ">", Constraint::Number(18.0));
        let err = analyzer.validate(&node, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompatibleTypes);
        assert_eq!(
            err.message(),
            "incompatible types in comparison: 'string' > 'number'"
        );
    }

    #[test]
    fn test_variable_number_pair_admitted() {
        let types = person_types();
        let scope = person_scope(&types);
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        let node = compare(
            Constraint::Variable { name: "total".into() },
            ">=",
            Constraint::Number(100.0),
        );
        assert!(analyzer.validate(&node, 0).is_ok());
    }

    #[test]
    fn test_record_comparison_requires_equality() {
        let types = person_types();
        let scope = person_scope(&types);
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        let p = || Constraint::Variable { name: "p".into() };
        assert!(analyzer.validate(&compare(p(), "==", p()), 0).is_ok());
        assert!(analyzer.validate(&compare(p(), "<", p()), 0).is_err());
    }

    #[test]
    fn test_logical_operations_are_walked() {
        let types = person_types();
        let scope = person_scope(&types);
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        let node = Constraint::LogicalExpr {
            left: Box::new(compare(access("p", "age"), ">", Constraint::Number(1.0))),
            operations: vec![LogicalOperation {
                operator: "AND".into(),
                right: compare(access("p", "missing"), "==", Constraint::Number(1.0)),
            }],
        };
        let err = analyzer.validate(&node, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
    }

    #[test]
    fn test_function_arguments_checked() {
        let types = person_types();
        let scope = person_scope(&types);
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        let upper = |arg: Constraint| Constraint::FunctionCall {
            name: "upper".into(),
            args: vec![arg],
        };
        assert!(analyzer.validate(&upper(access("p", "name")), 0).is_ok());
        assert!(analyzer.validate(&upper(access("p", "age")), 0).is_err());
        assert_eq!(
            analyzer.infer(&upper(access("p", "name")), 0).unwrap(),
            StaticType::STRING
        );
    }

    #[test]
    fn test_check_returns_root_type() {
        let types = person_types();
        let scope = person_scope(&types);
        let registry = FunctionRegistry::with_builtins();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        let sum = Constraint::BinaryOp {
            left: Box::new(access("p", "age")),
            operator: "+".into(),
            right: Box::new(Constraint::Number(1.0)),
        };
        assert_eq!(analyzer.check(&sum, 0).unwrap(), StaticType::NUMBER);
        assert_eq!(
            analyzer
                .check(&compare(sum, ">", Constraint::Number(18.0)), 0)
                .unwrap(),
            StaticType::BOOL
        );
    }

    #[test]
    fn test_unknown_node() {
        let types = TypeSystem::default();
        let scope = Scope::new();
        let registry = FunctionRegistry::new();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry);

        let err = analyzer
            .validate(&Constraint::Unknown("lambda".into()), 0)
            .unwrap_err();
        assert_eq!(err.message(), "unknown argument type: lambda");
    }

    #[test]
    fn test_depth_guard() {
        let types = TypeSystem::default();
        let scope = Scope::new();
        let registry = FunctionRegistry::new();
        let analyzer = ExpressionAnalyzer::new(&types, &scope, &registry)
            .with_limits(Limits::default().with_max_depth(10));

        let mut node = Constraint::Number(1.0);
        for _ in 0..20 {
            node = Constraint::BinaryOp {
                left: Box::new(node),
                operator: "+".into(),
                right: Box::new(Constraint::Number(1.0)),
            };
        }
        let err = analyzer.validate(&node, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DepthExceeded);
    }
}
