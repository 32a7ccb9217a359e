//! Action definitions and job-call validation.

use crate::checker::expressions::ExpressionAnalyzer;
use crate::scope::Scope;
use crate::type_system::TypeSystem;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use tsd_ast::{ActionDefinition, JobCall, Parameter};
use tsd_core::type_system::{FunctionRegistry, StaticType};
use tsd_core::{Error, Limits, Result, vocabulary};

/// Registry of action signatures used to validate rule jobs.
#[derive(Debug, Clone)]
pub struct ActionValidator {
    actions: HashMap<String, ActionDefinition>,
    types: TypeSystem,
    functions: Arc<FunctionRegistry>,
    limits: Limits,
}

impl ActionValidator {
    /// Creates a validator with no registered actions.
    pub fn new(types: TypeSystem) -> Self {
        let limits = *types.limits();
        Self {
            actions: HashMap::new(),
            types,
            functions: FunctionRegistry::global(),
            limits,
        }
    }

    /// Creates a validator preloaded with the default actions.
    pub fn with_defaults(types: TypeSystem) -> Self {
        let mut validator = Self::new(types);
        for definition in default_actions() {
            validator.actions.insert(definition.name.clone(), definition);
        }
        validator
    }

    #[must_use]
    pub fn with_functions(mut self, functions: Arc<FunctionRegistry>) -> Self {
        self.functions = functions;
        self
    }

    pub fn types(&self) -> &TypeSystem {
        &self.types
    }

    pub fn get(&self, name: &str) -> Option<&ActionDefinition> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registers an action definition.
    ///
    /// # Errors
    /// - `ActionRedefinition` when the name is already taken
    /// - `InvalidType` for a parameter whose type does not exist
    /// - `IncompatibleTypes` for a default value of the wrong type
    pub fn register(&mut self, definition: ActionDefinition) -> Result<()> {
        if let Some(existing) = self.actions.get(&definition.name) {
            let name = self.types.shown(&definition.name);
            return Err(Error::ActionRedefinition(if existing.is_default {
                format!("cannot override default action '{name}'")
            } else {
                format!("action '{name}' is already defined")
            }));
        }

        for parameter in &definition.parameters {
            self.check_parameter(&definition.name, parameter)?;
        }

        debug!(
            action = %definition.name,
            parameters = definition.parameters.len(),
            "registered action"
        );
        self.actions.insert(definition.name.clone(), definition);
        Ok(())
    }

    fn check_parameter(&self, action: &str, parameter: &Parameter) -> Result<()> {
        if parameter.param_type != vocabulary::ANY && !self.types.exists(&parameter.param_type) {
            return Err(Error::InvalidType(format!(
                "parameter '{}' of action '{}' has undefined type '{}'",
                self.types.shown(&parameter.name),
                self.types.shown(action),
                self.types.shown(&parameter.param_type)
            )));
        }

        let Some(default) = &parameter.default_value else {
            return Ok(());
        };

        let scope = Scope::new();
        let found = self.analyzer(&scope).infer(default, 0)?;
        let expected = StaticType::from_name(&parameter.param_type);
        if expected.accepts(&found) {
            return Ok(());
        }

        Err(Error::IncompatibleTypes(format!(
            "default value of parameter '{}' of action '{}' expects {}, found {}",
            self.types.shown(&parameter.name),
            self.types.shown(action),
            self.types.shown(&parameter.param_type),
            self.types.shown(found.name())
        )))
    }

    /// Validates one job call made from a rule with the given scope.
    ///
    /// # Errors
    /// - `UndefinedName` if the action is unknown
    /// - `ActionArity` if the argument count is out of range
    /// - `IncompatibleTypes` if an argument does not fit its parameter
    /// - any error raised while inferring an argument's type
    pub fn validate_call(&self, call: &JobCall, scope: &Scope) -> Result<()> {
        let definition = self.actions.get(&call.name).ok_or_else(|| {
            Error::UndefinedName(format!(
                "action '{}' is not defined",
                self.types.shown(&call.name)
            ))
        })?;

        let required = definition.required_arity();
        let total = definition.parameters.len();
        let found = call.args.len();
        if found < required || found > total {
            let expected = if required == total {
                format!("{total}")
            } else {
                format!("between {required} and {total}")
            };
            return Err(Error::ActionArity(format!(
                "action '{}' expects {expected} argument(s), found {found}",
                self.types.shown(&call.name)
            )));
        }

        let analyzer = self.analyzer(scope);
        for (i, (parameter, arg)) in definition.parameters.iter().zip(&call.args).enumerate() {
            let found = analyzer.check(arg, 0)?;
            let expected = StaticType::from_name(&parameter.param_type);
            if !expected.accepts(&found) {
                return Err(Error::IncompatibleTypes(format!(
                    "argument {} of action '{}' expects {} for parameter '{}', found {}",
                    i + 1,
                    self.types.shown(&call.name),
                    self.types.shown(&parameter.param_type),
                    self.types.shown(&parameter.name),
                    self.types.shown(found.name())
                )));
            }
        }

        Ok(())
    }

    fn analyzer<'a>(&'a self, scope: &'a Scope) -> ExpressionAnalyzer<'a> {
        ExpressionAnalyzer::new(&self.types, scope, &self.functions).with_limits(self.limits)
    }
}

/// The actions every program may call without declaring them.
pub fn default_actions() -> Vec<ActionDefinition> {
    let action = |name: &str, parameters: &[(&str, &str)]| ActionDefinition {
        name: name.to_string(),
        parameters: parameters
            .iter()
            .map(|(param, param_type)| Parameter {
                name: param.to_string(),
                param_type: param_type.to_string(),
                optional: false,
                default_value: None,
            })
            .collect(),
        is_default: true,
        line: 0,
    };

    vec![
        action("print", &[("value", vocabulary::ANY)]),
        action("log", &[("message", vocabulary::STRING)]),
        action("insert", &[("fact", vocabulary::ANY)]),
        action("update", &[("fact", vocabulary::ANY)]),
        action("retract", &[("fact", vocabulary::ANY)]),
        action("xuple", &[("space", vocabulary::STRING), ("fact", vocabulary::ANY)]),
    ]
}
