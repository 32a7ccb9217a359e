//! Fact validation against declared types.

use crate::type_system::TypeSystem;
use std::collections::HashSet;
use tsd_ast::{Fact, FactValue, Field, TypeDefinition};
use tsd_core::type_system::{Primitive, StaticType};
use tsd_core::{Error, Result, vocabulary};

/// Validates single facts against a type system.
///
/// Checks run in a fixed order and the first failure wins: the type must
/// exist, every declared field must be present, every supplied field must
/// be declared and not reserved, values must match their field types and
/// primary-key values must be non-empty.
pub struct FactValidator<'a> {
    types: &'a TypeSystem,
}

impl<'a> FactValidator<'a> {
    pub fn new(types: &'a TypeSystem) -> Self {
        Self { types }
    }

    /// Validates one fact.
    ///
    /// # Errors
    /// - `InvalidType` if the fact's type is not defined
    /// - `PrimaryKeyViolation` for a missing or empty primary-key value
    /// - `InvalidField` for missing, undeclared or duplicate fields
    /// - `ReservedName` if the fact sets a reserved field
    /// - `UndefinedName` for a reference to an unbound variable
    /// - `IncompatibleTypes` for a value that does not fit its field
    pub fn validate(&self, fact: &Fact) -> Result<()> {
        let definition = self.types.get(&fact.type_name).ok_or_else(|| {
            Error::InvalidType(format!(
                "fact has undefined type '{}'",
                self.shown(&fact.type_name)
            ))
        })?;

        self.check_required_fields(fact, definition)?;
        self.check_supplied_fields(fact, definition)?;

        for field in &fact.fields {
            // Presence was checked above
            if let Some(declared) = definition.field(&field.name) {
                self.check_value(definition, declared, &field.value)?;
            }
        }

        self.check_primary_key(fact, definition)
    }

    fn check_required_fields(&self, fact: &Fact, definition: &TypeDefinition) -> Result<()> {
        for declared in &definition.fields {
            if fact.value(&declared.name).is_some() {
                continue;
            }
            let message = format!(
                "missing {} field '{}' in fact of type '{}'",
                if declared.is_primary_key {
                    "primary key"
                } else {
                    "required"
                },
                self.shown(&declared.name),
                self.shown(&definition.name)
            );
            return Err(if declared.is_primary_key {
                Error::PrimaryKeyViolation(message)
            } else {
                Error::InvalidField(message)
            });
        }
        Ok(())
    }

    fn check_supplied_fields(&self, fact: &Fact, definition: &TypeDefinition) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &fact.fields {
            if vocabulary::is_reserved_field(&field.name) {
                return Err(Error::ReservedName(format!(
                    "field '{}' is reserved and cannot be set in fact of type '{}'",
                    self.shown(&field.name),
                    self.shown(&definition.name)
                )));
            }
            if definition.field(&field.name).is_none() {
                return Err(Error::InvalidField(format!(
                    "field '{}' is not defined in type '{}'",
                    self.shown(&field.name),
                    self.shown(&definition.name)
                )));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(Error::InvalidField(format!(
                    "duplicate field '{}' in fact of type '{}'",
                    self.shown(&field.name),
                    self.shown(&definition.name)
                )));
            }
        }
        Ok(())
    }

    fn check_value(&self, definition: &TypeDefinition, declared: &Field, value: &FactValue) -> Result<()> {
        let expected = StaticType::from_name(&declared.field_type);

        if let FactValue::VariableReference(variable) = value {
            let bound = self.types.variable_type(variable).ok_or_else(|| {
                Error::UndefinedName(format!(
                    "undefined variable '{}' in field '{}' of fact of type '{}'",
                    self.shown(variable),
                    self.shown(&declared.name),
                    self.shown(&definition.name)
                ))
            })?;
            if StaticType::from_name(bound) == expected {
                return Ok(());
            }
            return Err(Error::IncompatibleTypes(format!(
                "variable '{}' of type '{}' cannot be assigned to field '{}' of type '{}' in fact of type '{}'",
                self.shown(variable),
                self.shown(bound),
                self.shown(&declared.name),
                self.shown(&declared.field_type),
                self.shown(&definition.name)
            )));
        }

        let found = match value {
            FactValue::String(_) => StaticType::STRING,
            FactValue::Number(_) => StaticType::NUMBER,
            FactValue::Bool(_) => StaticType::BOOL,
            FactValue::Identifier(_) => StaticType::Identifier,
            FactValue::VariableReference(_) => StaticType::Variable,
        };
        if expected.accepts(&found) {
            return Ok(());
        }

        Err(Error::IncompatibleTypes(format!(
            "field '{}' of type '{}' expects {}, found {} value",
            self.shown(&declared.name),
            self.shown(&definition.name),
            self.shown(&declared.field_type),
            value.kind()
        )))
    }

    fn check_primary_key(&self, fact: &Fact, definition: &TypeDefinition) -> Result<()> {
        for key in definition.primary_key() {
            let textual = matches!(
                StaticType::from_name(&key.field_type),
                StaticType::Primitive(Primitive::String) | StaticType::Identifier
            );
            let empty = match fact.value(&key.name) {
                Some(FactValue::String(s) | FactValue::Identifier(s)) => s.is_empty(),
                Some(_) => false,
                None => true,
            };
            if textual && empty {
                return Err(Error::PrimaryKeyViolation(format!(
                    "primary key field '{}' of type '{}' must not be empty",
                    self.shown(&key.name),
                    self.shown(&definition.name)
                )));
            }
        }
        Ok(())
    }

    fn shown(&self, text: &str) -> String {
        self.types.shown(text)
    }
}
