//! Type definition checks.

use crate::checker::core::Validator;
use crate::type_system::TypeSystem;
use std::collections::HashSet;
use tracing::debug;
use tsd_ast::TypeDefinition;
use tsd_core::type_system::StaticType;
use tsd_core::{Error, Result, vocabulary};

impl Validator {
    /// Checks the type definitions of one program and indexes them.
    ///
    /// # Errors
    /// Fails on duplicate type names, on any intrinsic problem of a single
    /// definition, on unresolved field types and on circular references.
    pub fn check_types(&self, definitions: &[TypeDefinition]) -> Result<TypeSystem> {
        let mut types = TypeSystem::default().with_limits(self.limits);
        let mut seen = HashSet::new();

        for definition in definitions {
            if !seen.insert(definition.name.as_str()) {
                return Err(Error::InvalidType(format!(
                    "type '{}' is defined more than once",
                    self.shown(&definition.name)
                )));
            }
            self.check_type_definition(definition)?;
            types.insert(definition.clone());
        }

        for definition in definitions {
            self.check_type_references(&types, definition)?;
        }

        types.validate_circular_references()?;
        debug!(types = types.len(), "type definitions checked");
        Ok(types)
    }

    /// Checks a definition on its own: naming, field uniqueness, reserved
    /// names and primary-key field types.
    ///
    /// # Errors
    /// - `InvalidType` for an empty or builtin type name
    /// - `InvalidField` for an empty or duplicate field name
    /// - `ReservedName` for a reserved or synthetic field name
    /// - `PrimaryKeyViolation` for a primary key of non-primitive type
    pub fn check_type_definition(&self, definition: &TypeDefinition) -> Result<()> {
        let type_name = &definition.name;
        if type_name.is_empty() {
            return Err(Error::InvalidType("type name must not be empty".to_string()));
        }
        if vocabulary::is_primitive(type_name)
            || matches!(
                type_name.as_str(),
                vocabulary::ANY | vocabulary::IDENTIFIER | vocabulary::VARIABLE
            )
        {
            return Err(Error::InvalidType(format!(
                "type name '{}' is reserved for a builtin type",
                self.shown(type_name)
            )));
        }

        let mut fields = HashSet::new();
        for field in &definition.fields {
            if field.name.is_empty() {
                return Err(Error::InvalidField(format!(
                    "type '{}' declares a field without a name",
                    self.shown(type_name)
                )));
            }
            if vocabulary::is_reserved_field(&field.name) {
                return Err(Error::ReservedName(format!(
                    "field '{}' is reserved and cannot be declared in type '{}'",
                    self.shown(&field.name),
                    self.shown(type_name)
                )));
            }
            if field.name == vocabulary::SYNTHETIC_ID_FIELD {
                return Err(Error::ReservedName(format!(
                    "field 'id' is synthetic and cannot be declared in type '{}'",
                    self.shown(type_name)
                )));
            }
            if !fields.insert(field.name.as_str()) {
                return Err(Error::InvalidField(format!(
                    "duplicate field '{}' in type '{}'",
                    self.shown(&field.name),
                    self.shown(type_name)
                )));
            }

            let field_type = StaticType::from_name(&field.field_type);
            if field.is_primary_key
                && !(field_type.is_primitive() || field_type == StaticType::Identifier)
            {
                return Err(Error::PrimaryKeyViolation(format!(
                    "primary key field '{}' of type '{}' must have a primitive type, found '{}'",
                    self.shown(&field.name),
                    self.shown(type_name),
                    self.shown(&field.field_type)
                )));
            }
        }

        Ok(())
    }

    /// Checks that every field type of a definition resolves.
    ///
    /// # Errors
    /// Returns `InvalidType` naming the first unresolved field type.
    pub fn check_type_references(&self, types: &TypeSystem, definition: &TypeDefinition) -> Result<()> {
        for field in &definition.fields {
            if types.exists(&field.field_type) || field.field_type == vocabulary::IDENTIFIER {
                continue;
            }
            return Err(Error::InvalidType(format!(
                "field '{}' of type '{}' has undefined type '{}'",
                self.shown(&field.name),
                self.shown(&definition.name),
                self.shown(&field.field_type)
            )));
        }
        Ok(())
    }
}
