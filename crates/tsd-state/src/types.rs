//! Merging type declarations into the accumulator.

use std::collections::BTreeMap;
use tracing::debug;
use tsd_ast::TypeDefinition;
use tsd_core::text::sanitize;
use tsd_core::{Error, Result};
use tsd_semantic::{TypeSystem, Validator};

/// Outcome of merging one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeChange {
    Introduced,
    Extended,
    Unchanged,
}

/// Merges declarations into a copy of the accumulated types.
///
/// Declarations are applied in order, so a fragment may itself declare a
/// type twice as long as the declarations are compatible. The result is
/// only returned when every declaration merged and the combined type graph
/// is acyclic.
pub(crate) fn merge_types(
    validator: &Validator,
    mut types: BTreeMap<String, TypeDefinition>,
    declarations: &[TypeDefinition],
) -> Result<BTreeMap<String, TypeDefinition>> {
    for declaration in declarations {
        validator.check_type_definition(declaration)?;
        let change = merge_type(&mut types, declaration, validator.limits().max_message_length)?;
        debug!(type_name = %declaration.name, ?change, "merged type declaration");
    }

    TypeSystem::new(types.values().cloned())
        .with_limits(*validator.limits())
        .validate_circular_references()?;
    Ok(types)
}

fn merge_type(
    types: &mut BTreeMap<String, TypeDefinition>,
    declaration: &TypeDefinition,
    max_len: usize,
) -> Result<TypeChange> {
    let Some(existing) = types.get(&declaration.name) else {
        types.insert(declaration.name.clone(), declaration.clone());
        return Ok(TypeChange::Introduced);
    };

    for field in &declaration.fields {
        if let Some(previous) = existing.field(&field.name)
            && previous.field_type != field.field_type
        {
            return Err(Error::InvalidType(format!(
                "type '{}' is incompatible with its earlier declaration: field '{}' was {}, now {}",
                sanitize(&declaration.name, max_len),
                sanitize(&field.name, max_len),
                sanitize(&previous.field_type, max_len),
                sanitize(&field.field_type, max_len)
            )));
        }
    }

    if declaration.fields.len() > existing.fields.len() {
        types.insert(declaration.name.clone(), declaration.clone());
        return Ok(TypeChange::Extended);
    }
    Ok(TypeChange::Unchanged)
}
