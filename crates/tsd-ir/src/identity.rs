//! Identifier generation for evaluator-facing facts.

use crate::fact::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tsd_ast::TypeDefinition;
use tsd_core::text::sanitize;
use tsd_core::{Error, Limits, Result, vocabulary};

/// Number of digest bytes kept in a fingerprint (16 hex digits).
const FINGERPRINT_BYTES: usize = 8;

/// Generates the `_id_` of a fact from its field map.
///
/// # Errors
/// - `ReservedName` if the map already carries an `_id_`
/// - `PrimaryKeyViolation` if a primary-key field is missing
/// - `MalformedAst` if the fields cannot be serialized for hashing
pub fn generate_id(definition: &TypeDefinition, fields: &BTreeMap<String, Value>) -> Result<String> {
    if fields.contains_key(vocabulary::ID_FIELD) {
        return Err(Error::ReservedName(
            "`_id_` cannot be set manually".to_string(),
        ));
    }

    let body = if definition.has_primary_key() {
        let mut parts = Vec::new();
        for key in definition.primary_key() {
            let value = fields.get(&key.name).ok_or_else(|| {
                Error::PrimaryKeyViolation(format!(
                    "missing primary key field '{}' in fact of type '{}'",
                    shown(&key.name),
                    shown(&definition.name)
                ))
            })?;
            parts.push(render_key(value));
        }
        parts.join(&vocabulary::ID_SEPARATOR.to_string())
    } else {
        fingerprint(fields)?
    };

    Ok(format!(
        "{}{}{body}",
        definition.name,
        vocabulary::ID_SEPARATOR
    ))
}

/// Renders a primary-key value for an identifier.
///
/// `%` and `~` are percent-escaped so the separator stays unambiguous.
pub fn render_key(value: &Value) -> String {
    value
        .to_string()
        .replace('%', "%25")
        .replace(vocabulary::ID_SEPARATOR, "%7E")
}

/// Hashes the non-reserved fields of a fact into 16 lowercase hex digits.
///
/// The hash input is the JSON form of the fields with keys sorted, so the
/// result does not depend on field order.
///
/// # Errors
/// Returns `MalformedAst` if the fields cannot be serialized.
pub fn fingerprint(fields: &BTreeMap<String, Value>) -> Result<String> {
    let canonical: BTreeMap<&str, &Value> = fields
        .iter()
        .filter(|(name, _)| !vocabulary::is_reserved_field(name))
        .map(|(name, value)| (name.as_str(), value))
        .collect();

    let bytes = serde_json::to_vec(&canonical)
        .map_err(|e| Error::MalformedAst(format!("cannot fingerprint fact: {e}")))?;
    let digest = Sha256::digest(&bytes);
    Ok(hex::encode(&digest[..FINGERPRINT_BYTES]))
}

fn shown(text: &str) -> String {
    sanitize(text, Limits::DEFAULT_MAX_MESSAGE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsd_ast::Field;

    fn definition(name: &str, keys: &[&str], others: &[&str]) -> TypeDefinition {
        let field = |n: &&str, pk: bool| Field {
            name: n.to_string(),
            field_type: "string".to_string(),
            is_primary_key: pk,
        };
        TypeDefinition {
            name: name.to_string(),
            fields: keys
                .iter()
                .map(|k| field(k, true))
                .chain(others.iter().map(|o| field(o, false)))
                .collect(),
            line: 0,
        }
    }

    fn fields(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_composite_key() {
        let def = definition("Seat", &["row", "number"], &[]);
        let id = generate_id(
            &def,
            &fields(&[
                ("number", Value::Number(12.0)),
                ("row", Value::String("B".into())),
            ]),
        )
        .unwrap();
        assert_eq!(id, "Seat~B~12");
    }

    #[test]
    fn test_separator_is_escaped() {
        assert_eq!(render_key(&Value::String("a~b%c".into())), "a%7Eb%25c");
    }

    #[test]
    fn test_preset_id_refused() {
        let def = definition("T", &[], &["x"]);
        let err = generate_id(&def, &fields(&[("_id_", Value::String("T~1".into()))])).unwrap_err();
        assert_eq!(err.message(), "`_id_` cannot be set manually");
    }

    #[test]
    fn test_fingerprint_ignores_type_tag() {
        let plain = fields(&[("x", Value::Number(1.0))]);
        let tagged = fields(&[
            ("x", Value::Number(1.0)),
            ("_type_", Value::String("T".into())),
        ]);
        assert_eq!(fingerprint(&plain).unwrap(), fingerprint(&tagged).unwrap());
    }

    #[test]
    fn test_fingerprint_shape() {
        let fp = fingerprint(&fields(&[("x", Value::Bool(true))])).unwrap();
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
