//! Accessors over JSON nodes that report shape problems as `MalformedAst`.

use serde_json::{Map, Value};
use tsd_core::text::sanitize;
use tsd_core::{Error, Limits, Result};

pub(crate) type Object = Map<String, Value>;

/// Renders an externally supplied string for an error message.
pub(crate) fn shown(text: &str) -> String {
    sanitize(text, Limits::DEFAULT_MAX_MESSAGE_LENGTH)
}

pub(crate) fn as_object<'v>(value: &'v Value, what: &str) -> Result<&'v Object> {
    value
        .as_object()
        .ok_or_else(|| Error::MalformedAst(format!("{what} must be an object")))
}

/// Returns the `type` tag of a node.
pub(crate) fn tag<'v>(node: &'v Object, what: &str) -> Result<&'v str> {
    match node.get("type") {
        Some(Value::String(tag)) => Ok(tag),
        Some(_) => Err(Error::MalformedAst(format!(
            "{what} has a non-string 'type' tag"
        ))),
        None => Err(Error::MalformedAst(format!("{what} is missing its 'type' tag"))),
    }
}

/// Returns a required string member.
pub(crate) fn required_str(node: &Object, key: &str, what: &str) -> Result<String> {
    optional_str(node, key, what)?
        .ok_or_else(|| Error::MalformedAst(format!("{what} is missing '{key}'")))
}

/// Returns an optional string member; JSON `null` counts as absent.
pub(crate) fn optional_str(node: &Object, key: &str, what: &str) -> Result<Option<String>> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::MalformedAst(format!(
            "'{key}' of {what} must be a string"
        ))),
    }
}

/// Returns a boolean flag, `false` when absent.
pub(crate) fn flag(node: &Object, key: &str, what: &str) -> Result<bool> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(Error::MalformedAst(format!(
            "'{key}' of {what} must be a boolean"
        ))),
    }
}

pub(crate) fn optional_number(node: &Object, key: &str, what: &str) -> Result<Option<f64>> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::MalformedAst(format!("'{key}' of {what} is out of range"))),
        Some(_) => Err(Error::MalformedAst(format!(
            "'{key}' of {what} must be a number"
        ))),
    }
}

/// Returns an array member, empty when absent.
pub(crate) fn array<'v>(node: &'v Object, key: &str, what: &str) -> Result<&'v [Value]> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(Error::MalformedAst(format!(
            "'{key}' of {what} must be an array"
        ))),
    }
}

/// Returns the optional source line of a node, 0 when unknown.
pub(crate) fn line(node: &Object) -> Result<usize> {
    match node.get("line") {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|l| usize::try_from(l).ok())
            .ok_or_else(|| Error::MalformedAst("'line' must be a non-negative integer".into())),
        Some(_) => Err(Error::MalformedAst(
            "'line' must be a non-negative integer".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_required() {
        let value = json!({"name": "x"});
        let node = as_object(&value, "node").unwrap();
        let err = tag(node, "node").unwrap_err();
        assert_eq!(err.message(), "node is missing its 'type' tag");
    }

    #[test]
    fn test_optional_members() {
        let value = json!({"a": null, "b": "x", "n": 3, "line": 7});
        let node = as_object(&value, "node").unwrap();
        assert_eq!(optional_str(node, "a", "node").unwrap(), None);
        assert_eq!(optional_str(node, "b", "node").unwrap().as_deref(), Some("x"));
        assert_eq!(optional_number(node, "n", "node").unwrap(), Some(3.0));
        assert!(array(node, "missing", "node").unwrap().is_empty());
        assert_eq!(line(node).unwrap(), 7);
    }

    #[test]
    fn test_wrong_kinds_rejected() {
        let value = json!({"a": 1, "f": "yes", "line": -1});
        let node = as_object(&value, "node").unwrap();
        assert!(required_str(node, "a", "node").is_err());
        assert!(flag(node, "f", "node").is_err());
        assert!(line(node).is_err());
    }
}
