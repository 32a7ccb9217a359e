//! Fixed names of the TSD language: primitives, reserved fields and value
//! kinds.

/// Name of the primitive string type.
pub const STRING: &str = "string";
/// Name of the primitive number type.
pub const NUMBER: &str = "number";
/// Name of the primitive boolean type.
pub const BOOL: &str = "bool";
/// Synonym of [`BOOL`].
pub const BOOLEAN: &str = "boolean";
/// Value-only tag accepted wherever a string is expected.
pub const IDENTIFIER: &str = "identifier";
/// Parameter marker accepting any argument type.
pub const ANY: &str = "any";
/// Static type of a variable that cannot be resolved in scope.
pub const VARIABLE: &str = "variable";

/// Reserved field holding the generated fact identifier.
pub const ID_FIELD: &str = "_id_";
/// Reserved field holding the type tag in evaluator-facing facts.
pub const TYPE_TAG_FIELD: &str = "_type_";
/// Synthetic field available on every user-defined type in constraints.
pub const SYNTHETIC_ID_FIELD: &str = "id";

/// Separator between the type name and the identity body, and between
/// primary-key values.
pub const ID_SEPARATOR: char = '~';

/// Names that may never be declared or set by user input.
pub const RESERVED_FIELDS: [&str; 2] = [ID_FIELD, TYPE_TAG_FIELD];

/// Recognized kinds of fact values.
pub mod value_kind {
    pub const STRING: &str = "string";
    pub const NUMBER: &str = "number";
    pub const BOOL: &str = "bool";
    pub const BOOLEAN: &str = "boolean";
    pub const IDENTIFIER: &str = "identifier";
    pub const VARIABLE_REFERENCE: &str = "variableReference";
}

/// Returns true for names reserved by the analyzer.
pub fn is_reserved_field(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name)
}

/// Returns true for `string`, `number`, `bool` and the synonym `boolean`.
pub fn is_primitive(name: &str) -> bool {
    matches!(name, STRING | NUMBER | BOOL | BOOLEAN)
}
