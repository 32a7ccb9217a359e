use super::Operator;
use crate::vocabulary;
use std::fmt;

/// The closed set of primitive value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    String,
    Number,
    Bool,
}

impl Primitive {
    /// Resolves a primitive by name, folding the `boolean` synonym into `bool`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            vocabulary::STRING => Some(Self::String),
            vocabulary::NUMBER => Some(Self::Number),
            vocabulary::BOOL | vocabulary::BOOLEAN => Some(Self::Bool),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::String => vocabulary::STRING,
            Self::Number => vocabulary::NUMBER,
            Self::Bool => vocabulary::BOOL,
        }
    }
}

/// A static type as seen by the analyzer.
///
/// Type names coming from the AST are canonicalized on construction, so
/// `bool` and `boolean` produce the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StaticType {
    /// `string`, `number` or `bool`
    Primitive(Primitive),
    /// Value-only tag; a subtype of `string`
    Identifier,
    /// A user-defined record type
    Record(String),
    /// A variable name that could not be resolved in scope
    Variable,
    /// The `any` parameter marker
    Any,
}

impl StaticType {
    pub const STRING: Self = Self::Primitive(Primitive::String);
    pub const NUMBER: Self = Self::Primitive(Primitive::Number);
    pub const BOOL: Self = Self::Primitive(Primitive::Bool);

    /// Builds a static type from a declared type name.
    ///
    /// Any name that is not a primitive, `identifier` or `any` is taken to
    /// be a record name; whether it exists is the type system's concern.
    pub fn from_name(name: &str) -> Self {
        if let Some(primitive) = Primitive::from_name(name) {
            return Self::Primitive(primitive);
        }
        match name {
            vocabulary::IDENTIFIER => Self::Identifier,
            vocabulary::ANY => Self::Any,
            vocabulary::VARIABLE => Self::Variable,
            _ => Self::Record(name.to_string()),
        }
    }

    pub const fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Returns the record name for user-defined types.
    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::Record(name) => Some(name),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => p.name(),
            Self::Identifier => vocabulary::IDENTIFIER,
            Self::Record(name) => name,
            Self::Variable => vocabulary::VARIABLE,
            Self::Any => vocabulary::ANY,
        }
    }

    /// Checks operand compatibility under a comparison or arithmetic operator.
    ///
    /// Identical primitives are compatible for every operator; identical
    /// records only for `==` and `!=`. Everything else is incompatible.
    pub fn compatible_with(&self, other: &Self, operator: Operator) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b && operator.is_equality(),
            _ => false,
        }
    }

    /// Checks whether a value of type `found` may be stored where `self` is
    /// declared. `identifier` values are accepted for `string` slots.
    pub fn accepts(&self, found: &Self) -> bool {
        match (self, found) {
            (Self::Any, _) => true,
            (Self::Primitive(Primitive::String), Self::Identifier) => true,
            (expected, found) => expected == found,
        }
    }
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
