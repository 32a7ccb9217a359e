//! Error types and result aliases for the TSD analyzer.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the TSD analyzer.
///
/// Every variant carries a fully rendered, sanitized message that names the
/// offending type, field or action.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(tsd::config))]
    Config(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::invalid_type))]
    InvalidType(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::invalid_field))]
    InvalidField(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::reserved_name))]
    ReservedName(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::primary_key))]
    PrimaryKeyViolation(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::incompatible_types))]
    IncompatibleTypes(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::circular_reference))]
    CircularReference(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::duplicate_rule_id))]
    DuplicateRuleId(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::undefined_name))]
    UndefinedName(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::action_arity))]
    ActionArity(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::action_redefinition))]
    ActionRedefinition(String),

    #[error("{0}")]
    #[diagnostic(code(tsd::xuple_space_policy))]
    XupleSpacePolicy(String),

    #[error("{0}")]
    #[diagnostic(
        code(tsd::depth_exceeded),
        help("reduce the nesting of the constraint or raise `max_depth`")
    )]
    DepthExceeded(String),

    #[error("Malformed AST: {0}")]
    #[diagnostic(code(tsd::malformed_ast))]
    MalformedAst(String),
}

/// Fieldless classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    InvalidType,
    InvalidField,
    ReservedName,
    PrimaryKeyViolation,
    IncompatibleTypes,
    CircularReference,
    DuplicateRuleId,
    UndefinedName,
    ActionArity,
    ActionRedefinition,
    XupleSpacePolicy,
    DepthExceeded,
    MalformedAst,
}

impl Error {
    /// Returns the classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::InvalidType(_) => ErrorKind::InvalidType,
            Self::InvalidField(_) => ErrorKind::InvalidField,
            Self::ReservedName(_) => ErrorKind::ReservedName,
            Self::PrimaryKeyViolation(_) => ErrorKind::PrimaryKeyViolation,
            Self::IncompatibleTypes(_) => ErrorKind::IncompatibleTypes,
            Self::CircularReference(_) => ErrorKind::CircularReference,
            Self::DuplicateRuleId(_) => ErrorKind::DuplicateRuleId,
            Self::UndefinedName(_) => ErrorKind::UndefinedName,
            Self::ActionArity(_) => ErrorKind::ActionArity,
            Self::ActionRedefinition(_) => ErrorKind::ActionRedefinition,
            Self::XupleSpacePolicy(_) => ErrorKind::XupleSpacePolicy,
            Self::DepthExceeded(_) => ErrorKind::DepthExceeded,
            Self::MalformedAst(_) => ErrorKind::MalformedAst,
        }
    }

    /// Returns the bare message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(m)
            | Self::InvalidType(m)
            | Self::InvalidField(m)
            | Self::ReservedName(m)
            | Self::PrimaryKeyViolation(m)
            | Self::IncompatibleTypes(m)
            | Self::CircularReference(m)
            | Self::DuplicateRuleId(m)
            | Self::UndefinedName(m)
            | Self::ActionArity(m)
            | Self::ActionRedefinition(m)
            | Self::XupleSpacePolicy(m)
            | Self::DepthExceeded(m)
            | Self::MalformedAst(m) => m,
        }
    }
}

/// Result type alias using the TSD Error type.
pub type Result<T> = std::result::Result<T, Error>;
