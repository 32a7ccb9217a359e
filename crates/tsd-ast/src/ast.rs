//! Abstract Syntax Tree (AST) definitions for TSD programs.

use tsd_core::vocabulary;

/// A complete TSD program fragment, as produced by the parser for one source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub types: Vec<TypeDefinition>,
    pub fact_assignments: Vec<FactAssignment>,
    pub facts: Vec<Fact>,
    pub expressions: Vec<Expression>,
    pub xuple_spaces: Vec<XupleSpaceDeclaration>,
    pub actions: Vec<ActionDefinition>,
    pub resets: Vec<Reset>,
}

impl Program {
    /// Returns true if the fragment carries at least one `reset` directive.
    pub fn has_reset(&self) -> bool {
        !self.resets.is_empty()
    }
}

/// User-defined record type: `type User(#name: string, age: number)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: String,
    pub fields: Vec<Field>,
    pub line: usize,
}

impl TypeDefinition {
    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the primary-key fields in declaration order.
    pub fn primary_key(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_primary_key)
    }

    pub fn has_primary_key(&self) -> bool {
        self.fields.iter().any(|f| f.is_primary_key)
    }
}

/// A field of a type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub field_type: String,
    pub is_primary_key: bool,
}

/// A ground fact: `User(name: "Alice", age: 30)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub type_name: String,
    pub fields: Vec<FactField>,
    pub line: usize,
}

impl Fact {
    pub fn value(&self, name: &str) -> Option<&FactValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// One `name: value` pair of a fact.
#[derive(Debug, Clone, PartialEq)]
pub struct FactField {
    pub name: String,
    pub value: FactValue,
}

/// A literal fact value or a reference to an assigned fact.
#[derive(Debug, Clone, PartialEq)]
pub enum FactValue {
    String(String),
    Number(f64),
    Bool(bool),
    Identifier(String),
    VariableReference(String),
}

impl FactValue {
    /// Returns the value kind as spelled in the AST.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => vocabulary::value_kind::STRING,
            Self::Number(_) => vocabulary::value_kind::NUMBER,
            Self::Bool(_) => vocabulary::value_kind::BOOL,
            Self::Identifier(_) => vocabulary::value_kind::IDENTIFIER,
            Self::VariableReference(_) => vocabulary::value_kind::VARIABLE_REFERENCE,
        }
    }
}

/// Binding of a variable to a fact literal: `alice = User(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FactAssignment {
    pub variable: String,
    pub fact: Fact,
    pub line: usize,
}

/// A variable declared by a rule pattern: `p: Person`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedVariable {
    pub name: String,
    pub data_type: String,
    /// Aggregation marker such as `count` or `sum`
    pub aggregation: Option<String>,
}

/// A group of typed variables matched together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub variables: Vec<TypedVariable>,
}

/// A rule: `rule r1 : {p: Person} / p.age > 18 ==> notify(p)`.
///
/// The legacy single `set` form is translated into one pattern on ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub rule_id: Option<String>,
    pub patterns: Vec<Pattern>,
    pub constraints: Option<Constraint>,
    pub action: Option<Action>,
    pub line: usize,
}

impl Expression {
    /// Iterates the typed variables of every pattern in order.
    pub fn variables(&self) -> impl Iterator<Item = &TypedVariable> {
        self.patterns.iter().flat_map(|p| p.variables.iter())
    }

    /// Returns the rule identifier when one is present and non-empty.
    pub fn rule_id(&self) -> Option<&str> {
        self.rule_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// The right-hand side of a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub jobs: Vec<JobCall>,
}

/// One action invocation: `notify(p.name, "adult")`.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCall {
    pub name: String,
    pub args: Vec<Constraint>,
}

/// A constraint sub-tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `left op right` where `op` is a comparison operator
    Comparison {
        left: Box<Constraint>,
        operator: String,
        right: Box<Constraint>,
    },

    /// `left op right` for arithmetic or comparison operators
    BinaryOp {
        left: Box<Constraint>,
        operator: String,
        right: Box<Constraint>,
    },

    /// `left AND right OR ...`
    LogicalExpr {
        left: Box<Constraint>,
        operations: Vec<LogicalOperation>,
    },

    /// `object.field`
    FieldAccess { object: String, field: String },

    /// A bare name
    Variable { name: String },

    String(String),
    Number(f64),
    Boolean(bool),

    /// `NAME(args...)`
    FunctionCall { name: String, args: Vec<Constraint> },

    /// A fact literal used as a value: `User(name: p.name)`
    InlineFact {
        type_name: String,
        fields: Vec<(String, Constraint)>,
    },

    /// A node whose tag is not recognized
    Unknown(String),
}

/// One `op right` continuation of a logical expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalOperation {
    pub operator: String,
    pub right: Constraint,
}

/// A named action signature: `action notify(message: string, level: number = 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDefinition {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub is_default: bool,
    pub line: usize,
}

impl ActionDefinition {
    /// Number of parameters that must be supplied.
    pub fn required_arity(&self) -> usize {
        self.parameters.iter().filter(|p| p.is_required()).count()
    }
}

/// A parameter of an action definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub param_type: String,
    pub optional: bool,
    pub default_value: Option<Constraint>,
}

impl Parameter {
    pub fn is_required(&self) -> bool {
        !self.optional && self.default_value.is_none()
    }
}

/// A raw xuple-space declaration; policy values are validated later.
#[derive(Debug, Clone, PartialEq)]
pub struct XupleSpaceDeclaration {
    pub name: String,
    pub selection_policy: String,
    pub consumption_policy: ConsumptionPolicyDecl,
    pub retention_policy: RetentionPolicyDecl,
    pub max_size: f64,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionPolicyDecl {
    pub kind: String,
    pub limit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetentionPolicyDecl {
    pub kind: String,
    pub duration: Option<DurationDecl>,
}

/// A retention duration as written: seconds or duration text.
#[derive(Debug, Clone, PartialEq)]
pub enum DurationDecl {
    Seconds(f64),
    Text(String),
}

/// The `reset` directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reset {
    pub line: usize,
}
