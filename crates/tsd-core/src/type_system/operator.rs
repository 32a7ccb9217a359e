use crate::text::sanitize;
use crate::{Error, Limits, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;

/// Whether an operator produces a number or a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Comparison,
}

/// Binary operators recognized in constraint trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "%" => Self::Modulo,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "<" => Self::Less,
            ">" => Self::Greater,
            "<=" => Self::LessEqual,
            ">=" => Self::GreaterEqual,
            _ => return None,
        };
        Some(op)
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
        }
    }

    pub const fn class(self) -> OperatorClass {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo => {
                OperatorClass::Arithmetic
            }
            _ => OperatorClass::Comparison,
        }
    }

    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    /// Classifies a raw operator string from the AST.
    ///
    /// Strings that are not operator symbols are tried as base64: payloads
    /// longer than `limits.max_operator_payload` and decodings that are not
    /// UTF-8 are rejected.
    ///
    /// # Errors
    /// Returns `MalformedAst` when the operator cannot be recognized.
    pub fn decode(raw: &str, limits: &Limits) -> Result<Self> {
        if let Some(op) = Self::from_symbol(raw) {
            return Ok(op);
        }

        let shown = sanitize(raw, limits.max_message_length);
        if raw.len() > limits.max_operator_payload {
            return Err(Error::MalformedAst(format!(
                "operator payload '{shown}' exceeds {} bytes",
                limits.max_operator_payload
            )));
        }

        let bytes = STANDARD
            .decode(raw)
            .map_err(|_| Error::MalformedAst(format!("unknown operator '{shown}'")))?;
        let decoded = String::from_utf8(bytes).map_err(|_| {
            Error::MalformedAst(format!("operator '{shown}' does not decode to UTF-8"))
        })?;

        Self::from_symbol(&decoded)
            .ok_or_else(|| Error::MalformedAst(format!("unknown operator '{shown}'")))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
