//! Static type model of the TSD language.
//!
//! This module provides:
//! - The static types produced by inference (primitives, records, wildcards)
//! - Operator classification, including bounded base64 decoding
//! - The builtin function registry
mod functions;
mod operator;
mod static_type;

pub use functions::{FunctionRegistry, FunctionSignature};
pub use operator::{Operator, OperatorClass};
pub use static_type::{Primitive, StaticType};
