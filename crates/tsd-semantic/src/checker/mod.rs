//! Validation implementation modules.

mod actions;
mod core;
mod expressions;
mod facts;
mod helpers;
mod program;
mod rules;
mod types;
mod xuple;

pub use actions::{ActionValidator, default_actions};
pub use core::{Analysis, Validator};
pub use expressions::ExpressionAnalyzer;
pub use facts::FactValidator;
pub use xuple::{ConsumptionPolicy, RetentionPolicy, SelectionPolicy, XupleSpace};
