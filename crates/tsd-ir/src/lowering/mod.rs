//! Lowering of validated facts to evaluator-facing records.

mod core;
mod facts;

pub use core::FactLowering;
