//! Core lowering structure and variable bindings.

use std::collections::HashMap;
use tsd_ast::TypeDefinition;

/// Converts facts into evaluator-facing records.
///
/// Fact assignments are lowered like facts and additionally bind their
/// variable to the generated identifier, so later references resolve to it.
pub struct FactLowering<'a> {
    pub(crate) types: HashMap<&'a str, &'a TypeDefinition>,
    /// Variable name to the `_id_` of the fact it is bound to
    pub(crate) bindings: HashMap<String, String>,
}

impl<'a> FactLowering<'a> {
    #[must_use]
    pub fn new(types: impl IntoIterator<Item = &'a TypeDefinition>) -> Self {
        Self {
            types: types.into_iter().map(|t| (t.name.as_str(), t)).collect(),
            bindings: HashMap::new(),
        }
    }

    /// Binds a variable to an identifier.
    pub fn bind(&mut self, variable: impl Into<String>, id: impl Into<String>) {
        self.bindings.insert(variable.into(), id.into());
    }

    /// Looks up the identifier a variable is bound to.
    pub fn binding(&self, variable: &str) -> Option<&str> {
        self.bindings.get(variable).map(String::as_str)
    }
}
