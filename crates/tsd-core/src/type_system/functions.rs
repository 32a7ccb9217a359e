use super::StaticType;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Signature of a builtin function usable inside constraint expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: StaticType,
    /// Parameter types, when the function declares them
    pub parameters: Option<Vec<StaticType>>,
}

/// Case-insensitive table of builtin functions.
///
/// Lookups take a shared lock and registration an exclusive one, so a
/// registry can be shared between threads behind an [`Arc`].
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    entries: RwLock<HashMap<String, FunctionSignature>>,
}

static DEFAULT_REGISTRY: LazyLock<Arc<FunctionRegistry>> =
    LazyLock::new(|| Arc::new(FunctionRegistry::with_builtins()));

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the builtin string and math functions.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        let string = || StaticType::STRING;
        let number = || StaticType::NUMBER;

        registry.register("LENGTH", number(), None);
        registry.register(
            "SUBSTRING",
            string(),
            Some(vec![string(), number(), number()]),
        );
        registry.register("UPPER", string(), Some(vec![string()]));
        registry.register("LOWER", string(), Some(vec![string()]));
        registry.register("TRIM", string(), Some(vec![string()]));
        registry.register("ABS", number(), Some(vec![number()]));
        registry.register("ROUND", number(), Some(vec![number()]));
        registry.register("FLOOR", number(), Some(vec![number()]));
        registry.register("CEIL", number(), Some(vec![number()]));
        registry
    }

    /// Returns the process-wide registry holding the builtins.
    pub fn global() -> Arc<Self> {
        Arc::clone(&DEFAULT_REGISTRY)
    }

    /// Registers or replaces a function.
    pub fn register(
        &self,
        name: &str,
        return_type: StaticType,
        parameters: Option<Vec<StaticType>>,
    ) {
        let signature = FunctionSignature {
            name: name.to_string(),
            return_type,
            parameters,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_uppercase(), signature);
    }

    /// Looks up a function signature by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<FunctionSignature> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&name.to_uppercase())
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the registered return type or `default` for unknown names.
    pub fn return_type(&self, name: &str, default: StaticType) -> StaticType {
        self.get(name).map_or(default, |sig| sig.return_type)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
