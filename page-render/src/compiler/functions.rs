//! Custom template functions
//!
//! The registry is plain configuration: the composition root fills it and
//! hands it to the compiler, which installs every entry into each new
//! environment before any source is parsed.

use minijinja::functions::Function;
use minijinja::value::{FunctionArgs, FunctionResult, Value};
use minijinja::Environment;
use std::collections::BTreeMap;

/// Mapping from function name to callable
///
/// Empty by default. See [`crate::helpers::register_defaults`] for the
/// helpers shipped with the crate.
///
/// # Example
///
/// ```rust
/// use page_render::compiler::FunctionRegistry;
///
/// let functions = FunctionRegistry::new()
///     .with("shout", |s: String| s.to_uppercase());
///
/// assert!(functions.contains("shout"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Value>,
}

impl FunctionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any function with the same name
    pub fn register<F, Rv, Args>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.functions.insert(name.into(), Value::from_function(f));
        self
    }

    /// Builder form of [`FunctionRegistry::register`]
    #[must_use]
    pub fn with<F, Rv, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.register(name, f);
        self
    }

    /// Whether a function called `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered function names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Number of registered functions
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub(crate) fn install(&self, env: &mut Environment<'static>) {
        for (name, function) in &self.functions {
            env.add_global(name.clone(), function.clone());
        }
    }
}
