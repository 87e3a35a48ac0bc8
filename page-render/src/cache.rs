//! Compiled template cache
//!
//! Maps template identifiers to compiled templates. Entries are added or
//! overwritten by the compiler and never removed; the table lives as long as
//! the process and is rebuilt lazily after a restart.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::compiler::CompiledTemplate;

/// Shared table of compiled templates
///
/// Cloning yields another handle to the same table, so the composition root
/// can hand one clone to the renderer and keep another for inspection.
#[derive(Clone, Default)]
pub struct TemplateCache {
    entries: Arc<RwLock<HashMap<String, Arc<CompiledTemplate>>>>,
}

impl TemplateCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached template for `identifier`
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<Arc<CompiledTemplate>> {
        self.entries.read().get(identifier).cloned()
    }

    /// Store a compiled template under its identifier, replacing any entry
    pub fn insert(&self, template: Arc<CompiledTemplate>) {
        let identifier = template.name().to_string();
        self.entries.write().insert(identifier, template);
    }

    /// Whether an entry exists for `identifier`
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.read().contains_key(identifier)
    }

    /// Number of cached templates
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no templates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Identifiers of all cached templates, sorted
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.entries.read().keys().cloned().collect();
        identifiers.sort();
        identifiers
    }
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
