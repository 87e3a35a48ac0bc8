//! In-memory template store

use std::borrow::Cow;
use std::collections::HashMap;

use super::{StoreError, TemplateStore};

/// Store holding template sources in a map
///
/// Built once and then only read.
///
/// # Example
///
/// ```rust
/// use page_render::store::{MemoryStore, TemplateStore};
///
/// let store = MemoryStore::new()
///     .with("templates/base.layout.tmpl", "<body>{% block content %}{% endblock %}</body>")
///     .with("templates/home.page.tmpl", "{% extends \"templates/base.layout.tmpl\" %}");
///
/// assert!(store.contains("templates/home.page.tmpl"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    templates: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing any previous source under the same name
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    /// Number of resources in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the store holds no resources
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for MemoryStore {
    fn load(&self, name: &str) -> Result<Cow<'static, str>, StoreError> {
        self.templates
            .get(name)
            .map(|source| Cow::Owned(source.clone()))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_source_replaces_earlier() {
        let store = MemoryStore::new()
            .with("templates/a.page.tmpl", "first")
            .with("templates/a.page.tmpl", "second");

        assert_eq!(store.len(), 1);
        assert_eq!(store.load("templates/a.page.tmpl").unwrap(), "second");
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(matches!(
            store.load("templates/base.layout.tmpl"),
            Err(StoreError::NotFound(_))
        ));
    }
}
