//! Templates compiled into the binary

use std::borrow::Cow;

use super::{StoreError, TemplateStore};

/// Default template bundle shipped with the crate
///
/// Contains the base layout, a `home` page, a `contact` page and the `nav`
/// and `footer` partials used by `contact`.
pub static DEFAULT_TEMPLATES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "templates/base.layout.tmpl" => include_str!("defaults/templates/base.layout.tmpl"),
    "templates/home.page.tmpl" => include_str!("defaults/templates/home.page.tmpl"),
    "templates/contact.page.tmpl" => include_str!("defaults/templates/contact.page.tmpl"),
    "templates/nav.partial.tmpl" => include_str!("defaults/templates/nav.partial.tmpl"),
    "templates/footer.partial.tmpl" => include_str!("defaults/templates/footer.partial.tmpl"),
};

/// Store backed by a static map of embedded sources
///
/// Applications embed their own bundle the same way [`DEFAULT_TEMPLATES`] is
/// built: a `phf_map!` of `include_str!` contents keyed by logical name.
///
/// # Example
///
/// ```rust
/// use page_render::store::{EmbeddedStore, TemplateStore};
///
/// let store = EmbeddedStore::defaults();
/// assert!(store.contains("templates/base.layout.tmpl"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedStore {
    templates: &'static phf::Map<&'static str, &'static str>,
}

impl EmbeddedStore {
    /// Create a store over an embedded template map
    #[must_use]
    pub const fn new(templates: &'static phf::Map<&'static str, &'static str>) -> Self {
        Self { templates }
    }

    /// Store over the crate's default bundle
    #[must_use]
    pub const fn defaults() -> Self {
        Self::new(&DEFAULT_TEMPLATES)
    }

    /// Names of all embedded resources
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.templates.keys().copied()
    }
}

impl Default for EmbeddedStore {
    fn default() -> Self {
        Self::defaults()
    }
}

impl TemplateStore for EmbeddedStore {
    fn load(&self, name: &str) -> Result<Cow<'static, str>, StoreError> {
        self.templates
            .get(name)
            .map(|source| Cow::Borrowed(*source))
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}
