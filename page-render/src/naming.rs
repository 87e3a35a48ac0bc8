//! Template naming convention
//!
//! Every resource the compiler loads is addressed by a logical name built
//! here. Pages live at `templates/<page>.page.tmpl`, partials at
//! `templates/<name>.partial.tmpl`, and every page shares the fixed base
//! layout at `templates/base.layout.tmpl`.
//!
//! The page path doubles as the template identifier: it is the cache key and
//! the name of the compiled unit. Templates refer to each other by these same
//! names:
//!
//! ```jinja
//! {% extends "templates/base.layout.tmpl" %}
//! {% block content %}{% include "templates/nav.partial.tmpl" %}{% endblock %}
//! ```

/// Directory prefix shared by every template resource
pub const TEMPLATE_DIR: &str = "templates";

/// Logical name of the base layout shared by all pages
pub const BASE_LAYOUT: &str = "templates/base.layout.tmpl";

/// Suffix of page resources
pub const PAGE_SUFFIX: &str = ".page.tmpl";

/// Suffix of partial resources
pub const PARTIAL_SUFFIX: &str = ".partial.tmpl";

/// Template identifier for a page
///
/// # Examples
///
/// ```rust
/// use page_render::naming::template_identifier;
///
/// assert_eq!(template_identifier("home"), "templates/home.page.tmpl");
/// ```
#[must_use]
pub fn template_identifier(page: &str) -> String {
    format!("{TEMPLATE_DIR}/{page}{PAGE_SUFFIX}")
}

/// Resource path for a partial
///
/// # Examples
///
/// ```rust
/// use page_render::naming::partial_path;
///
/// assert_eq!(partial_path("nav"), "templates/nav.partial.tmpl");
/// ```
#[must_use]
pub fn partial_path(name: &str) -> String {
    format!("{TEMPLATE_DIR}/{name}{PARTIAL_SUFFIX}")
}

/// Resource paths for an ordered list of partials, order preserved
#[must_use]
pub fn partial_paths(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| partial_path(name)).collect()
}

/// Recover the page name from a template identifier
///
/// Returns `None` if `identifier` does not follow the page convention.
#[must_use]
pub fn page_name(identifier: &str) -> Option<&str> {
    identifier
        .strip_prefix(TEMPLATE_DIR)?
        .strip_prefix('/')?
        .strip_suffix(PAGE_SUFFIX)
        .filter(|page| !page.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identifier_for_home() {
        assert_eq!(template_identifier("home"), "templates/home.page.tmpl");
    }

    #[test]
    fn test_partial_paths_keep_order() {
        let paths = partial_paths(&["nav", "footer", "nav"]);
        assert_eq!(
            paths,
            vec![
                "templates/nav.partial.tmpl",
                "templates/footer.partial.tmpl",
                "templates/nav.partial.tmpl",
            ]
        );
    }

    #[test]
    fn test_partial_paths_empty() {
        assert!(partial_paths(&[]).is_empty());
    }

    #[test]
    fn test_page_name_rejects_other_resources() {
        assert_eq!(page_name(BASE_LAYOUT), None);
        assert_eq!(page_name("templates/nav.partial.tmpl"), None);
        assert_eq!(page_name("templates/.page.tmpl"), None);
        assert_eq!(page_name("home.page.tmpl"), None);
    }

    proptest! {
        #[test]
        fn identifier_names_the_page(page in "[a-z][a-z0-9_-]{0,24}") {
            let id = template_identifier(&page);
            prop_assert!(id.starts_with("templates/"));
            prop_assert!(id.ends_with(".page.tmpl"));
            prop_assert_eq!(page_name(&id), Some(page.as_str()));
        }

        #[test]
        fn partial_never_collides_with_page(name in "[a-z][a-z0-9_-]{0,24}") {
            prop_assert_ne!(partial_path(&name), template_identifier(&name));
        }
    }
}
