//! Template helper functions
//!
//! Optional functions for the [`FunctionRegistry`]. Nothing is registered
//! unless the application calls [`register_defaults`].
//!
//! ```jinja
//! <form method="post">
//!   {{ csrf_field(csrf_token) }}
//! </form>
//! <link rel="stylesheet" href="{{ versioned('/static/css/styles.css', css_version) }}">
//! ```

use minijinja::value::Value;
use minijinja::HtmlEscape;

use crate::compiler::FunctionRegistry;

/// Name of the hidden form field carrying the CSRF token
pub const CSRF_FIELD_NAME: &str = "csrf_token";

/// Hidden input carrying a CSRF token
///
/// The token is HTML-escaped and the result is marked safe so auto-escaping
/// leaves the markup intact.
#[must_use]
pub fn csrf_field(token: &str) -> Value {
    Value::from_safe_string(format!(
        r#"<input type="hidden" name="{CSRF_FIELD_NAME}" value="{}">"#,
        HtmlEscape(token)
    ))
}

/// Asset URL with a cache-busting version query
///
/// Returns `path` unchanged when `version` is empty. The result is a plain
/// string and is escaped like any other value, so use it inside attributes.
#[must_use]
pub fn versioned(path: &str, version: &str) -> String {
    if version.is_empty() {
        return path.to_string();
    }
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}v={version}")
}

/// Register `csrf_field` and `versioned`
pub fn register_defaults(registry: &mut FunctionRegistry) -> &mut FunctionRegistry {
    registry
        .register("csrf_field", csrf_field)
        .register("versioned", versioned)
}
