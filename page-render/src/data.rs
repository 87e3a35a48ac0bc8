//! Per-request template data
//!
//! [`TemplateData`] is the context every page is executed against. All fields
//! are always present in the serialized context, so templates can test them
//! (`{% if flash %}`) even under strict undefined behavior.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Data passed to a single render call
///
/// Built per request and moved into the render call. The default-data hook
/// may fill or overwrite fields before execution.
///
/// # Example
///
/// ```rust
/// use page_render::data::TemplateData;
///
/// let data = TemplateData::new()
///     .with_flash("Saved")
///     .with_string("title", "Settings")
///     .with_int("count", 3);
///
/// assert_eq!(data.flash, "Saved");
/// assert_eq!(data.int_map["count"], 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateData {
    /// Named string values
    pub string_map: HashMap<String, String>,

    /// Named integer values
    pub int_map: HashMap<String, i64>,

    /// Named float values
    pub float_map: HashMap<String, f32>,

    /// Arbitrary structured values
    pub data: HashMap<String, serde_json::Value>,

    /// Cross-site request forgery token for forms
    pub csrf_token: String,

    /// Success message shown once
    pub flash: String,

    /// Warning message shown once
    pub warning: String,

    /// Error message shown once
    pub error: String,

    /// Whether the current user is logged in
    pub is_authenticated: bool,

    /// Base URL of the backend API
    pub api: String,

    /// Version string appended to stylesheet URLs
    pub css_version: String,
}

impl TemplateData {
    /// Create empty template data
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flash message
    #[must_use]
    pub fn with_flash(mut self, message: impl Into<String>) -> Self {
        self.flash = message.into();
        self
    }

    /// Set the warning message
    #[must_use]
    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warning = message.into();
        self
    }

    /// Set the error message
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = message.into();
        self
    }

    /// Set the CSRF token
    #[must_use]
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = token.into();
        self
    }

    /// Mark the user as authenticated or not
    #[must_use]
    pub const fn authenticated(mut self, is_authenticated: bool) -> Self {
        self.is_authenticated = is_authenticated;
        self
    }

    /// Insert a string value
    #[must_use]
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.string_map.insert(key.into(), value.into());
        self
    }

    /// Insert an integer value
    #[must_use]
    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.int_map.insert(key.into(), value);
        self
    }

    /// Insert a float value
    #[must_use]
    pub fn with_float(mut self, key: impl Into<String>, value: f32) -> Self {
        self.float_map.insert(key.into(), value);
        self
    }

    /// Insert a structured value
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    /// Template context for execution
    #[must_use]
    pub fn to_value(&self) -> minijinja::Value {
        minijinja::Value::from_serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::Environment;
    use serde_json::json;

    #[test]
    fn test_default_is_empty() {
        let data = TemplateData::default();
        assert!(data.flash.is_empty());
        assert!(!data.is_authenticated);
        assert!(data.string_map.is_empty());
    }

    #[test]
    fn test_context_exposes_every_field() {
        let env = Environment::new();
        let data = TemplateData::new()
            .with_string("title", "Home")
            .with_int("count", 2)
            .with_float("ratio", 0.5)
            .with_data("user", json!({"name": "ada"}))
            .with_csrf_token("tok")
            .with_flash("ok")
            .with_warning("careful")
            .with_error("bad")
            .authenticated(true);

        let out = env
            .render_str(
                "{{ string_map.title }} {{ int_map.count }} {{ float_map.ratio }} \
                 {{ data.user.name }} {{ csrf_token }} {{ flash }} {{ warning }} \
                 {{ error }} {{ is_authenticated }} [{{ api }}][{{ css_version }}]",
                data.to_value(),
            )
            .unwrap();

        assert_eq!(out, "Home 2 0.5 ada tok ok careful bad True [][]");
    }

    #[test]
    fn test_deserialize_partial_json() {
        let data: TemplateData = serde_json::from_value(json!({"flash": "hi"})).unwrap();
        assert_eq!(data, TemplateData::new().with_flash("hi"));
    }
}
