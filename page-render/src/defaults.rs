//! Default template data
//!
//! Every render passes its [`TemplateData`] through a [`DefaultData`] hook
//! before execution. The hook injects cross-cutting values derived from
//! configuration or from the request (CSRF token, flash messages, auth state,
//! API base, stylesheet version). Hooks cannot fail.
//!
//! # Example
//!
//! ```rust
//! use http::request::Parts;
//! use page_render::data::TemplateData;
//! use page_render::defaults::{Chain, DefaultData, SessionDefaults, StaticDefaults};
//!
//! let hook = Chain::new(
//!     StaticDefaults::new("https://api.example.com", "42"),
//!     SessionDefaults,
//! );
//!
//! let (parts, ()) = http::Request::new(()).into_parts();
//! let data = hook.add_default_data(TemplateData::new(), &parts);
//! assert_eq!(data.css_version, "42");
//! ```

use http::request::Parts;

use crate::data::TemplateData;

/// Hook that injects default values into template data
#[cfg_attr(test, mockall::automock)]
pub trait DefaultData: Send + Sync {
    /// Return `data` with defaults applied
    ///
    /// Must be idempotent: applying the hook twice gives the same result as
    /// applying it once.
    fn add_default_data(&self, data: TemplateData, request: &Parts) -> TemplateData;
}

impl<F> DefaultData for F
where
    F: Fn(TemplateData, &Parts) -> TemplateData + Send + Sync,
{
    fn add_default_data(&self, data: TemplateData, request: &Parts) -> TemplateData {
        self(data, request)
    }
}

/// Hook that returns the data unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultData for NoDefaults {
    fn add_default_data(&self, data: TemplateData, _request: &Parts) -> TemplateData {
        data
    }
}

/// Hook filling the API base and stylesheet version from configuration
///
/// Only empty fields are filled, so a handler can still override either value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDefaults {
    api: String,
    css_version: String,
}

impl StaticDefaults {
    /// Create the hook
    #[must_use]
    pub fn new(api: impl Into<String>, css_version: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            css_version: css_version.into(),
        }
    }
}

impl DefaultData for StaticDefaults {
    fn add_default_data(&self, mut data: TemplateData, _request: &Parts) -> TemplateData {
        if data.api.is_empty() {
            data.api.clone_from(&self.api);
        }
        if data.css_version.is_empty() {
            data.css_version.clone_from(&self.css_version);
        }
        data
    }
}

/// Session values made available to rendering
///
/// Session middleware inserts this into the request extensions; the
/// [`SessionDefaults`] hook copies it into the template data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// CSRF token bound to the session
    pub csrf_token: String,

    /// Pending success message
    pub flash: String,

    /// Pending warning message
    pub warning: String,

    /// Pending error message
    pub error: String,

    /// Whether the session belongs to a logged-in user
    pub is_authenticated: bool,
}

/// Hook copying a [`SessionSnapshot`] request extension into the data
///
/// The CSRF token and authentication flag always come from the session.
/// Messages only fill fields the handler left empty. Requests without a
/// snapshot pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionDefaults;

impl DefaultData for SessionDefaults {
    fn add_default_data(&self, mut data: TemplateData, request: &Parts) -> TemplateData {
        let Some(session) = request.extensions.get::<SessionSnapshot>() else {
            return data;
        };

        data.csrf_token.clone_from(&session.csrf_token);
        data.is_authenticated = session.is_authenticated;

        for (field, value) in [
            (&mut data.flash, &session.flash),
            (&mut data.warning, &session.warning),
            (&mut data.error, &session.error),
        ] {
            if field.is_empty() {
                field.clone_from(value);
            }
        }

        data
    }
}

/// Two hooks applied in sequence
#[derive(Debug, Clone, Default)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    /// Apply `first`, then `second`
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: DefaultData, B: DefaultData> DefaultData for Chain<A, B> {
    fn add_default_data(&self, data: TemplateData, request: &Parts) -> TemplateData {
        let data = self.first.add_default_data(data, request);
        self.second.add_default_data(data, request)
    }
}
