//! Page rendering
//!
//! [`Renderer`] is the entry point handlers use. A render call:
//!
//! 1. resolves the compiled template, from the cache when caching is enabled
//!    and the page has been compiled before, otherwise by compiling it
//! 2. applies the default-data hook to the caller's data (or to empty data)
//! 3. executes the template into the caller's sink
//!
//! # Example
//!
//! ```rust
//! use page_render::data::TemplateData;
//! use page_render::renderer::{CacheMode, Renderer};
//! use page_render::store::EmbeddedStore;
//!
//! let renderer = Renderer::builder(EmbeddedStore::defaults())
//!     .cache_mode(CacheMode::Enabled)
//!     .build();
//!
//! let (request, ()) = http::Request::new(()).into_parts();
//! let mut body = Vec::new();
//! renderer
//!     .render(&mut body, &request, "home", Some(TemplateData::new().with_flash("Welcome")), &[])
//!     .unwrap();
//!
//! let html = String::from_utf8(body).unwrap();
//! assert!(html.contains("Welcome"));
//! ```

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use http::request::Parts;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::Arc;

mod builder;

pub use builder::RendererBuilder;

use crate::cache::TemplateCache;
use crate::compiler::{CompiledTemplate, TemplateCompiler};
use crate::data::TemplateData;
use crate::defaults::DefaultData;
use crate::error::TemplateError;
use crate::naming;
use crate::store::TemplateStore;

/// Whether compiled templates are reused across renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Reuse a cached template when one exists for the page
    #[default]
    Enabled,
    /// Recompile on every render; results are still written to the cache
    Disabled,
}

impl CacheMode {
    /// Whether cache reads are allowed
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Renders pages for HTTP handlers
///
/// Cheap to clone; clones share the compiler, cache and hook.
#[derive(Clone)]
pub struct Renderer {
    compiler: TemplateCompiler,
    cache: TemplateCache,
    defaults: Arc<dyn DefaultData>,
    mode: CacheMode,
}

impl Renderer {
    /// Start building a renderer over `store`
    #[must_use]
    pub fn builder(store: impl TemplateStore + 'static) -> RendererBuilder {
        RendererBuilder::new(TemplateCompiler::new(store))
    }

    /// Start building a renderer around an existing compiler
    #[must_use]
    pub fn with_compiler(compiler: TemplateCompiler) -> RendererBuilder {
        RendererBuilder::new(compiler)
    }

    /// Cache shared with this renderer
    #[must_use]
    pub const fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Compiler used on cache misses
    #[must_use]
    pub const fn compiler(&self) -> &TemplateCompiler {
        &self.compiler
    }

    /// Current cache mode
    #[must_use]
    pub const fn cache_mode(&self) -> CacheMode {
        self.mode
    }

    /// Number of compiles performed through this renderer's compiler
    #[must_use]
    pub fn compile_count(&self) -> usize {
        self.compiler.compile_count()
    }

    /// Compiled template for `page`, from the cache or freshly compiled
    ///
    /// With [`CacheMode::Enabled`] a cached entry is returned as is, even if
    /// it was compiled with a different set of partials.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Compile`] if compilation is needed and fails.
    pub fn resolve(
        &self,
        page: &str,
        partials: &[&str],
    ) -> Result<Arc<CompiledTemplate>, TemplateError> {
        if self.mode.is_enabled() {
            let identifier = naming::template_identifier(page);
            if let Some(template) = self.cache.get(&identifier) {
                tracing::trace!(template = %identifier, "Template cache hit");
                return Ok(template);
            }
        }

        self.compiler.compile(page, partials, &self.cache)
    }

    /// Render `page` into `sink`
    ///
    /// `data` of `None` renders with empty data; either way the default-data
    /// hook runs before execution.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Compile`] if the page cannot be compiled, in
    /// which case nothing has been written. Returns [`TemplateError::Execute`]
    /// if execution fails; `sink` may then hold partial output.
    pub fn render<W: io::Write>(
        &self,
        sink: W,
        request: &Parts,
        page: &str,
        data: Option<TemplateData>,
        partials: &[&str],
    ) -> Result<(), TemplateError> {
        let template = self.resolve(page, partials)?;

        let data = self
            .defaults
            .add_default_data(data.unwrap_or_default(), request);

        template.execute(data.to_value(), sink).map_err(|source| {
            tracing::error!(template = %template.name(), error = %source, "Template execution failed");
            TemplateError::Execute {
                name: template.name().to_string(),
                source,
            }
        })
    }

    /// Render `page` into a string
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::render`].
    pub fn render_to_string(
        &self,
        request: &Parts,
        page: &str,
        data: Option<TemplateData>,
        partials: &[&str],
    ) -> Result<String, TemplateError> {
        let mut body = Vec::new();
        self.render(&mut body, request, page, data, partials)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Render `page` as an HTML response
    ///
    /// Failures have already been logged by the time this returns and become
    /// a generic `500 Internal Server Error`.
    #[must_use]
    pub fn render_html(
        &self,
        request: &Parts,
        page: &str,
        data: Option<TemplateData>,
        partials: &[&str],
    ) -> Response {
        match self.render_to_string(request, page, data, partials) {
            Ok(html) => Html(html).into_response(),
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Template rendering failed",
            )
                .into_response(),
        }
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("compiler", &self.compiler)
            .field("cache", &self.cache)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
