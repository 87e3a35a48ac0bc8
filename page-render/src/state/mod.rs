//! Application state
//!
//! The composition root: owns the configuration and the one [`Renderer`]
//! (with its cache, functions and default-data hook) that handlers share.

use axum::extract::FromRef;
use std::sync::Arc;

use crate::compiler::{FunctionRegistry, TemplateCompiler};
use crate::config::PageRenderConfig;
use crate::defaults::{Chain, SessionDefaults, StaticDefaults};
use crate::helpers;
use crate::renderer::Renderer;
use crate::store::{DirectoryStore, EmbeddedStore, TemplateStore};

/// Application state for page-render applications
///
/// # Example
///
/// ```rust
/// use page_render::state::AppState;
///
/// let state = AppState::new();
///
/// let app: axum::Router = axum::Router::new()
///     .route("/", axum::routing::get(|| async { "Hello!" }))
///     .with_state(state);
/// ```
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<PageRenderConfig>,
    renderer: Renderer,
}

impl AppState {
    /// Create application state from default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(PageRenderConfig::default())
    }

    /// Create application state from `config`
    ///
    /// Templates come from `templates.template_dir` when set and from the
    /// embedded bundle otherwise. The renderer gets the helper functions and
    /// a hook filling asset settings and session values.
    #[must_use]
    pub fn from_config(config: PageRenderConfig) -> Self {
        let store: Arc<dyn TemplateStore> = match &config.templates.template_dir {
            Some(dir) => Arc::new(DirectoryStore::new(dir)),
            None => Arc::new(EmbeddedStore::defaults()),
        };

        let mut functions = FunctionRegistry::new();
        helpers::register_defaults(&mut functions);

        let hook = Chain::new(
            StaticDefaults::new(&config.assets.api, &config.assets.css_version),
            SessionDefaults,
        );

        let renderer = Renderer::with_compiler(TemplateCompiler::from_shared(store))
            .cache_mode(config.cache_mode())
            .settings(config.templates.engine())
            .functions(functions)
            .defaults(hook)
            .build();

        tracing::debug!(
            cache = ?config.cache_mode(),
            template_dir = ?config.templates.template_dir,
            "Page renderer ready"
        );

        Self::with_renderer(config, renderer)
    }

    /// Create application state around an already built renderer
    #[must_use]
    pub fn with_renderer(config: PageRenderConfig, renderer: Renderer) -> Self {
        Self {
            config: Arc::new(config),
            renderer,
        }
    }

    /// Get configuration reference
    #[must_use]
    pub fn config(&self) -> &PageRenderConfig {
        &self.config
    }

    /// Get the shared renderer
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl FromRef<AppState> for Renderer {
    fn from_ref(state: &AppState) -> Self {
        state.renderer.clone()
    }
}
