//! Renderer construction

use std::sync::Arc;

use super::{CacheMode, Renderer};
use crate::cache::TemplateCache;
use crate::compiler::{EngineSettings, FunctionRegistry, TemplateCompiler};
use crate::defaults::{DefaultData, NoDefaults};

/// Builder for [`Renderer`]
///
/// Defaults: a fresh empty cache, [`NoDefaults`] as the default-data hook and
/// [`CacheMode::Enabled`].
#[must_use]
pub struct RendererBuilder {
    compiler: TemplateCompiler,
    cache: Option<TemplateCache>,
    defaults: Arc<dyn DefaultData>,
    mode: CacheMode,
}

impl RendererBuilder {
    pub(super) fn new(compiler: TemplateCompiler) -> Self {
        Self {
            compiler,
            cache: None,
            defaults: Arc::new(NoDefaults),
            mode: CacheMode::default(),
        }
    }

    /// Share an existing cache instead of creating one
    pub fn cache(mut self, cache: TemplateCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the cache mode
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the default-data hook
    pub fn defaults(mut self, hook: impl DefaultData + 'static) -> Self {
        self.defaults = Arc::new(hook);
        self
    }

    /// Set the custom template functions
    pub fn functions(mut self, functions: FunctionRegistry) -> Self {
        self.compiler = self.compiler.with_functions(functions);
        self
    }

    /// Set the engine options
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.compiler = self.compiler.with_settings(settings);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> Renderer {
        Renderer {
            compiler: self.compiler,
            cache: self.cache.unwrap_or_default(),
            defaults: self.defaults,
            mode: self.mode,
        }
    }
}
