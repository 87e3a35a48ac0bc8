//! Template compilation
//!
//! The compiler assembles one executable unit per page from three kinds of
//! resources, loaded in this order:
//!
//! 1. the base layout (`templates/base.layout.tmpl`)
//! 2. each requested partial (`templates/<name>.partial.tmpl`), one resource
//!    per name, in the order given
//! 3. the page itself (`templates/<page>.page.tmpl`)
//!
//! All of them are parsed into a fresh `minijinja` environment that already
//! carries the custom functions, and the result is stored in the
//! [`TemplateCache`] under the page's identifier.
//!
//! # Example
//!
//! ```rust
//! use page_render::cache::TemplateCache;
//! use page_render::compiler::TemplateCompiler;
//! use page_render::store::EmbeddedStore;
//!
//! let compiler = TemplateCompiler::new(EmbeddedStore::defaults());
//! let cache = TemplateCache::new();
//!
//! let template = compiler.compile("contact", &["nav", "footer"], &cache).unwrap();
//! assert_eq!(template.name(), "templates/contact.page.tmpl");
//! assert!(cache.contains("templates/contact.page.tmpl"));
//! ```

use minijinja::value::Value;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod functions;

pub use functions::FunctionRegistry;

use crate::cache::TemplateCache;
use crate::error::{CompileError, TemplateError};
use crate::naming;
use crate::store::TemplateStore;

/// Engine options applied to every compiled environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Fail execution when a template references a missing field
    pub strict_undefined: bool,

    /// HTML-escape every interpolated value
    pub html_escape: bool,

    /// Drop the newline after a block tag and leading whitespace before it
    pub trim_blocks: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            strict_undefined: true,
            html_escape: true,
            trim_blocks: true,
        }
    }
}

impl EngineSettings {
    fn apply(self, env: &mut Environment<'static>) {
        env.set_undefined_behavior(if self.strict_undefined {
            UndefinedBehavior::Strict
        } else {
            UndefinedBehavior::Lenient
        });

        if self.html_escape {
            env.set_auto_escape_callback(|_| AutoEscape::Html);
        } else {
            env.set_auto_escape_callback(|_| AutoEscape::None);
        }

        env.set_trim_blocks(self.trim_blocks);
        env.set_lstrip_blocks(self.trim_blocks);
    }
}

/// Layout, partials and page compiled together
///
/// Immutable once built. Shared through `Arc` and safe to execute from many
/// requests at once.
#[derive(Debug)]
pub struct CompiledTemplate {
    name: String,
    env: Environment<'static>,
}

impl CompiledTemplate {
    /// Template identifier of the page
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of every resource compiled into this unit, sorted
    #[must_use]
    pub fn resources(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.env.templates().map(|(name, _)| name).collect();
        names.sort_unstable();
        names
    }

    /// Execute the page against `ctx`, writing output into `sink`
    ///
    /// # Errors
    ///
    /// Returns the engine error if a referenced value is missing (with strict
    /// undefined behavior), a runtime error occurs, or the sink rejects a
    /// write. Output written before the failure stays in the sink.
    pub fn execute<W: io::Write>(&self, ctx: Value, sink: W) -> Result<(), minijinja::Error> {
        self.env
            .get_template(&self.name)?
            .render_captured_to(ctx, sink)?;
        Ok(())
    }

    /// Execute the page against `ctx` into a string
    ///
    /// # Errors
    ///
    /// Same conditions as [`CompiledTemplate::execute`], minus sink failures.
    pub fn render(&self, ctx: Value) -> Result<String, minijinja::Error> {
        self.env.get_template(&self.name)?.render(ctx)
    }
}

/// Builds compiled templates from a store
///
/// Cheap to clone; clones share the store, function registry and compile
/// counter.
#[derive(Clone)]
pub struct TemplateCompiler {
    store: Arc<dyn TemplateStore>,
    functions: Arc<FunctionRegistry>,
    settings: EngineSettings,
    compiles: Arc<AtomicUsize>,
}

impl TemplateCompiler {
    /// Create a compiler over `store` with no custom functions
    #[must_use]
    pub fn new(store: impl TemplateStore + 'static) -> Self {
        Self::from_shared(Arc::new(store))
    }

    /// Create a compiler over an already shared store
    #[must_use]
    pub fn from_shared(store: Arc<dyn TemplateStore>) -> Self {
        Self {
            store,
            functions: Arc::new(FunctionRegistry::new()),
            settings: EngineSettings::default(),
            compiles: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Use `functions` for every subsequent compile
    #[must_use]
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = Arc::new(functions);
        self
    }

    /// Use `settings` for every subsequent compile
    #[must_use]
    pub const fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Engine settings in use
    #[must_use]
    pub const fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Registered custom functions
    #[must_use]
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Number of compiles attempted so far, failed ones included
    #[must_use]
    pub fn compile_count(&self) -> usize {
        self.compiles.load(Ordering::Relaxed)
    }

    /// Compile `page` with `partials` and cache the result
    ///
    /// On success the template is inserted into `cache` under the page's
    /// identifier, replacing any earlier entry. On failure the cache is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Compile`] if the layout, a partial or the page
    /// is missing from the store or fails to parse.
    pub fn compile(
        &self,
        page: &str,
        partials: &[&str],
        cache: &TemplateCache,
    ) -> Result<Arc<CompiledTemplate>, TemplateError> {
        let identifier = naming::template_identifier(page);
        self.compiles.fetch_add(1, Ordering::Relaxed);

        let template = match self.build(&identifier, partials) {
            Ok(template) => Arc::new(template),
            Err(source) => {
                tracing::error!(template = %identifier, error = %source, "Template compile failed");
                return Err(TemplateError::Compile {
                    name: identifier,
                    source,
                });
            }
        };

        cache.insert(Arc::clone(&template));
        tracing::debug!(template = %identifier, partials = ?partials, "Template compiled");

        Ok(template)
    }

    fn build(&self, identifier: &str, partials: &[&str]) -> Result<CompiledTemplate, CompileError> {
        let mut env = Environment::new();
        self.settings.apply(&mut env);
        self.functions.install(&mut env);

        let mut resources = Vec::with_capacity(partials.len() + 2);
        resources.push(naming::BASE_LAYOUT.to_string());
        resources.extend(naming::partial_paths(partials));
        resources.push(identifier.to_string());

        for name in resources {
            let source = self.store.load(&name)?;
            env.add_template_owned(name, source)?;
        }

        env.get_template(identifier)?;

        Ok(CompiledTemplate {
            name: identifier.to_string(),
            env,
        })
    }
}

impl std::fmt::Debug for TemplateCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCompiler")
            .field("functions", &self.functions.names().collect::<Vec<_>>())
            .field("settings", &self.settings)
            .field("compiles", &self.compile_count())
            .finish_non_exhaustive()
    }
}
