//! page-render: layout, page and partial rendering for axum applications
//!
//! Pages are assembled from three kinds of templates that follow a fixed
//! naming convention:
//!
//! - one base layout shared by every page (`templates/base.layout.tmpl`)
//! - pages (`templates/<page>.page.tmpl`)
//! - optional partials (`templates/<name>.partial.tmpl`)
//!
//! The [`Renderer`](renderer::Renderer) compiles a page together with the
//! layout and the requested partials, caches the result under the page's
//! identifier, fills request-derived defaults into the
//! [`TemplateData`](data::TemplateData) and writes the output to a sink.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::extract::{Request, State};
//! use axum::response::Response;
//! use page_render::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     page_render::observability::init()?;
//!
//!     let config = PageRenderConfig::load_for_service("my-app")?;
//!     let state = AppState::from_config(config);
//!
//!     let app = axum::Router::new()
//!         .route("/", axum::routing::get(home))
//!         .with_state(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//!
//! async fn home(State(renderer): State<Renderer>, request: Request) -> Response {
//!     let (parts, _body) = request.into_parts();
//!     let data = TemplateData::new().with_flash("Welcome");
//!     renderer.render_html(&parts, "home", Some(data), &[])
//! }
//! ```
//!
//! # Cache Modes
//!
//! With [`CacheMode::Enabled`](renderer::CacheMode::Enabled) each page is
//! compiled once and reused. With
//! [`CacheMode::Disabled`](renderer::CacheMode::Disabled) every render
//! recompiles, so edits to templates on disk show up immediately.

#![allow(clippy::missing_errors_doc)]

pub mod cache;
pub mod compiler;
pub mod config;
pub mod data;
pub mod defaults;
pub mod error;
pub mod helpers;
pub mod naming;
pub mod observability;
pub mod renderer;
pub mod state;
pub mod store;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use page_render::prelude::*;
    //! ```

    // Rendering
    pub use crate::cache::TemplateCache;
    pub use crate::compiler::{CompiledTemplate, EngineSettings, FunctionRegistry, TemplateCompiler};
    pub use crate::renderer::{CacheMode, Renderer, RendererBuilder};

    // Template data and hooks
    pub use crate::data::TemplateData;
    pub use crate::defaults::{
        Chain, DefaultData, NoDefaults, SessionDefaults, SessionSnapshot, StaticDefaults,
    };

    // Template sources
    pub use crate::store::{DirectoryStore, EmbeddedStore, MemoryStore, StoreError, TemplateStore};

    // Error types
    pub use crate::error::{CompileError, TemplateError};

    // Configuration and application state
    pub use crate::config::{AppEnv, PageRenderConfig};
    pub use crate::state::AppState;

    // Re-export key dependencies
    pub use axum;
    pub use minijinja;
}
