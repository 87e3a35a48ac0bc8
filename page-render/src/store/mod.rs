//! Template stores
//!
//! A store is a read-only collection of template sources addressed by the
//! logical names from [`crate::naming`]. The compiler asks for each resource
//! by name and never enumerates a store.
//!
//! Three stores are provided:
//! - [`EmbeddedStore`]: sources compiled into the binary
//! - [`MemoryStore`]: sources held in a map, handy for tests
//! - [`DirectoryStore`]: sources read from disk on every load, so edits show
//!   up immediately when cache reads are disabled

use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;

mod directory;
mod embedded;
mod memory;

pub use directory::DirectoryStore;
pub use embedded::{EmbeddedStore, DEFAULT_TEMPLATES};
pub use memory::MemoryStore;

/// Errors that can occur when loading a template source
#[derive(Debug, Error)]
pub enum StoreError {
    /// No resource with this name exists in the store
    #[error("template resource not found: {0}")]
    NotFound(String),

    /// The resource exists but could not be read
    #[error("failed to read template resource '{name}': {source}")]
    Read {
        /// Logical name of the resource
        name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Read-only source of named template texts
pub trait TemplateStore: Send + Sync {
    /// Load the source text of the resource called `name`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the resource does not exist and
    /// [`StoreError::Read`] if it exists but cannot be read.
    fn load(&self, name: &str) -> Result<Cow<'static, str>, StoreError>;

    /// Whether a resource called `name` exists
    fn contains(&self, name: &str) -> bool {
        self.load(name).is_ok()
    }
}

impl<T: TemplateStore + ?Sized> TemplateStore for Arc<T> {
    fn load(&self, name: &str) -> Result<Cow<'static, str>, StoreError> {
        (**self).load(name)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }
}
