//! Error types and error handling

use thiserror::Error;

use crate::store::StoreError;

/// Errors produced while compiling or executing a page
///
/// Both variants are logged where they are detected and then handed back to
/// the caller unchanged, so the request handler decides what the user sees.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Layout, partials and page could not be assembled into one template
    ///
    /// Usually a deployment defect (missing file, syntax error) rather than a
    /// runtime condition. Never retried.
    #[error("failed to compile template '{name}': {source}")]
    Compile {
        /// Template identifier of the page being compiled
        name: String,
        /// Underlying cause
        #[source]
        source: CompileError,
    },

    /// The compiled template failed while writing output
    ///
    /// The sink may already hold partial output.
    #[error("failed to execute template '{name}': {source}")]
    Execute {
        /// Template identifier of the page being executed
        name: String,
        /// Underlying engine error (missing field, sink write failure, ...)
        #[source]
        source: minijinja::Error,
    },
}

impl TemplateError {
    /// Template identifier the error refers to
    #[must_use]
    pub fn template_name(&self) -> &str {
        match self {
            Self::Compile { name, .. } | Self::Execute { name, .. } => name,
        }
    }

    /// Whether this is a compile failure
    #[must_use]
    pub const fn is_compile(&self) -> bool {
        matches!(self, Self::Compile { .. })
    }

    /// Whether this is an execute failure
    #[must_use]
    pub const fn is_execute(&self) -> bool {
        matches!(self, Self::Execute { .. })
    }
}

/// Cause of a compile failure
#[derive(Debug, Error)]
pub enum CompileError {
    /// A named resource could not be loaded from the template store
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A resource failed to parse
    #[error("syntax error: {0}")]
    Syntax(#[from] minijinja::Error),
}
