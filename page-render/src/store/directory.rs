//! Templates read from disk

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use super::{StoreError, TemplateStore};

/// Store reading template sources from a directory
///
/// Logical names are resolved relative to `root`, so
/// `templates/home.page.tmpl` is read from `<root>/templates/home.page.tmpl`.
/// Nothing is cached here: every load reads the file again.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the store reads from
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for a logical name, or `None` if the name escapes the root
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let confined = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));

        confined.then(|| self.root.join(relative))
    }
}

impl TemplateStore for DirectoryStore {
    fn load(&self, name: &str) -> Result<Cow<'static, str>, StoreError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        match std::fs::read_to_string(&path) {
            Ok(source) => Ok(Cow::Owned(source)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(source) => Err(StoreError::Read {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|path| path.is_file())
    }
}
