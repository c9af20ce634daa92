//! In-memory template loader.

use std::collections::HashMap;

use crate::error::{LoaderError, Result};
use crate::loader::TemplateLoader;
use crate::source::Source;

/// Loads templates from a name → text map.
///
/// Useful for tests and for templates compiled into the binary. Entries never
/// change behind the engine's back, so every known template is always fresh and
/// its cache key is its name.
///
/// ```rust
/// use jinja_preprocess::{MemoryLoader, TemplateLoader};
///
/// let loader = MemoryLoader::new()
///     .with_template("greeting", "Hello, {{ name }}!");
///
/// assert!(loader.exists("greeting"));
/// assert_eq!(loader.source("greeting").unwrap().code(), "Hello, {{ name }}!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    templates: HashMap<String, String>,
}

impl MemoryLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, returning the loader for chaining.
    pub fn with_template(mut self, name: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(name, code);
        self
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, name: impl Into<String>, code: impl Into<String>) {
        self.templates.insert(name.into(), code.into());
    }

    /// Number of templates held.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if no templates are held.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn get(&self, name: &str) -> Result<&String> {
        self.templates
            .get(name)
            .ok_or_else(|| LoaderError::not_found(name))
    }
}

impl<N, C> FromIterator<(N, C)> for MemoryLoader
where
    N: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut loader = MemoryLoader::new();
        for (name, code) in iter {
            loader.insert(name, code);
        }
        loader
    }
}

impl TemplateLoader for MemoryLoader {
    fn source(&self, name: &str) -> Result<Source> {
        let code = self.get(name)?;
        Ok(Source::new(code.clone(), name, None))
    }

    fn exists(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    fn cache_key(&self, name: &str) -> Result<String> {
        self.get(name)?;
        Ok(name.to_string())
    }

    fn is_fresh(&self, name: &str, _time: i64) -> Result<bool> {
        self.get(name)?;
        Ok(true)
    }
}
