//! The template source provider abstraction and its stock implementations.
//!
//! [`TemplateLoader`] is the four-operation contract between a template engine
//! and wherever templates live:
//!
//! | Operation | Answers |
//! |-----------|---------|
//! | [`source`](TemplateLoader::source) | What is the text of this template? |
//! | [`exists`](TemplateLoader::exists) | Is there a template by this name? |
//! | [`cache_key`](TemplateLoader::cache_key) | Which compiled template does this name map to? |
//! | [`is_fresh`](TemplateLoader::is_fresh) | Is a template compiled at `time` still current? |
//!
//! Two loaders are provided: [`MemoryLoader`] for templates held in a map, and
//! [`FilesystemLoader`] for templates read from directories. Anything that
//! implements the trait can be wrapped by a [`Preprocessor`](crate::Preprocessor).

pub(crate) mod filesystem;
mod memory;

use std::sync::Arc;

use crate::error::Result;
use crate::source::Source;

pub use filesystem::{FilesystemLoader, TEMPLATE_EXTENSIONS};
pub use memory::MemoryLoader;

/// A provider of template sources.
///
/// Implementations must be thread-safe so they can back a
/// [`minijinja::Environment`] loader.
pub trait TemplateLoader: Send + Sync {
    /// Returns the source of the named template.
    ///
    /// # Errors
    ///
    /// [`LoaderError::NotFound`](crate::LoaderError::NotFound) when the name is
    /// unknown, or whatever failure reading the template produced.
    fn source(&self, name: &str) -> Result<Source>;

    /// Returns true if a template with this name can be loaded.
    ///
    /// Never fails: unknown or invalid names simply report `false`.
    fn exists(&self, name: &str) -> bool;

    /// Returns the key under which a compiled version of the template is cached.
    fn cache_key(&self, name: &str) -> Result<String>;

    /// Returns true if the template has not changed since `time` (Unix seconds).
    fn is_fresh(&self, name: &str, time: i64) -> Result<bool>;
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for &L {
    fn source(&self, name: &str) -> Result<Source> {
        (**self).source(name)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn cache_key(&self, name: &str) -> Result<String> {
        (**self).cache_key(name)
    }

    fn is_fresh(&self, name: &str, time: i64) -> Result<bool> {
        (**self).is_fresh(name, time)
    }
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for Box<L> {
    fn source(&self, name: &str) -> Result<Source> {
        (**self).source(name)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn cache_key(&self, name: &str) -> Result<String> {
        (**self).cache_key(name)
    }

    fn is_fresh(&self, name: &str, time: i64) -> Result<bool> {
        (**self).is_fresh(name, time)
    }
}

impl<L: TemplateLoader + ?Sized> TemplateLoader for Arc<L> {
    fn source(&self, name: &str) -> Result<Source> {
        (**self).source(name)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }

    fn cache_key(&self, name: &str) -> Result<String> {
        (**self).cache_key(name)
    }

    fn is_fresh(&self, name: &str, time: i64) -> Result<bool> {
        (**self).is_fresh(name, time)
    }
}
