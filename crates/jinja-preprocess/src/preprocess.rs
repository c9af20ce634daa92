//! The preprocessing loader decorator.
//!
//! [`Preprocessor`] wraps any [`TemplateLoader`] and rewrites template text on
//! its way from the loader to the engine:
//!
//! ```text
//! engine ──source("page")──▶ Preprocessor ──source("page")──▶ inner loader
//!        ◀── (page, transform(code), path) ◀──── (page, code, path)
//! ```
//!
//! Only [`source`](TemplateLoader::source) is affected. `exists`, `cache_key` and
//! `is_fresh` are answered by the inner loader unchanged, since they describe
//! the underlying template and not its processed text.
//!
//! # Cache Keys
//!
//! The cache key does not reflect the transform. An engine that caches
//! compiled templates by key alone will not tell apart the output of a
//! preprocessed loader and of the bare loader it wraps, so do not share one
//! cache between the two.

use tracing::debug;

use crate::error::{LoaderError, Result};
use crate::loader::TemplateLoader;
use crate::source::Source;
use crate::transform::Transform;

/// A loader that passes every template's text through a [`Transform`].
///
/// ```rust
/// use jinja_preprocess::{MemoryLoader, Preprocessor, StripTagIndent, TemplateLoader};
///
/// let inner = MemoryLoader::new().with_template("foo", "  {# c #}\n  text");
/// let loader = Preprocessor::new(inner, StripTagIndent);
///
/// let source = loader.source("foo").unwrap();
/// assert_eq!(source.code(), "{# c #}\n  text");
/// assert_eq!(source.name(), "foo");
/// ```
///
/// Plain closures work as transforms too:
///
/// ```rust
/// use jinja_preprocess::{MemoryLoader, Preprocessor, TemplateLoader};
///
/// let inner = MemoryLoader::new().with_template("foo", "hello");
/// let loader = Preprocessor::new(inner, |code: &str| code.to_uppercase());
///
/// assert_eq!(loader.source("foo").unwrap().code(), "HELLO");
/// ```
#[derive(Debug, Clone)]
pub struct Preprocessor<L, T> {
    inner: L,
    transform: T,
}

impl<L, T> Preprocessor<L, T>
where
    L: TemplateLoader,
    T: Transform,
{
    /// Wraps `inner` so that every loaded template is passed through `transform`.
    pub fn new(inner: L, transform: T) -> Self {
        Self { inner, transform }
    }

    /// The wrapped loader.
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// The transform applied to template text.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Splits the decorator back into its loader and transform.
    pub fn into_parts(self) -> (L, T) {
        (self.inner, self.transform)
    }
}

impl<L, T> TemplateLoader for Preprocessor<L, T>
where
    L: TemplateLoader,
    T: Transform,
{
    fn source(&self, name: &str) -> Result<Source> {
        let real = self.inner.source(name)?;
        let code = self
            .transform
            .transform(real.code())
            .map_err(|source| LoaderError::Transform {
                name: real.name().to_string(),
                source,
            })?;

        debug!(
            template = real.name(),
            before = real.code().len(),
            after = code.len(),
            "preprocessed template source"
        );
        Ok(real.with_code(code))
    }

    fn exists(&self, name: &str) -> bool {
        self.inner.exists(name)
    }

    fn cache_key(&self, name: &str) -> Result<String> {
        self.inner.cache_key(name)
    }

    fn is_fresh(&self, name: &str, time: i64) -> Result<bool> {
        self.inner.is_fresh(name, time)
    }
}
