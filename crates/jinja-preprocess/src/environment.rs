//! Rendering templates from a [`TemplateLoader`] with MiniJinja.
//!
//! Two levels of integration are offered:
//!
//! - [`minijinja_loader`] turns any loader into a function for
//!   [`minijinja::Environment::set_loader`]. MiniJinja then loads each template
//!   once and keeps it for the life of the environment.
//! - [`TemplateEnvironment`] also consults [`cache_key`](TemplateLoader::cache_key)
//!   and [`is_fresh`](TemplateLoader::is_fresh), recompiling a template when its
//!   source has changed since it was last compiled.

use std::collections::HashMap;
use std::sync::Arc;

use minijinja::{Environment, Error, ErrorKind};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::RenderError;
use crate::loader::filesystem::now_secs;
use crate::loader::TemplateLoader;

/// Adapts a loader for [`minijinja::Environment::set_loader`].
///
/// Unknown templates are reported as missing so MiniJinja raises its usual
/// "template not found" error. Any other loader failure becomes an
/// [`ErrorKind::InvalidOperation`] error with the loader error as its source.
///
/// ```rust
/// use jinja_preprocess::{minijinja_loader, MemoryLoader, Preprocessor};
/// use minijinja::{context, Environment};
///
/// let loader = Preprocessor::new(
///     MemoryLoader::new().with_template("hello", "Hello, NAME!"),
///     |code: &str| code.replace("NAME", "{{ name }}"),
/// );
///
/// let mut env = Environment::new();
/// env.set_loader(minijinja_loader(loader));
///
/// let tmpl = env.get_template("hello").unwrap();
/// assert_eq!(tmpl.render(context! { name => "World" }).unwrap(), "Hello, World!");
/// ```
pub fn minijinja_loader<L>(
    loader: L,
) -> impl Fn(&str) -> Result<Option<String>, Error> + Send + Sync + 'static
where
    L: TemplateLoader + 'static,
{
    move |name: &str| match loader.source(name) {
        Ok(source) => Ok(Some(source.into_code())),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("could not load template \"{}\"", name),
        )
        .with_source(err)),
    }
}

/// A MiniJinja environment fed by a [`TemplateLoader`], with freshness checks.
///
/// Compiled templates are tracked by the loader's cache key together with the
/// time they were compiled. Each [`render`](Self::render) asks the loader
/// whether the template is still fresh and reloads it if not. Templates pulled
/// in with `{% include %}` or `{% extends %}` go through the same loader but
/// are kept by MiniJinja without freshness checks.
///
/// ```rust
/// use jinja_preprocess::{MemoryLoader, Preprocessor, StripTagIndent, TemplateEnvironment};
/// use minijinja::context;
///
/// let loader = Preprocessor::new(
///     MemoryLoader::new().with_template(
///         "list",
///         "<ul>\n  {% for i in items %}\n  <li>{{ i }}</li>\n  {% endfor %}\n</ul>",
///     ),
///     StripTagIndent,
/// );
///
/// let mut env = TemplateEnvironment::new(loader);
/// env.environment_mut().set_trim_blocks(true);
///
/// let out = env.render("list", context! { items => ["a", "b"] }).unwrap();
/// assert_eq!(out, "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
/// ```
pub struct TemplateEnvironment<L> {
    env: Environment<'static>,
    loader: Arc<L>,
    /// Cache key → Unix time the template was compiled at.
    compiled: HashMap<String, i64>,
}

impl<L: TemplateLoader + 'static> TemplateEnvironment<L> {
    /// Creates an environment loading templates from `loader`.
    pub fn new(loader: L) -> Self {
        let loader = Arc::new(loader);
        let mut env = Environment::new();
        env.set_loader(minijinja_loader(Arc::clone(&loader)));
        Self {
            env,
            loader,
            compiled: HashMap::new(),
        }
    }

    /// The loader templates are read from.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use this to register filters and functions or to change syntax and
    /// whitespace settings.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    /// Renders the named template, compiling or recompiling it as needed.
    ///
    /// # Errors
    ///
    /// [`RenderError::Loader`] if the loader cannot provide the template, and
    /// [`RenderError::Template`] if it fails to compile or render.
    pub fn render<S: Serialize>(&mut self, name: &str, ctx: S) -> Result<String, RenderError> {
        let key = self.ensure_compiled(name)?;
        let tmpl = self.env.get_template(&key)?;
        Ok(tmpl.render(ctx)?)
    }

    /// Returns true if a compiled version of the template is being tracked.
    ///
    /// Says nothing about whether that version is still fresh.
    pub fn is_cached(&self, name: &str) -> bool {
        self.loader
            .cache_key(name)
            .map(|key| self.compiled.contains_key(&key))
            .unwrap_or(false)
    }

    /// Forgets all compiled templates so the next render reloads them.
    pub fn clear(&mut self) {
        self.compiled.clear();
    }

    fn ensure_compiled(&mut self, name: &str) -> Result<String, RenderError> {
        let key = self.loader.cache_key(name)?;

        if let Some(&compiled_at) = self.compiled.get(&key) {
            if self.loader.is_fresh(name, compiled_at)? {
                trace!(template = name, key = %key, "using compiled template");
                return Ok(key);
            }
            debug!(template = name, key = %key, "template changed, recompiling");
        } else {
            debug!(template = name, key = %key, "compiling template");
        }

        // Taken before reading so edits made while loading count as stale.
        let compiled_at = now_secs();
        let source = self.loader.source(name)?;
        self.env.add_template_owned(key.clone(), source.into_code())?;
        self.compiled.insert(key.clone(), compiled_at);
        Ok(key)
    }
}
