//! # Jinja Preprocess - Template Source Preprocessing
//!
//! `jinja-preprocess` rewrites template text between the place templates are
//! stored and the engine that compiles them. The central piece is
//! [`Preprocessor`], a [`TemplateLoader`] that wraps another loader and runs a
//! [`Transform`] over every template it returns.
//!
//! The classic use is tidying whitespace: control tags indented to line up
//! with the markup around them leave that indentation in the output.
//! [`StripTagIndent`] removes it before the engine ever sees the template.
//!
//! ## Core Concepts
//!
//! - [`TemplateLoader`]: Looks up template [`Source`]s by name and answers
//!   existence, cache-key and freshness questions
//! - [`Preprocessor`]: Loader decorator applying a [`Transform`] to template text
//! - [`Transform`]: Text-to-text function; any `Fn(&str) -> String` qualifies
//! - [`MemoryLoader`] / [`FilesystemLoader`]: Loaders to wrap
//! - [`TemplateEnvironment`]: MiniJinja environment that recompiles stale templates
//! - [`LoaderConfig`]: YAML description of a filesystem loader and its transforms
//!
//! ## Quick Start
//!
//! ```rust
//! use jinja_preprocess::{MemoryLoader, Preprocessor, StripTagIndent, TemplateEnvironment};
//! use minijinja::context;
//!
//! let templates = MemoryLoader::new().with_template(
//!     "report",
//!     "Items:\n  {% for item in items %}\n  - {{ item }}\n  {% endfor %}\n",
//! );
//!
//! let mut env = TemplateEnvironment::new(Preprocessor::new(templates, StripTagIndent));
//! env.environment_mut().set_trim_blocks(true);
//!
//! let out = env.render("report", context! { items => ["a", "b"] }).unwrap();
//! assert_eq!(out, "Items:\n  - a\n  - b\n");
//! ```
//!
//! ## What the Decorator Changes
//!
//! | Operation | Behavior |
//! |-----------|----------|
//! | [`source`](TemplateLoader::source) | Code transformed; name and path kept |
//! | [`exists`](TemplateLoader::exists) | Delegated unchanged |
//! | [`cache_key`](TemplateLoader::cache_key) | Delegated unchanged |
//! | [`is_fresh`](TemplateLoader::is_fresh) | Delegated unchanged |
//!
//! Errors from the wrapped loader are returned as they are. A failing
//! transform is reported as [`LoaderError::Transform`], which keeps the
//! transform's own error.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` when templates are processed or
//! compiled, `trace` for path probing and cache hits). Install a subscriber in
//! the application to see them.

pub mod config;
pub mod environment;
pub mod error;
pub mod loader;
pub mod preprocess;
pub mod source;
pub mod transform;

pub use config::{BuiltinTransform, LoaderConfig};
pub use environment::{minijinja_loader, TemplateEnvironment};
pub use error::{ConfigError, LoaderError, RenderError, Result, TransformError};
pub use loader::{FilesystemLoader, MemoryLoader, TemplateLoader, TEMPLATE_EXTENSIONS};
pub use preprocess::Preprocessor;
pub use source::Source;
pub use transform::{fallible, Fallible, NormalizeNewlines, Pipeline, StripTagIndent, Transform};
