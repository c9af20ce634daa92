//! Error types for loading, preprocessing and rendering templates.
//!
//! [`LoaderError`] is what every [`TemplateLoader`](crate::TemplateLoader)
//! operation returns. A decorating loader hands its delegate's errors back
//! untouched, so callers can match on the same variants no matter how many
//! layers sit between them and the real source.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by template loaders.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// No template with this name is known to the loader.
    #[error("template not found: \"{name}\"")]
    NotFound { name: String },

    /// The name cannot be used to look up a template (absolute, escapes the root, ...).
    #[error("invalid template name \"{name}\": {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// A template directory passed to a filesystem loader does not exist.
    #[error("template directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Reading a template or its metadata failed.
    #[error("failed to read template \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transformation applied to a template's source failed.
    #[error("failed to preprocess template \"{name}\": {source}")]
    Transform {
        name: String,
        #[source]
        source: TransformError,
    },
}

impl LoaderError {
    /// Shorthand for [`LoaderError::NotFound`].
    pub fn not_found(name: impl Into<String>) -> Self {
        LoaderError::NotFound { name: name.into() }
    }

    /// Returns true if this error means the template does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoaderError::NotFound { .. })
    }
}

/// Failure raised by a [`Transform`](crate::Transform).
///
/// Wraps whatever error the transformation produced. The original value can be
/// recovered with [`downcast_ref`](Self::downcast_ref) or
/// [`into_inner`](Self::into_inner).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransformError(Box<dyn StdError + Send + Sync + 'static>);

impl TransformError {
    /// Wraps an arbitrary error.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        TransformError(err.into())
    }

    /// Creates an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        TransformError(message.into())
    }

    /// Returns the wrapped error if it is of type `E`.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Returns the wrapped error.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

/// Errors produced while rendering through a [`TemplateEnvironment`](crate::TemplateEnvironment).
#[derive(Debug, Error)]
pub enum RenderError {
    /// The loader could not provide the template.
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// The engine failed to compile or render the template.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Errors produced while reading or applying a [`LoaderConfig`](crate::LoaderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML or has unexpected fields.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Building the configured loader failed.
    #[error(transparent)]
    Loader(#[from] LoaderError),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
