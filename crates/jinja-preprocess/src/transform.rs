//! Text transformations applied to template source.
//!
//! A [`Transform`] maps template text to new template text. Any
//! `Fn(&str) -> String` closure is a transform; closures that can fail are
//! wrapped with [`fallible`]. Several transforms run in sequence through a
//! [`Pipeline`].
//!
//! Two ready-made transforms cover the common cleanups:
//!
//! | Transform | Effect |
//! |-----------|--------|
//! | [`StripTagIndent`] | Drops indentation before lines holding a single `{# #}` or `{% %}` tag |
//! | [`NormalizeNewlines`] | Rewrites `\r\n` and `\r` line endings to `\n` |

use std::error::Error as StdError;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TransformError;

/// A transformation of template text.
pub trait Transform: Send + Sync {
    /// Returns the transformed text.
    fn transform(&self, code: &str) -> Result<String, TransformError>;
}

impl<F> Transform for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, code: &str) -> Result<String, TransformError> {
        Ok(self(code))
    }
}

/// A transform backed by a closure that may fail. See [`fallible`].
#[derive(Clone)]
pub struct Fallible<F>(F);

/// Adapts a fallible closure into a [`Transform`].
///
/// The closure's error is kept as-is inside the resulting [`TransformError`].
///
/// ```rust
/// use jinja_preprocess::{fallible, Transform};
///
/// let no_tabs = fallible(|code: &str| {
///     if code.contains('\t') {
///         Err("tabs are not allowed")
///     } else {
///         Ok(code.to_string())
///     }
/// });
///
/// assert!(no_tabs.transform("ok").is_ok());
/// assert!(no_tabs.transform("\tbad").is_err());
/// ```
pub fn fallible<F, E>(f: F) -> Fallible<F>
where
    F: Fn(&str) -> Result<String, E> + Send + Sync,
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    Fallible(f)
}

impl<F, E> Transform for Fallible<F>
where
    F: Fn(&str) -> Result<String, E> + Send + Sync,
    E: Into<Box<dyn StdError + Send + Sync + 'static>>,
{
    fn transform(&self, code: &str) -> Result<String, TransformError> {
        (self.0)(code).map_err(TransformError::new)
    }
}

/// Runs transforms one after another.
///
/// The output of each step is the input of the next. The first failure stops
/// the pipeline. An empty pipeline returns its input unchanged.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step, returning the pipeline for chaining.
    pub fn then<T: Transform + 'static>(mut self, step: T) -> Self {
        self.push(step);
        self
    }

    /// Appends a step.
    pub fn push<T: Transform + 'static>(&mut self, step: T) {
        self.steps.push(Box::new(step));
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl Transform for Pipeline {
    fn transform(&self, code: &str) -> Result<String, TransformError> {
        let mut current = code.to_string();
        for step in &self.steps {
            current = step.transform(&current)?;
        }
        Ok(current)
    }
}

// A line made of optional indentation and exactly one comment or statement tag.
static TAG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(\{[#%][^}]*[#%]\})$").expect("tag line pattern is valid")
});

/// Removes indentation in front of lines that hold only a `{# ... #}` or `{% ... %}` tag.
///
/// Control structures and comments indented to match the surrounding markup
/// otherwise leave their indentation behind in the rendered output.
///
/// ```rust
/// use jinja_preprocess::{StripTagIndent, Transform};
///
/// let out = StripTagIndent.transform("  {% if x %}\n  <b>x</b>\n  {% endif %}").unwrap();
/// assert_eq!(out, "{% if x %}\n  <b>x</b>\n{% endif %}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StripTagIndent;

impl Transform for StripTagIndent {
    fn transform(&self, code: &str) -> Result<String, TransformError> {
        Ok(TAG_LINE.replace_all(code, "$1").into_owned())
    }
}

/// Converts Windows (`\r\n`) and old Mac (`\r`) line endings to `\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeNewlines;

impl Transform for NormalizeNewlines {
    fn transform(&self, code: &str) -> Result<String, TransformError> {
        Ok(code.replace("\r\n", "\n").replace('\r', "\n"))
    }
}
