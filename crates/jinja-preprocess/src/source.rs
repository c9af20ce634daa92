//! The template source record handed from loaders to the engine.

use std::path::{Path, PathBuf};

/// Raw text of a template together with the metadata needed to report errors.
///
/// A `Source` is built fresh for every lookup and never modified afterwards.
/// Decorating loaders produce a new record with [`with_code`](Self::with_code)
/// instead, which keeps `name` and `path` as they were.
///
/// ```rust
/// use jinja_preprocess::Source;
///
/// let raw = Source::new("{{ x }}", "page", None);
/// let upper = raw.with_code(raw.code().to_uppercase());
///
/// assert_eq!(upper.code(), "{{ X }}");
/// assert_eq!(upper.name(), "page");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    code: String,
    name: String,
    path: Option<PathBuf>,
}

impl Source {
    /// Creates a new source record.
    pub fn new(code: impl Into<String>, name: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            path,
        }
    }

    /// The template text.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The name the template was requested by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the template came from, if it has a location on disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns a new record with the same name and path but different code.
    pub fn with_code(&self, code: impl Into<String>) -> Source {
        Source {
            code: code.into(),
            name: self.name.clone(),
            path: self.path.clone(),
        }
    }

    /// Consumes the record, returning the template text.
    pub fn into_code(self) -> String {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_code_keeps_name_and_path() {
        let original = Source::new("a", "list", Some(PathBuf::from("/t/list.jinja")));
        let replaced = original.with_code("b");

        assert_eq!(replaced.code(), "b");
        assert_eq!(replaced.name(), original.name());
        assert_eq!(replaced.path(), original.path());
        assert_eq!(original.code(), "a");
    }

    #[test]
    fn test_into_code() {
        let source = Source::new("body", "x", None);
        assert_eq!(source.into_code(), "body");
    }
}
