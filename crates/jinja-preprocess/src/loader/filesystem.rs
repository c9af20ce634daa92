//! Filesystem template loader.
//!
//! Templates are looked up by their path relative to one of the registered
//! directories. Directories are searched in registration order and the first
//! match wins.
//!
//! # Name Resolution
//!
//! For each directory, the name is tried as given, then with every configured
//! extension appended in priority order. An existing file under the exact name
//! wins, so the later candidates below are only probed when it is missing:
//!
//! | Requested | Candidates (per directory) |
//! |-----------|----------------------------|
//! | `"list"` | `list`, `list.jinja`, `list.jinja2`, `list.j2`, `list.txt` |
//! | `"todos/list.j2"` | `todos/list.j2`, `todos/list.j2.jinja`, ... |
//!
//! Absolute names and names containing `..` are rejected so lookups can never
//! leave the registered directories.
//!
//! # Freshness
//!
//! A template is fresh for a timestamp `t` when its file was last modified
//! strictly before `t` (Unix seconds). A file modified in the same second it
//! was compiled counts as stale, since the edit may have followed the read.
//!
//! The resolved file path is the cache key, so the same file reached through
//! different names shares one compiled template.

use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::trace;

use crate::error::{LoaderError, Result};
use crate::loader::TemplateLoader;
use crate::source::Source;

/// Recognized template file extensions in priority order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".txt"];

/// Loads templates from one or more directories.
///
/// ```rust,ignore
/// use jinja_preprocess::{FilesystemLoader, TemplateLoader};
///
/// let mut loader = FilesystemLoader::new();
/// loader.add_dir("./templates")?;
///
/// // Reads ./templates/todos/list.jinja
/// let source = loader.source("todos/list")?;
/// ```
#[derive(Debug, Clone)]
pub struct FilesystemLoader {
    dirs: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl Default for FilesystemLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FilesystemLoader {
    /// Creates a loader with no directories and the default extensions.
    pub fn new() -> Self {
        Self {
            dirs: Vec::new(),
            extensions: TEMPLATE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Creates a loader searching the given directories in order.
    ///
    /// # Errors
    ///
    /// [`LoaderError::DirectoryNotFound`] if any directory does not exist.
    pub fn from_dirs<I, P>(dirs: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut loader = Self::new();
        for dir in dirs {
            loader.add_dir(dir)?;
        }
        Ok(loader)
    }

    /// Replaces the list of extensions tried for extensionless names.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a directory to the search path.
    ///
    /// # Errors
    ///
    /// [`LoaderError::DirectoryNotFound`] if the path is not an existing directory.
    pub fn add_dir<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(LoaderError::DirectoryNotFound {
                path: path.to_path_buf(),
            });
        }
        let canonical = path.canonicalize().map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.dirs.push(canonical);
        Ok(())
    }

    /// The registered directories, in search order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// The extensions tried for extensionless names, in priority order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Resolves a template name to the file that would be loaded for it.
    pub fn find(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;

        for dir in &self.dirs {
            let exact = dir.join(name);
            trace!(template = name, candidate = %exact.display(), "probing template path");
            if exact.is_file() {
                return Ok(exact);
            }
            for ext in &self.extensions {
                let candidate = dir.join(format!("{}{}", name, ext));
                trace!(template = name, candidate = %candidate.display(), "probing template path");
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }

        Err(LoaderError::not_found(name))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LoaderError::InvalidName {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    for component in Path::new(name).components() {
        match component {
            Component::ParentDir => {
                return Err(LoaderError::InvalidName {
                    name: name.to_string(),
                    reason: "name points outside the template directories",
                })
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(LoaderError::InvalidName {
                    name: name.to_string(),
                    reason: "name must be relative",
                })
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }
    Ok(())
}

/// Modification time of a file in Unix seconds. Times before the epoch are negative.
fn modified_secs(path: &Path) -> Result<i64> {
    let io_err = |source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    };
    let modified = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(io_err)?;

    let secs = match modified.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs())
            .map(|s| -s)
            .unwrap_or(i64::MIN),
    };
    Ok(secs)
}

/// Current time in Unix seconds, in the same scale as [`TemplateLoader::is_fresh`].
pub(crate) fn now_secs() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        Err(_) => 0,
    }
}

impl TemplateLoader for FilesystemLoader {
    fn source(&self, name: &str) -> Result<Source> {
        let path = self.find(name)?;
        let code = std::fs::read_to_string(&path).map_err(|source| LoaderError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Source::new(code, name, Some(path)))
    }

    fn exists(&self, name: &str) -> bool {
        self.find(name).is_ok()
    }

    fn cache_key(&self, name: &str) -> Result<String> {
        let path = self.find(name)?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn is_fresh(&self, name: &str, time: i64) -> Result<bool> {
        let path = self.find(name)?;
        Ok(modified_secs(&path)? < time)
    }
}
