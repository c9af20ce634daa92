//! YAML configuration for a filesystem loader with preprocessing.
//!
//! ```yaml
//! template_dirs:
//!   - templates
//!   - shared/templates
//! extensions: [".jinja", ".j2"]
//! preprocess:
//!   - normalize_newlines
//!   - strip_tag_indent
//! ```
//!
//! `extensions` defaults to [`TEMPLATE_EXTENSIONS`] and `preprocess` to no
//! steps. Relative directories are resolved against the process working
//! directory when loading from a string, and against the file's directory when
//! loading with [`LoaderConfig::from_file`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::loader::{FilesystemLoader, TEMPLATE_EXTENSIONS};
use crate::preprocess::Preprocessor;
use crate::transform::{NormalizeNewlines, Pipeline, StripTagIndent};

/// A built-in transform that can be named in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTransform {
    /// [`StripTagIndent`]
    StripTagIndent,
    /// [`NormalizeNewlines`]
    NormalizeNewlines,
}

/// Loader settings read from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Directories to search, in order.
    pub template_dirs: Vec<PathBuf>,

    /// Extensions tried for extensionless names, in priority order.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Transforms applied to every template, in order.
    #[serde(default)]
    pub preprocess: Vec<BuiltinTransform>,
}

fn default_extensions() -> Vec<String> {
    TEMPLATE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl LoaderConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a configuration file.
    ///
    /// Relative `template_dirs` are taken relative to the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&text)?;

        if let Some(base) = path.parent() {
            for dir in &mut config.template_dirs {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
        Ok(config)
    }

    /// Builds the transform pipeline named by `preprocess`.
    pub fn pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        for step in &self.preprocess {
            match step {
                BuiltinTransform::StripTagIndent => pipeline.push(StripTagIndent),
                BuiltinTransform::NormalizeNewlines => pipeline.push(NormalizeNewlines),
            }
        }
        pipeline
    }

    /// Builds the configured loader.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Loader`] if a template directory does not exist.
    pub fn build(&self) -> Result<Preprocessor<FilesystemLoader, Pipeline>, ConfigError> {
        let loader = FilesystemLoader::from_dirs(&self.template_dirs)?
            .with_extensions(self.extensions.iter().cloned());
        Ok(Preprocessor::new(loader, self.pipeline()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoaderError;
    use crate::loader::TemplateLoader;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::from_yaml("template_dirs: [templates]").unwrap();
        assert_eq!(config.template_dirs, vec![PathBuf::from("templates")]);
        assert_eq!(config.extensions, default_extensions());
        assert!(config.preprocess.is_empty());
        assert!(config.pipeline().is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = LoaderConfig::from_yaml(
            r#"
template_dirs: [a, b]
extensions: [".html"]
preprocess: [normalize_newlines, strip_tag_indent]
"#,
        )
        .unwrap();
        assert_eq!(config.extensions, vec![".html".to_string()]);
        assert_eq!(
            config.preprocess,
            vec![
                BuiltinTransform::NormalizeNewlines,
                BuiltinTransform::StripTagIndent
            ]
        );
        assert_eq!(config.pipeline().len(), 2);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = LoaderConfig::from_yaml("template_dirs: []\ncache: true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_unknown_transform() {
        let err =
            LoaderConfig::from_yaml("template_dirs: []\npreprocess: [minify]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = LoaderConfig::from_file("/nonexistent/loader.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_build_missing_dir() {
        let config = LoaderConfig::from_yaml("template_dirs: [/nonexistent/templates]").unwrap();
        let err = config.build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Loader(LoaderError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_from_file_resolves_relative_dirs() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("templates")).unwrap();
        fs::write(
            temp.path().join("templates/page.jinja"),
            "  {% if x %}\r\nX\r\n  {% endif %}",
        )
        .unwrap();
        let config_path = temp.path().join("loader.yaml");
        fs::write(
            &config_path,
            "template_dirs: [templates]\npreprocess: [normalize_newlines, strip_tag_indent]\n",
        )
        .unwrap();

        let config = LoaderConfig::from_file(&config_path).unwrap();
        assert_eq!(config.template_dirs, vec![temp.path().join("templates")]);

        let loader = config.build().unwrap();
        let source = loader.source("page").unwrap();
        assert_eq!(source.code(), "{% if x %}\nX\n{% endif %}");
        assert!(source.path().unwrap().ends_with("page.jinja"));
    }
}
