//! Property-based tests for the preprocessing loader using proptest.

use std::path::PathBuf;

use jinja_preprocess::{
    LoaderError, MemoryLoader, Preprocessor, Result, Source, StripTagIndent, TemplateLoader,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

/// A loader whose answers are derived from the name, so every name is "known".
struct EchoLoader;

impl TemplateLoader for EchoLoader {
    fn source(&self, name: &str) -> Result<Source> {
        if name.starts_with('x') {
            return Err(LoaderError::not_found(name));
        }
        Ok(Source::new(
            format!("code of {}", name),
            name,
            Some(PathBuf::from(format!("/t/{}", name))),
        ))
    }

    fn exists(&self, name: &str) -> bool {
        !name.starts_with('x')
    }

    fn cache_key(&self, name: &str) -> Result<String> {
        Ok(format!("{}#{}", name.len(), name))
    }

    fn is_fresh(&self, name: &str, time: i64) -> Result<bool> {
        Ok(time.rem_euclid(3) as usize == name.len() % 3)
    }
}

fn reverse(code: &str) -> String {
    code.chars().rev().collect()
}

fn templates_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,8}", any::<String>()), 0..16)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Retrieved code is exactly the transform of the wrapped loader's code.
    #[test]
    fn source_code_is_transformed(templates in templates_strategy()) {
        let inner: MemoryLoader = templates.iter().cloned().collect();
        let loader = Preprocessor::new(inner.clone(), reverse);

        for (name, _) in &templates {
            let real = inner.source(name).unwrap();
            let processed = loader.source(name).unwrap();
            prop_assert_eq!(processed.code(), reverse(real.code()));
            prop_assert_eq!(processed.name(), real.name());
            prop_assert_eq!(processed.path(), real.path());
        }
    }

    /// The identity transform leaves every template untouched.
    #[test]
    fn identity_transform_is_transparent(name in "[a-w][a-z]{0,8}") {
        let loader = Preprocessor::new(EchoLoader, |code: &str| code.to_string());
        prop_assert_eq!(loader.source(&name).unwrap(), EchoLoader.source(&name).unwrap());
    }

    /// Existence answers match the wrapped loader, including for missing names.
    #[test]
    fn exists_matches_inner(name in "[a-z]{0,8}") {
        let loader = Preprocessor::new(EchoLoader, reverse);
        prop_assert_eq!(loader.exists(&name), EchoLoader.exists(&name));
    }

    /// The transform never leaks into the cache key.
    #[test]
    fn cache_key_matches_inner(name in "[a-z]{0,8}") {
        let reversing = Preprocessor::new(EchoLoader, reverse);
        let stripping = Preprocessor::new(EchoLoader, StripTagIndent);
        let expected = EchoLoader.cache_key(&name).unwrap();
        prop_assert_eq!(reversing.cache_key(&name).unwrap(), expected.clone());
        prop_assert_eq!(stripping.cache_key(&name).unwrap(), expected);
    }

    /// Freshness matches the wrapped loader for any timestamp.
    #[test]
    fn is_fresh_matches_inner(name in "[a-z]{0,8}", time in any::<i64>()) {
        let loader = Preprocessor::new(EchoLoader, reverse);
        prop_assert_eq!(
            loader.is_fresh(&name, time).unwrap(),
            EchoLoader.is_fresh(&name, time).unwrap()
        );
    }

    /// Stripping tag indentation never touches lines without a tag.
    #[test]
    fn strip_tag_indent_keeps_plain_lines(lines in prop::collection::vec("[ \t]{0,4}[a-z ]{0,12}", 0..10)) {
        let loader = Preprocessor::new(
            MemoryLoader::new().with_template("plain", lines.join("\n")),
            StripTagIndent,
        );
        let source = loader.source("plain").unwrap();
        prop_assert_eq!(source.code(), lines.join("\n"));
    }
}

#[test]
fn is_fresh_boundary_timestamps() {
    let loader = Preprocessor::new(EchoLoader, reverse);
    for time in [0, -1, i64::MIN, i64::MAX, 253_402_300_799] {
        assert_eq!(
            loader.is_fresh("page", time).unwrap(),
            EchoLoader.is_fresh("page", time).unwrap()
        );
    }
}

#[test]
fn missing_template_error_is_unchanged() {
    let loader = Preprocessor::new(EchoLoader, reverse);
    let err = loader.source("xmissing").unwrap_err();
    assert!(matches!(err, LoaderError::NotFound { ref name } if name == "xmissing"));
}
