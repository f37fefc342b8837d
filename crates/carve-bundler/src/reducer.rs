//! The size-reducing pass.
//!
//! Reduction is a collaborator behind the [`Reducer`] trait. The shipped
//! [`OxcReducer`] runs the oxc minifier on a blocking worker thread and keeps
//! the leading `/*! ... */` banner verbatim.

use async_trait::async_trait;
use carve_registry::LIBRARY_VERSION;
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::ReduceError;

/// How aggressively to reduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceLevel {
    /// Reprint without whitespace or comments.
    Whitespace,
    /// Also apply syntax-level compression. Names are preserved.
    Syntax,
    /// Also mangle local identifiers.
    #[default]
    Identifiers,
}

/// Options passed to every [`Reducer::reduce`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReduceOptions {
    pub level: ReduceLevel,
}

/// Text-to-text size reduction.
///
/// Implementations must keep the `VERSION` assignment, marker string
/// included, outside the banner and must not increase the line count.
/// [`reduce_checked`] enforces both.
#[async_trait]
pub trait Reducer: Send + Sync {
    async fn reduce(&self, source: String, options: &ReduceOptions) -> Result<String, ReduceError>;
}

/// Reducer backed by `oxc_minifier`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OxcReducer;

#[async_trait]
impl Reducer for OxcReducer {
    async fn reduce(&self, source: String, options: &ReduceOptions) -> Result<String, ReduceError> {
        let level = options.level;
        tokio::task::spawn_blocking(move || minify(&source, level))
            .await
            .map_err(|e| ReduceError::Task(e.to_string()))?
    }
}

/// Runs `reducer` and checks its output against the contract.
///
/// # Errors
///
/// Whatever the reducer returns, or [`ReduceError::Contract`] when the body
/// no longer assigns `VERSION` the marker string or has more lines than
/// `source`.
pub async fn reduce_checked(
    reducer: &dyn Reducer,
    source: String,
    options: &ReduceOptions,
) -> Result<String, ReduceError> {
    let input_lines = source.lines().count();
    let reduced = reducer.reduce(source, options).await?;

    // the banner repeats the marker, so only the body counts
    let (_, body) = split_banner(&reduced);
    if !assigns_version(body) {
        return Err(ReduceError::Contract(format!(
            "VERSION assignment with marker {LIBRARY_VERSION} is missing"
        )));
    }
    let output_lines = reduced.lines().count();
    if output_lines > input_lines {
        return Err(ReduceError::Contract(format!(
            "line count grew from {input_lines} to {output_lines}"
        )));
    }
    Ok(reduced)
}

/// Parses, optionally compresses and mangles, then reprints `source`.
fn minify(source: &str, level: ReduceLevel) -> Result<String, ReduceError> {
    let (banner, body) = split_banner(source);

    let allocator = Allocator::default();
    let source_type = SourceType::mjs().with_script(true);
    let ret = Parser::new(&allocator, body, source_type).parse();
    if let Some(error) = ret.errors.first() {
        return Err(ReduceError::Parse(error.to_string()));
    }
    let mut program = ret.program;

    let scoping = match level {
        ReduceLevel::Whitespace => None,
        ReduceLevel::Syntax => {
            let options = MinifierOptions {
                mangle: None,
                ..MinifierOptions::default()
            };
            Minifier::new(options).minify(&allocator, &mut program).scoping
        }
        ReduceLevel::Identifiers => {
            Minifier::new(MinifierOptions::default())
                .minify(&allocator, &mut program)
                .scoping
        }
    };

    let code = Codegen::new()
        .with_options(CodegenOptions::minify())
        .with_scoping(scoping)
        .build(&program)
        .code;

    Ok(match banner {
        Some(banner) => format!("{banner}\n{code}"),
        None => code,
    })
}

/// Whether `body` has a `VERSION = '<marker>'` assignment, in any quoting
/// and spacing a printer may produce.
fn assigns_version(body: &str) -> bool {
    body.match_indices("VERSION").any(|(at, key)| {
        let rest = body[at + key.len()..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            return false;
        };
        let rest = rest.trim_start();
        ['\'', '"'].into_iter().any(|quote| {
            rest.strip_prefix(quote)
                .and_then(|value| value.strip_prefix(LIBRARY_VERSION))
                .is_some_and(|tail| tail.starts_with(quote))
        })
    })
}

/// Splits a leading `/*! ... */` comment from the rest of the source.
fn split_banner(source: &str) -> (Option<&str>, &str) {
    if !source.starts_with("/*!") {
        return (None, source);
    }
    match source.find("*/") {
        Some(end) => {
            let (banner, rest) = source.split_at(end + 2);
            (Some(banner), rest)
        }
        None => (None, source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_banner() {
        let (banner, body) = split_banner("/*!\n * x\n */\nvar a = 1;");
        assert_eq!(banner, Some("/*!\n * x\n */"));
        assert_eq!(body, "\nvar a = 1;");

        let (banner, body) = split_banner("var a = 1;");
        assert_eq!(banner, None);
        assert_eq!(body, "var a = 1;");
    }

    #[test]
    fn test_minify_keeps_banner_and_strings() {
        let source = "/*!\n * banner\n */\n;(function(window) {\n  var longName = '1.0.0-rc.3';\n  window.v = longName;\n}(this));\n";
        for level in [ReduceLevel::Whitespace, ReduceLevel::Syntax, ReduceLevel::Identifiers] {
            let out = minify(source, level).unwrap();
            assert!(out.starts_with("/*!\n * banner\n */\n"), "{level:?}: {out}");
            assert!(out.contains("1.0.0-rc.3"), "{level:?}: {out}");
            assert!(out.lines().count() < source.lines().count(), "{level:?}: {out}");
        }
    }

    #[test]
    fn test_minify_rejects_invalid_source() {
        let err = minify("function (", ReduceLevel::default()).unwrap_err();
        assert!(matches!(err, ReduceError::Parse(_)));
    }

    struct Echo(&'static str);

    #[async_trait]
    impl Reducer for Echo {
        async fn reduce(&self, _: String, _: &ReduceOptions) -> Result<String, ReduceError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_assigns_version() {
        assert!(assigns_version("lodash.VERSION = '1.0.0-rc.3';"));
        assert!(assigns_version("n.VERSION=\"1.0.0-rc.3\",n"));
        assert!(!assigns_version("var v = '1.0.0-rc.3';"));
        assert!(!assigns_version("n.VERSION=v"));
        assert!(!assigns_version("n.VERSION='1.0.0-rc.30'"));
    }

    #[tokio::test]
    async fn test_contract_requires_version() {
        let err = reduce_checked(&Echo("x"), "a\nb".into(), &ReduceOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ReduceError::Contract(_)));
    }

    #[tokio::test]
    async fn test_contract_ignores_marker_in_banner() {
        let source = "/*!\n * Lo-Dash 1.0.0-rc.3\n */\n;(function() {\n  lodash.VERSION = '1.0.0-rc.3';\n}());";
        let err = reduce_checked(
            &Echo("/*!\n * Lo-Dash 1.0.0-rc.3\n */\n;(function(){})();"),
            source.into(),
            &ReduceOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReduceError::Contract(ref m) if m.contains("VERSION")));
    }

    #[tokio::test]
    async fn test_contract_accepts_minified_assignment() {
        let source = "/*!\n * Lo-Dash 1.0.0-rc.3\n */\n;(function() {\n  lodash.VERSION = '1.0.0-rc.3';\n}());";
        let reduced = "/*!\n * Lo-Dash 1.0.0-rc.3\n */\n(function(){n.VERSION=\"1.0.0-rc.3\"})();";
        let out = reduce_checked(&Echo(reduced), source.into(), &ReduceOptions::default())
            .await
            .unwrap();
        assert_eq!(out, reduced);
    }

    #[tokio::test]
    async fn test_contract_rejects_growth() {
        let err = reduce_checked(
            &Echo("x.VERSION = '1.0.0-rc.3'\n\n\nx"),
            "x.VERSION = '1.0.0-rc.3'".into(),
            &ReduceOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ReduceError::Contract(ref m) if m.contains("grew")));
    }
}
