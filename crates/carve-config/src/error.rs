//! Error types for command parsing and settings loading.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A malformed build command or settings source.
///
/// Parser errors carry the offending token so callers can point at it.
/// Settings problems, unreadable files included, become [`ConfigError::Settings`].
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("'{token}' needs a value")]
    #[diagnostic(
        code(carve::config::missing_value),
        help("Write it as {token}=name,name")
    )]
    MissingValue { token: String },

    #[error("'{flag}' needs a file path")]
    #[diagnostic(code(carve::config::missing_path), help("Example: {flag} lodash.custom.js"))]
    MissingPath { flag: String },

    #[error("unknown directive '{key}' in '{token}'")]
    #[diagnostic(
        code(carve::config::unknown_directive),
        help("Known directives: include, exclude, plus, minus, category, exports, iife")
    )]
    UnknownDirective { token: String, key: String },

    #[error("unknown keyword '{token}'")]
    #[diagnostic(
        code(carve::config::unknown_keyword),
        help("Known keywords: backbone, underscore, mobile, legacy, csp, strict")
    )]
    UnknownKeyword { token: String },

    #[error("unknown option '{token}'")]
    #[diagnostic(
        code(carve::config::unknown_option),
        help("Known options: -o/--output, -c/--stdout, -s/--silent, -d/--debug, -m/--minify")
    )]
    UnknownOption { token: String },

    #[error("wrapper template must contain exactly one %output% marker, found {found}")]
    #[diagnostic(code(carve::config::invalid_wrapper))]
    InvalidWrapper { template: String, found: usize },

    #[error("unknown function '{name}' in {directive}=")]
    #[diagnostic(code(carve::config::unknown_name))]
    UnknownName { name: String, directive: String },

    #[error("unknown category '{name}'")]
    #[diagnostic(
        code(carve::config::unknown_category),
        help("Categories: Arrays, Chaining, Collections, Functions, Objects, Utilities")
    )]
    UnknownCategory { name: String },

    #[error("invalid settings: {message}")]
    #[diagnostic(code(carve::config::settings), help("{hint}"))]
    Settings { message: String, hint: String },
}

impl ConfigError {
    pub fn missing_value(token: impl Into<String>) -> Self {
        Self::MissingValue {
            token: token.into(),
        }
    }

    pub fn missing_path(flag: impl Into<String>) -> Self {
        Self::MissingPath { flag: flag.into() }
    }

    pub fn settings(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// The command token this error is about, if it came from the parser.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::MissingValue { token }
            | Self::UnknownDirective { token, .. }
            | Self::UnknownKeyword { token }
            | Self::UnknownOption { token } => Some(token),
            Self::MissingPath { flag } => Some(flag),
            Self::InvalidWrapper { template, .. } => Some(template),
            Self::UnknownName { name, .. } | Self::UnknownCategory { name } => Some(name),
            Self::Settings { .. } => None,
        }
    }
}
