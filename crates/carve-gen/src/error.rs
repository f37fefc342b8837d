//! Error types for module generation

use miette::Diagnostic;
use thiserror::Error;

/// Errors that stop a module from being generated
#[derive(Error, Debug, Diagnostic)]
pub enum GenError {
    /// The module template failed to render
    #[error("Template rendering failed: {0}")]
    #[diagnostic(code(carve::gen::template))]
    Template(#[from] minijinja::Error),

    /// The assembled module does not parse
    #[error("Generated module is not valid JavaScript{}", first_error.as_ref().map(|e| format!(" - {}", e)).unwrap_or_default())]
    #[diagnostic(
        code(carve::gen::invalid_output),
        help("A custom iife= wrapper must leave the module a complete script")
    )]
    InvalidOutput {
        error_count: usize,
        first_error: Option<String>,
    },

    /// Source handed to the analyzer does not parse
    #[error("Cannot analyze source: {reason}")]
    #[diagnostic(code(carve::gen::unparsable))]
    Unparsable { reason: String },
}

impl GenError {
    /// Create an InvalidOutput error from parser messages
    pub fn invalid_output(errors: &[String]) -> Self {
        Self::InvalidOutput {
            error_count: errors.len(),
            first_error: errors.first().cloned(),
        }
    }
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenError>;
