//! Error types for the reducer and delivery steps.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Failure of the size-reducing pass.
///
/// Never fatal to a build: the orchestrator falls back to the unreduced
/// source and records a warning.
#[derive(Debug, Error, Diagnostic)]
pub enum ReduceError {
    /// The module handed to the reducer does not parse.
    #[error("source does not parse: {0}")]
    #[diagnostic(code(carve::reduce::parse))]
    Parse(String),

    /// Output lost the `VERSION` assignment or gained lines.
    #[error("reducer output breaks the contract: {0}")]
    #[diagnostic(code(carve::reduce::contract))]
    Contract(String),

    /// The blocking worker panicked or was cancelled.
    #[error("reducer task failed: {0}")]
    #[diagnostic(code(carve::reduce::task))]
    Task(String),
}

/// Failure to deliver a finished module.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("failed to write {}: {source}", path.display())]
    #[diagnostic(
        code(carve::build::write),
        help("Check that the output directory is writable")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to stdout: {0}")]
    #[diagnostic(code(carve::build::stdout))]
    Stdout(#[source] std::io::Error),
}

impl BuildError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
