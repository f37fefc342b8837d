//! Errors surfaced by the CLI.

use carve_config::ConfigError;
use carve_registry::RegistryError;
use miette::{Diagnostic, Report};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    /// Settings file or environment could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// The embedded library manifests are broken.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    /// The build finished with error diagnostics.
    #[error("build failed: {first}")]
    #[diagnostic(code(carve::cli::build_failed))]
    BuildFailed {
        errors: usize,
        first: String,
        #[help]
        help: Option<String>,
    },

    #[error("I/O error: {0}")]
    #[diagnostic(code(carve::cli::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn build_failed(messages: &[String]) -> Self {
        let first = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "unknown error".to_string());
        let help = (messages.len() > 1).then(|| format!("{} more error(s) above", messages.len() - 1));
        Self::BuildFailed {
            errors: messages.len(),
            first,
            help,
        }
    }
}

/// Converts a CLI error into a report for printing.
pub fn cli_error_to_miette(err: CliError) -> Report {
    Report::new(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_failed_message() {
        let err = CliError::build_failed(&["unknown keyword 'turbo'".to_string()]);
        assert_eq!(err.to_string(), "build failed: unknown keyword 'turbo'");
        assert!(err.help().is_none());

        let err = CliError::build_failed(&["a".to_string(), "b".to_string()]);
        assert_eq!(err.help().unwrap().to_string(), "1 more error(s) above");
    }

    #[test]
    fn test_config_errors_keep_their_code() {
        let err = CliError::from(ConfigError::settings("bad", "fix it"));
        assert_eq!(err.code().unwrap().to_string(), "carve::config::settings");
    }
}
