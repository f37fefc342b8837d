//! Diagnostics collected during a build.
//!
//! A build never returns `Err`. Parse failures, generation warnings, reducer
//! fallbacks and write failures all become [`BuildDiagnostic`]s on the
//! outcome, keyed by the miette code of the error they came from so callers
//! can match on them:
//!
//! ```rust
//! use carve_bundler::{BuildDiagnostic, Severity};
//!
//! let diagnostic = BuildDiagnostic::warning("carve::reduce::contract", "line count grew");
//! assert_eq!(diagnostic.severity, Severity::Warning);
//! assert_eq!(diagnostic.to_string(), "warning[carve::reduce::contract]: line count grew");
//! ```

use std::fmt;

use carve_gen::GenWarning;
use miette::Diagnostic;

/// Errors make the outcome a failure; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One message attached to a [`BuildOutcome`](crate::BuildOutcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDiagnostic {
    pub severity: Severity,
    /// Stable code such as `carve::config::unknown_keyword`.
    pub code: String,
    /// The error's display text, without the code.
    pub message: String,
}

impl BuildDiagnostic {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
        }
    }

    /// An error diagnostic carrying the error's miette code.
    pub fn from_error<E: Diagnostic + ?Sized>(error: &E) -> Self {
        Self {
            severity: Severity::Error,
            code: error
                .code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "carve::error".to_string()),
            message: error.to_string(),
        }
    }

    /// A warning carrying the error's miette code.
    pub fn warning_from<E: Diagnostic + ?Sized>(error: &E) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::from_error(error)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Emits the diagnostic as a `tracing` event at its severity.
    pub(crate) fn log(&self) {
        match self.severity {
            Severity::Error => tracing::error!(code = %self.code, "{}", self.message),
            Severity::Warning => tracing::warn!(code = %self.code, "{}", self.message),
        }
    }
}

impl From<&GenWarning> for BuildDiagnostic {
    fn from(warning: &GenWarning) -> Self {
        Self::warning(warning.kind.code(), warning.message.clone())
    }
}

impl fmt::Display for BuildDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{label}[{}]: {}", self.code, self.message)
    }
}
