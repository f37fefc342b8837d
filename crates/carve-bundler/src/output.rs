//! Build results and default output naming.
//!
//! [`BuildOutcome`] is the single value a build hands back: the source, where
//! it went and what went wrong on the way. Default file names mirror the
//! command, so `carve mobile -m` lands in `lodash.mobile.min.js`.

use std::path::{Path, PathBuf};

use carve_config::BuildConfig;

use crate::diagnostics::BuildDiagnostic;

/// Where a build's source ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Cleaned and rooted at the builder's working directory.
    File(PathBuf),
    /// Written to standard output, nothing on disk.
    Stdout,
    /// The build failed before a destination was chosen.
    Unresolved,
}

/// What the completion callback receives.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Empty when the build failed or selected nothing.
    pub source: String,
    pub destination: Destination,
    pub diagnostics: Vec<BuildDiagnostic>,
}

impl BuildOutcome {
    pub(crate) fn failed(diagnostic: BuildDiagnostic) -> Self {
        Self {
            source: String::new(),
            destination: Destination::Unresolved,
            diagnostics: vec![diagnostic],
        }
    }

    /// The written file. `None` for stdout delivery and failed builds.
    pub fn path(&self) -> Option<&Path> {
        match &self.destination {
            Destination::File(path) => Some(path),
            Destination::Stdout | Destination::Unresolved => None,
        }
    }

    /// True when no diagnostic is an error.
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(BuildDiagnostic::is_error)
    }
}

/// File name used when the command has no `-o`.
///
/// `lodash.js` for a full default build, `lodash.<profile>.js` when a single
/// keyword names the build, `lodash.custom.js` otherwise. Reduced builds get
/// a `.min` infix.
pub fn default_file_name(config: &BuildConfig, minified: bool) -> String {
    let mut name = String::from("lodash");
    if let Some(profile) = config.profile() {
        name.push('.');
        name.push_str(profile);
    } else if config.is_custom() {
        name.push_str(".custom");
    }
    if minified {
        name.push_str(".min");
    }
    name.push_str(".js");
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(directives: &[&str]) -> BuildConfig {
        BuildConfig {
            directives: directives.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(default_file_name(&config(&[]), false), "lodash.js");
        assert_eq!(default_file_name(&config(&[]), true), "lodash.min.js");
        assert_eq!(
            default_file_name(&config(&["underscore"]), false),
            "lodash.underscore.js"
        );
        assert_eq!(
            default_file_name(&config(&["mobile"]), true),
            "lodash.mobile.min.js"
        );
        assert_eq!(
            default_file_name(&config(&["mobile", "legacy"]), false),
            "lodash.custom.js"
        );
        assert_eq!(
            default_file_name(&config(&["include=map"]), true),
            "lodash.custom.min.js"
        );
    }

    #[test]
    fn test_outcome_path() {
        let outcome = BuildOutcome {
            source: String::new(),
            destination: Destination::Stdout,
            diagnostics: vec![],
        };
        assert_eq!(outcome.path(), None);
        assert!(outcome.is_success());

        let outcome = BuildOutcome::failed(BuildDiagnostic::error("carve::x", "x"));
        assert_eq!(outcome.destination, Destination::Unresolved);
        assert!(!outcome.is_success());
    }
}
