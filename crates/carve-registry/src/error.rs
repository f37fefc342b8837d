//! Error types for registry construction

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while parsing or validating the function manifests.
///
/// The builtin manifests are validated once per process, so any of these
/// surfacing at runtime points at a broken manifest rather than at user input.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A manifest file is not valid TOML or does not match the schema
    #[error("Failed to parse manifest '{manifest}': {message}")]
    #[diagnostic(code(carve::registry::manifest_parse))]
    ManifestParse { manifest: String, message: String },

    /// Two entries share a canonical name
    #[error("Duplicate function name '{name}'")]
    #[diagnostic(code(carve::registry::duplicate_name))]
    DuplicateName { name: String },

    /// An alias is claimed twice or shadows a canonical name
    #[error("Alias '{alias}' of '{owner}' is already taken by '{taken_by}'")]
    #[diagnostic(
        code(carve::registry::duplicate_alias),
        help("Aliases must map to exactly one canonical function")
    )]
    DuplicateAlias {
        alias: String,
        owner: String,
        taken_by: String,
    },

    /// Two fragments declare the same top-level identifier
    #[error("Identifier '{identifier}' is declared by both '{first}' and '{second}'")]
    #[diagnostic(code(carve::registry::duplicate_binding))]
    DuplicateBinding {
        identifier: String,
        first: String,
        second: String,
    },

    /// An entry has no `default` variant
    #[error("Function '{name}' has no default variant")]
    #[diagnostic(code(carve::registry::missing_default))]
    MissingDefault { name: String },

    /// A mode tag is attached to more than one variant of an entry
    #[error("Function '{name}' declares the '{tag}' variant more than once")]
    #[diagnostic(code(carve::registry::duplicate_variant))]
    DuplicateVariant { name: String, tag: String },

    /// A dependency names nothing in the registry
    #[error("Function '{name}' depends on unknown entry '{dependency}'")]
    #[diagnostic(code(carve::registry::unknown_dependency))]
    UnknownDependency { name: String, dependency: String },

    /// A helper depends on a helper declared after it
    #[error("Helper '{helper}' depends on '{dependency}', which is declared after it")]
    #[diagnostic(
        code(carve::registry::helper_order),
        help("Helpers are emitted in declaration order; move '{dependency}' above '{helper}'")
    )]
    HelperOrder { helper: String, dependency: String },

    /// The dependency graph contains a cycle
    #[error("Dependency cycle detected through '{name}'")]
    #[diagnostic(code(carve::registry::dependency_cycle))]
    DependencyCycle { name: String },

    /// A bundle lists a name that is not a public function or alias
    #[error("Bundle '{bundle}' lists unknown function '{name}'")]
    #[diagnostic(code(carve::registry::unknown_bundle_member))]
    UnknownBundleMember { bundle: String, name: String },

    /// The bundle manifest does not define a required bundle
    #[error("Bundle '{bundle}' is not defined")]
    #[diagnostic(code(carve::registry::missing_bundle))]
    MissingBundle { bundle: String },
}

impl RegistryError {
    /// Create a ManifestParse error
    pub fn manifest_parse(manifest: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestParse {
            manifest: manifest.into(),
            message: message.into(),
        }
    }

    /// Create an UnknownDependency error
    pub fn unknown_dependency(name: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::UnknownDependency {
            name: name.into(),
            dependency: dependency.into(),
        }
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
