//! Function registry for carve custom library builds.
//!
//! The registry is the static knowledge base every build consults: the
//! library's public functions and private helpers, their aliases and
//! categories, the dependencies between them, and one source fragment per
//! build mode. The data lives in TOML manifests under `library/`, embedded at
//! compile time and validated once per process.
//!
//! # Example
//!
//! ```rust
//! use carve_registry::{Category, Registry};
//!
//! let registry = Registry::builtin()?;
//! assert_eq!(registry.resolve_alias("each"), "forEach");
//! assert!(registry.by_category(Category::Chaining).iter().any(|n| n == "tap"));
//! # Ok::<(), carve_registry::RegistryError>(())
//! ```

mod bundle;
mod entry;
mod error;
mod manifest;
mod registry;
mod selection;

pub use bundle::BundleKind;
pub use entry::{Category, EntryKind, FunctionEntry, ModeTag, Variant};
pub use error::{RegistryError, Result};
pub use manifest::ManifestSource;
pub use registry::Registry;
pub use selection::ResolvedSet;

/// Version marker stamped into every generated module.
pub const LIBRARY_VERSION: &str = "1.0.0-rc.3";
