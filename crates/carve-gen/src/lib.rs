//! Code generation for carve custom builds.
//!
//! [`generate`] turns a resolved selection into one self-contained script:
//! the chosen variant of every member fragment, the `lodash` wrapper
//! constructor, static and prototype assignments, the version stamp and the
//! export ladder, wrapped and bannered. Every module is parsed before it is
//! returned, so callers never see malformed output.
//!
//! ```rust
//! use carve_config::{parse_tokens, ParseOptions};
//! use carve_gen::generate;
//! use carve_registry::{Registry, ResolvedSet};
//!
//! let registry = Registry::builtin()?;
//! let config = parse_tokens(&["include=identity", "exports=none"], &registry, &ParseOptions::default())?;
//! let set = ResolvedSet::new(vec!["identity".into()], vec!["identity".into()]);
//!
//! let module = generate(&registry, &set, &config)?;
//! assert!(module.source.contains("lodash.identity = identity;"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
mod banner;
mod error;
mod exports;
mod module;
mod syntax;

pub use analysis::free_references;
pub use banner::banner;
pub use error::{GenError, Result};
pub use exports::{export_ladder, needs_free_exports};
pub use module::{GenWarning, GeneratedModule, WarningKind, generate};
pub use syntax::{fragment_parses, syntax_errors};
