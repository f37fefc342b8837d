//! Build orchestration for carve custom builds.
//!
//! A [`Builder`] takes a raw command such as
//! `["include=each,filter,map", "exports=amd", "-o", "lodash.custom.js"]`
//! through the whole pipeline:
//!
//! 1. parse the tokens into a [`BuildConfig`](carve_config::BuildConfig),
//! 2. [`resolve`] the selection to a dependency-closed set,
//! 3. generate the module with [`carve_gen::generate`],
//! 4. optionally shrink it with a [`Reducer`],
//! 5. deliver it through an [`OutputWriter`].
//!
//! Builds never fail past this boundary. Every problem ends up as a
//! [`BuildDiagnostic`] on the [`BuildOutcome`].
//!
//! ```rust,no_run
//! use carve_bundler::Builder;
//! use carve_config::Settings;
//! use carve_registry::Registry;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let builder = Builder::new(Registry::builtin()?, Settings::default(), ".");
//! builder
//!     .build(&["include=map", "-c"], |outcome| {
//!         assert!(outcome.path().is_none());
//!     })
//!     .await;
//! # Ok(())
//! # }
//! ```

mod builder;
mod diagnostics;
mod error;
mod output;
mod reducer;
mod resolver;
mod writer;

pub use builder::Builder;
pub use diagnostics::{BuildDiagnostic, Severity};
pub use error::{BuildError, ReduceError};
pub use output::{BuildOutcome, Destination, default_file_name};
pub use reducer::{OxcReducer, ReduceLevel, ReduceOptions, Reducer, reduce_checked};
pub use resolver::resolve;
pub use writer::{FsWriter, MemoryWriter, OutputWriter};
