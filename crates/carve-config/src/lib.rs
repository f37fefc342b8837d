//! Build commands for carve.
//!
//! [`parse_tokens`] turns a token list such as
//! `["underscore", "plus=pick", "exports=amd", "-o", "lodash.amd.js"]` into an
//! immutable [`BuildConfig`]. [`Settings`] supplies the defaults a command
//! does not spell out, read from `carve.toml` and `CARVE_*` variables.
//!
//! ```rust
//! use carve_config::{parse_tokens, ParseOptions};
//! use carve_registry::Registry;
//!
//! let registry = Registry::builtin()?;
//! let config = parse_tokens(&["include=each,map", "strict"], &registry, &ParseOptions::default())?;
//! assert!(config.is_strict());
//! assert_eq!(config.command_line(), "include=each,map strict");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod command;
mod error;
mod parser;
mod settings;
mod wrapper;

pub use command::{BuildConfig, Delivery, ExportFormat, ExportSet, ModeFlags, OutputMode};
pub use error::{ConfigError, Result};
pub use parser::{NamePolicy, ParseOptions, parse_tokens};
pub use settings::{SETTINGS_FILE, Settings};
pub use wrapper::{OUTPUT_MARKER, WrapperTemplate};
