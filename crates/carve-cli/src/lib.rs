//! Command-line front end for carve.
//!
//! The binary is a thin shell: raw arguments after the global options are
//! handed to [`carve_bundler::Builder`] as build tokens, unchanged.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - the build command
//! - [`error`] - CLI errors and miette conversion
//! - [`logger`] - tracing setup
//! - [`ui`] - terminal status output

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
