//! Logging setup for the carve CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber. Output goes to stderr so `-c` keeps stdout for the module.
//!
//! ```rust,no_run
//! use carve_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 5] = [
    "carve_registry",
    "carve_config",
    "carve_gen",
    "carve_bundler",
    "carve_cli",
];

/// Installs the global subscriber. Call once, before anything logs.
///
/// `--verbose` wins over `RUST_LOG`, which wins over the default of `info`
/// for carve crates. `--quiet` keeps errors only.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Installs the global subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new(directives("error"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives("info")))
    }
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
