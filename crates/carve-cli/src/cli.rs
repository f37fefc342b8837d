//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Build a custom Lo-Dash
#[derive(Parser, Debug)]
#[command(
    name = "carve",
    version,
    about = "Build a custom Lo-Dash with only the functions you need",
    long_about = "Build a custom Lo-Dash with only the functions you need.\n\n\
                  Examples:\n  \
                  carve include=each,filter,map\n  \
                  carve underscore legacy category=utilities minus=first,last\n  \
                  carve backbone exports=amd -m -o dist/lodash.backbone.min.js\n  \
                  carve include=debounce exports=none -c"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Settings file to use instead of ./carve.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build command: directives (include=, plus=, minus=, exclude=,
    /// category=, exports=, iife=), keywords (backbone, underscore, mobile,
    /// legacy, csp, strict) and output flags (-o <path>, -c, -s, -d, -m)
    #[arg(
        value_name = "TOKENS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tokens: Vec<String>,
}

impl Cli {
    /// True when the build command asks for `-s`.
    pub fn is_silent(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| token == "-s" || token == "--silent")
    }

    /// True when the source goes to stdout.
    pub fn is_stdout(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| token == "-c" || token == "--stdout")
    }
}
