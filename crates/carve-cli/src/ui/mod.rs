//! Terminal status output.
//!
//! Everything here writes to stderr. Colors follow `--no-color`, `NO_COLOR`,
//! `FORCE_COLOR` and, failing those, whether stderr is a terminal.

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_build_summary};
pub use messages::{error, info, success, warning};

static COLOR: AtomicBool = AtomicBool::new(false);

/// Whether the environment wants colored output.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decides once whether status output is colored and returns the decision.
pub fn init_colors(no_color: bool) -> bool {
    let color = !no_color && should_use_color();
    COLOR.store(color, Ordering::Relaxed);
    color
}

pub(crate) fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_flag_wins() {
        assert!(!init_colors(true));
        assert!(!color_enabled());
    }
}
