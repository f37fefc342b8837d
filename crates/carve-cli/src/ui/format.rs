//! Size and duration formatting.

use std::time::Duration;

use owo_colors::OwoColorize;

use super::color_enabled;

/// Human-readable byte count.
///
/// ```
/// use carve_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

/// Human-readable duration.
///
/// ```
/// use std::time::Duration;
/// use carve_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Prints `name  size (duration)` for a finished build.
pub fn print_build_summary(name: &str, bytes: u64, duration: Duration) {
    let size = format_size(bytes);
    let elapsed = format!("({})", format_duration(duration));
    if color_enabled() {
        eprintln!(
            "  {} {} {} {}",
            "▸".blue(),
            name.bold(),
            size.green(),
            elapsed.dimmed()
        );
    } else {
        eprintln!("  ▸ {name} {size} {elapsed}");
    }
}
