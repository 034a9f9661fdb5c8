/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Color for a daily total against the required threshold:
/// meets it → green, under it → red.
pub fn color_for_total(total: i64, required: i64) -> &'static str {
    if total >= required { GREEN } else { RED }
}
