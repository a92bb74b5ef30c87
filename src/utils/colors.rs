/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Dose badge colour: the last dose of the day stands out.
pub fn color_for_dose(dose_number: usize, total: usize) -> &'static str {
    if total > 1 && dose_number == total {
        GREEN
    } else if dose_number == 1 {
        CYAN
    } else {
        YELLOW
    }
}

/// Greys out empty cells ("" or "--").
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
