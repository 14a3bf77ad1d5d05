//! Styled status lines for terminal output.

use console::style;

/// Outcome tag shown in front of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Error,
}

impl Status {
    fn tag(self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Error => "[ERROR]",
        }
    }
}

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// `[TAG] text`, with the tag colored unless `NO_COLOR` is set.
#[must_use]
pub fn status_line(status: Status, text: &str) -> String {
    let tag = status.tag();
    if is_color_disabled() {
        return format!("{tag} {text}");
    }
    let styled = match status {
        Status::Ok => style(tag).green().bold(),
        Status::Warn => style(tag).yellow().bold(),
        Status::Error => style(tag).red().bold(),
    };
    format!("{styled} {text}")
}

/// Section header line.
#[must_use]
pub fn header_line(text: &str) -> String {
    let plain = format!("=== {text} ===");
    if is_color_disabled() {
        plain
    } else {
        style(plain).bold().cyan().to_string()
    }
}

/// Print a success line to stdout.
pub fn print_success(text: &str) {
    println!("{}", status_line(Status::Ok, text));
}

/// Print a warning line to stderr.
pub fn print_warning(text: &str) {
    eprintln!("{}", status_line(Status::Warn, text));
}

/// Print an error line to stderr.
pub fn print_error(text: &str) {
    eprintln!("{}", status_line(Status::Error, text));
}
