//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::application::{ConversionReport, Severity};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print every status message of a conversion, then its counters.
pub fn report(report: &ConversionReport) {
    for message in &report.messages {
        match message.severity {
            Severity::Info => success(&message.text),
            Severity::Warning => warning(&message.text),
            Severity::Error => error(&message.text),
        }
    }

    let stats = &report.stats;
    let counters = [
        ("empties created", stats.anchors_created),
        ("objects re-homed", stats.items_rehomed),
        ("collections removed", stats.containers_removed),
        ("collections created", stats.containers_created),
        ("objects moved", stats.objects_moved),
    ];
    for (label, count) in counters.iter().filter(|(_, n)| *n > 0) {
        detail(&format!("{label}: {count}"));
    }
}
