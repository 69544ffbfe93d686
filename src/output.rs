//! Terminal output formatting for bbpr.
//!
//! Colored message helpers plus the spinner shown around network calls.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::api::types::PullRequest;

/// ANSI color codes for terminal output.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RED: &str = "\x1b[31m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Print an error message.
pub fn print_error(msg: &str) {
    println!("{RED}{BOLD}Error:{RESET} {}", msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    println!("{YELLOW}Warning:{RESET} {}", msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{CYAN}Info:{RESET} {}", msg);
}

/// Format one pull request row: `#12 Title (feature → main)`.
pub fn format_pr_line(pr: &PullRequest) -> String {
    format!(
        "{GREEN}#{}{RESET} {} {BLUE}({} → {}){RESET}",
        pr.id,
        pr.title,
        pr.source.branch.name,
        pr.destination.branch.name
    )
}

/// Single-line spinner shown while a remote call is in flight.
///
/// Finishes with a `✔`/`✖` summary line, so callers always end the spinner
/// through [`succeed`](Spinner::succeed) or [`fail`](Spinner::fail).
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_chars(SPINNER_CHARS)
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    pub fn succeed(self, message: &str) {
        self.bar
            .finish_with_message(format!("{GREEN}\u{2714}{RESET} {}", message));
    }

    pub fn fail(self, message: &str) {
        self.bar
            .finish_with_message(format!("{RED}\u{2716}{RESET} {}", message));
    }
}
