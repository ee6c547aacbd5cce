//! CLI command handlers for `gpacalc`.
//!
//! Each subcommand is implemented in its own submodule. Handlers print
//! `✓`/`✗` status lines and exit with status 1 on failure, before the
//! session is saved.

pub mod calc;
pub mod catalog;
pub mod config;
pub mod custom;
pub mod grade;
pub mod report;
pub mod session;

/// Log an error, print it to stderr and exit with status 1
pub fn fail(message: &str) -> ! {
    gpa_calculator::error!("{message}");
    eprintln!("✗ {message}");
    std::process::exit(1);
}
