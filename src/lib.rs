//! Shared library for the GPA calculator
//! Contains the catalog loader, GPA engine and session handling used by the CLI

pub mod config;
pub mod core;
pub mod logger;

/// Returns the current version of the `gpa-calculator` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
