//! Integration tests for logger behavior.

use gpa_calculator::logger::{close_file_logging, init_file_logging, set_level_from_str, Level};
use gpa_calculator::{debug, error, info, verbose, warn};
use std::fs;
use tempfile::TempDir;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
    assert_eq!(Level::parse("warning"), Some(Level::Warn));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
    assert_eq!(Level::parse("trace"), None);
}

#[test]
fn logs_do_not_panic() {
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_appends_prefixed_lines() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("logs/gpacalc.log");

    assert!(init_file_logging(&path), "log file should open");
    error!("catalog unreachable at {}", "/tmp/x.json");
    close_file_logging();

    let content = fs::read_to_string(&path).expect("log file readable");
    assert!(content.contains("[ERROR] catalog unreachable at /tmp/x.json"));
}
