//! Integration tests for configuration management

use gpa_calculator::config::{Config, ConfigOverrides, DIR_VARIABLE, KEYS};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.catalog.path.is_empty(),
        "Default catalog path should not be empty"
    );
    assert!(
        !config.session.snapshot.is_empty(),
        "Default snapshot path should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert!(config.session.autosave);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[catalog]
path = "/srv/gpa/subjects.toml"

[session]
snapshot = "/srv/gpa/session.json"
autosave = false

[paths]
reports_dir = "./reports"

[report]
institution = "Faculty of Applied Science"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.catalog.path, "/srv/gpa/subjects.toml");
    assert_eq!(config.session.snapshot, "/srv/gpa/session.json");
    assert!(!config.session.autosave);
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.report.institution, "Faculty of Applied Science");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"

[session]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.catalog.path, "");
    assert!(config.session.autosave, "autosave defaults to on");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$GPA_CALC/logs/test.log"

[catalog]
path = "$GPA_CALC/subjects.json"

[paths]
reports_dir = "$GPA_CALC/reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("gpacalc"));
    assert!(!config.logging.file.contains(DIR_VARIABLE));
    assert!(config.catalog.path.ends_with("subjects.json"));
    assert!(!config.catalog.path.contains(DIR_VARIABLE));
    assert!(!config.paths.reports_dir.contains(DIR_VARIABLE));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").as_deref(), Some("debug"));

    config.set("verbose", "true").expect("Failed to set verbose");
    assert!(config.logging.verbose);

    config
        .set("catalog", "$GPA_CALC/other.json")
        .expect("Failed to set catalog");
    assert!(!config.catalog.path.contains(DIR_VARIABLE));

    config
        .set("reports-dir", "/tmp/reports")
        .expect("dash alias should be accepted");
    assert_eq!(config.paths.reports_dir, "/tmp/reports");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
    assert!(config.set("autosave", "maybe").is_err());
}

#[test]
fn test_every_key_is_gettable() {
    let config = Config::from_defaults();
    for key in KEYS {
        assert!(config.get(key).is_some(), "key {key} should be readable");
    }
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("snapshot", "/tmp/elsewhere.json").expect("set snapshot");
    config.set("autosave", "false").expect("set autosave");

    config.unset("snapshot", &defaults).expect("unset snapshot");
    config.unset("autosave", &defaults).expect("unset autosave");
    assert_eq!(config.session, defaults.session);

    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config
        .set("institution", "Trincomalee Campus")
        .expect("Failed to set institution");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded, config);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        catalog: Some("/custom/subjects.json".to_string()),
        snapshot: Some("/custom/session.json".to_string()),
        autosave: Some(false),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.catalog.path, "/custom/subjects.json");
    assert_eq!(config.session.snapshot, "/custom/session.json");
    assert!(!config.session.autosave);
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        catalog: Some("samples/subjects.json".to_string()),
        ..ConfigOverrides::default()
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.catalog.path, "samples/subjects.json");
    assert_eq!(config.logging, defaults.logging);
    assert_eq!(config.session, defaults.session);
}

#[test]
fn test_config_display_format() {
    let display_str = Config::from_defaults().to_string();

    for section in ["[logging]", "[catalog]", "[session]", "[paths]", "[report]"] {
        assert!(display_str.contains(section), "missing {section}");
    }
    assert!(display_str.contains("autosave"));
    assert!(display_str.contains("reports_dir"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error");
    assert_eq!(config.catalog.path, defaults.catalog.path);
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[catalog]
path = "/my/subjects.json"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.catalog.path, "/my/subjects.json");
}

#[test]
fn test_get_gpacalc_dir() {
    let dir = Config::get_gpacalc_dir();

    assert!(dir.to_string_lossy().contains("gpacalc"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
