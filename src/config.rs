//! Configuration for the GPA calculator
//!
//! The configuration lives in a TOML file under the platform config directory
//! (`$GPA_CALC`). It is created from compiled-in defaults on first run, and
//! fields added in later versions are merged in from those defaults on load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the configuration directory
pub const DIR_VARIABLE: &str = "$GPA_CALC";

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const KEYS: [&str; 8] = [
    "level",
    "file",
    "verbose",
    "catalog",
    "snapshot",
    "autosave",
    "reports_dir",
    "institution",
];

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty disables file logging
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Catalog source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog document (`.json` or `.toml`)
    #[serde(default)]
    pub path: String,
}

/// Session persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Snapshot file holding grades, custom subjects and selections
    #[serde(default)]
    pub snapshot: String,
    /// Save the snapshot after every command that changes the session
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            snapshot: String::new(),
            autosave: default_autosave(),
        }
    }
}

const fn default_autosave() -> bool {
    true
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for generated reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Report presentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Heading printed at the top of reports
    #[serde(default)]
    pub institution: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override catalog path
    pub catalog: Option<String>,
    /// Override snapshot path
    pub snapshot: Option<String>,
    /// Override autosave
    pub autosave: Option<bool>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$GPA_CALC` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gpacalc`
    /// - macOS: `~/Library/Application Support/gpacalc`
    /// - Windows: `%APPDATA%\gpacalc`
    #[must_use]
    pub fn get_gpacalc_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gpacalc")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gpacalc_dir().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled. Returns `true` if anything changed.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        for (field, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.catalog.path, &defaults.catalog.path),
            (&mut self.session.snapshot, &defaults.session.snapshot),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            (&mut self.report.institution, &defaults.report.institution),
        ] {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }
        changed
    }

    /// Apply CLI-provided overrides for this run only
    ///
    /// Only `Some` values replace config values; nothing is saved.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(catalog) = &overrides.catalog {
            self.catalog.path.clone_from(catalog);
        }
        if let Some(snapshot) = &overrides.snapshot {
            self.session.snapshot.clone_from(snapshot);
        }
        if let Some(autosave) = overrides.autosave {
            self.session.autosave = autosave;
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Expand `$GPA_CALC` in a string to the configuration directory
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gpacalc_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string, expanding `$GPA_CALC` in paths
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or does not match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.catalog.path = Self::expand_variables(&config.catalog.path);
        config.session.snapshot = Self::expand_variables(&config.session.snapshot);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from the compiled-in defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is not valid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// An existing file has missing fields merged from defaults and is re-saved
    /// when that adds anything. Falls back to defaults if the file is unreadable.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save();
            return defaults;
        }

        match fs::read_to_string(&config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()))
        {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save();
                }
                config
            }
            Err(e) => {
                crate::warn!(
                    "Ignoring unreadable config {}: {e}",
                    config_file.display()
                );
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot be
    /// serialized, or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key (see [`KEYS`])
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "catalog" => Some(self.catalog.path.clone()),
            "snapshot" => Some(self.session.snapshot.clone()),
            "autosave" => Some(self.session.autosave.to_string()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            "institution" => Some(self.report.institution.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or a boolean value does not parse
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "catalog" => self.catalog.path = Self::expand_variables(value),
            "snapshot" => self.session.snapshot = Self::expand_variables(value),
            "autosave" => self.session.autosave = parse_bool(key, value)?,
            "reports_dir" | "reports-dir" => {
                self.paths.reports_dir = Self::expand_variables(value);
            }
            "institution" => self.report.institution = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single configuration value to its default
    ///
    /// # Errors
    /// Returns an error if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalog" => self.catalog.path.clone_from(&defaults.catalog.path),
            "snapshot" => self.session.snapshot.clone_from(&defaults.session.snapshot),
            "autosave" => self.session.autosave = defaults.session.autosave,
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "institution" => self
                .report
                .institution
                .clone_from(&defaults.report.institution),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the config file so the next [`load`](Config::load) recreates it
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[catalog]")?;
        writeln!(f, "  path = \"{}\"", self.catalog.path)?;

        writeln!(f, "\n[session]")?;
        writeln!(f, "  snapshot = \"{}\"", self.session.snapshot)?;
        writeln!(f, "  autosave = {}", self.session.autosave)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[report]")?;
        writeln!(f, "  institution = \"{}\"", self.report.institution)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_and_expand() {
        let config = Config::from_defaults();
        assert!(!config.logging.level.is_empty());
        assert!(!config.catalog.path.contains(DIR_VARIABLE));
        assert!(!config.session.snapshot.contains(DIR_VARIABLE));
        assert!(config.session.autosave);
    }

    #[test]
    fn test_missing_sections_use_serde_defaults() {
        let config = Config::from_toml("[logging]\nlevel = \"info\"\n").expect("valid toml");
        assert_eq!(config.logging.level, "info");
        assert!(config.catalog.path.is_empty());
        assert!(config.session.autosave);
    }

    #[test]
    fn test_merge_defaults_fills_only_empty_fields() {
        let defaults = Config::from_defaults();
        let mut config = Config::from_toml("[catalog]\npath = \"/data/subjects.json\"\n")
            .expect("valid toml");

        assert!(config.merge_defaults(&defaults));
        assert_eq!(config.catalog.path, "/data/subjects.json");
        assert_eq!(config.session.snapshot, defaults.session.snapshot);
        assert!(!config.merge_defaults(&defaults));
    }

    #[test]
    fn test_every_key_round_trips() {
        let mut config = Config::from_defaults();
        for key in KEYS {
            assert!(config.get(key).is_some(), "missing getter for {key}");
        }
        config.set("autosave", "false").expect("valid bool");
        assert_eq!(config.get("autosave").as_deref(), Some("false"));
        assert!(config.set("autosave", "sometimes").is_err());
        assert!(config.set("nonsense", "1").is_err());
        assert!(config.get("nonsense").is_none());
    }
}
