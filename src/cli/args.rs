//! CLI argument definitions for `gpacalc`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use gpa_calculator::config::ConfigOverrides;
use gpa_calculator::core::models::LevelId;
use gpa_calculator::core::report::ReportFormat;
use gpa_calculator::core::DegreeMode;
use gpa_calculator::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Degree track argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DegreeModeArg {
    /// 3-year general degree (levels 100-300)
    #[value(name = "3-year", alias = "3")]
    ThreeYear,
    /// 4-year honours/special degree (levels 100-400)
    #[value(name = "4-year", alias = "4")]
    FourYear,
}

impl From<DegreeModeArg> for DegreeMode {
    fn from(arg: DegreeModeArg) -> Self {
        match arg {
            DegreeModeArg::ThreeYear => Self::ThreeYear,
            DegreeModeArg::FourYear => Self::FourYear,
        }
    }
}

/// Report format argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Printable HTML page
    Html,
    /// Markdown summary
    #[value(alias = "markdown")]
    Md,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Html => Self::Html,
            ReportFormatArg::Md => Self::Markdown,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `catalog`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CatalogSubcommand {
    /// List academic levels with subject counts and credit totals.
    Levels,
    /// List the subjects of one level.
    Subjects {
        /// Level to list (defaults to the level being viewed)
        #[arg(long, value_name = "LEVEL")]
        level: Option<LevelId>,
        /// Only show subjects of this combination (defaults to the session's)
        #[arg(long, value_name = "ID")]
        combination: Option<String>,
    },
    /// List subject combinations.
    Combinations,
    /// Show the grade scale.
    Grades,
    /// Show the classification rules in evaluation order.
    Classes,
}

#[derive(Debug, Subcommand)]
pub enum GradeSubcommand {
    /// Record a grade for a subject.
    Set {
        /// Subject code
        #[arg(value_name = "CODE")]
        code: String,
        /// Letter grade (e.g., A+, B-, E)
        #[arg(value_name = "GRADE")]
        grade: String,
    },
    /// Remove the grade for a subject.
    Clear {
        /// Subject code
        #[arg(value_name = "CODE")]
        code: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CustomSubcommand {
    /// Add a subject that is not in the catalog, together with its grade.
    Add {
        /// Subject code (stored upper-case)
        #[arg(long)]
        code: Option<String>,
        /// Subject name
        #[arg(long)]
        name: Option<String>,
        /// Credits (1-10)
        #[arg(long, allow_negative_numbers = true)]
        credits: Option<i64>,
        /// Letter grade
        #[arg(long)]
        grade: Option<String>,
    },
    /// Remove a custom subject and its grade.
    Remove {
        /// Subject code
        #[arg(value_name = "CODE")]
        code: String,
    },
    /// List custom subjects.
    List,
}

#[derive(Debug, Subcommand)]
pub enum SessionSubcommand {
    /// Show the current session state.
    Show,
    /// Select the degree track.
    Mode {
        /// Degree track
        #[arg(value_enum, value_name = "MODE")]
        mode: DegreeModeArg,
    },
    /// Select the level being viewed.
    Level {
        /// Level (100, 200, 300 or 400)
        #[arg(value_name = "LEVEL")]
        level: LevelId,
    },
    /// Select a combination, or clear it when ID is omitted.
    Combination {
        /// Combination id from the catalog
        #[arg(value_name = "ID")]
        id: Option<String>,
    },
    /// Write the snapshot now (useful with autosave disabled).
    Save,
    /// Clear all grades and custom subjects (requires confirmation).
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Inspect the subject catalog.
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },
    /// Record or clear grades.
    Grade {
        #[command(subcommand)]
        subcommand: GradeSubcommand,
    },
    /// Manage custom subjects.
    Custom {
        #[command(subcommand)]
        subcommand: CustomSubcommand,
    },
    /// Inspect or change the session (degree mode, level, combination).
    ///
    /// If no subcommand is provided, shows the session.
    Session {
        #[command(subcommand)]
        subcommand: Option<SessionSubcommand>,
    },
    /// Compute GPA metrics for the current session.
    Calc {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Print the share message instead of the summary
        #[arg(long, conflicts_with = "json")]
        share: bool,
        /// Only count catalog subjects of the selected combination
        #[arg(long)]
        combination_only: bool,
    },
    /// Generate a printable results report.
    Report {
        /// Report format
        #[arg(short, long, value_enum, default_value = "html")]
        format: ReportFormatArg,
        /// Output file path (optional; defaults to config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Whether the session should be autosaved after the command succeeds.
    /// `session reset` writes its own snapshot once confirmed.
    pub const fn mutates_session(&self) -> bool {
        match self {
            Self::Grade { .. } => true,
            Self::Custom { subcommand } => !matches!(subcommand, CustomSubcommand::List),
            Self::Session { subcommand } => matches!(
                subcommand,
                Some(
                    SessionSubcommand::Mode { .. }
                        | SessionSubcommand::Level { .. }
                        | SessionSubcommand::Combination { .. }
                )
            ),
            Self::Config { .. } | Self::Catalog { .. } | Self::Calc { .. } | Self::Report { .. } => {
                false
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "gpacalc",
    about = "GPA calculator command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Catalog document to load for this run
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Snapshot file to use for this run
    #[arg(long, value_name = "PATH", global = true)]
    pub snapshot: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config autosave flag (true/false)
    #[arg(long = "config-autosave", value_parser = BoolishValueParser::new())]
    pub config_autosave: Option<bool>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over long-form
    /// flags (e.g., `--config-reports-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_deref().map(path_string),
            verbose: self.config_verbose,
            catalog: self.catalog.as_deref().map(path_string),
            snapshot: self.snapshot.as_deref().map(path_string),
            autosave: self.config_autosave,
            reports_dir: self
                .reports_dir
                .as_deref()
                .or(self.config_reports_dir.as_deref())
                .map(path_string),
        }
    }
}
