//! Command-line interface entry point for `gpacalc`

mod args;
mod commands;

use args::{Cli, Command, SessionSubcommand};
use clap::Parser;
use gpa_calculator::config::Config;
use gpa_calculator::core::{Catalog, Session, Snapshot};
use gpa_calculator::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use gpa_calculator::{error, info, warn};
use std::path::{Path, PathBuf};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    let verbose = init_logging(&args, &config);

    let command = args.command;
    if let Command::Config { subcommand } = command {
        commands::config::run(subcommand, &mut config, &defaults);
        return;
    }

    let catalog_path = PathBuf::from(&config.catalog.path);
    let catalog = match Catalog::load_from_path(&catalog_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ Failed to load catalog: {e}");
            if config.catalog.path.is_empty() {
                eprintln!("  Set one with `gpacalc config set catalog <PATH>` or pass --catalog.");
            }
            std::process::exit(1);
        }
    };

    let snapshot_path = PathBuf::from(&config.session.snapshot);
    let mut session = load_session(&snapshot_path, &command);
    let mutates = command.mutates_session();

    match command {
        Command::Config { .. } => unreachable!("handled before the catalog is loaded"),
        Command::Catalog { subcommand } => {
            commands::catalog::run(subcommand, &catalog, &session);
        }
        Command::Grade { subcommand } => {
            commands::grade::run(subcommand, &catalog, &mut session);
        }
        Command::Custom { subcommand } => {
            commands::custom::run(subcommand, &catalog, &mut session);
        }
        Command::Session { subcommand } => {
            commands::session::run(subcommand, &catalog, &mut session, &snapshot_path);
        }
        Command::Calc {
            json,
            share,
            combination_only,
        } => {
            commands::calc::run(&catalog, &session, json, share, combination_only);
        }
        Command::Report { format, output } => {
            commands::report::run(&catalog, &session, format.into(), output.as_deref(), &config);
        }
    }

    if mutates && config.session.autosave {
        save_session(&session, &snapshot_path, verbose);
    }
}

/// Configure the runtime logger from CLI flags and config. Returns whether
/// verbose output is on.
fn init_logging(args: &Cli, config: &Config) -> bool {
    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    verbose
}

/// Restore the session from its snapshot. A corrupt snapshot is fatal except
/// for `session reset`, which starts over once confirmed.
fn load_session(path: &Path, command: &Command) -> Session {
    if path.as_os_str().is_empty() {
        warn!("No snapshot path configured; session will not persist");
        return Session::new();
    }
    match Snapshot::load_or_default(path) {
        Ok(snapshot) => Session::from(snapshot),
        Err(e) => {
            if matches!(
                command,
                Command::Session {
                    subcommand: Some(SessionSubcommand::Reset { .. })
                }
            ) {
                warn!("Discarding unreadable snapshot: {e}");
                return Session::new();
            }
            error!("{e}");
            eprintln!("✗ {e}");
            eprintln!("  Run `gpacalc session reset --yes` to start a new session.");
            std::process::exit(1);
        }
    }
}

fn save_session(session: &Session, path: &Path, verbose: bool) {
    if path.as_os_str().is_empty() {
        return;
    }
    match Snapshot::from(session).save(path) {
        Ok(()) => {
            if verbose {
                eprintln!("✓ Session saved to {}", path.display());
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("✗ Failed to save session: {e}");
            std::process::exit(1);
        }
    }
}
