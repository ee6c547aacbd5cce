//! Config command handler

use super::fail;
use crate::args::ConfigSubcommand;
use gpa_calculator::config::{Config, KEYS};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None => handle_config_get(config, None),
        Some(ConfigSubcommand::Get { key }) => handle_config_get(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => handle_config_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => handle_config_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => handle_config_reset(),
    }
}

fn unknown_key(key: &str) -> ! {
    fail(&format!(
        "Unknown config key: '{key}'. Known keys: {}",
        KEYS.join(", ")
    ));
}

/// Handle the config get subcommand
pub fn handle_config_get(config: &Config, key: Option<&str>) {
    if let Some(k) = key {
        match config.get(k) {
            Some(value) => println!("{value}"),
            None => unknown_key(k),
        }
    } else {
        println!("\n=== Configuration ===\n");
        println!("# {}\n", Config::get_config_file_path().display());
        print!("{config}");
    }
}

/// Handle the config set subcommand
pub fn handle_config_set(config: &mut Config, key: &str, value: &str) {
    if config.get(key).is_none() {
        unknown_key(key);
    }
    if let Err(e) = config.set(key, value) {
        fail(&e);
    }
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
    println!("✓ Set {key} = {value}");
}

/// Handle the config unset subcommand
pub fn handle_config_unset(config: &mut Config, defaults: &Config, key: &str) {
    if let Err(e) = config.unset(key, defaults) {
        fail(&e);
    }
    if let Err(e) = config.save() {
        fail(&format!("Failed to save config: {e}"));
    }
    println!("✓ Reset {key} to default");
}

/// Handle the config reset subcommand
pub fn handle_config_reset() {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return;
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if response.trim().eq_ignore_ascii_case("y") || response.trim().eq_ignore_ascii_case("yes") {
        if let Err(e) = Config::reset() {
            fail(&format!("Failed to remove config file: {e}"));
        }
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
}
