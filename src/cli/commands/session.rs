//! Session command handler

use super::fail;
use crate::args::SessionSubcommand;
use gpa_calculator::core::engine::DegreeMode;
use gpa_calculator::core::models::LevelId;
use gpa_calculator::core::{Catalog, Session, Snapshot};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Dispatch session subcommands
pub fn run(
    subcommand: Option<SessionSubcommand>,
    catalog: &Catalog,
    session: &mut Session,
    snapshot_path: &Path,
) {
    match subcommand {
        None | Some(SessionSubcommand::Show) => show(catalog, session, snapshot_path),
        Some(SessionSubcommand::Mode { mode }) => set_mode(session, mode.into()),
        Some(SessionSubcommand::Level { level }) => set_level(session, level),
        Some(SessionSubcommand::Combination { id }) => {
            set_combination(catalog, session, id.as_deref());
        }
        Some(SessionSubcommand::Save) => save(session, snapshot_path),
        Some(SessionSubcommand::Reset { yes }) => {
            let confirmed = yes || confirm_reset(io::stdin().lock());
            if !reset(session, snapshot_path, confirmed) {
                println!("✗ Reset cancelled");
            }
        }
    }
}

fn show(catalog: &Catalog, session: &Session, snapshot_path: &Path) {
    let combination = session.combination.as_deref().map_or_else(
        || "All".to_string(),
        |id| {
            catalog
                .combination(id)
                .map_or_else(|| id.to_string(), |c| format!("{} ({id})", c.name))
        },
    );
    println!("\n=== Session ===\n");
    println!("Degree Mode:      {}", session.degree_mode.description());
    println!("Current Level:    Level {}", session.level);
    println!("Combination:      {combination}");
    println!("Grades Recorded:  {}", session.user_grades.len());
    println!("Custom Subjects:  {}", session.custom_subjects.len());
    if !snapshot_path.as_os_str().is_empty() {
        println!("Snapshot:         {}", snapshot_path.display());
    }
}

fn set_mode(session: &mut Session, mode: DegreeMode) {
    let previous_level = session.level;
    session.set_degree_mode(mode);
    println!("✓ Degree mode set to {}", mode.description());
    if session.level != previous_level {
        println!("  Now viewing Level {}", session.level);
    }
}

fn set_level(session: &mut Session, level: LevelId) {
    if let Err(e) = session.set_level(level) {
        fail(&e.to_string());
    }
    println!("✓ Viewing Level {level}");
}

fn set_combination(catalog: &Catalog, session: &mut Session, id: Option<&str>) {
    if let Err(e) = session.set_combination(catalog, id) {
        fail(&e.to_string());
    }
    match id.and_then(|id| catalog.combination(id)) {
        Some(combination) => println!("✓ Combination set to {}", combination.name),
        None => println!("✓ Showing all subjects"),
    }
}

fn save(session: &Session, snapshot_path: &Path) {
    if snapshot_path.as_os_str().is_empty() {
        fail("No snapshot path configured. Pass --snapshot or `gpacalc config set snapshot <PATH>`.");
    }
    if let Err(e) = Snapshot::from(session).save(snapshot_path) {
        fail(&e.to_string());
    }
    println!("✓ Session saved to {}", snapshot_path.display());
}

/// Ask before clearing grades and custom subjects
fn confirm_reset<R: BufRead>(mut input: R) -> bool {
    print!("Are you sure you want to clear all grades and custom subjects? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    input.read_line(&mut response).ok();
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}

/// Clear the session and write it over the snapshot. Nothing is touched
/// unless `confirmed`; returns whether the reset happened.
fn reset(session: &mut Session, snapshot_path: &Path, confirmed: bool) -> bool {
    if !confirmed {
        return false;
    }

    session.reset();
    if !snapshot_path.as_os_str().is_empty() {
        if let Err(e) = Snapshot::from(&*session).save(snapshot_path) {
            fail(&e.to_string());
        }
    }
    println!("✓ Session cleared");
    true
}
