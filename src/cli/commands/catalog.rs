//! Catalog command handler

use super::fail;
use crate::args::CatalogSubcommand;
use gpa_calculator::core::engine::SubjectFilter;
use gpa_calculator::core::models::{LevelId, Subject};
use gpa_calculator::core::{is_excluded, Catalog, Session};

/// Dispatch catalog subcommands
pub fn run(subcommand: CatalogSubcommand, catalog: &Catalog, session: &Session) {
    match subcommand {
        CatalogSubcommand::Levels => print_levels(catalog, session),
        CatalogSubcommand::Subjects { level, combination } => {
            print_subjects(catalog, session, level, combination.as_deref());
        }
        CatalogSubcommand::Combinations => print_combinations(catalog, session),
        CatalogSubcommand::Grades => print_grades(catalog),
        CatalogSubcommand::Classes => print_classes(catalog),
    }
}

fn print_levels(catalog: &Catalog, session: &Session) {
    println!("\n=== Academic Levels ===\n");
    for level in catalog.levels() {
        let marker = if level.id == session.level { "▶" } else { " " };
        let note = if session.degree_mode.includes(level.id) {
            ""
        } else {
            "  (4-year degree only)"
        };
        println!(
            "{marker} {:<10} {:>2} subjects  {:>3} credits{note}",
            level.name,
            level.subjects.len(),
            level.total_credits()
        );
    }
}

fn print_subjects(
    catalog: &Catalog,
    session: &Session,
    level: Option<LevelId>,
    combination: Option<&str>,
) {
    let level_id = level.unwrap_or(session.level);
    let Some(level) = catalog.level(level_id) else {
        fail(&format!("The catalog has no subjects for level {level_id}"));
    };

    let combination = combination.or(session.combination.as_deref());
    if let Some(id) = combination {
        if catalog.combination(id).is_none() {
            fail(&format!("Unknown combination: '{id}'"));
        }
    }
    let filter = combination.map(SubjectFilter::combination);

    println!("\n=== {} ===", level.name);
    if let Some(c) = combination.and_then(|id| catalog.combination(id)) {
        println!("{}", c.name);
        if !c.description.is_empty() {
            println!("{}", c.description);
        }
    }
    println!();

    let subjects = catalog.visible_subjects(level_id, filter.as_ref());
    if subjects.is_empty() {
        println!("No subjects available for this combination at this level.");
    }
    for subject in subjects {
        print_subject_row(subject, session.grade(&subject.code));
    }
}

/// One listing line: code, credits, grade, name and flags
pub fn print_subject_row(subject: &Subject, grade: Option<&str>) {
    let mut flags = Vec::new();
    if is_excluded(&subject.code) {
        flags.push("not in GPA");
    }
    if subject.is_custom() {
        flags.push("custom");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", flags.join(", "))
    };
    println!(
        "  {:<10} {:>2} cr  {:<3} {}{flags}",
        subject.code,
        subject.credits,
        grade.unwrap_or("-"),
        subject.name
    );
}

fn print_combinations(catalog: &Catalog, session: &Session) {
    if !catalog.has_combinations() {
        println!("This catalog does not define subject combinations.");
        return;
    }
    println!("\n=== Subject Combinations ===\n");
    for (id, combination) in catalog.combinations() {
        let marker = if session.combination.as_deref() == Some(id) {
            "▶"
        } else {
            " "
        };
        println!("{marker} {id:<6} {}", combination.name);
        if !combination.description.is_empty() {
            println!("         {}", combination.description);
        }
    }
}

fn print_grades(catalog: &Catalog) {
    println!("\n=== Grade Scale ===\n");
    for (letter, points) in catalog.grades().iter() {
        println!("  {letter:<3} {points:.2}");
    }
}

fn print_classes(catalog: &Catalog) {
    println!("\n=== Academic Classification ===\n");
    for rule in catalog.classification_rules().iter() {
        println!("  GPA ≥ {:.2}  {}", rule.minimum_gpa, rule.label);
    }
    if !catalog.classification_rules().has_catch_all() {
        println!("  otherwise   —");
    }
}
