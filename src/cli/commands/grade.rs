//! Grade command handler

use super::fail;
use crate::args::GradeSubcommand;
use gpa_calculator::core::{Catalog, Session};
use gpa_calculator::warn;

/// Dispatch grade subcommands
pub fn run(subcommand: GradeSubcommand, catalog: &Catalog, session: &mut Session) {
    match subcommand {
        GradeSubcommand::Set { code, grade } => set(catalog, session, &code, &grade),
        GradeSubcommand::Clear { code } => clear(session, &code),
    }
}

fn set(catalog: &Catalog, session: &mut Session, code: &str, grade: &str) {
    let code = code.trim().to_uppercase();
    let grade = grade.trim();

    let known =
        catalog.contains_code(&code) || session.custom_subjects.iter().any(|s| s.code == code);
    if !known {
        fail(&format!("Unknown subject code: '{code}'"));
    }
    if let Some((level, _)) = catalog.subject(&code) {
        if !session.degree_mode.includes(level) {
            warn!(
                "{code} is a level {level} subject and does not count under a {} degree",
                session.degree_mode
            );
        }
    }
    if !catalog.grades().contains(grade) {
        let letters: Vec<&str> = catalog.grades().iter().map(|(letter, _)| letter).collect();
        fail(&format!(
            "Unknown grade '{grade}'. Use one of: {}",
            letters.join(", ")
        ));
    }

    session.set_grade(&code, grade);
    println!("✓ {code} = {grade}");
}

fn clear(session: &mut Session, code: &str) {
    let code = code.trim().to_uppercase();
    match session.clear_grade(&code) {
        Some(previous) => println!("✓ Cleared {code} (was {previous})"),
        None => println!("✓ {code} had no grade"),
    }
}
