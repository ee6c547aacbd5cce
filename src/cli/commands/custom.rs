//! Custom subject command handler

use super::catalog::print_subject_row;
use super::fail;
use crate::args::CustomSubcommand;
use gpa_calculator::core::{Catalog, Session};
use gpa_calculator::info;

/// Dispatch custom subcommands
pub fn run(subcommand: CustomSubcommand, catalog: &Catalog, session: &mut Session) {
    match subcommand {
        CustomSubcommand::Add {
            code,
            name,
            credits,
            grade,
        } => add(
            catalog,
            session,
            code.as_deref().unwrap_or_default(),
            name.as_deref().unwrap_or_default(),
            credits,
            grade.as_deref().unwrap_or_default(),
        ),
        CustomSubcommand::Remove { code } => remove(session, &code),
        CustomSubcommand::List => list(session),
    }
}

fn add(
    catalog: &Catalog,
    session: &mut Session,
    code: &str,
    name: &str,
    credits: Option<i64>,
    grade: &str,
) {
    let all_present = !code.trim().is_empty() && !name.trim().is_empty() && credits.is_some();
    if all_present && !grade.trim().is_empty() && !catalog.grades().contains(grade.trim()) {
        fail(&format!("Unknown grade '{}'", grade.trim()));
    }

    match session.add_custom(catalog, code, name, credits, grade) {
        Ok(subject) => {
            info!("Custom subject {} registered", subject.code);
            println!(
                "✓ Added {} ({}, {} credits)",
                subject.code, subject.name, subject.credits
            );
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn remove(session: &mut Session, code: &str) {
    let code = code.trim().to_uppercase();
    match session.remove_custom(&code) {
        Ok(subject) => println!("✓ Removed {} ({})", subject.code, subject.name),
        Err(e) => fail(&e.to_string()),
    }
}

fn list(session: &Session) {
    if session.custom_subjects.is_empty() {
        println!("No custom subjects. Add one with `gpacalc custom add`.");
        return;
    }
    println!("\n=== Custom Subjects ===\n");
    for subject in &session.custom_subjects {
        print_subject_row(subject, session.grade(&subject.code));
    }
}
