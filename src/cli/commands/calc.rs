//! Calc command handler

use super::fail;
use gpa_calculator::core::report::share_message;
use gpa_calculator::core::{Catalog, Session};
use gpa_calculator::logger::is_verbose_enabled;
use gpa_calculator::{debug, verbose};

/// Compute and print the session's GPA metrics
pub fn run(catalog: &Catalog, session: &Session, json: bool, share: bool, combination_only: bool) {
    let result = if combination_only {
        if session.combination.is_none() {
            fail("No combination selected. Use `gpacalc session combination <ID>` first.");
        }
        session.compute_for_combination(catalog)
    } else {
        session.compute(catalog)
    };
    debug!(
        "Computed over {} graded subjects ({} excluded from GPA)",
        result.subjects_with_grades, result.excluded_count
    );

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{text}"),
            Err(e) => fail(&format!("Failed to serialize result: {e}")),
        }
    } else if share {
        println!("{}", share_message(&result));
    } else {
        println!("\n=== GPA Summary ({}) ===\n", session.degree_mode.description());
        print!("{result}");
        verbose!(
            "\n{} of {} graded credits count toward the final GPA",
            result.included_credits,
            result.total_credits
        );
        if is_verbose_enabled() && result.subjects_with_grades == 0 {
            println!("No grades recorded yet. Use `gpacalc grade set <CODE> <GRADE>`.");
        }
    }
}
