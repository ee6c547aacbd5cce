//! Custom subject registration
//!
//! Validates user input for a subject that is not in the catalog. Checks run
//! in a fixed order so the same bad input always yields the same message:
//! missing fields, then the credit range, then duplicate codes.

use crate::core::models::subject::{MAX_CREDITS, MIN_CREDITS};
use crate::core::models::Subject;
use std::collections::HashSet;
use thiserror::Error;

/// Reasons a custom subject is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of code, name, credits or grade was left empty
    #[error("Please fill in all fields (missing {0}).")]
    MissingField(&'static str),

    /// Credits outside 1..=10
    #[error("Credits must be between 1 and 10 (got {0}).")]
    CreditRange(i64),

    /// The code is already used by the catalog, another custom subject or a recorded grade
    #[error("Subject code {0} already exists.")]
    DuplicateCode(String),
}

/// Validate a custom subject and build it.
///
/// The code is trimmed and upper-cased and the name trimmed before
/// validation. On success the subject has department `Custom` and no
/// combination tags; recording it and its grade is up to the caller.
///
/// # Arguments
/// * `code` - Subject code as typed
/// * `name` - Subject title
/// * `credits` - Credit value, `None` when left blank
/// * `grade` - Letter grade to record
/// * `existing_codes` - Catalog codes, custom codes and every code with a grade
///
/// # Errors
/// Returns the first [`ValidationError`] encountered
pub fn add_custom(
    code: &str,
    name: &str,
    credits: Option<i64>,
    grade: &str,
    existing_codes: &HashSet<String>,
) -> Result<Subject, ValidationError> {
    let code = code.trim().to_uppercase();
    let name = name.trim();

    if code.is_empty() {
        return Err(ValidationError::MissingField("code"));
    }
    if name.is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    let Some(credits) = credits else {
        return Err(ValidationError::MissingField("credits"));
    };
    if grade.trim().is_empty() {
        return Err(ValidationError::MissingField("grade"));
    }

    let credits = u32::try_from(credits)
        .ok()
        .filter(|c| (MIN_CREDITS..=MAX_CREDITS).contains(c))
        .ok_or(ValidationError::CreditRange(credits))?;

    if existing_codes.contains(&code) {
        return Err(ValidationError::DuplicateCode(code));
    }

    Ok(Subject::custom(code, name.to_string(), credits))
}
