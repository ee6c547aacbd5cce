//! Subject exclusion policy
//!
//! English, career-development and soft-skill units are graded and count
//! toward completed credits, but are left out of GPA averaging.

/// Code prefixes of subjects left out of GPA averaging
pub const EXCLUDED_PREFIXES: [&str; 3] = ["ENG", "CPD", "SLV"];

/// Whether a subject code falls under the exclusion policy
#[must_use]
pub fn is_excluded(code: &str) -> bool {
    EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| code.starts_with(prefix))
}
