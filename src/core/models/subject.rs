//! Subject model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Department assigned to user-created subjects
pub const CUSTOM_DEPARTMENT: &str = "Custom";

/// Smallest credit value a subject may carry
pub const MIN_CREDITS: u32 = 1;

/// Largest credit value a subject may carry
pub const MAX_CREDITS: u32 = 10;

/// Represents a subject (course unit) that can be graded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject code, conventionally a department prefix and number (e.g., "MAT1013")
    pub code: String,

    /// Subject title (e.g., "Calculus I")
    pub name: String,

    /// Credit value (1..=10)
    pub credits: u32,

    /// Offering department (e.g., "Mathematics")
    pub department: String,

    /// Program combinations this subject belongs to
    #[serde(
        default,
        rename = "combinations",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub combination_tags: BTreeSet<String>,
}

impl Subject {
    /// Create a new subject with no combination tags
    ///
    /// # Arguments
    /// * `code` - Subject code
    /// * `name` - Subject title
    /// * `credits` - Credit value
    /// * `department` - Offering department
    #[must_use]
    pub const fn new(code: String, name: String, credits: u32, department: String) -> Self {
        Self {
            code,
            name,
            credits,
            department,
            combination_tags: BTreeSet::new(),
        }
    }

    /// Create a user-defined subject in the `Custom` department
    #[must_use]
    pub fn custom(code: String, name: String, credits: u32) -> Self {
        Self::new(code, name, credits, CUSTOM_DEPARTMENT.to_string())
    }

    /// Tag the subject with a program combination
    #[must_use]
    pub fn with_combination(mut self, combination: &str) -> Self {
        self.combination_tags.insert(combination.to_string());
        self
    }

    /// Whether the subject is offered under the given combination
    #[must_use]
    pub fn in_combination(&self, combination: &str) -> bool {
        self.combination_tags.contains(combination)
    }

    /// Whether this subject was created by the user rather than the catalog
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.department == CUSTOM_DEPARTMENT
    }

    /// Whether the credit value lies in the accepted range
    #[must_use]
    pub const fn has_valid_credits(&self) -> bool {
        self.credits >= MIN_CREDITS && self.credits <= MAX_CREDITS
    }
}
