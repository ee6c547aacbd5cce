//! Grade scale model

use serde::Serialize;
use std::collections::HashMap;

/// Letter grades in descending order of merit
pub const GRADE_LETTERS: [&str; 12] = [
    "A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "E",
];

/// Highest grade-point value a letter may map to
pub const MAX_GRADE_POINTS: f64 = 4.0;

/// Mapping from letter grade to grade-point value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GradeScale {
    points: HashMap<String, f64>,
}

impl GradeScale {
    /// Build a validated grade scale.
    ///
    /// Every letter must be one of [`GRADE_LETTERS`], every value must lie in
    /// `0.0..=4.0`, and values must not increase when walking the letters from
    /// `A+` down to `E`. Letters may be omitted.
    ///
    /// # Errors
    /// Returns a description of the first rule the mapping violates
    pub fn new(points: HashMap<String, f64>) -> Result<Self, String> {
        if let Some(unknown) = points.keys().find(|k| !GRADE_LETTERS.contains(&k.as_str())) {
            return Err(format!("unknown grade letter '{unknown}'"));
        }

        let mut previous: Option<(&str, f64)> = None;
        for letter in GRADE_LETTERS {
            let Some(&value) = points.get(letter) else {
                continue;
            };
            if !(0.0..=MAX_GRADE_POINTS).contains(&value) {
                return Err(format!(
                    "grade '{letter}' maps to {value}, expected a value between 0.0 and {MAX_GRADE_POINTS}"
                ));
            }
            if let Some((prev_letter, prev_value)) = previous {
                if value > prev_value {
                    return Err(format!(
                        "grade '{letter}' ({value}) is worth more than '{prev_letter}' ({prev_value})"
                    ));
                }
            }
            previous = Some((letter, value));
        }

        Ok(Self { points })
    }

    /// Grade-point value of a letter, if the scale defines it
    #[must_use]
    pub fn points(&self, letter: &str) -> Option<f64> {
        self.points.get(letter).copied()
    }

    /// Grade-point value of a letter, treating unmapped letters as 0.0
    #[must_use]
    pub fn points_or_zero(&self, letter: &str) -> f64 {
        self.points(letter).unwrap_or(0.0)
    }

    /// Whether the scale defines the letter
    #[must_use]
    pub fn contains(&self, letter: &str) -> bool {
        self.points.contains_key(letter)
    }

    /// Defined letters with their values, best grade first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        GRADE_LETTERS
            .iter()
            .filter_map(|&letter| self.points(letter).map(|value| (letter, value)))
    }

    /// Number of letters defined
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no letters are defined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
