//! Caller-owned session state
//!
//! Holds everything the user has entered: grade selections, custom subjects,
//! the degree mode, the level being viewed and an optional combination. The
//! engine only ever reads it.

use crate::core::catalog::Catalog;
use crate::core::custom::{add_custom, ValidationError};
use crate::core::engine::{compute_filtered, DegreeMode, GpaResult, GradeSelections, SubjectFilter};
use crate::core::models::{LevelId, Subject};
use crate::debug;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from session mutations that depend on the catalog or degree mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Level 400 was selected under a three-year degree
    #[error("Level {level} is not available for a {mode} degree")]
    LevelUnavailable {
        /// Requested level
        level: LevelId,
        /// Current degree mode
        mode: DegreeMode,
    },

    /// The combination id is not defined by the catalog
    #[error("Unknown combination: '{0}'")]
    UnknownCombination(String),

    /// No custom subject with this code exists
    #[error("No custom subject with code '{0}'")]
    UnknownCustomSubject(String),
}

/// User state for one calculator session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Letter grade per subject code
    pub user_grades: GradeSelections,
    /// User-added subjects in insertion order
    pub custom_subjects: Vec<Subject>,
    /// Selected degree track
    pub degree_mode: DegreeMode,
    /// Level currently being viewed
    pub level: LevelId,
    /// Combination used to filter the subject list, if any
    pub combination: Option<String>,
}

impl Session {
    /// Start an empty session (3-year degree, level 100)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grade; an empty grade clears the entry
    pub fn set_grade(&mut self, code: &str, grade: &str) {
        let grade = grade.trim();
        if grade.is_empty() {
            self.clear_grade(code);
        } else {
            debug!("Grade {code} = {grade}");
            self.user_grades.insert(code.to_string(), grade.to_string());
        }
    }

    /// Remove the grade for a subject. Returns the previous grade, if any.
    pub fn clear_grade(&mut self, code: &str) -> Option<String> {
        debug!("Grade {code} cleared");
        self.user_grades.remove(code)
    }

    /// Grade recorded for a subject
    #[must_use]
    pub fn grade(&self, code: &str) -> Option<&str> {
        self.user_grades.get(code).map(String::as_str)
    }

    /// Codes a new custom subject must not reuse: catalog codes, custom
    /// subject codes and every code that already has a grade
    #[must_use]
    pub fn existing_codes(&self, catalog: &Catalog) -> HashSet<String> {
        catalog
            .codes()
            .map(str::to_string)
            .chain(self.custom_subjects.iter().map(|s| s.code.clone()))
            .chain(self.user_grades.keys().cloned())
            .collect()
    }

    /// Validate and register a custom subject together with its grade.
    ///
    /// Nothing changes when validation fails.
    ///
    /// # Errors
    /// Returns the [`ValidationError`] reported by [`add_custom`]
    pub fn add_custom(
        &mut self,
        catalog: &Catalog,
        code: &str,
        name: &str,
        credits: Option<i64>,
        grade: &str,
    ) -> Result<&Subject, ValidationError> {
        let subject = add_custom(code, name, credits, grade, &self.existing_codes(catalog))?;
        debug!(
            "Custom subject {} added ({} credits)",
            subject.code, subject.credits
        );
        self.user_grades
            .insert(subject.code.clone(), grade.trim().to_string());
        self.custom_subjects.push(subject);
        Ok(&self.custom_subjects[self.custom_subjects.len() - 1])
    }

    /// Remove a custom subject and its grade
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownCustomSubject`] if no custom subject has that code
    pub fn remove_custom(&mut self, code: &str) -> Result<Subject, SessionError> {
        let index = self
            .custom_subjects
            .iter()
            .position(|s| s.code == code)
            .ok_or_else(|| SessionError::UnknownCustomSubject(code.to_string()))?;
        self.user_grades.remove(code);
        Ok(self.custom_subjects.remove(index))
    }

    /// Switch degree mode; leaving four-year mode while viewing level 400
    /// moves the view down to level 300
    pub fn set_degree_mode(&mut self, mode: DegreeMode) {
        self.degree_mode = mode;
        if !mode.includes(self.level) {
            debug!("Level {} unavailable for {mode}, viewing {}", self.level, mode.top_level());
            self.level = mode.top_level();
        }
    }

    /// Select the level being viewed
    ///
    /// # Errors
    /// Returns [`SessionError::LevelUnavailable`] for level 400 under a three-year degree
    pub fn set_level(&mut self, level: LevelId) -> Result<(), SessionError> {
        if !self.degree_mode.includes(level) {
            return Err(SessionError::LevelUnavailable {
                level,
                mode: self.degree_mode,
            });
        }
        self.level = level;
        Ok(())
    }

    /// Select a combination to filter by, or clear it with `None`
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownCombination`] if the catalog does not define it
    pub fn set_combination(
        &mut self,
        catalog: &Catalog,
        combination: Option<&str>,
    ) -> Result<(), SessionError> {
        match combination {
            Some(id) if catalog.combination(id).is_none() => {
                Err(SessionError::UnknownCombination(id.to_string()))
            }
            Some(id) => {
                self.combination = Some(id.to_string());
                Ok(())
            }
            None => {
                self.combination = None;
                Ok(())
            }
        }
    }

    /// Filter for the selected combination, if any
    #[must_use]
    pub fn combination_filter(&self) -> Option<SubjectFilter> {
        self.combination.as_deref().map(SubjectFilter::combination)
    }

    /// Forget all grades and custom subjects; mode, level and combination are kept
    pub fn reset(&mut self) {
        self.user_grades.clear();
        self.custom_subjects.clear();
    }

    /// Compute GPA metrics for this session over every catalog subject
    #[must_use]
    pub fn compute(&self, catalog: &Catalog) -> GpaResult {
        compute_filtered(
            catalog,
            self.degree_mode,
            &self.user_grades,
            &self.custom_subjects,
            None,
        )
    }

    /// Compute GPA metrics restricted to the selected combination's subjects
    #[must_use]
    pub fn compute_for_combination(&self, catalog: &Catalog) -> GpaResult {
        let filter = self.combination_filter();
        compute_filtered(
            catalog,
            self.degree_mode,
            &self.user_grades,
            &self.custom_subjects,
            filter.as_ref(),
        )
    }
}
