//! Subject catalog: levels, subjects, grade scale and classification rules
//!
//! The catalog is loaded once at startup and never mutated afterwards.

pub mod loader;

pub use loader::{load, parse, CatalogFormat, LoadError};

use crate::core::engine::SubjectFilter;
use crate::core::models::{
    AcademicLevel, ClassificationRules, Combination, GradeScale, LevelId, Subject,
};
use std::collections::{BTreeMap, HashSet};

/// Immutable, validated subject catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    levels: BTreeMap<LevelId, AcademicLevel>,
    combinations: Option<BTreeMap<String, Combination>>,
    grades: GradeScale,
    classes: ClassificationRules,
}

impl Catalog {
    /// Assemble a catalog from its parts
    ///
    /// Subject codes must be non-empty and unique across all levels, and
    /// every subject must carry between 1 and 10 credits.
    ///
    /// # Errors
    /// Returns [`LoadError::InvalidSubject`] or [`LoadError::DuplicateCode`]
    pub fn new(
        levels: Vec<AcademicLevel>,
        combinations: Option<BTreeMap<String, Combination>>,
        grades: GradeScale,
        classes: ClassificationRules,
    ) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for subject in levels.iter().flat_map(|level| &level.subjects) {
            if subject.code.trim().is_empty() {
                return Err(LoadError::InvalidSubject {
                    code: subject.code.clone(),
                    reason: "subject code is empty".to_string(),
                });
            }
            if !subject.has_valid_credits() {
                return Err(LoadError::InvalidSubject {
                    code: subject.code.clone(),
                    reason: format!("{} credits is outside 1..=10", subject.credits),
                });
            }
            if !seen.insert(subject.code.as_str()) {
                return Err(LoadError::DuplicateCode(subject.code.clone()));
            }
        }

        Ok(Self {
            levels: levels.into_iter().map(|level| (level.id, level)).collect(),
            combinations,
            grades,
            classes,
        })
    }

    /// Load a catalog file (`.toml` as TOML, anything else as JSON)
    ///
    /// # Errors
    /// Returns a [`LoadError`] if the file is unreadable or invalid
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, LoadError> {
        load(path)
    }

    /// Parse a JSON catalog document
    ///
    /// # Errors
    /// Returns a [`LoadError`] if the document is malformed or invalid
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        parse(content, CatalogFormat::Json)
    }

    /// Parse a TOML catalog document
    ///
    /// # Errors
    /// Returns a [`LoadError`] if the document is malformed or invalid
    pub fn from_toml_str(content: &str) -> Result<Self, LoadError> {
        parse(content, CatalogFormat::Toml)
    }

    /// Get a level by id
    #[must_use]
    pub fn level(&self, id: LevelId) -> Option<&AcademicLevel> {
        self.levels.get(&id)
    }

    /// All levels in ascending order
    pub fn levels(&self) -> impl Iterator<Item = &AcademicLevel> {
        self.levels.values()
    }

    /// Find a catalog subject and the level it belongs to
    #[must_use]
    pub fn subject(&self, code: &str) -> Option<(LevelId, &Subject)> {
        self.levels.values().find_map(|level| {
            level
                .subjects
                .iter()
                .find(|s| s.code == code)
                .map(|s| (level.id, s))
        })
    }

    /// Whether any level defines a subject with this code
    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.subject(code).is_some()
    }

    /// Every catalog subject code, in level then catalog order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.levels
            .values()
            .flat_map(|level| level.subjects.iter().map(|s| s.code.as_str()))
    }

    /// Whether the catalog carries the optional combinations section
    #[must_use]
    pub const fn has_combinations(&self) -> bool {
        self.combinations.is_some()
    }

    /// Get a combination by id
    #[must_use]
    pub fn combination(&self, id: &str) -> Option<&Combination> {
        self.combinations.as_ref().and_then(|c| c.get(id))
    }

    /// All combinations keyed by id (empty when the section is absent)
    pub fn combinations(&self) -> impl Iterator<Item = (&str, &Combination)> {
        self.combinations
            .iter()
            .flat_map(|c| c.iter().map(|(id, combo)| (id.as_str(), combo)))
    }

    /// The grade scale
    #[must_use]
    pub const fn grades(&self) -> &GradeScale {
        &self.grades
    }

    /// Grade points for a letter; unmapped letters count as 0.0
    #[must_use]
    pub fn grade_points(&self, letter: &str) -> f64 {
        self.grades.points_or_zero(letter)
    }

    /// Classification rules in evaluation order
    #[must_use]
    pub const fn classification_rules(&self) -> &ClassificationRules {
        &self.classes
    }

    /// Classification label for a GPA
    #[must_use]
    pub fn classify(&self, gpa: f64) -> &str {
        self.classes.classify(gpa)
    }

    /// Subjects of one level that pass the optional filter, in catalog order
    #[must_use]
    pub fn visible_subjects(&self, id: LevelId, filter: Option<&SubjectFilter>) -> Vec<&Subject> {
        self.level(id).map_or_else(Vec::new, |level| {
            level
                .subjects
                .iter()
                .filter(|s| filter.is_none_or(|f| f.accepts(s)))
                .collect()
        })
    }
}
