//! Catalog document parsing
//!
//! A catalog document has four top-level sections:
//!
//! ```json
//! {
//!   "levels": { "100": { "name": "Level 100", "subjects": [ ... ] } },
//!   "combinations": { "MPC": { "name": "...", "description": "..." } },
//!   "grades": { "A+": 4.0, "A": 4.0, ... },
//!   "academicClass": { "first": { "min": 3.7, "label": "First Class" } }
//! }
//! ```
//!
//! `combinations` is optional. The same shape is accepted as TOML.

use super::Catalog;
use crate::core::models::{
    AcademicLevel, ClassificationRules, Combination, GradeScale, LevelId, Subject,
};
use crate::{debug, info};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The catalog file could not be read
    #[error("Catalog not reachable at {path}: {source}")]
    Unreachable {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON/TOML or has the wrong shape
    #[error("Malformed {format} catalog: {message}")]
    Malformed {
        /// Document format ("JSON" or "TOML")
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// A required top-level section is absent
    #[error("Catalog is missing the required '{0}' section")]
    MissingSection(&'static str),

    /// A level key is not one of 100, 200, 300, 400
    #[error("Unknown academic level '{0}' (expected 100, 200, 300 or 400)")]
    InvalidLevel(String),

    /// A subject entry is unusable
    #[error("Invalid subject '{code}': {reason}")]
    InvalidSubject {
        /// Offending subject code
        code: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two catalog subjects share a code
    #[error("Subject code '{0}' appears more than once in the catalog")]
    DuplicateCode(String),

    /// The grade scale violates its invariants
    #[error("Invalid grade scale: {0}")]
    InvalidGradeScale(String),
}

/// Catalog document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON document (default)
    Json,
    /// TOML document
    Toml,
}

impl CatalogFormat {
    /// Pick the format from a file extension; anything but `.toml` is JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    levels: Option<BTreeMap<String, RawLevel>>,
    combinations: Option<BTreeMap<String, Combination>>,
    grades: Option<HashMap<String, f64>>,
    academic_class: Option<ClassificationRules>,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    subjects: Vec<Subject>,
}

/// Load a catalog from a file, choosing the format from its extension
///
/// # Arguments
/// * `path` - Path to a `.json` or `.toml` catalog
///
/// # Errors
/// Returns a [`LoadError`] if the file cannot be read or the document is invalid
pub fn load<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    debug!("Reading catalog from {}", path.display());

    let content = fs::read_to_string(path).map_err(|source| LoadError::Unreachable {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse(&content, CatalogFormat::from_path(path))?;
    info!(
        "Catalog loaded from {}: {} levels, {} subjects",
        path.display(),
        catalog.levels().count(),
        catalog.codes().count()
    );
    Ok(catalog)
}

/// Parse a catalog document held in memory
///
/// # Errors
/// Returns a [`LoadError`] if the document is malformed or fails validation
pub fn parse(content: &str, format: CatalogFormat) -> Result<Catalog, LoadError> {
    let raw: RawCatalog = match format {
        CatalogFormat::Json => serde_json::from_str(content).map_err(|e| LoadError::Malformed {
            format: format.name(),
            message: e.to_string(),
        })?,
        CatalogFormat::Toml => toml::from_str(content).map_err(|e| LoadError::Malformed {
            format: format.name(),
            message: e.to_string(),
        })?,
    };
    build(raw)
}

fn build(raw: RawCatalog) -> Result<Catalog, LoadError> {
    let raw_levels = raw.levels.ok_or(LoadError::MissingSection("levels"))?;
    let raw_grades = raw.grades.ok_or(LoadError::MissingSection("grades"))?;
    let rules = raw
        .academic_class
        .ok_or(LoadError::MissingSection("academicClass"))?;

    let mut levels = Vec::with_capacity(raw_levels.len());
    for (key, raw_level) in raw_levels {
        let id: LevelId = key.parse().map_err(|_| LoadError::InvalidLevel(key.clone()))?;
        let name = raw_level.name.unwrap_or_else(|| format!("Level {id}"));
        let mut level = AcademicLevel::new(id, name);
        for subject in raw_level.subjects {
            level.add_subject(subject);
        }
        levels.push(level);
    }

    let grades = GradeScale::new(raw_grades).map_err(LoadError::InvalidGradeScale)?;

    if let Some(combinations) = &raw.combinations {
        debug!("Catalog defines {} combinations", combinations.len());
    }

    Catalog::new(levels, raw.combinations, grades, rules)
}
