//! Session snapshots
//!
//! A snapshot is the JSON form of a [`Session`]:
//!
//! ```json
//! {
//!   "userGrades": { "MAT1013": "A" },
//!   "customSubjects": [ { "code": "PHY1999", "name": "Lab", "credits": 2, "department": "Custom" } ],
//!   "degreeMode": "3-year",
//!   "level": "100"
//! }
//! ```
//!
//! Missing fields fall back to an empty selection, a 3-year degree and level 100.

use crate::core::engine::{DegreeMode, GradeSelections};
use crate::core::models::{LevelId, Subject};
use crate::core::session::Session;
use crate::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while reading or writing snapshot files
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The file could not be read or written
    #[error("Snapshot I/O failed for {path}: {source}")]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid snapshot
    #[error("Invalid snapshot {path}: {source}")]
    Json {
        /// Snapshot path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Serializable session state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Letter grade per subject code
    #[serde(default)]
    pub user_grades: GradeSelections,
    /// User-added subjects
    #[serde(default)]
    pub custom_subjects: Vec<Subject>,
    /// Selected degree track
    #[serde(default)]
    pub degree_mode: DegreeMode,
    /// Level being viewed
    #[serde(default)]
    pub level: LevelId,
    /// Selected combination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combination: Option<String>,
}

impl Snapshot {
    /// Parse a snapshot from JSON text
    ///
    /// # Errors
    /// Returns the JSON error if the text is not a valid snapshot
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the snapshot as pretty-printed JSON
    ///
    /// # Errors
    /// Returns the JSON error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read a snapshot file
    ///
    /// # Errors
    /// Returns [`SnapshotError`] if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&content).map_err(|source| SnapshotError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Snapshot loaded from {}: {} grades, {} custom subjects",
            path.display(),
            snapshot.user_grades.len(),
            snapshot.custom_subjects.len()
        );
        Ok(snapshot)
    }

    /// Read a snapshot file, or start fresh when it does not exist yet
    ///
    /// # Errors
    /// Returns [`SnapshotError`] if an existing file cannot be read or parsed
    pub fn load_or_default(path: &Path) -> Result<Self, SnapshotError> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No snapshot at {}, starting a new session", path.display());
            Ok(Self::default())
        }
    }

    /// Write the snapshot, creating parent directories as needed
    ///
    /// # Errors
    /// Returns [`SnapshotError`] if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = self.to_json().map_err(|source| SnapshotError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)?;
        debug!("Snapshot saved to {}", path.display());
        Ok(())
    }

    /// Delete a snapshot file if it exists
    ///
    /// # Errors
    /// Returns [`SnapshotError::Io`] if the file exists but cannot be removed
    pub fn remove(path: &Path) -> Result<(), SnapshotError> {
        if path.exists() {
            fs::remove_file(path).map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        Self {
            user_grades: session.user_grades.clone(),
            custom_subjects: session.custom_subjects.clone(),
            degree_mode: session.degree_mode,
            level: session.level,
            combination: session.combination.clone(),
        }
    }
}

impl From<Snapshot> for Session {
    /// A level outside the saved degree mode is moved to the mode's top level.
    fn from(snapshot: Snapshot) -> Self {
        let level = if snapshot.degree_mode.includes(snapshot.level) {
            snapshot.level
        } else {
            snapshot.degree_mode.top_level()
        };
        Self {
            user_grades: snapshot.user_grades,
            custom_subjects: snapshot.custom_subjects,
            degree_mode: snapshot.degree_mode,
            level,
            combination: snapshot.combination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let snapshot = Snapshot::from_json("{}").expect("empty object is a valid snapshot");
        assert!(snapshot.user_grades.is_empty());
        assert!(snapshot.custom_subjects.is_empty());
        assert_eq!(snapshot.degree_mode, DegreeMode::ThreeYear);
        assert_eq!(snapshot.level, LevelId::L100);
        assert!(snapshot.combination.is_none());
    }

    #[test]
    fn test_parses_saved_shape() {
        let json = r#"{
            "userGrades": {"MAT101": "A", "PHY199": "B+"},
            "customSubjects": [{"code": "PHY199", "name": "Lab", "credits": 2, "department": "Custom"}],
            "degreeMode": "4-year",
            "level": "400"
        }"#;
        let snapshot = Snapshot::from_json(json).expect("snapshot should parse");
        assert_eq!(snapshot.user_grades.get("PHY199").map(String::as_str), Some("B+"));
        assert_eq!(snapshot.custom_subjects[0].credits, 2);
        assert_eq!(snapshot.degree_mode, DegreeMode::FourYear);
        assert_eq!(snapshot.level, LevelId::L400);
    }

    #[test]
    fn test_session_conversion_round_trip() {
        let mut session = Session::new();
        session.set_grade("MAT101", "A");
        session.set_degree_mode(DegreeMode::FourYear);
        session.set_level(LevelId::L200).expect("level allowed");

        let restored = Session::from(Snapshot::from(&session));
        assert_eq!(restored, session);
    }

    #[test]
    fn test_out_of_mode_level_is_clamped() {
        let snapshot = Snapshot {
            degree_mode: DegreeMode::ThreeYear,
            level: LevelId::L400,
            ..Snapshot::default()
        };
        assert_eq!(Session::from(snapshot).level, LevelId::L300);
    }

    #[test]
    fn test_invalid_json() {
        assert!(Snapshot::from_json(r#"{"degreeMode": "7-year"}"#).is_err());
        assert!(Snapshot::from_json("[1, 2]").is_err());
    }
}
