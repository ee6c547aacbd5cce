//! Academic level model

use super::Subject;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of an academic level (year of study)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LevelId {
    /// First year
    #[default]
    L100,
    /// Second year
    L200,
    /// Third year
    L300,
    /// Fourth year (honours/special degrees only)
    L400,
}

impl LevelId {
    /// All levels in ascending order
    pub const ALL: [Self; 4] = [Self::L100, Self::L200, Self::L300, Self::L400];

    /// Numeric form of the level (100, 200, 300, 400)
    #[must_use]
    pub const fn number(self) -> u16 {
        match self {
            Self::L100 => 100,
            Self::L200 => 200,
            Self::L300 => 300,
            Self::L400 => 400,
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for LevelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "100" => Ok(Self::L100),
            "200" => Ok(Self::L200),
            "300" => Ok(Self::L300),
            "400" => Ok(Self::L400),
            other => Err(format!("Unknown level: '{other}' (expected 100, 200, 300 or 400)")),
        }
    }
}

impl Serialize for LevelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LevelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A level of study and the subjects offered in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcademicLevel {
    /// Level identifier
    pub id: LevelId,

    /// Display name (e.g., "Level 100 - First Year")
    pub name: String,

    /// Subjects in catalog order
    pub subjects: Vec<Subject>,
}

impl AcademicLevel {
    /// Create an empty level
    #[must_use]
    pub const fn new(id: LevelId, name: String) -> Self {
        Self {
            id,
            name,
            subjects: Vec::new(),
        }
    }

    /// Append a subject, keeping catalog order
    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    /// Total credits offered at this level
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.subjects.iter().map(|s| s.credits).sum()
    }
}
