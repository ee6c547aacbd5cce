//! Data models for the GPA calculator

pub mod classification;
pub mod combination;
pub mod grade;
pub mod level;
pub mod subject;

pub use classification::{ClassificationRule, ClassificationRules, UNCLASSIFIED};
pub use combination::Combination;
pub use grade::{GradeScale, GRADE_LETTERS};
pub use level::{AcademicLevel, LevelId};
pub use subject::Subject;
