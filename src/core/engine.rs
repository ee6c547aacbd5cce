//! GPA engine
//!
//! Aggregates credit/grade pairs across the levels selected by the degree
//! mode, applies the exclusion policy and derives the cumulative GPA, the
//! final GPA and the academic classification.
//!
//! Two averages are produced on purpose:
//! - the **cumulative GPA** divides included quality points by *all* graded
//!   credits, excluded subjects included;
//! - the **final GPA** divides the same quality points by included credits
//!   only, and is the value classification is based on.

use crate::core::catalog::Catalog;
use crate::core::exclusion::is_excluded;
use crate::core::models::{LevelId, Subject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Letter grade chosen per subject code. A missing key means "no grade entered".
pub type GradeSelections = BTreeMap<String, String>;

/// Degree track, which decides the levels that count toward the GPA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DegreeMode {
    /// Three-year general degree: levels 100-300
    #[default]
    #[serde(rename = "3-year")]
    ThreeYear,
    /// Four-year honours/special degree: levels 100-400
    #[serde(rename = "4-year")]
    FourYear,
}

impl DegreeMode {
    /// Levels aggregated under this mode, in ascending order
    #[must_use]
    pub const fn levels(self) -> &'static [LevelId] {
        match self {
            Self::ThreeYear => &[LevelId::L100, LevelId::L200, LevelId::L300],
            Self::FourYear => &[LevelId::L100, LevelId::L200, LevelId::L300, LevelId::L400],
        }
    }

    /// Whether a level can be selected under this mode
    #[must_use]
    pub fn includes(self, level: LevelId) -> bool {
        self.levels().contains(&level)
    }

    /// Highest level reachable under this mode
    #[must_use]
    pub const fn top_level(self) -> LevelId {
        match self {
            Self::ThreeYear => LevelId::L300,
            Self::FourYear => LevelId::L400,
        }
    }

    /// Human-readable degree name
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ThreeYear => "3-Year General Degree",
            Self::FourYear => "4-Year Honours/Special Degree",
        }
    }
}

impl fmt::Display for DegreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreeYear => write!(f, "3-year"),
            Self::FourYear => write!(f, "4-year"),
        }
    }
}

impl FromStr for DegreeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "3-year" | "3" | "three-year" | "general" => Ok(Self::ThreeYear),
            "4-year" | "4" | "four-year" | "honours" | "special" => Ok(Self::FourYear),
            _ => Err(format!("Unknown degree mode: {s}")),
        }
    }
}

/// Optional predicate restricting which catalog subjects take part
pub struct SubjectFilter {
    label: String,
    predicate: Box<dyn Fn(&Subject) -> bool>,
}

impl SubjectFilter {
    /// Build a filter from an arbitrary predicate
    pub fn new(label: impl Into<String>, predicate: impl Fn(&Subject) -> bool + 'static) -> Self {
        Self {
            label: label.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Keep only subjects tagged with the given combination
    #[must_use]
    pub fn combination(id: &str) -> Self {
        let tag = id.to_string();
        Self::new(id, move |subject: &Subject| subject.in_combination(&tag))
    }

    /// Whether a subject passes the filter
    #[must_use]
    pub fn accepts(&self, subject: &Subject) -> bool {
        (self.predicate)(subject)
    }

    /// Short description of the filter
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for SubjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectFilter")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Every metric derived from the current grade selections
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpaResult {
    /// Included quality points over all graded credits (2 d.p.)
    pub cumulative_gpa: f64,
    /// Included quality points over included credits (2 d.p.)
    pub final_gpa: f64,
    /// Classification label for the final GPA
    pub classification: String,
    /// Credits of every graded subject, excluded ones included
    pub total_credits: u32,
    /// Number of graded subjects
    pub subjects_with_grades: usize,
    /// Credits of graded subjects that count toward the GPA
    pub included_credits: u32,
    /// Sum of credits × grade points over included subjects (2 d.p.)
    pub included_quality_points: f64,
    /// Number of graded subjects left out by the exclusion policy
    pub excluded_count: usize,
}

impl fmt::Display for GpaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cumulative GPA:      {:.2}", self.cumulative_gpa)?;
        writeln!(f, "Final GPA:           {:.2}", self.final_gpa)?;
        writeln!(f, "Academic Class:      {}", self.classification)?;
        writeln!(f, "Total Credits:       {}", self.total_credits)?;
        writeln!(f, "Subjects Completed:  {}", self.subjects_with_grades)?;
        writeln!(f, "Credits Earned:      {}", self.included_credits)?;
        writeln!(f, "Quality Points:      {:.2}", self.included_quality_points)?;
        writeln!(f, "Excluded Subjects:   {}", self.excluded_count)
    }
}

#[derive(Debug, Default)]
struct Totals {
    total_credits: u32,
    subjects_with_grades: usize,
    included_credits: u32,
    included_quality_points: f64,
    excluded_count: usize,
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a GPA or quality-point value with two decimals
#[must_use]
pub fn format_points(value: f64) -> String {
    format!("{value:.2}")
}

/// Compute all GPA metrics.
///
/// Candidate subjects are the catalog subjects of every level selected by
/// `mode` (level order, then catalog order) followed by `custom_subjects`.
/// Subjects without a grade are skipped; unmapped grade letters are worth
/// 0.0 points. Never fails.
#[must_use]
pub fn compute(
    catalog: &Catalog,
    mode: DegreeMode,
    user_grades: &GradeSelections,
    custom_subjects: &[Subject],
) -> GpaResult {
    compute_filtered(catalog, mode, user_grades, custom_subjects, None)
}

/// Compute all GPA metrics with an optional filter over catalog subjects.
///
/// The filter is applied before candidate collection and never removes
/// custom subjects.
#[must_use]
pub fn compute_filtered(
    catalog: &Catalog,
    mode: DegreeMode,
    user_grades: &GradeSelections,
    custom_subjects: &[Subject],
    filter: Option<&SubjectFilter>,
) -> GpaResult {
    let mut totals = Totals::default();

    for subject in candidate_subjects(catalog, mode, custom_subjects, filter) {
        let Some(grade) = user_grades.get(&subject.code) else {
            continue;
        };

        totals.total_credits += subject.credits;
        totals.subjects_with_grades += 1;
        let quality_points = f64::from(subject.credits) * catalog.grade_points(grade);

        if is_excluded(&subject.code) {
            totals.excluded_count += 1;
        } else {
            totals.included_credits += subject.credits;
            totals.included_quality_points += quality_points;
        }
    }

    let cumulative_gpa = average(totals.included_quality_points, totals.total_credits);
    let final_gpa = average(totals.included_quality_points, totals.included_credits);

    GpaResult {
        cumulative_gpa,
        final_gpa,
        classification: catalog.classify(final_gpa).to_string(),
        total_credits: totals.total_credits,
        subjects_with_grades: totals.subjects_with_grades,
        included_credits: totals.included_credits,
        included_quality_points: round2(totals.included_quality_points),
        excluded_count: totals.excluded_count,
    }
}

/// Subjects that take part in aggregation, in aggregation order
#[must_use]
pub fn candidate_subjects<'a>(
    catalog: &'a Catalog,
    mode: DegreeMode,
    custom_subjects: &'a [Subject],
    filter: Option<&SubjectFilter>,
) -> Vec<&'a Subject> {
    mode.levels()
        .iter()
        .filter_map(|&id| catalog.level(id))
        .flat_map(|level| level.subjects.iter())
        .filter(|s| filter.is_none_or(|f| f.accepts(s)))
        .chain(custom_subjects.iter())
        .collect()
}

fn average(quality_points: f64, credits: u32) -> f64 {
    if credits == 0 {
        0.0
    } else {
        round2(quality_points / f64::from(credits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{parse, CatalogFormat};

    const CATALOG: &str = r#"{
        "levels": {
            "100": {"name": "Level 100", "subjects": [
                {"code": "MAT101", "name": "Calculus", "credits": 3, "department": "Mathematics", "combinations": ["MPC"]},
                {"code": "ENG101", "name": "English", "credits": 2, "department": "English"}
            ]},
            "400": {"name": "Level 400", "subjects": [
                {"code": "MAT401", "name": "Research Project", "credits": 6, "department": "Mathematics"}
            ]}
        },
        "grades": {"A": 4.0, "B": 3.0, "C": 2.0},
        "academicClass": {
            "first": {"min": 3.7, "label": "First Class"},
            "pass": {"min": 2.0, "label": "Pass"}
        }
    }"#;

    fn catalog() -> Catalog {
        parse(CATALOG, CatalogFormat::Json).expect("test catalog should load")
    }

    fn grades(pairs: &[(&str, &str)]) -> GradeSelections {
        pairs
            .iter()
            .map(|(code, grade)| ((*code).to_string(), (*grade).to_string()))
            .collect()
    }

    #[test]
    fn test_reference_scenario() {
        let result = compute(
            &catalog(),
            DegreeMode::ThreeYear,
            &grades(&[("MAT101", "A"), ("ENG101", "B")]),
            &[],
        );

        assert_eq!(result.total_credits, 5);
        assert_eq!(result.subjects_with_grades, 2);
        assert_eq!(result.excluded_count, 1);
        assert_eq!(result.included_credits, 3);
        assert!((result.included_quality_points - 12.0).abs() < 1e-9);
        assert!((result.cumulative_gpa - 2.4).abs() < 1e-9);
        assert!((result.final_gpa - 4.0).abs() < 1e-9);
        assert_eq!(result.classification, "First Class");
    }

    #[test]
    fn test_no_grades() {
        let result = compute(&catalog(), DegreeMode::FourYear, &GradeSelections::new(), &[]);
        assert_eq!(result.total_credits, 0);
        assert_eq!(result.subjects_with_grades, 0);
        assert!(result.cumulative_gpa.abs() < f64::EPSILON);
        assert!(result.final_gpa.abs() < f64::EPSILON);
        assert_eq!(result.classification, "—");
        assert_eq!(format_points(result.final_gpa), "0.00");
    }

    #[test]
    fn test_only_excluded_subjects_graded() {
        let result = compute(
            &catalog(),
            DegreeMode::ThreeYear,
            &grades(&[("ENG101", "A")]),
            &[],
        );
        assert_eq!(result.total_credits, 2);
        assert_eq!(result.included_credits, 0);
        assert!(result.cumulative_gpa.abs() < f64::EPSILON);
        assert!(result.final_gpa.abs() < f64::EPSILON);
    }

    #[test]
    fn test_level_400_only_counts_in_four_year_mode() {
        let selections = grades(&[("MAT101", "A"), ("MAT401", "C")]);
        let three = compute(&catalog(), DegreeMode::ThreeYear, &selections, &[]);
        let four = compute(&catalog(), DegreeMode::FourYear, &selections, &[]);

        assert_eq!(three.total_credits, 3);
        assert_eq!(four.total_credits, 9);
        // (3*4 + 6*2) / 9 = 2.666...
        assert!((four.final_gpa - 2.67).abs() < 1e-9);
        assert_eq!(four.classification, "Pass");
    }

    #[test]
    fn test_unmapped_grade_counts_as_zero() {
        let result = compute(
            &catalog(),
            DegreeMode::ThreeYear,
            &grades(&[("MAT101", "Q")]),
            &[],
        );
        assert_eq!(result.subjects_with_grades, 1);
        assert_eq!(result.included_credits, 3);
        assert!(result.included_quality_points.abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_subjects_are_aggregated() {
        let custom = vec![Subject::custom("PHY199".to_string(), "Lab".to_string(), 2)];
        let result = compute(
            &catalog(),
            DegreeMode::ThreeYear,
            &grades(&[("MAT101", "A"), ("PHY199", "B")]),
            &custom,
        );
        assert_eq!(result.total_credits, 5);
        // (12 + 6) / 5 = 3.6
        assert!((result.final_gpa - 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_grades_for_unknown_codes_are_ignored() {
        let result = compute(
            &catalog(),
            DegreeMode::FourYear,
            &grades(&[("XYZ999", "A")]),
            &[],
        );
        assert_eq!(result.subjects_with_grades, 0);
    }

    #[test]
    fn test_filter_restricts_catalog_but_not_custom() {
        let custom = vec![Subject::custom("BIO199".to_string(), "Field Work".to_string(), 1)];
        let selections = grades(&[("MAT101", "A"), ("ENG101", "A"), ("BIO199", "A")]);
        let filter = SubjectFilter::combination("MPC");

        let catalog_subjects = catalog();
        let candidates: Vec<&str> =
            candidate_subjects(&catalog_subjects, DegreeMode::ThreeYear, &custom, Some(&filter))
                .iter()
                .map(|s| s.code.as_str())
                .collect();
        assert_eq!(candidates, vec!["MAT101", "BIO199"]);

        let result = compute_filtered(
            &catalog(),
            DegreeMode::ThreeYear,
            &selections,
            &custom,
            Some(&filter),
        );
        assert_eq!(result.total_credits, 4);
        assert_eq!(result.excluded_count, 0);
    }

    #[test]
    fn test_degree_mode_parsing_and_levels() {
        assert_eq!("3-year".parse::<DegreeMode>(), Ok(DegreeMode::ThreeYear));
        assert_eq!("Honours".parse::<DegreeMode>(), Ok(DegreeMode::FourYear));
        assert!("5-year".parse::<DegreeMode>().is_err());
        assert!(!DegreeMode::ThreeYear.includes(LevelId::L400));
        assert!(DegreeMode::FourYear.includes(LevelId::L400));
        assert_eq!(DegreeMode::default(), DegreeMode::ThreeYear);
        assert_eq!(DegreeMode::FourYear.to_string(), "4-year");
    }

    #[test]
    fn test_round2() {
        assert!((round2(2.666_666) - 2.67).abs() < 1e-9);
        assert!((round2(12.0) - 12.0).abs() < 1e-9);
        assert_eq!(format_points(3.6), "3.60");
    }

    #[test]
    fn test_display_formats_two_decimals() {
        let result = compute(
            &catalog(),
            DegreeMode::ThreeYear,
            &grades(&[("MAT101", "A"), ("ENG101", "B")]),
            &[],
        );
        let text = result.to_string();
        assert!(text.contains("Cumulative GPA:      2.40"));
        assert!(text.contains("Quality Points:      12.00"));
    }
}
