//! Printable GPA result reports
//!
//! Renders the current session's results (degree, combination, level, both
//! GPAs, classification and credit statistics) as HTML or Markdown, and
//! builds the plain-text share message.

pub mod formats;

use crate::core::catalog::Catalog;
use crate::core::engine::{format_points, GpaResult};
use crate::core::exclusion::is_excluded;
use crate::core::models::Subject;
use crate::core::session::Session;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Default heading printed at the top of reports
pub const DEFAULT_INSTITUTION: &str = "Faculty of Science, Eastern University, Sri Lanka";

/// One graded subject as shown in the report table
#[derive(Debug, Clone, PartialEq)]
pub struct GradedRow {
    /// Subject code
    pub code: String,
    /// Subject title
    pub name: String,
    /// Credit value
    pub credits: u32,
    /// Recorded letter grade
    pub grade: String,
    /// Credits × grade points, formatted to two decimals
    pub quality_points: String,
    /// Whether the subject is left out of the GPA
    pub excluded: bool,
    /// Whether the subject was added by the user
    pub custom: bool,
}

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Loaded catalog
    pub catalog: &'a Catalog,
    /// Session the results were computed from
    pub session: &'a Session,
    /// Computed metrics
    pub result: &'a GpaResult,
    /// Heading shown above the results
    pub institution: String,
    /// Human-readable generation date
    pub generated_on: String,
}

impl<'a> ReportContext<'a> {
    /// Create a report context dated today
    #[must_use]
    pub fn new(catalog: &'a Catalog, session: &'a Session, result: &'a GpaResult) -> Self {
        Self {
            catalog,
            session,
            result,
            institution: DEFAULT_INSTITUTION.to_string(),
            generated_on: chrono::Local::now().format("%B %-d, %Y").to_string(),
        }
    }

    /// Override the heading
    #[must_use]
    pub fn with_institution(mut self, institution: &str) -> Self {
        if !institution.trim().is_empty() {
            self.institution = institution.trim().to_string();
        }
        self
    }

    /// Override the generation date (used for reproducible output)
    #[must_use]
    pub fn with_date(mut self, generated_on: &str) -> Self {
        self.generated_on = generated_on.to_string();
        self
    }

    /// Degree description (e.g., "3-Year General Degree")
    #[must_use]
    pub const fn degree_text(&self) -> &'static str {
        self.session.degree_mode.description()
    }

    /// Selected combination name, or "All"
    #[must_use]
    pub fn combination_text(&self) -> String {
        self.session
            .combination
            .as_deref()
            .map_or_else(
                || "All".to_string(),
                |id| {
                    self.catalog
                        .combination(id)
                        .map_or_else(|| id.to_string(), |c| c.name.clone())
                },
            )
    }

    /// Level being viewed (e.g., "Level 200")
    #[must_use]
    pub fn level_text(&self) -> String {
        format!("Level {}", self.session.level)
    }

    /// Graded subjects in aggregation order
    #[must_use]
    pub fn graded_rows(&self) -> Vec<GradedRow> {
        crate::core::engine::candidate_subjects(
            self.catalog,
            self.session.degree_mode,
            &self.session.custom_subjects,
            None,
        )
        .into_iter()
        .filter_map(|subject| self.row(subject))
        .collect()
    }

    fn row(&self, subject: &Subject) -> Option<GradedRow> {
        let grade = self.session.grade(&subject.code)?;
        let points = f64::from(subject.credits) * self.catalog.grade_points(grade);
        Some(GradedRow {
            code: subject.code.clone(),
            name: subject.name.clone(),
            credits: subject.credits,
            grade: grade.to_string(),
            quality_points: format_points(points),
            excluded: is_excluded(&subject.code),
            custom: subject.is_custom(),
        })
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if rendering or writing the file fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if template rendering fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Plain-text message for sharing results
#[must_use]
pub fn share_message(result: &GpaResult) -> String {
    format!(
        "Check my GPA calculation:\nCumulative GPA: {}\nFinal GPA: {}\nClass: {}\n\nCalculate yours now!",
        format_points(result.cumulative_gpa),
        format_points(result.final_gpa),
        result.classification
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{parse, CatalogFormat};
    use crate::core::engine::DegreeMode;

    const CATALOG: &str = r#"{
        "levels": {"100": {"subjects": [
            {"code": "MAT101", "name": "Calculus", "credits": 3, "department": "Mathematics"},
            {"code": "ENG101", "name": "English", "credits": 2, "department": "English"},
            {"code": "PHY101", "name": "Mechanics", "credits": 3, "department": "Physics"}
        ]}},
        "combinations": {"MPC": {"name": "Maths, Physics & Chemistry"}},
        "grades": {"A": 4.0, "B": 3.0},
        "academicClass": {"first": {"min": 3.7, "label": "First Class"}}
    }"#;

    #[test]
    fn test_context_text_helpers() {
        let catalog = parse(CATALOG, CatalogFormat::Json).expect("catalog");
        let mut session = Session::new();
        session.set_degree_mode(DegreeMode::FourYear);
        let result = session.compute(&catalog);
        let ctx = ReportContext::new(&catalog, &session, &result).with_date("January 1, 2026");

        assert_eq!(ctx.degree_text(), "4-Year Honours/Special Degree");
        assert_eq!(ctx.combination_text(), "All");
        assert_eq!(ctx.level_text(), "Level 100");
        assert_eq!(ctx.generated_on, "January 1, 2026");
        assert_eq!(ctx.institution, DEFAULT_INSTITUTION);

        session
            .set_combination(&catalog, Some("MPC"))
            .expect("known combination");
        let ctx = ReportContext::new(&catalog, &session, &result).with_institution("  ");
        assert_eq!(ctx.combination_text(), "Maths, Physics & Chemistry");
        assert_eq!(ctx.institution, DEFAULT_INSTITUTION);
    }

    #[test]
    fn test_graded_rows_skip_ungraded() {
        let catalog = parse(CATALOG, CatalogFormat::Json).expect("catalog");
        let mut session = Session::new();
        session.set_grade("MAT101", "A");
        session.set_grade("ENG101", "B");
        let result = session.compute(&catalog);
        let ctx = ReportContext::new(&catalog, &session, &result);

        let rows = ctx.graded_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "MAT101");
        assert_eq!(rows[0].quality_points, "12.00");
        assert!(!rows[0].excluded);
        assert!(rows[1].excluded);
    }

    #[test]
    fn test_share_message() {
        let catalog = parse(CATALOG, CatalogFormat::Json).expect("catalog");
        let mut session = Session::new();
        session.set_grade("MAT101", "A");
        session.set_grade("ENG101", "B");
        let message = share_message(&session.compute(&catalog));
        assert!(message.contains("Cumulative GPA: 2.40"));
        assert!(message.contains("Final GPA: 4.00"));
        assert!(message.contains("Class: First Class"));
    }
}
