//! Report format implementations
//!
//! Provides renderers for the supported report formats: HTML and Markdown.

pub mod html;
pub mod markdown;

pub use html::HtmlReporter;
pub use markdown::MarkdownReporter;

use super::{GradedRow, ReportContext};
use crate::core::engine::format_points;
use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown summary
    Markdown,
    /// Self-contained printable HTML page
    Html,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Pre-formatted values shared by every template
struct ReportView {
    institution: String,
    generated_on: String,
    degree: String,
    combination: String,
    level: String,
    cumulative_gpa: String,
    final_gpa: String,
    classification: String,
    total_credits: u32,
    subjects_completed: usize,
    credits_earned: u32,
    quality_points: String,
    excluded_count: usize,
    rows: Vec<GradedRow>,
}

impl ReportView {
    fn from_context(ctx: &ReportContext) -> Self {
        Self {
            institution: ctx.institution.clone(),
            generated_on: ctx.generated_on.clone(),
            degree: ctx.degree_text().to_string(),
            combination: ctx.combination_text(),
            level: ctx.level_text(),
            cumulative_gpa: format_points(ctx.result.cumulative_gpa),
            final_gpa: format_points(ctx.result.final_gpa),
            classification: ctx.result.classification.clone(),
            total_credits: ctx.result.total_credits,
            subjects_completed: ctx.result.subjects_with_grades,
            credits_earned: ctx.result.included_credits,
            quality_points: format_points(ctx.result.included_quality_points),
            excluded_count: ctx.result.excluded_count,
            rows: ctx.graded_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("htm".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_extension_and_display() {
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Markdown.extension(), "md");
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
    }
}
