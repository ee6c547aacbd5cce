//! Markdown report generator
//!
//! Produces a plain Markdown summary that renders well in GitHub, GitLab and VS Code.

use super::ReportView;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "report.md")]
struct MarkdownReportTemplate {
    view: ReportView,
}

/// Markdown report generator
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let template = MarkdownReportTemplate {
            view: ReportView::from_context(ctx),
        };
        Ok(template.render()?)
    }
}
